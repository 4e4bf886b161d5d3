//! Activation policy

use crate::settings::{Activation, Settings};
use crate::telemetry::TelemetrySnapshot;

/// Decide whether the readout is shown this tick.
///
/// Without a car nothing is shown, whatever the activation mode. Warning mode
/// uses a strict `>` against the threshold.
pub fn should_display(settings: &Settings, snapshot: &TelemetrySnapshot, toggled: bool) -> bool {
    if !snapshot.car_present {
        return false;
    }

    match settings.activation {
        Activation::Always => true,
        Activation::Warning => snapshot.heat_level > settings.warning_threshold,
        Activation::Toggle => toggled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(activation: Activation, warning_threshold: f64) -> Settings {
        Settings {
            activation,
            warning_threshold,
            ..Settings::default()
        }
    }

    fn car(heat_level: f64) -> TelemetrySnapshot {
        TelemetrySnapshot::from_kph(heat_level, 120.0, None)
    }

    #[test]
    fn test_no_car_never_displays() {
        let absent = TelemetrySnapshot {
            heat_level: 5.0,
            ..TelemetrySnapshot::absent()
        };
        for activation in [Activation::Always, Activation::Warning, Activation::Toggle] {
            for toggled in [false, true] {
                assert!(!should_display(&settings(activation, -1.0), &absent, toggled));
            }
        }
    }

    #[test]
    fn test_always_mode() {
        assert!(should_display(&settings(Activation::Always, 0.8), &car(0.0), false));
    }

    #[test]
    fn test_warning_threshold_is_strict() {
        let s = settings(Activation::Warning, 0.8);
        assert!(!should_display(&s, &car(0.8), false));
        assert!(should_display(&s, &car(0.8 + f64::EPSILON), false));
        assert!(!should_display(&s, &car(0.3), true));
    }

    #[test]
    fn test_warning_threshold_out_of_range() {
        assert!(should_display(&settings(Activation::Warning, -0.5), &car(0.0), false));
        assert!(!should_display(&settings(Activation::Warning, 1.5), &car(1.0), false));
    }

    #[test]
    fn test_toggle_mode_follows_flag() {
        let s = settings(Activation::Toggle, 0.8);
        assert!(!should_display(&s, &car(0.99), false));
        assert!(should_display(&s, &car(0.0), true));
    }
}
