//! Readout text formatting
//!
//! ```text
//! 76% Heat
//! 87 KPH
//! ```

use crate::settings::Units;
use crate::telemetry::{TelemetrySnapshot, UnitSystem};
use crate::units::round_to_i32;

/// Speed unit after resolving [`Units::Automatic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    /// Kilometres per hour
    Kph,
    /// Miles per hour
    Mph,
}

impl SpeedUnit {
    /// Suffix shown after the speed value
    pub fn suffix(self) -> &'static str {
        match self {
            SpeedUnit::Kph => "KPH",
            SpeedUnit::Mph => "MPH",
        }
    }
}

/// Resolve the speed unit. Automatic follows the game preference and falls
/// back to km/h when no preference is available.
pub fn resolve_units(units: Units, snapshot: &TelemetrySnapshot) -> SpeedUnit {
    match units {
        Units::Kph => SpeedUnit::Kph,
        Units::Mph => SpeedUnit::Mph,
        Units::Automatic => match snapshot.preferred_units {
            Some(UnitSystem::Imperial) => SpeedUnit::Mph,
            Some(UnitSystem::Metric) | None => SpeedUnit::Kph,
        },
    }
}

/// Build the two-line heat and speed readout.
pub fn format_display_text(heat_level: f64, units: Units, snapshot: &TelemetrySnapshot) -> String {
    let unit = resolve_units(units, snapshot);
    let speed = match unit {
        SpeedUnit::Kph => snapshot.speed_kph,
        SpeedUnit::Mph => snapshot.speed_mph,
    };

    format!(
        "{}% Heat\n{} {}",
        round_to_i32(heat_level * 100.0),
        round_to_i32(speed),
        unit.suffix()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot(kph: f64, mph: f64, preferred_units: Option<UnitSystem>) -> TelemetrySnapshot {
        TelemetrySnapshot {
            heat_level: 0.0,
            speed_kph: kph,
            speed_mph: mph,
            preferred_units,
            car_present: true,
        }
    }

    #[test]
    fn test_kph_rounding() {
        let snap = snapshot(87.4, 54.3, None);
        assert_eq!(format_display_text(0.755, Units::Kph, &snap), "76% Heat\n87 KPH");
    }

    #[test]
    fn test_mph_explicit() {
        let snap = snapshot(89.5, 55.6, Some(UnitSystem::Metric));
        assert_eq!(format_display_text(0.1, Units::Mph, &snap), "10% Heat\n56 MPH");
    }

    #[test]
    fn test_automatic_imperial_matches_mph() {
        let snap = snapshot(89.5, 55.6, Some(UnitSystem::Imperial));
        assert_eq!(
            format_display_text(0.42, Units::Automatic, &snap),
            format_display_text(0.42, Units::Mph, &snap)
        );
    }

    #[test]
    fn test_automatic_without_preference_uses_kph() {
        let snap = snapshot(89.5, 55.6, None);
        assert_eq!(resolve_units(Units::Automatic, &snap), SpeedUnit::Kph);
        assert_eq!(format_display_text(0.0, Units::Automatic, &snap), "0% Heat\n90 KPH");
    }

    #[test]
    fn test_overheat_above_hundred_percent() {
        let snap = snapshot(0.0, 0.0, None);
        assert_eq!(format_display_text(1.25, Units::Kph, &snap), "125% Heat\n0 KPH");
    }

    #[test]
    fn test_nan_heat_renders_zero() {
        let snap = snapshot(10.0, 6.2, None);
        assert_eq!(format_display_text(f64::NAN, Units::Kph, &snap), "0% Heat\n10 KPH");
    }
}
