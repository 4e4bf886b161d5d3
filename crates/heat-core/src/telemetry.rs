//! Telemetry snapshots
//!
//! One snapshot is pulled from the host per tick. Absent values (no car, no
//! options manager) are expressed as zeros and `None`, never as errors.

use serde::{Deserialize, Serialize};

use crate::units::kmh_to_mph;

/// The game's global unit-system preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Kilometres
    Metric,
    /// Miles
    Imperial,
}

/// Vehicle state read from the host for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Overheat fraction, 0 when no car is present
    pub heat_level: f64,
    /// Speed in km/h
    pub speed_kph: f64,
    /// Speed in mph
    pub speed_mph: f64,
    /// Global unit preference, if the options are loaded
    pub preferred_units: Option<UnitSystem>,
    /// Whether a local player car exists
    pub car_present: bool,
}

impl TelemetrySnapshot {
    /// Snapshot for a tick with no active vehicle
    pub fn absent() -> Self {
        Self::default()
    }

    /// Snapshot for a present car, deriving mph from km/h
    pub fn from_kph(heat_level: f64, speed_kph: f64, preferred_units: Option<UnitSystem>) -> Self {
        Self {
            heat_level,
            speed_kph,
            speed_mph: kmh_to_mph(speed_kph),
            preferred_units,
            car_present: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_snapshot() {
        let snap = TelemetrySnapshot::absent();
        assert!(!snap.car_present);
        assert_eq!(snap.heat_level, 0.0);
        assert_eq!(snap.speed_kph, 0.0);
        assert_eq!(snap.preferred_units, None);
    }

    #[test]
    fn test_from_kph_derives_mph() {
        let snap = TelemetrySnapshot::from_kph(0.4, 100.0, Some(UnitSystem::Imperial));
        assert!(snap.car_present);
        assert!((snap.speed_mph - 62.14).abs() < 0.01);
    }
}
