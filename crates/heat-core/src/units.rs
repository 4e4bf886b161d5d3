//! Unit Conversion Functions
//!
//! Speed conversions and the integer rounding used for on-screen readouts:
//! - Speed: km/h ↔ mph
//! - Readout rounding: nearest integer, halves away from zero

const MPH_PER_KMH: f64 = 0.62137119223733;

/// Convert km/h to mph
pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * MPH_PER_KMH
}

/// Convert mph to km/h
pub fn mph_to_kmh(mph: f64) -> f64 {
    mph / MPH_PER_KMH
}

/// Round a readout value to the nearest integer.
///
/// Halves round away from zero. NaN becomes 0 and values outside the `i32`
/// range saturate, so a broken sensor never panics the display path.
pub fn round_to_i32(value: f64) -> i32 {
    // `as` saturates and maps NaN to 0
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmh_mph_conversion() {
        assert!((kmh_to_mph(100.0) - 62.14).abs() < 0.01);
        assert!((mph_to_kmh(62.14) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_speed() {
        assert_eq!(kmh_to_mph(0.0), 0.0);
        assert_eq!(mph_to_kmh(0.0), 0.0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_i32(75.5), 76);
        assert_eq!(round_to_i32(87.4), 87);
        assert_eq!(round_to_i32(-2.5), -3);
        assert_eq!(round_to_i32(0.49), 0);
    }

    #[test]
    fn test_round_saturates() {
        assert_eq!(round_to_i32(f64::NAN), 0);
        assert_eq!(round_to_i32(f64::INFINITY), i32::MAX);
        assert_eq!(round_to_i32(1e12), i32::MAX);
    }
}
