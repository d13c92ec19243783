//! Circular degree arithmetic on the ecliptic.
//!
//! Every longitude is folded into [0, 360) before it is compared or mapped to a
//! sign. Rust's `%` keeps the sign of the dividend (`-1.0 % 360.0 == -1.0`), so
//! folding goes through `rem_euclid` instead.

/// Degrees in a full turn of the zodiac.
pub const FULL_CIRCLE: f64 = 360.0;

/// Half a turn; the largest minor-arc separation.
pub const HALF_CIRCLE: f64 = 180.0;

/// Fold any degree value into [0, 360).
///
/// `360.0` maps to `0.0`, as does any tiny negative input whose euclidean
/// remainder rounds up to a full circle.
pub fn normalize(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(FULL_CIRCLE);
    if folded >= FULL_CIRCLE {
        0.0
    } else {
        folded
    }
}

/// Signed difference `a - b` folded into [-180, 180).
///
/// Positive means `a` lies ahead of `b` in zodiacal order.
pub fn signed_difference(a: f64, b: f64) -> f64 {
    let diff = normalize(a - b);
    if diff >= HALF_CIRCLE {
        diff - FULL_CIRCLE
    } else {
        diff
    }
}

/// Minor-arc separation between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let raw = (normalize(a) - normalize(b)).abs();
    if raw > HALF_CIRCLE {
        FULL_CIRCLE - raw
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_negative_values() {
        assert_eq!(normalize(-730.5), 349.5);
        assert_eq!(normalize(-1.0), 359.0);
        assert_eq!(normalize(-360.0), 0.0);
    }

    #[test]
    fn test_normalize_full_circle_is_zero() {
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(720.0), 0.0);
        assert_eq!(normalize(0.0), 0.0);
    }

    #[test]
    fn test_normalize_tiny_negative_stays_in_range() {
        let value = normalize(-1e-18);
        assert!((0.0..FULL_CIRCLE).contains(&value));
    }

    #[test]
    fn test_normalize_is_periodic() {
        for base in [0.0, 12.25, 179.5, 359.75, -45.5] {
            let expected = normalize(base);
            for k in -5..=5 {
                let shifted = normalize(base + FULL_CIRCLE * k as f64);
                assert_eq!(shifted, expected, "base {base} shifted by {k} turns");
                assert!((0.0..FULL_CIRCLE).contains(&shifted));
            }
        }
    }

    #[test]
    fn test_signed_difference_wraps() {
        assert_eq!(signed_difference(10.0, 350.0), 20.0);
        assert_eq!(signed_difference(350.0, 10.0), -20.0);
        assert_eq!(signed_difference(180.0, 0.0), -180.0);
    }

    #[test]
    fn test_separation_uses_minor_arc() {
        assert_eq!(separation(10.0, 350.0), 20.0);
        assert_eq!(separation(0.0, 180.0), 180.0);
        assert_eq!(separation(-30.0, 30.0), 60.0);
    }
}
