use crate::zodiac::signs::ZodiacSign;
use serde::{Deserialize, Serialize};

/// Width of one sign in degrees.
pub const SIGN_SPAN: f64 = 30.0;

/// A longitude expressed as a sign plus the degree within it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
}

impl SignPosition {
    pub fn index(&self) -> u8 {
        self.sign.index()
    }
}

/// Map a normalized longitude onto its sign.
///
/// The input must already be in [0, 360); it is not re-normalized here. The
/// index is clamped to 0–11 so a value that lands on exactly 360.0 through
/// floating-point drift still resolves to Pisces instead of overflowing.
pub fn resolve_sign(normalized_longitude: f64) -> SignPosition {
    let index = (normalized_longitude / SIGN_SPAN).floor().clamp(0.0, 11.0) as u8;
    SignPosition {
        sign: ZodiacSign::from_index(index),
        degree_in_sign: normalized_longitude - f64::from(index) * SIGN_SPAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::normalize;

    #[test]
    fn test_resolve_sign_boundaries() {
        let aries = resolve_sign(0.0);
        assert_eq!(aries.sign, ZodiacSign::Aries);
        assert_eq!(aries.degree_in_sign, 0.0);

        let taurus = resolve_sign(30.0);
        assert_eq!(taurus.sign, ZodiacSign::Taurus);
        assert_eq!(taurus.degree_in_sign, 0.0);

        let pisces = resolve_sign(359.5);
        assert_eq!(pisces.sign, ZodiacSign::Pisces);
        assert_eq!(pisces.degree_in_sign, 29.5);
    }

    #[test]
    fn test_resolve_sign_clamps_full_circle() {
        let position = resolve_sign(360.0);
        assert_eq!(position.sign, ZodiacSign::Pisces);
        assert_eq!(position.index(), 11);
    }

    #[test]
    fn test_resolve_sign_ranges() {
        let mut lon = -1000.0;
        while lon < 1000.0 {
            let position = resolve_sign(normalize(lon));
            assert!(position.index() <= 11);
            assert!(
                (0.0..SIGN_SPAN).contains(&position.degree_in_sign),
                "degree {} out of range for {lon}",
                position.degree_in_sign
            );
            lon += 7.3;
        }
    }
}
