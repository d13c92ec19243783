use serde::{Deserialize, Serialize};

/// How long an aspect stays in orb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitDuration {
    /// Time to sweep from +max orb through exact to -max orb (days)
    #[serde(rename = "totalDurationDays")]
    pub total_duration_days: f64,
    /// Time left before the orb reaches its maximum (days)
    #[serde(rename = "remainingDays")]
    pub remaining_days: f64,
}

/// Estimate total and remaining in-orb time from mean daily speeds.
///
/// The closing rate is approximated as `speed_a + speed_b` whatever the
/// direction of motion. The true rate of change of the separation is the
/// difference of signed speeds and varies with retrograde motion, so treat
/// the result as an approximation.
///
/// # Panics
/// If the summed speed is not positive, or if `current_orb` exceeds
/// `max_orb`: an aspect outside its orb is never active, so asking for its
/// duration is a caller bug.
pub fn estimate_duration(speed_a: f64, speed_b: f64, max_orb: f64, current_orb: f64) -> TransitDuration {
    let relative_speed = speed_a + speed_b;
    assert!(
        relative_speed > 0.0,
        "relative speed must be positive, got {relative_speed}"
    );
    assert!(
        current_orb <= max_orb,
        "current orb {current_orb} exceeds max orb {max_orb}"
    );

    TransitDuration {
        total_duration_days: (max_orb * 2.0) / relative_speed,
        remaining_days: (max_orb - current_orb) / relative_speed,
    }
}
