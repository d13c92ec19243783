use serde::{Deserialize, Serialize};

pub const DAYS_PER_YEAR: f64 = 365.25;

/// Time for two bodies to return to the same relative configuration (years).
///
/// Equal periods would divide by zero in the general formula; they return the
/// shared period instead.
pub fn synodic_period(period_a: f64, period_b: f64) -> f64 {
    if period_a == period_b {
        return period_a;
    }
    1.0 / (1.0 / period_a - 1.0 / period_b).abs()
}

/// How often an aspect with `occurrences_per_cycle` recurs (years).
///
/// The synodic period is split evenly between the occurrences the aspect
/// table assigns to one cycle (1 for conjunction, 3 for trine, ...).
///
/// # Panics
/// When `occurrences_per_cycle` is zero. Validated tables never carry zero.
pub fn synodic_frequency(period_a: f64, period_b: f64, occurrences_per_cycle: u32) -> f64 {
    assert!(occurrences_per_cycle > 0, "occurrences_per_cycle must be at least 1");
    synodic_period(period_a, period_b) / f64::from(occurrences_per_cycle)
}

/// Human-readable bucket for a recurrence interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyBand {
    Days,
    Months,
    Years,
    Decades,
    Generational,
}

impl FrequencyBand {
    pub fn classify(frequency_years: f64) -> Self {
        if frequency_years < 1.0 / 12.0 {
            FrequencyBand::Days
        } else if frequency_years < 1.0 {
            FrequencyBand::Months
        } else if frequency_years < 20.0 {
            FrequencyBand::Years
        } else if frequency_years < 80.0 {
            FrequencyBand::Decades
        } else {
            FrequencyBand::Generational
        }
    }

    /// Render an interval in the unit this band implies, e.g. "every 19.9 years".
    pub fn describe(frequency_years: f64) -> String {
        match Self::classify(frequency_years) {
            FrequencyBand::Days => format!("every {:.1} days", frequency_years * DAYS_PER_YEAR),
            FrequencyBand::Months => format!("every {:.1} months", frequency_years * 12.0),
            FrequencyBand::Years | FrequencyBand::Decades => format!("every {:.1} years", frequency_years),
            FrequencyBand::Generational => format!("about once in {:.0} years", frequency_years),
        }
    }
}
