//! Sub-step location of a sign crossing by bisection.
//!
//! The bracket starts with the last sample in the old sign (`low`) and the
//! first sample outside it (`high`). Each probe that still resolves to the old
//! sign moves `low` forward; anything else moves `high` back. Membership in the
//! old sign is the only test, so the search works the same for prograde and
//! retrograde crossings.

use crate::ingress::types::Sample;
use chrono::{DateTime, Duration, Utc};

pub(crate) struct CrossingBracket {
    low: Sample,
    high: Sample,
    tolerance: Duration,
    remaining: u32,
}

impl CrossingBracket {
    pub fn new(low: Sample, high: Sample, tolerance: Duration, max_iterations: u32) -> Self {
        Self {
            low,
            high,
            tolerance,
            remaining: max_iterations,
        }
    }

    /// Next instant to sample, or `None` once the bracket has converged.
    pub fn next_probe(&self) -> Option<DateTime<Utc>> {
        let width = self.high.at - self.low.at;
        if self.remaining == 0 || width <= self.tolerance {
            return None;
        }
        Some(self.low.at + width / 2)
    }

    pub fn narrow(&mut self, probe: Sample) {
        self.remaining = self.remaining.saturating_sub(1);
        if probe.same_sign(&self.low) {
            self.low = probe;
        } else {
            self.high = probe;
        }
    }

    /// Earliest known sample outside the old sign.
    pub fn crossing(&self) -> Sample {
        self.high
    }
}
