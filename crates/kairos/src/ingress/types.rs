use crate::angle::normalize;
use crate::bodies::Body;
use crate::error::EngineError;
use crate::zodiac::{resolve_sign, SignPosition, ZodiacSign};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A body entering a new sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngressEvent {
    pub body: Body,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "fromSign")]
    pub from_sign: ZodiacSign,
    #[serde(rename = "toSign")]
    pub to_sign: ZodiacSign,
    #[serde(rename = "degreeIntoSign")]
    pub degree_into_sign: f64,
    /// The crossing moved backward through the zodiac
    pub retrograde: bool,
}

/// How precisely a detected crossing is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Refinement {
    /// Report the first sample found in the new sign.
    #[default]
    None,
    /// Bisect between the bracketing samples until the bracket is no wider
    /// than `tolerance` or `max_iterations` probes have been made.
    Bisection { tolerance: Duration, max_iterations: u32 },
}

impl Refinement {
    /// Bisection to within one minute.
    pub fn bisection() -> Self {
        Refinement::Bisection {
            tolerance: Duration::minutes(1),
            max_iterations: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Sampling step; must be positive.
    pub step: Duration,
    pub refinement: Refinement,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            step: Duration::days(1),
            refinement: Refinement::None,
        }
    }
}

impl ScanSettings {
    pub fn with_step(step: Duration) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    pub fn refined(mut self, refinement: Refinement) -> Self {
        self.refinement = refinement;
        self
    }

    pub(crate) fn validate_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), EngineError> {
        if self.step <= Duration::zero() {
            return Err(EngineError::InvalidRange {
                message: format!("step must be positive, got {}", self.step),
            });
        }
        if end < start {
            return Err(EngineError::InvalidRange {
                message: format!("end {} precedes start {}", end, start),
            });
        }
        if let Refinement::Bisection { tolerance, .. } = self.refinement {
            if tolerance <= Duration::zero() {
                return Err(EngineError::InvalidRange {
                    message: format!("refinement tolerance must be positive, got {}", tolerance),
                });
            }
        }
        Ok(())
    }
}

/// Cooperative cancellation flag checked between sample steps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn check(token: Option<&CancelToken>) -> Result<(), EngineError> {
        match token {
            Some(token) if token.is_cancelled() => Err(EngineError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// One resolved oracle reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample {
    pub at: DateTime<Utc>,
    pub longitude: f64,
    pub position: SignPosition,
}

impl Sample {
    /// Normalize and resolve a raw oracle reading.
    pub fn resolve(body: Body, at: DateTime<Utc>, raw: f64) -> Result<Self, EngineError> {
        if !raw.is_finite() {
            return Err(EngineError::NonFiniteLongitude {
                body,
                timestamp: at,
                value: raw,
            });
        }
        let longitude = normalize(raw);
        Ok(Self {
            at,
            longitude,
            position: resolve_sign(longitude),
        })
    }

    pub fn same_sign(&self, other: &Sample) -> bool {
        self.position.sign == other.position.sign
    }
}
