use crate::aspects::AspectKind;
use crate::bodies::Body;
use crate::ephemeris::OracleError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by the timing engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Longitude oracle failed for {body} at {timestamp}: {source}")]
    Oracle {
        body: Body,
        timestamp: DateTime<Utc>,
        #[source]
        source: OracleError,
    },
    #[error("Longitude oracle returned a non-finite value ({value}) for {body} at {timestamp}")]
    NonFiniteLongitude {
        body: Body,
        timestamp: DateTime<Utc>,
        value: f64,
    },
    #[error("Invalid scan range: {message}")]
    InvalidRange { message: String },
    #[error("Scan cancelled")]
    Cancelled,
    #[error("Unrecognized body identifier: {0}")]
    UnrecognizedBody(String),
    #[error("Unrecognized aspect identifier: {0}")]
    UnrecognizedAspect(String),
    #[error("Invalid table: {0}")]
    InvalidTable(String),
    #[error("Orb ranges of {first} and {second} overlap")]
    OverlappingOrbs { first: AspectKind, second: AspectKind },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Scan task failed: {0}")]
    TaskFailed(String),
}
