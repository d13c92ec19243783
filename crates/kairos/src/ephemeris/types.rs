use crate::bodies::Body;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors a longitude oracle may report for a single sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Body {0} is not supported by this oracle")]
    UnsupportedBody(Body),
    #[error("Timestamp {0} is outside the supported range")]
    OutOfRange(DateTime<Utc>),
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Source of ecliptic longitudes.
///
/// Output need not be normalized; the engine folds every sample into
/// [0, 360) itself.
pub trait LongitudeOracle {
    fn longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, OracleError>;
}

impl<F> LongitudeOracle for F
where
    F: Fn(Body, DateTime<Utc>) -> Result<f64, OracleError>,
{
    fn longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, OracleError> {
        self(body, at)
    }
}

/// Longitude source whose samples may suspend (network or file backed).
#[async_trait]
pub trait AsyncLongitudeOracle: Send + Sync {
    async fn longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, OracleError>;
}

/// Runs a synchronous oracle behind the async interface.
pub struct SyncOracle<O>(pub O);

#[async_trait]
impl<O> AsyncLongitudeOracle for SyncOracle<O>
where
    O: LongitudeOracle + Send + Sync,
{
    async fn longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, OracleError> {
        self.0.longitude(body, at)
    }
}
