#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod mean_motion;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisOracle;
pub use mean_motion::MeanMotionOracle;
pub use types::{AsyncLongitudeOracle, LongitudeOracle, OracleError, SyncOracle};
