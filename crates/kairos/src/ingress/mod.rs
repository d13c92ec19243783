//! Sign ingress detection over a time range.
//!
//! The scanner samples a longitude oracle at a fixed step and reports every
//! pair of adjacent samples that resolve to different signs. Detection only
//! compares sign indices, so backward (retrograde) crossings are found the
//! same way as forward ones.
//!
//! A body that leaves a sign and returns within a single step is not seen.
//! Pick the step with the fastest body in mind; the Moon covers about 13° a
//! day, and slow planets near a station can hover on a boundary for weeks.

mod refine;
pub mod scanner;
mod tracker;
pub mod types;

pub use scanner::{sort_chronologically, BodyScan, IngressScanner};
pub(crate) use tracker::CrossingTracker;
pub use types::{CancelToken, IngressEvent, Refinement, ScanSettings};
pub(crate) use types::Sample;
