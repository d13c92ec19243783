//! Closed-form aspect timing: how often an aspect recurs and how long it lasts.

pub mod duration;
pub mod frequency;

pub use duration::{estimate_duration, TransitDuration};
pub use frequency::{synodic_frequency, synodic_period, FrequencyBand, DAYS_PER_YEAR};
