pub mod calculator;
pub mod types;

pub use calculator::{evaluate_aspect, AspectCalculator, EXACT_THRESHOLD};
pub use types::{AspectDefinition, AspectKind, AspectMatch, AspectObservation};
