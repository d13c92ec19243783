//! Transit and aspect timing engine.
//!
//! Kairos consumes a "longitude at time T" oracle and answers three questions:
//! when does a body change zodiac sign (ingress scanning), which aspect do two
//! bodies currently form, and how long and how often does that aspect hold.

pub mod angle;
pub mod aspects;
pub mod bodies;
pub mod config;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod ingress;
pub mod source;
pub mod tables;
pub mod timing;
pub mod zodiac;

pub use angle::normalize;
pub use aspects::{evaluate_aspect, AspectCalculator, AspectDefinition, AspectKind, AspectMatch, AspectObservation};
pub use bodies::Body;
pub use engine::{AspectTiming, TransitEngine};
pub use ephemeris::{AsyncLongitudeOracle, LongitudeOracle, MeanMotionOracle, OracleError};
pub use error::EngineError;
pub use ingress::{CancelToken, IngressEvent, IngressScanner, Refinement, ScanSettings};
pub use source::AsyncIngressScanner;
pub use tables::{BodyTraits, EngineTables, UnknownAspectDefault, UnknownBodyDefault, UnknownIdentifierPolicy};
pub use timing::{estimate_duration, synodic_frequency, synodic_period, FrequencyBand, TransitDuration};
pub use zodiac::{resolve_sign, SignPosition, ZodiacSign};
