//! The three queries the presentation layer consumes: ingress scanning,
//! the current aspect between two bodies, and aspect timing.

use crate::angle::{normalize, signed_difference};
use crate::aspects::{AspectCalculator, AspectKind, AspectObservation};
use crate::bodies::Body;
use crate::ephemeris::LongitudeOracle;
use crate::error::EngineError;
use crate::ingress::{CancelToken, IngressEvent, IngressScanner, ScanSettings};
use crate::tables::{EngineTables, UnknownIdentifierPolicy};
use crate::timing::{estimate_duration, synodic_frequency, FrequencyBand, TransitDuration};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Interval used to estimate each body's speed for applying/separating.
const MOTION_PROBE_MINUTES: i64 = 60;

/// How often an aspect between two bodies recurs and how long it holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectTiming {
    /// `None` when an unknown aspect was resolved through the fallback policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect: Option<AspectKind>,
    #[serde(rename = "frequencyYears")]
    pub frequency_years: f64,
    pub band: FrequencyBand,
    pub duration: TransitDuration,
}

pub struct TransitEngine<'t, O: LongitudeOracle> {
    tables: &'t EngineTables,
    oracle: O,
    policy: UnknownIdentifierPolicy,
    scan_settings: ScanSettings,
    cancel: Option<CancelToken>,
}

impl<O: LongitudeOracle> TransitEngine<'static, O> {
    /// Engine over the standard tables.
    pub fn new(oracle: O) -> Self {
        TransitEngine::with_tables(EngineTables::standard(), oracle)
    }
}

impl<'t, O: LongitudeOracle> TransitEngine<'t, O> {
    pub fn with_tables(tables: &'t EngineTables, oracle: O) -> Self {
        Self {
            tables,
            oracle,
            policy: UnknownIdentifierPolicy::default(),
            scan_settings: ScanSettings::default(),
            cancel: None,
        }
    }

    pub fn with_policy(mut self, policy: UnknownIdentifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_scan_settings(mut self, settings: ScanSettings) -> Self {
        self.scan_settings = settings;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn tables(&self) -> &EngineTables {
        self.tables
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Every sign ingress of `bodies` between `start` and `end`.
    pub fn scan_ingresses(&self, bodies: &[Body], start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<IngressEvent>, EngineError> {
        let mut scanner = IngressScanner::new(&self.oracle).with_settings(self.scan_settings);
        if let Some(token) = &self.cancel {
            scanner = scanner.with_cancel_token(token.clone());
        }
        scanner.scan(bodies, start, end)
    }

    /// The aspect `body_a` and `body_b` form at `at`, if any.
    ///
    /// Speeds for the applying/separating call come from a second oracle
    /// reading one hour later.
    pub fn evaluate_current_aspect(&self, body_a: Body, body_b: Body, at: DateTime<Utc>) -> Result<Option<AspectObservation>, EngineError> {
        let lon_a = self.read(body_a, at)?;
        let lon_b = self.read(body_b, at)?;

        let calculator = AspectCalculator::new(self.tables);
        if calculator.evaluate(lon_a, lon_b).is_none() {
            return Ok(None);
        }

        let later = at + Duration::minutes(MOTION_PROBE_MINUTES);
        let days = MOTION_PROBE_MINUTES as f64 / (24.0 * 60.0);
        let speed_a = signed_difference(self.read(body_a, later)?, lon_a) / days;
        let speed_b = signed_difference(self.read(body_b, later)?, lon_b) / days;

        Ok(calculator.observe(body_a, lon_a, body_b, lon_b, Some((speed_a, speed_b))))
    }

    /// Recurrence and in-orb duration of `aspect` between two bodies.
    ///
    /// # Panics
    /// If `current_orb` exceeds the aspect's maximum orb.
    pub fn aspect_timing(&self, body_a: Body, body_b: Body, aspect: AspectKind, current_orb: f64) -> Result<AspectTiming, EngineError> {
        let definition = self
            .tables
            .aspect(aspect)
            .ok_or_else(|| EngineError::UnrecognizedAspect(aspect.id().to_string()))?;
        let a = self.tables.body(body_a);
        let b = self.tables.body(body_b);

        let frequency_years = synodic_frequency(
            a.orbital_period_years,
            b.orbital_period_years,
            definition.occurrences_per_cycle,
        );
        Ok(AspectTiming {
            aspect: Some(aspect),
            frequency_years,
            band: FrequencyBand::classify(frequency_years),
            duration: estimate_duration(a.mean_daily_speed, b.mean_daily_speed, definition.max_orb, current_orb),
        })
    }

    /// [`Self::aspect_timing`] keyed by identifiers, applying the engine's
    /// unknown-identifier policy.
    pub fn aspect_timing_by_name(&self, body_a: &str, body_b: &str, aspect: &str, current_orb: f64) -> Result<AspectTiming, EngineError> {
        let a = self.tables.lookup_body(body_a, self.policy)?;
        let b = self.tables.lookup_body(body_b, self.policy)?;
        let resolved = self.tables.lookup_aspect(aspect, self.policy)?;

        let frequency_years = synodic_frequency(
            a.traits.orbital_period_years,
            b.traits.orbital_period_years,
            resolved.occurrences_per_cycle,
        );
        Ok(AspectTiming {
            aspect: resolved.kind,
            frequency_years,
            band: FrequencyBand::classify(frequency_years),
            duration: estimate_duration(
                a.traits.mean_daily_speed,
                b.traits.mean_daily_speed,
                resolved.max_orb,
                current_orb,
            ),
        })
    }

    fn read(&self, body: Body, at: DateTime<Utc>) -> Result<f64, EngineError> {
        let raw = self
            .oracle
            .longitude(body, at)
            .map_err(|source| EngineError::Oracle {
                body,
                timestamp: at,
                source,
            })?;
        if !raw.is_finite() {
            return Err(EngineError::NonFiniteLongitude {
                body,
                timestamp: at,
                value: raw,
            });
        }
        Ok(normalize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanMotionOracle;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_great_conjunction_timing() {
        let engine = TransitEngine::new(MeanMotionOracle::new(epoch()));
        let timing = engine
            .aspect_timing(Body::Jupiter, Body::Saturn, AspectKind::Conjunction, 0.0)
            .unwrap();
        assert!((timing.frequency_years - 19.86).abs() < 0.5);
        assert_eq!(timing.band, FrequencyBand::Years);
    }

    #[test]
    fn test_current_aspect_applying() {
        // Moon 85° ahead of the Sun and gaining: waxing square, applying.
        let oracle = MeanMotionOracle::from_tables(
            epoch(),
            EngineTables::standard(),
            &[(Body::Sun, 70.0), (Body::Moon, 155.0)],
        );
        let engine = TransitEngine::new(oracle);
        let observation = engine
            .evaluate_current_aspect(Body::Moon, Body::Sun, epoch())
            .unwrap()
            .unwrap();
        assert_eq!(observation.aspect.kind, AspectKind::Square);
        assert_eq!(observation.is_applying, Some(true));
        assert!((observation.current_orb - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_current_aspect_applying_near_exact() {
        // 0.2° short of the square; the Moon closes that in under an hour.
        let oracle = MeanMotionOracle::from_tables(
            epoch(),
            EngineTables::standard(),
            &[(Body::Sun, 70.0), (Body::Moon, 159.8)],
        );
        let engine = TransitEngine::new(oracle);
        let observation = engine
            .evaluate_current_aspect(Body::Moon, Body::Sun, epoch())
            .unwrap()
            .unwrap();
        assert_eq!(observation.aspect.kind, AspectKind::Square);
        assert_eq!(observation.is_applying, Some(true));
    }

    #[test]
    fn test_current_aspect_none() {
        let oracle = MeanMotionOracle::new(epoch())
            .with_body(Body::Mars, 10.0, 0.5)
            .with_body(Body::Venus, 55.0, 1.2);
        let engine = TransitEngine::new(oracle);
        assert_eq!(engine.evaluate_current_aspect(Body::Mars, Body::Venus, epoch()).unwrap(), None);
    }

    #[test]
    fn test_timing_by_name_rejects_unknown() {
        let engine = TransitEngine::new(MeanMotionOracle::new(epoch()));
        let err = engine
            .aspect_timing_by_name("sun", "vulcan", "trine", 1.0)
            .unwrap_err();
        assert_eq!(err, EngineError::UnrecognizedBody("vulcan".to_string()));
    }
}
