use crate::bodies::Body;
use crate::ephemeris::LongitudeOracle;
use crate::error::EngineError;
use crate::ingress::tracker::CrossingTracker;
use crate::ingress::types::{CancelToken, IngressEvent, Sample, ScanSettings};
use chrono::{DateTime, Utc};

/// Steps a longitude oracle through time and reports sign changes.
pub struct IngressScanner<'a, O: LongitudeOracle + ?Sized> {
    oracle: &'a O,
    settings: ScanSettings,
    cancel: Option<CancelToken>,
}

/// Outcome of scanning one body when bodies are scanned independently.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyScan {
    pub body: Body,
    pub result: Result<Vec<IngressEvent>, EngineError>,
}

impl<'a, O: LongitudeOracle + ?Sized> IngressScanner<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            settings: ScanSettings::default(),
            cancel: None,
        }
    }

    pub fn with_settings(mut self, settings: ScanSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Scan every body over `[start, end]`, stopping at the first failure.
    ///
    /// Events are grouped by body in the order given, each group in time order.
    pub fn scan(&self, bodies: &[Body], start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<IngressEvent>, EngineError> {
        self.settings.validate_range(start, end)?;
        log::info!(
            "Scanning {} bodies for ingresses from {} to {} (step {})",
            bodies.len(),
            start,
            end,
            self.settings.step
        );

        let mut events = Vec::new();
        for &body in bodies {
            events.extend(self.scan_body(body, start, end)?);
        }

        log::info!("Ingress scan finished with {} events", events.len());
        Ok(events)
    }

    /// Scan every body independently; a failure for one body leaves the
    /// others' results intact. Cancellation still ends every remaining scan.
    pub fn scan_per_body(&self, bodies: &[Body], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<BodyScan> {
        bodies
            .iter()
            .map(|&body| {
                let result = self.scan_body(body, start, end);
                if let Err(err) = &result {
                    log::warn!("Ingress scan for {} failed: {}", body, err);
                }
                BodyScan { body, result }
            })
            .collect()
    }

    /// Scan one body over `[start, end]`.
    ///
    /// Samples fall on `start + k * step` for every `k` that stays within
    /// `end`. A crossing is reported at the first sample found in the new
    /// sign unless refinement is enabled.
    pub fn scan_body(&self, body: Body, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<IngressEvent>, EngineError> {
        self.settings.validate_range(start, end)?;

        let mut events = Vec::new();
        let mut tracker = CrossingTracker::new(body, self.sample(body, start)?, self.settings.refinement);
        let mut at = start + self.settings.step;

        while at <= end {
            CancelToken::check(self.cancel.as_ref())?;
            let mut found = tracker.observe(self.sample(body, at)?);
            while let Some(refine_at) = tracker.pending_sample_at() {
                CancelToken::check(self.cancel.as_ref())?;
                found = tracker.refine(self.sample(body, refine_at)?);
            }
            if let Some(event) = found {
                log::debug!(
                    "{} ingress {} -> {} at {}",
                    body,
                    event.from_sign,
                    event.to_sign,
                    event.timestamp
                );
                events.push(event);
            }
            at = at + self.settings.step;
        }

        Ok(events)
    }

    fn sample(&self, body: Body, at: DateTime<Utc>) -> Result<Sample, EngineError> {
        let raw = self
            .oracle
            .longitude(body, at)
            .map_err(|source| EngineError::Oracle {
                body,
                timestamp: at,
                source,
            })?;
        Sample::resolve(body, at, raw)
    }
}

/// Order events from several bodies by time; ties keep their input order.
pub fn sort_chronologically(events: &mut [IngressEvent]) {
    events.sort_by_key(|event| event.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::OracleError;
    use crate::zodiac::ZodiacSign;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn days_since_start(at: DateTime<Utc>) -> f64 {
        (at - start()).num_milliseconds() as f64 / 86_400_000.0
    }

    #[test]
    fn test_single_prograde_crossing() {
        let oracle = |_: Body, at: DateTime<Utc>| Ok::<f64, OracleError>(25.5 + days_since_start(at));
        let scanner = IngressScanner::new(&oracle);
        let events = scanner
            .scan_body(Body::Sun, start(), start() + Duration::days(10))
            .unwrap();

        assert_eq!(events.len(), 1);
        let event = events[0];
        assert_eq!(event.timestamp, start() + Duration::days(5));
        assert_eq!(event.from_sign, ZodiacSign::Aries);
        assert_eq!(event.to_sign, ZodiacSign::Taurus);
        assert_eq!(event.degree_into_sign, 0.5);
        assert!(!event.retrograde);
    }

    #[test]
    fn test_single_retrograde_crossing() {
        let oracle = |_: Body, at: DateTime<Utc>| Ok::<f64, OracleError>(35.5 - days_since_start(at));
        let scanner = IngressScanner::new(&oracle);
        let events = scanner
            .scan_body(Body::Mercury, start(), start() + Duration::days(10))
            .unwrap();

        assert_eq!(events.len(), 1);
        let event = events[0];
        assert_eq!(event.timestamp, start() + Duration::days(6));
        assert_eq!(event.from_sign, ZodiacSign::Taurus);
        assert_eq!(event.to_sign, ZodiacSign::Aries);
        assert_eq!(event.degree_into_sign, 29.5);
        assert!(event.retrograde);
    }

    #[test]
    fn test_crossing_through_zero_aries() {
        let oracle = |_: Body, at: DateTime<Utc>| Ok::<f64, OracleError>(357.5 + days_since_start(at));
        let scanner = IngressScanner::new(&oracle);
        let events = scanner
            .scan_body(Body::Sun, start(), start() + Duration::days(5))
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].from_sign, ZodiacSign::Pisces);
        assert_eq!(events[0].to_sign, ZodiacSign::Aries);
        assert_eq!(events[0].timestamp, start() + Duration::days(3));
        assert!(!events[0].retrograde);
    }

    #[test]
    fn test_jitter_inside_a_sign_is_not_an_ingress() {
        let oracle = |_: Body, at: DateTime<Utc>| {
            let day = days_since_start(at) as i64;
            let jitter = if day % 2 == 0 { 0.05 } else { -0.05 };
            Ok::<f64, OracleError>(29.9 + jitter)
        };
        let scanner = IngressScanner::new(&oracle);
        let events = scanner
            .scan_body(Body::Saturn, start(), start() + Duration::days(30))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_invalid_ranges() {
        let oracle = |_: Body, _: DateTime<Utc>| Ok::<f64, OracleError>(0.0);

        let backwards = IngressScanner::new(&oracle).scan_body(Body::Sun, start(), start() - Duration::days(1));
        assert!(matches!(backwards, Err(EngineError::InvalidRange { .. })));

        let zero_step = IngressScanner::new(&oracle)
            .with_settings(ScanSettings::with_step(Duration::zero()))
            .scan_body(Body::Sun, start(), start() + Duration::days(1));
        assert!(matches!(zero_step, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn test_non_finite_longitude() {
        let oracle = |_: Body, _: DateTime<Utc>| Ok::<f64, OracleError>(f64::NAN);
        let result = IngressScanner::new(&oracle).scan_body(Body::Sun, start(), start() + Duration::days(1));
        assert!(matches!(result, Err(EngineError::NonFiniteLongitude { .. })));
    }

    #[test]
    fn test_sort_chronologically() {
        let oracle = |body: Body, at: DateTime<Utc>| {
            let offset = if body == Body::Moon { 28.5 } else { 25.5 };
            Ok::<f64, OracleError>(offset + days_since_start(at))
        };
        let mut events = IngressScanner::new(&oracle)
            .scan(&[Body::Sun, Body::Moon], start(), start() + Duration::days(10))
            .unwrap();
        assert_eq!(events[0].body, Body::Sun);

        sort_chronologically(&mut events);
        assert_eq!(events[0].body, Body::Moon);
        assert_eq!(events[1].body, Body::Sun);
    }
}
