//! Concurrent ingress scanning over an asynchronous longitude oracle.
//!
//! Each body is scanned as its own tokio task; samples for one body stay
//! sequential because each step compares against the previous one.

use crate::bodies::Body;
use crate::ephemeris::AsyncLongitudeOracle;
use crate::error::EngineError;
use crate::ingress::{CancelToken, CrossingTracker, IngressEvent, Sample, ScanSettings};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct AsyncIngressScanner {
    oracle: Arc<dyn AsyncLongitudeOracle>,
    settings: ScanSettings,
    cancel: Option<CancelToken>,
}

impl AsyncIngressScanner {
    pub fn new(oracle: Arc<dyn AsyncLongitudeOracle>) -> Self {
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

    /// Scan all bodies concurrently.
    ///
    /// Output order matches [`crate::ingress::IngressScanner::scan`]: grouped by
    /// body in the order given, each group in time order. The first failure
    /// aborts the remaining tasks.
    pub async fn scan(&self, bodies: &[Body], start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<IngressEvent>, EngineError> {
        self.settings.validate_range(start, end)?;
        log::info!("Scanning {} bodies concurrently from {} to {}", bodies.len(), start, end);

        let mut tasks = JoinSet::new();
        for (slot, &body) in bodies.iter().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let settings = self.settings;
            let cancel = self.cancel.clone();
            tasks.spawn(async move {
                let events = scan_body(oracle.as_ref(), settings, cancel.as_ref(), body, start, end).await;
                (slot, events)
            });
        }

        let mut per_body: Vec<Vec<IngressEvent>> = vec![Vec::new(); bodies.len()];
        while let Some(joined) = tasks.join_next().await {
            let (slot, events) = joined.map_err(|e| EngineError::TaskFailed(e.to_string()))?;
            // Dropping the JoinSet on return aborts the tasks still running.
            per_body[slot] = events?;
        }

        let events: Vec<IngressEvent> = per_body.into_iter().flatten().collect();
        log::info!("Concurrent ingress scan finished with {} events", events.len());
        Ok(events)
    }
}

async fn scan_body(
    oracle: &dyn AsyncLongitudeOracle,
    settings: ScanSettings,
    cancel: Option<&CancelToken>,
    body: Body,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<IngressEvent>, EngineError> {
    let mut events = Vec::new();
    let mut tracker = CrossingTracker::new(body, sample(oracle, body, start).await?, settings.refinement);
    let mut at = start + settings.step;

    while at <= end {
        CancelToken::check(cancel)?;
        let mut found = tracker.observe(sample(oracle, body, at).await?);
        while let Some(refine_at) = tracker.pending_sample_at() {
            CancelToken::check(cancel)?;
            found = tracker.refine(sample(oracle, body, refine_at).await?);
        }
        if let Some(event) = found {
            log::debug!("{} ingress {} -> {} at {}", body, event.from_sign, event.to_sign, event.timestamp);
            events.push(event);
        }
        at = at + settings.step;
    }

    Ok(events)
}

async fn sample(oracle: &dyn AsyncLongitudeOracle, body: Body, at: DateTime<Utc>) -> Result<Sample, EngineError> {
    let raw = oracle
        .longitude(body, at)
        .await
        .map_err(|source| EngineError::Oracle {
            body,
            timestamp: at,
            source,
        })?;
    Sample::resolve(body, at, raw)
}
