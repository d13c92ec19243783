//! Linear longitude model: each body advances at a constant rate from an epoch.
//!
//! Not an ephemeris. Useful for demos, benches and tests where a predictable
//! oracle matters more than accuracy.

use crate::bodies::Body;
use crate::ephemeris::types::{LongitudeOracle, OracleError};
use crate::tables::EngineTables;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    epoch_longitude: f64,
    /// Signed rate, negative for retrograde (deg/day)
    daily_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeanMotionOracle {
    epoch: DateTime<Utc>,
    tracks: BTreeMap<Body, Track>,
}

impl MeanMotionOracle {
    /// An oracle with no bodies configured; add them with [`Self::with_body`].
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            tracks: BTreeMap::new(),
        }
    }

    /// Place every listed body at its epoch longitude, moving at the table's
    /// mean speed. The lunar nodes regress, so they move backward.
    pub fn from_tables(epoch: DateTime<Utc>, tables: &EngineTables, epoch_longitudes: &[(Body, f64)]) -> Self {
        let mut oracle = Self::new(epoch);
        for &(body, longitude) in epoch_longitudes {
            let speed = tables.body(body).mean_daily_speed;
            let rate = if body.is_node() { -speed } else { speed };
            oracle = oracle.with_body(body, longitude, rate);
        }
        oracle
    }

    pub fn with_body(mut self, body: Body, epoch_longitude: f64, daily_rate: f64) -> Self {
        self.tracks.insert(
            body,
            Track {
                epoch_longitude,
                daily_rate,
            },
        );
        self
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Signed daily rate for `body`, if configured.
    pub fn daily_rate(&self, body: Body) -> Option<f64> {
        self.tracks.get(&body).map(|track| track.daily_rate)
    }
}

impl LongitudeOracle for MeanMotionOracle {
    fn longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, OracleError> {
        let track = self.tracks.get(&body).ok_or(OracleError::UnsupportedBody(body))?;
        let days = (at - self.epoch).num_milliseconds() as f64 / MILLIS_PER_DAY;
        // Left unnormalized on purpose: callers fold it.
        Ok(track.epoch_longitude + track.daily_rate * days)
    }
}
