use crate::angle::normalize;
use crate::bodies::Body;
use crate::ephemeris::types::{LongitudeOracle, OracleError};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, julday};

/// FLG_SWIEPH: use Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;

/// Swiss Ephemeris body codes. The true node stands in for both nodes; the
/// south node is derived by adding 180°.
fn swiss_body_code(body: Body) -> i32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
        Body::NorthNode | Body::SouthNode => 11,
    }
}

/// Longitude oracle backed by the Swiss Ephemeris (tropical, geocentric).
pub struct SwissEphemerisOracle {
    _ephemeris_path: PathBuf,
    flags: i32,
}

impl SwissEphemerisOracle {
    /// Create an oracle with an optional ephemeris path, falling back to
    /// `SWISS_EPHEMERIS_PATH` and then `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, OracleError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(OracleError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        log::debug!("Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            _ephemeris_path: path,
            flags: FLG_SWIEPH,
        })
    }
}

impl LongitudeOracle for SwissEphemerisOracle {
    fn longitude(&self, body: Body, at: DateTime<Utc>) -> Result<f64, OracleError> {
        let jd = datetime_to_julian_day(at);
        let result = calc_ut(jd, swiss_body_code(body) as u32, self.flags as u32)
            .map_err(|e| OracleError::Calculation(format!("Swiss Ephemeris error for {}: {}", body, e)))?;

        let longitude = result.out[0];
        Ok(match body {
            Body::SouthNode => normalize(longitude + 180.0),
            _ => longitude,
        })
    }
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
