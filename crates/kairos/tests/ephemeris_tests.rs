use chrono::{DateTime, Duration, TimeZone, Utc};
use kairos::bodies::Body;
use kairos::ephemeris::{AsyncLongitudeOracle, LongitudeOracle, MeanMotionOracle, OracleError, SyncOracle};
use kairos::tables::EngineTables;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap()
}

#[test]
fn test_mean_motion_before_epoch() {
    let oracle = MeanMotionOracle::new(epoch()).with_body(Body::Mars, 10.0, 0.5);
    let lon = oracle.longitude(Body::Mars, epoch() - Duration::days(40)).unwrap();
    // Left for the caller to normalize.
    assert_eq!(lon, -10.0);
}

#[test]
fn test_mean_motion_uses_table_speeds() {
    let oracle = MeanMotionOracle::from_tables(epoch(), EngineTables::standard(), &[(Body::Jupiter, 100.0)]);
    let lon = oracle.longitude(Body::Jupiter, epoch() + Duration::days(100)).unwrap();
    assert!((lon - 108.31).abs() < 1e-9);
    assert_eq!(oracle.epoch(), epoch());
    assert_eq!(oracle.daily_rate(Body::Saturn), None);
}

#[test]
fn test_closure_oracle() {
    let oracle = |body: Body, _: DateTime<Utc>| match body {
        Body::Sun => Ok(0.0),
        other => Err(OracleError::UnsupportedBody(other)),
    };
    assert_eq!(oracle.longitude(Body::Sun, epoch()), Ok(0.0));
    assert_eq!(
        oracle.longitude(Body::Moon, epoch()),
        Err(OracleError::UnsupportedBody(Body::Moon))
    );
}

#[test]
fn test_oracle_error_messages() {
    let err = OracleError::UnsupportedBody(Body::NorthNode);
    assert_eq!(err.to_string(), "Body North Node is not supported by this oracle");

    let err = OracleError::Calculation("bad julian day".to_string());
    assert_eq!(err.to_string(), "Calculation failed: bad julian day");
}

#[tokio::test]
async fn test_sync_oracle_behind_async_interface() {
    let inner = MeanMotionOracle::new(epoch()).with_body(Body::Venus, 350.0, 1.2);
    let oracle = SyncOracle(inner.clone());
    let at = epoch() + Duration::days(5);

    assert_eq!(
        oracle.longitude(Body::Venus, at).await,
        inner.longitude(Body::Venus, at)
    );
    assert!(oracle.longitude(Body::Moon, at).await.is_err());
}

#[cfg(feature = "swisseph")]
mod swiss {
    use super::*;
    use kairos::ephemeris::SwissEphemerisOracle;
    use kairos::angle::normalize;
    use kairos::zodiac::resolve_sign;

    #[test]
    #[ignore] // Requires Swiss Ephemeris files
    fn test_sun_at_march_equinox() {
        let oracle = SwissEphemerisOracle::new(None).unwrap();
        let lon = normalize(oracle.longitude(Body::Sun, epoch()).unwrap());
        // Within a day of the equinox the Sun sits near 0° Aries.
        assert!(lon < 1.5 || lon > 358.5, "sun at {lon}");
    }

    #[test]
    #[ignore] // Requires Swiss Ephemeris files
    fn test_nodes_are_opposite() {
        let oracle = SwissEphemerisOracle::new(None).unwrap();
        let north = resolve_sign(normalize(oracle.longitude(Body::NorthNode, epoch()).unwrap()));
        let south = resolve_sign(normalize(oracle.longitude(Body::SouthNode, epoch()).unwrap()));

        assert_eq!((north.index() + 6) % 12, south.index());
        assert!((north.degree_in_sign - south.degree_in_sign).abs() < 1e-6);
    }

    #[test]
    fn test_missing_data_directory() {
        let result = SwissEphemerisOracle::new(Some("/nonexistent/swisseph".into()));
        assert!(matches!(result, Err(OracleError::FileNotFound { .. })));
    }
}
