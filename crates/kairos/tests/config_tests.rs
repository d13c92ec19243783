use kairos::aspects::AspectKind;
use kairos::bodies::Body;
use kairos::tables::EngineTables;
use std::fs;
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kairos-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_toml_file() {
    let path = scratch_file(
        "tables.toml",
        r#"
        [bodies.mars]
        speed = 0.5

        [aspects.square]
        max_orb = 7.0
        "#,
    );
    let tables = EngineTables::from_file(&path).unwrap();

    assert_eq!(tables.body(Body::Mars).mean_daily_speed, 0.5);
    assert_eq!(tables.aspect(AspectKind::Square).unwrap().max_orb, 7.0);
    assert_eq!(tables.body(Body::Sun), EngineTables::standard().body(Body::Sun));
}

#[test]
fn test_load_json_file() {
    let path = scratch_file(
        "tables.json",
        r#"{ "bodies": { "north_node": { "period": 18.61 } } }"#,
    );
    let tables = EngineTables::from_file(&path).unwrap();
    assert_eq!(tables.body(Body::NorthNode).orbital_period_years, 18.61);
}

#[test]
fn test_missing_file_reports_path() {
    let path = std::env::temp_dir().join("kairos-no-such-dir").join("tables.toml");
    let err = EngineTables::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("kairos-no-such-dir"), "{err}");
}

#[test]
fn test_invalid_values_rejected_with_context() {
    let path = scratch_file("negative.toml", "[bodies.venus]\nspeed = -1.2\n");
    let err = EngineTables::from_file(&path).unwrap_err();

    assert!(err.to_string().contains("negative.toml"));
    let root = format!("{:#}", err);
    assert!(root.contains("venus speed must be positive"), "{root}");
}

#[test]
fn test_loaded_tables_drive_evaluation() {
    let path = scratch_file(
        "wide-sextile.toml",
        "[aspects.sextile]\nmax_orb = 7.0\n",
    );
    let tables = EngineTables::from_file(&path).unwrap();
    let calculator = kairos::aspects::AspectCalculator::new(&tables);

    let matched = calculator.evaluate(0.0, 66.5).unwrap();
    assert_eq!(matched.definition.kind, AspectKind::Sextile);
    assert!(kairos::aspects::evaluate_aspect(0.0, 66.5).is_none());
}
