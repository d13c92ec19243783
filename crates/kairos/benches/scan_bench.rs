use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kairos::bodies::Body;
use kairos::ephemeris::MeanMotionOracle;
use kairos::ingress::{IngressScanner, Refinement, ScanSettings};
use kairos::tables::EngineTables;

fn oracle() -> MeanMotionOracle {
    let epoch = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let longitudes: Vec<(Body, f64)> = Body::ALL
        .iter()
        .enumerate()
        .map(|(i, &body)| (body, (i as f64) * 31.0))
        .collect();
    MeanMotionOracle::from_tables(epoch, EngineTables::standard(), &longitudes)
}

fn bench_year_scan(c: &mut Criterion) {
    let oracle = oracle();
    let start = oracle.epoch();
    let end = start + Duration::days(365);

    c.bench_function("scan_year_daily", |b| {
        let scanner = IngressScanner::new(&oracle);
        b.iter(|| scanner.scan(black_box(&Body::ALL), start, end))
    });

    c.bench_function("scan_year_hourly_refined", |b| {
        let settings = ScanSettings::with_step(Duration::hours(1)).refined(Refinement::bisection());
        let scanner = IngressScanner::new(&oracle).with_settings(settings);
        b.iter(|| scanner.scan(black_box(&Body::ALL), start, end))
    });
}

criterion_group!(benches, bench_year_scan);
criterion_main!(benches);
