use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kairos::aspects::{evaluate_aspect, AspectCalculator};
use kairos::bodies::Body;
use kairos::tables::EngineTables;

fn bench_evaluate_aspect(c: &mut Criterion) {
    c.bench_function("evaluate_aspect", |b| {
        b.iter(|| evaluate_aspect(black_box(100.0), black_box(102.0)))
    });
}

fn bench_all_pairs(c: &mut Criterion) {
    let calculator = AspectCalculator::new(EngineTables::standard());
    let longitudes: Vec<(Body, f64)> = Body::ALL
        .iter()
        .enumerate()
        .map(|(i, &body)| (body, (i as f64) * 29.7))
        .collect();

    c.bench_function("observe_all_pairs", |b| {
        b.iter(|| {
            let mut found = 0;
            for (i, &(body_a, lon_a)) in longitudes.iter().enumerate() {
                for &(body_b, lon_b) in &longitudes[i + 1..] {
                    let speeds = Some((1.0, 0.5));
                    if calculator
                        .observe(body_a, black_box(lon_a), body_b, black_box(lon_b), speeds)
                        .is_some()
                    {
                        found += 1;
                    }
                }
            }
            found
        })
    });
}

criterion_group!(benches, bench_evaluate_aspect, bench_all_pairs);
criterion_main!(benches);
