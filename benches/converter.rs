//! Run these benches with `cargo bench --bench converter -- --verbose`
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use altimetry::{format_altitude_opt, AltitudeConverter, Qnh};

criterion_main!(converter_benches);

criterion_group!(converter_benches, ingest_bench, setting_sweep_bench);

fn samples() -> Vec<f64> {
    (0..1_000).map(|i| 70.0 + f64::from(i) * 0.035).collect()
}

fn ingest_bench(c: &mut Criterion) {
    let samples = samples();

    c.bench_function("ingest_sample", |b| {
        b.iter(|| {
            let mut altimeter = AltitudeConverter::new();
            for &kpa in &samples {
                let reading = altimeter.ingest_sample(black_box(kpa));
                let _x = format_altitude_opt(reading.indicated_altitude());
            }
        });
    });
}

fn setting_sweep_bench(c: &mut Criterion) {
    let mut altimeter = AltitudeConverter::new();
    altimeter.ingest_sample(95.0);

    c.bench_function("set_reference_pressure", |b| {
        b.iter(|| {
            for qnh in 2810..=3100 {
                let _x = altimeter.set_reference_pressure(black_box(Qnh::new(qnh)));
            }
        });
    });
}
