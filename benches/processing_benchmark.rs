use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_prep::analyzers::WeatherAggregator;
use weather_prep::models::RawObservation;
use weather_prep::processors::{Imputer, WeatherPipeline};

// Daily observations with regular gaps in every column
fn create_test_observations(days: usize) -> Vec<RawObservation> {
    let base_date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();

    (0..days)
        .map(|day| {
            let date = base_date + chrono::Duration::days(day as i64);
            let seasonal = ((day % 365) as f64 / 365.0 * std::f64::consts::TAU).sin();

            RawObservation::new(
                date,
                (day % 17 != 0).then_some(25.0 + 8.0 * seasonal),
                (day % 23 != 0).then_some(60.0 + 20.0 * seasonal),
                (day % 29 != 0).then_some(3.0 + (day % 5) as f64),
                (day % 4 != 0).then_some(((day * 7) % 30) as f64),
            )
        })
        .collect()
}

fn benchmark_imputer(c: &mut Criterion) {
    let observations = create_test_observations(3650);

    c.bench_function("imputer_10_years", |b| {
        b.iter(|| {
            let imputer = Imputer::new();
            black_box(imputer.impute(black_box(&observations)).unwrap())
        })
    });
}

fn benchmark_aggregator(c: &mut Criterion) {
    let observations = create_test_observations(3650);
    let table = WeatherPipeline::new()
        .run(&observations)
        .unwrap()
        .into_table();

    c.bench_function("aggregator_10_years", |b| {
        b.iter(|| {
            let aggregator = WeatherAggregator::new();
            black_box(aggregator.aggregate(black_box(&table)))
        })
    });
}

fn benchmark_pipeline_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_scaling");

    for days in [365, 3650, 36500] {
        let observations = create_test_observations(days);
        group.bench_with_input(BenchmarkId::from_parameter(days), &observations, |b, obs| {
            b.iter(|| {
                let pipeline = WeatherPipeline::new();
                black_box(pipeline.run(black_box(obs)).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_imputer,
    benchmark_aggregator,
    benchmark_pipeline_scaling
);
criterion_main!(benches);
