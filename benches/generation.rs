//! Benchmarks for series generation and chart lookups

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use verdant::{
    dashboard_sensors, generate_history, generate_hourly, greenhouse_sensors, nearest_point,
    segment_critical_changes, ChartFrame, GeneratorConfig, HoverWeights, LinearScale,
    SegmenterConfig, TimeScale,
};

fn config() -> GeneratorConfig {
    let anchor = NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    GeneratorConfig::new().with_anchor(anchor).with_seed(42)
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let config = config();

    let dashboard = dashboard_sensors();
    group.throughput(Throughput::Elements((dashboard.len() * 30 * 24) as u64));
    group.bench_function("history_30_days", |b| {
        b.iter(|| black_box(generate_history(&config, &dashboard).unwrap()))
    });

    let greenhouse = greenhouse_sensors();
    group.throughput(Throughput::Elements((greenhouse.len() * 200) as u64));
    group.bench_function("hourly_200_points", |b| {
        b.iter(|| black_box(generate_hourly(&config, &greenhouse).unwrap()))
    });

    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookups");
    let hourly = generate_hourly(&config(), &greenhouse_sensors()).unwrap();
    let temp = &hourly[0];

    let frame = ChartFrame::default();
    let x = TimeScale::for_points(&temp.points, (0.0, frame.inner_width())).unwrap();
    let y = LinearScale::new((0.0, 40.0), (frame.inner_height(), 0.0));
    let weights = HoverWeights::default();

    group.bench_function("nearest_point_200", |b| {
        b.iter(|| black_box(nearest_point(&temp.points, &frame, &x, &y, (150.0, 60.0), &weights)))
    });

    let values = temp.values();
    let seg_config = SegmenterConfig::default();
    group.bench_function("segment_80", |b| {
        b.iter(|| black_box(segment_critical_changes(&values, &seg_config).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_lookups);
criterion_main!(benches);
