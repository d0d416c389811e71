use criterion::{Criterion, criterion_group, criterion_main};
use scene_charts::core::cartesian::{build_stacked_bar, build_temporal};
use scene_charts::core::{
    BandPadding, BandScale, DataPoint, GroupedTable, LinearScale, ScaleSettings, ScenePoint,
    TimeSeries, Viewport, XKind,
};
use scene_charts::interaction::{HitIndex, HitTarget, PointMark, locate};
use scene_charts::layout::{Margins, Rect};
use std::hint::black_box;

fn plot_rect() -> Rect {
    Rect::inset(Viewport::new(1920, 1080), Margins::default())
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (0.0, 1920.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.domain_to_pixel(black_box(4_321.123));
            let _ = scale.pixel_to_domain(px);
        })
    });
}

fn bench_band_scale_inversion(c: &mut Criterion) {
    let band = BandScale::new(500, (0.0, 1920.0), BandPadding::new(0.1, 0.1)).expect("band");

    c.bench_function("band_scale_index_at_500", |b| {
        b.iter(|| {
            let _ = band.index_at(black_box(1_234.5));
        })
    });
}

fn bench_build_temporal_10k(c: &mut Criterion) {
    let rect = plot_rect();
    let series = vec![TimeSeries::unnamed(
        (0..10_000)
            .map(|i| DataPoint::new(f64::from(i), (f64::from(i) * 0.01).sin() * 100.0))
            .collect(),
    )];

    c.bench_function("build_temporal_10k", |b| {
        b.iter(|| {
            let _ = build_temporal(
                XKind::Numeric,
                black_box(&series),
                &rect,
                &ScaleSettings::default(),
            )
            .expect("scales");
        })
    });
}

fn bench_build_stacked_bar(c: &mut Criterion) {
    let rect = plot_rect();
    let categories: Vec<String> = (0..200).map(|i| format!("c{i}")).collect();
    let table = (0..8).fold(GroupedTable::new(categories), |table, s| {
        table.with_series(format!("s{s}"), (0..200).map(|i| f64::from(i % 17 + s)).collect())
    });

    c.bench_function("build_stacked_bar_200x8", |b| {
        b.iter(|| {
            let _ = build_stacked_bar(black_box(&table), &rect, &ScaleSettings::default())
                .expect("scales");
        })
    });
}

fn bench_point_hit_test_10k(c: &mut Criterion) {
    let rect = plot_rect();
    let marks: Vec<PointMark> = (0..10_000)
        .map(|i| {
            let x = rect.left + rect.width * f64::from(i) / 10_000.0;
            PointMark {
                target: HitTarget::Point { series: 0, index: i as usize },
                position: ScenePoint::new(x, rect.bottom + f64::from(i % 100)),
                tooltip: String::new(),
            }
        })
        .collect();
    let index = HitIndex::points(rect, marks);

    c.bench_function("point_hit_test_10k", |b| {
        b.iter(|| {
            let _ = locate(&index, black_box(ScenePoint::new(960.5, 500.0)));
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_band_scale_inversion,
    bench_build_temporal_10k,
    bench_build_stacked_bar,
    bench_point_hit_test_10k
);
criterion_main!(benches);
