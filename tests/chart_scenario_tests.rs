use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{TimeZone, Utc};
use scene_charts::api::Scales;
use scene_charts::core::cartesian::build_grouped_bar;
use scene_charts::core::{
    BandPadding, CategoryDatum, GroupedTable, ScaleSettings, SeriesData, TimeUnit, Viewport,
    XScale,
};
use scene_charts::interaction::HitTarget;
use scene_charts::layout::{Container, Margins, Rect};
use scene_charts::render::{Drawable, LayerKind};
use scene_charts::{BarMode, Chart, ChartError, ChartKind, NullRenderer};
use serde_json::json;

fn quarters() -> GroupedTable {
    GroupedTable::new(vec!["Q1".to_owned(), "Q2".to_owned()])
        .with_series("north", vec![10.0, 20.0])
        .with_series("south", vec![5.0, 15.0])
}

fn texts(chart: &Chart<NullRenderer>) -> Vec<String> {
    chart
        .renderer()
        .scene()
        .into_iter()
        .filter_map(|node| match &node.drawable {
            Drawable::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn stacked_bars_expose_category_totals() {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Stacked),
        NullRenderer::new(),
        Container::fixed(600, 400),
    )
    .expect("chart");
    chart.datum(SeriesData::Grouped(quarters()));
    chart.render().expect("render");

    let info = chart
        .scales()
        .and_then(Scales::as_cartesian)
        .expect("cartesian scales");
    assert_eq!(info.stack_totals, vec![15.0, 35.0]);
    assert_eq!(info.y_max, 35.0);
    assert_eq!(info.y_min, 0.0);
    assert!(info.y_scale.domain().1 >= 35.0);
    assert_eq!(chart.renderer().count_in(LayerKind::Series), 4);
}

#[test]
fn stacked_bars_reject_negative_values() {
    let mut chart = Chart::new(ChartKind::Bar(BarMode::Stacked), NullRenderer::new())
        .expect("chart");
    chart.datum(SeriesData::Grouped(
        GroupedTable::new(vec!["Q1".to_owned()]).with_series("loss", vec![-3.0]),
    ));
    assert!(matches!(chart.render(), Err(ChartError::InvalidData(_))));
}

#[test]
fn stacked_segments_meet_without_gaps() {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Stacked),
        NullRenderer::new(),
        Container::fixed(600, 400),
    )
    .expect("chart");
    chart.datum(SeriesData::Grouped(quarters()));
    chart.render().expect("render");

    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let rects: Vec<_> = chart
        .renderer()
        .scene()
        .into_iter()
        .filter_map(|node| match node.drawable {
            Drawable::Rect(rect) => Some(rect),
            _ => None,
        })
        .collect();
    let zero = info.y_scale.domain_to_pixel(0.0);
    let top_q2 = info.y_scale.domain_to_pixel(35.0);
    let q2: Vec<_> = rects.iter().filter(|rect| rect.x > rects[0].x).collect();
    assert_eq!(q2.len(), 2);
    assert_abs_diff_eq!(q2[0].y, zero, epsilon = 1e-9);
    assert_abs_diff_eq!(q2[0].y + q2[0].height, q2[1].y, epsilon = 1e-9);
    assert_abs_diff_eq!(q2[1].y + q2[1].height, top_q2, epsilon = 1e-6);
}

#[test]
fn grouped_bandwidth_follows_banded_layout() {
    // 340px wide minus the 20px default margins leaves a 300px plotting rect.
    let rect = Rect::inset(Viewport::new(340, 200), Margins::default());
    assert_relative_eq!(rect.width, 300.0, epsilon = 1e-9);
    let table = GroupedTable::new(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        .with_series("x", vec![1.0, 2.0, 3.0])
        .with_series("y", vec![3.0, 2.0, 1.0]);
    let settings = ScaleSettings {
        padding: BandPadding::new(0.1, 0.1),
        ..ScaleSettings::default()
    };
    let info = build_grouped_bar(&table, &rect, &settings).expect("grouped scales");

    let outer = info.x_scale.as_band().expect("band x");
    assert_relative_eq!(outer.step(), 300.0 / 3.1, epsilon = 1e-9);
    assert!((95.0..=100.0).contains(&outer.step()));
    assert_relative_eq!(outer.bandwidth(), 87.096_774, epsilon = 1e-5);

    let inner = info.x_scale2.as_ref().expect("inner band");
    assert_relative_eq!(inner.step(), 45.840_407, epsilon = 1e-5);
    assert!((45.0..=50.0).contains(&inner.step()));
    assert_relative_eq!(inner.bandwidth(), inner.step() * 0.9, epsilon = 1e-9);
    assert_relative_eq!(inner.position(0).expect("first"), 0.0, epsilon = 1e-9);
    assert_relative_eq!(
        inner.position(1).expect("second") + inner.bandwidth(),
        outer.bandwidth(),
        epsilon = 1e-9
    );
}

#[test]
fn grouped_chart_builds_inner_band_per_series() {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Grouped),
        NullRenderer::new(),
        Container::fixed(600, 400),
    )
    .expect("chart");
    chart.datum(SeriesData::Grouped(
        GroupedTable::new(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
            .with_series("x", vec![1.0, 2.0, 3.0])
            .with_series("y", vec![3.0, 2.0, 1.0]),
    ));
    chart.render().expect("render");

    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let outer = info.x_scale.as_band().expect("band x");
    let inner = info.x_scale2.as_ref().expect("inner band");
    assert_eq!(outer.len(), 3);
    assert_eq!(inner.len(), 2);
    assert_relative_eq!(inner.range().1, outer.bandwidth(), epsilon = 1e-9);
    assert_eq!(chart.renderer().count_in(LayerKind::Series), 6);
}

#[test]
fn donut_center_is_a_miss() {
    // 240px container minus 20px margins leaves a 200px square: outer radius 100.
    let mut chart = Chart::attached(ChartKind::Donut, NullRenderer::new(), Container::fixed(240, 240))
        .expect("chart");
    chart.datum(SeriesData::Categorical(vec![
        CategoryDatum::new("a", 1.0),
        CategoryDatum::new("b", 2.0),
    ]));
    chart.render().expect("render");

    let polar = chart.scales().and_then(Scales::as_polar).expect("polar");
    assert_abs_diff_eq!(polar.frame.outer_radius, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(polar.frame.inner_radius, 50.0, epsilon = 1e-9);
    let center = polar.frame.origin;
    assert!(polar.frame.is_out_of_area(center));

    assert!(chart.pointer_move(center.x, 240.0 - center.y).is_none());
    assert!(!chart.tooltip().visible);
}

#[test]
fn wedges_partition_the_full_turn() {
    let mut chart = Chart::attached(ChartKind::Pie, NullRenderer::new(), Container::fixed(400, 400))
        .expect("chart");
    chart.datum(SeriesData::Categorical(vec![
        CategoryDatum::new("a", 1.0),
        CategoryDatum::new("b", 2.0),
        CategoryDatum::new("c", 3.0),
    ]));
    chart.render().expect("render");

    let polar = chart.scales().and_then(Scales::as_polar).expect("polar");
    let sweep: f64 = polar.wedges.iter().map(|w| w.theta_length).sum();
    assert_relative_eq!(sweep, std::f64::consts::TAU, epsilon = 1e-9);
    assert_eq!(polar.frame.inner_radius, 0.0);
    // Outside labels draw one radial tick per wedge.
    assert_eq!(chart.renderer().count_in(LayerKind::Axis), 3);
}

#[test]
fn time_range_pins_domain_and_day_ticks() {
    let months: Vec<_> = (1..=10)
        .map(|month| json!([format!("2015-{month:02}-01"), month * 10]))
        .collect();
    let start = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).single().expect("start");
    let end = Utc.with_ymd_and_hms(2015, 10, 1, 0, 0, 0).single().expect("end");

    let mut chart = Chart::attached(ChartKind::Line, NullRenderer::new(), Container::fixed(900, 400))
        .expect("chart");
    chart
        .datum_json(&json!(months))
        .expect("datum")
        .time_range(start, end, TimeUnit::Day, 1);
    chart.render().expect("render");

    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let XScale::Time(time) = &info.x_scale else {
        panic!("expected a time axis");
    };
    assert_eq!(time.domain(), (start.timestamp_millis(), end.timestamp_millis()));
    let ticks = time.ticks_every(info.time_ticks.expect("tick cadence"));
    assert_eq!(ticks.len(), 273);
}

#[test]
fn title_and_legend_reserve_top_margin() {
    let mut plain = Chart::attached(ChartKind::Pie, NullRenderer::new(), Container::fixed(400, 400))
        .expect("chart");
    let data = SeriesData::Categorical(vec![
        CategoryDatum::new("apple", 1.0),
        CategoryDatum::new("pear", 2.0),
    ]);
    plain.datum(data.clone());
    plain.render().expect("render");

    let mut decorated = plain.make_copy();
    decorated
        .datum(data)
        .title("Fruit")
        .legends(json!({ "show": true }));
    decorated
        .render_to(Container::fixed(400, 400))
        .expect("render");

    assert!(decorated.rect().top > plain.rect().top);
    let labels = texts(&decorated);
    assert!(labels.iter().any(|text| text == "Fruit"));
    assert!(labels.iter().any(|text| text == "apple"));
    assert!(labels.iter().any(|text| text == "pear"));
}

#[test]
fn wide_y_labels_push_the_left_margin() {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Simple),
        NullRenderer::new(),
        Container::fixed(600, 400),
    )
    .expect("chart");
    chart.datum(SeriesData::Categorical(vec![
        CategoryDatum::new("a", 1_250_000.0),
        CategoryDatum::new("b", 3_500_000.0),
    ]));
    chart.render().expect("render");

    let rect = chart.rect();
    assert!(rect.left > chart.layout().default_margins().left);
    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let band = info.x_scale.as_band().expect("band");
    assert_relative_eq!(band.range().0, rect.left, epsilon = 1e-9);
}

#[test]
fn histogram_bins_share_edges_across_series() {
    let mut chart = Chart::attached(ChartKind::Histogram, NullRenderer::new(), Container::fixed(600, 400))
        .expect("chart");
    chart
        .datum_json(&json!([
            { "name": "a", "data": [1, 2, 2, 3, 3, 3, 4, 5] },
            { "name": "b", "data": [2, 4, 6, 8] }
        ]))
        .expect("datum");
    chart.render().expect("render");

    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let bins = info.histogram.as_ref().expect("bins");
    assert_eq!(bins.series_count(), 2);
    let total_a: usize = bins.counts(0).iter().sum();
    let total_b: usize = bins.counts(1).iter().sum();
    assert_eq!(total_a, 8);
    assert_eq!(total_b, 4);
    assert_eq!(info.x_scale2.as_ref().expect("inner band").len(), 2);
}

#[test]
fn scatter_hit_reports_point_tooltip() {
    let mut chart = Chart::attached(ChartKind::Scatter, NullRenderer::new(), Container::fixed(600, 400))
        .expect("chart");
    chart
        .datum_json(&json!([
            { "name": "s", "data": [{ "x": 1, "y": 2 }, { "x": 5, "y": 9 }] }
        ]))
        .expect("datum");
    chart.render().expect("render");

    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let x = info.x_scale.project(5.0).expect("x");
    let y = info.y_scale.domain_to_pixel(9.0);
    let hit = chart.pointer_move(x + 1.0, 400.0 - y).expect("hit");
    assert_eq!(hit.target, HitTarget::Point { series: 0, index: 1 });
    assert_eq!(hit.tooltip, "5 9");
}
