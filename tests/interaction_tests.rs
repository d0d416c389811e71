use std::time::{Duration, Instant};

use scene_charts::api::{LifecycleState, Scales};
use scene_charts::core::{CategoryDatum, SeriesData, Viewport};
use scene_charts::interaction::HitTarget;
use scene_charts::layout::Container;
use scene_charts::render::{Drawable, LayerKind};
use scene_charts::{BarMode, Chart, ChartKind, NullRenderer};
use serde_json::json;

const HEIGHT: f64 = 400.0;

fn fruit() -> SeriesData {
    SeriesData::Categorical(vec![
        CategoryDatum::new("apple", 4.0),
        CategoryDatum::new("pear", 9.0),
        CategoryDatum::new("plum", 2.0),
    ])
}

fn rendered_bar() -> Chart<NullRenderer> {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Simple),
        NullRenderer::new(),
        Container::fixed(600, 400),
    )
    .expect("chart");
    chart.datum(fruit());
    chart.render().expect("render");
    chart
}

#[test]
fn bar_hit_at_band_center_shows_tooltip() {
    let mut chart = rendered_bar();
    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let band = info.x_scale.as_band().expect("band");
    let x = band.center(1).expect("center");
    let rect = chart.rect();
    let y = rect.bottom + rect.height / 2.0;

    let hit = chart.pointer_move(x, HEIGHT - y).expect("hit");
    assert_eq!(hit.target, HitTarget::Category { index: 1 });
    assert_eq!(hit.tooltip, "pear 9");
    assert!(chart.tooltip().visible);
    assert_eq!(chart.tooltip().content, "pear 9");
}

#[test]
fn tooltip_content_only_updates_on_change() {
    let mut chart = rendered_bar();
    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let band = info.x_scale.as_band().expect("band").clone();
    let rect = chart.rect();
    let y = HEIGHT - (rect.bottom + 10.0);

    let x = band.center(0).expect("center");
    chart.pointer_move(x, y).expect("first hit");
    chart.pointer_move(x + 1.0, y).expect("same bar");
    assert_eq!(chart.tooltip().content_updates, 1);

    chart
        .pointer_move(band.center(2).expect("center"), y)
        .expect("other bar");
    assert_eq!(chart.tooltip().content_updates, 2);
    assert_eq!(chart.tooltip().content, "plum 2");
}

#[test]
fn pointer_outside_plot_is_a_miss() {
    let mut chart = rendered_bar();
    assert!(chart.pointer_move(1.0, 1.0).is_none());
    assert!(!chart.tooltip().visible);
    assert!(chart.last_hit().is_none());
}

#[test]
fn pointer_leave_hides_tooltip() {
    let mut chart = rendered_bar();
    let band_center = chart
        .scales()
        .and_then(Scales::as_cartesian)
        .and_then(|info| info.x_scale.as_band())
        .and_then(|band| band.center(0))
        .expect("center");
    chart
        .pointer_move(band_center, HEIGHT - chart.rect().bottom - 5.0)
        .expect("hit");
    chart.pointer_leave();
    assert!(!chart.tooltip().visible);
    assert!(chart.last_hit().is_none());
}

#[test]
fn line_hit_takes_first_point_at_or_right_of_pointer() {
    let mut chart = Chart::attached(ChartKind::Line, NullRenderer::new(), Container::fixed(600, 400))
        .expect("chart");
    chart
        .datum_json(&json!([[0, 1], [1, 5], [2, 3]]))
        .expect("datum");
    chart.render().expect("render");

    let info = chart.scales().and_then(Scales::as_cartesian).expect("scales");
    let x1 = info.x_scale.project(1.0).expect("x");
    let hit = chart.pointer_move(x1 - 3.0, HEIGHT / 2.0).expect("hit");
    assert_eq!(hit.target, HitTarget::Point { series: 0, index: 1 });
    assert_eq!(hit.tooltip, "1 5");

    let hit = chart.pointer_move(x1 + 3.0, HEIGHT / 2.0).expect("hit");
    assert_eq!(hit.target, HitTarget::Point { series: 0, index: 2 });
    assert_eq!(hit.tooltip, "2 3");
}

#[test]
fn chart_without_locate_hook_is_not_interactive() {
    let hooks = scene_charts::api::ChartHooks {
        locate: None,
        ..ChartKind::Bar(BarMode::Simple).hooks()
    };
    let mut chart = Chart::with_hooks(ChartKind::Bar(BarMode::Simple), hooks, NullRenderer::new())
        .expect("chart");
    chart.datum(fruit());
    chart.render().expect("render");
    assert!(chart.pointer_move(300.0, 200.0).is_none());
}

#[test]
fn donut_center_label_follows_hits() {
    let mut chart = Chart::attached(ChartKind::Donut, NullRenderer::new(), Container::fixed(240, 240))
        .expect("chart");
    chart.datum(SeriesData::Categorical(vec![
        CategoryDatum::new("a", 1.0),
        CategoryDatum::new("b", 3.0),
    ]));
    chart.render().expect("render");

    let origin = chart
        .scales()
        .and_then(Scales::as_polar)
        .expect("polar")
        .frame
        .origin;
    let ring_x = origin.x + 75.0;
    let hit = chart.pointer_move(ring_x, 240.0 - origin.y).expect("ring hit");
    assert!(matches!(hit.target, HitTarget::Wedge { .. }));
    assert_eq!(chart.renderer().count_in(LayerKind::Overlay), 1);

    let overlay: Vec<_> = chart
        .renderer()
        .scene()
        .into_iter()
        .filter(|node| node.layer == LayerKind::Overlay)
        .collect();
    match &overlay[0].drawable {
        Drawable::Text(text) => {
            assert_eq!(text.text, hit.tooltip);
            assert_eq!(text.x, origin.x);
        }
        other => panic!("unexpected overlay drawable: {other:?}"),
    }

    assert!(chart.pointer_move(origin.x, 240.0 - origin.y).is_none());
    assert_eq!(chart.renderer().count_in(LayerKind::Overlay), 0);

    chart.pointer_move(ring_x, 240.0 - origin.y).expect("ring hit");
    chart.pointer_leave();
    assert_eq!(chart.renderer().count_in(LayerKind::Overlay), 0);
}

#[test]
fn donut_inside_labels_skip_center_overlay() {
    let mut chart = Chart::attached(ChartKind::Donut, NullRenderer::new(), Container::fixed(240, 240))
        .expect("chart");
    chart
        .set_plot_options(json!({ "label": { "position": "inside" } }))
        .datum(SeriesData::Categorical(vec![CategoryDatum::new("a", 1.0)]));
    chart.render().expect("render");
    let origin = chart.scales().and_then(Scales::as_polar).expect("polar").frame.origin;
    chart
        .pointer_move(origin.x + 75.0, 240.0 - origin.y)
        .expect("ring hit");
    assert_eq!(chart.renderer().count_in(LayerKind::Overlay), 0);
}

#[test]
fn resize_is_debounced_until_quiet() {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Simple),
        NullRenderer::new(),
        Container::fluid(Viewport::new(600, 400)),
    )
    .expect("chart");
    chart.datum(fruit());
    chart.render().expect("render");
    let frames = chart.renderer().frames_rendered;

    let start = Instant::now();
    assert!(chart.observe_resize(Viewport::new(500, 400), start));
    assert!(!chart.poll_resize(start + Duration::from_millis(100)).expect("poll"));
    assert!(chart.observe_resize(Viewport::new(800, 500), start + Duration::from_millis(200)));
    assert!(!chart.poll_resize(start + Duration::from_millis(400)).expect("poll"));
    assert_eq!(chart.renderer().frames_rendered, frames);

    assert!(chart.poll_resize(start + Duration::from_millis(460)).expect("poll"));
    assert_eq!(chart.size(), Viewport::new(800, 500));
    assert_eq!(chart.renderer().viewport(), Viewport::new(800, 500));
    assert_eq!(chart.renderer().frames_rendered, frames + 1);
    assert_eq!(chart.state(), LifecycleState::Rendered);
    assert!(!chart.poll_resize(start + Duration::from_secs(5)).expect("poll"));
}

#[test]
fn fixed_containers_ignore_resize_observations() {
    let mut chart = rendered_bar();
    assert!(!chart.is_responsive());
    assert!(!chart.observe_resize(Viewport::new(100, 100), Instant::now()));
}

#[test]
fn custom_debounce_delay_is_honoured() {
    let mut chart = Chart::attached(
        ChartKind::Pie,
        NullRenderer::new(),
        Container::fluid(Viewport::new(400, 400)),
    )
    .expect("chart");
    chart.set_resize_debounce(Duration::from_millis(50)).datum(fruit());
    chart.render().expect("render");

    let start = Instant::now();
    chart.observe_resize(Viewport::new(300, 300), start);
    assert!(chart.poll_resize(start + Duration::from_millis(50)).expect("poll"));
    let polar = chart.scales().and_then(Scales::as_polar).expect("polar");
    assert_eq!(polar.frame.outer_radius, 130.0);
}

#[test]
fn resize_to_same_size_reproduces_the_scene() {
    let mut chart = Chart::attached(
        ChartKind::Line,
        NullRenderer::new(),
        Container::fluid(Viewport::new(640, 360)),
    )
    .expect("chart");
    chart
        .datum_json(&json!([[0, 3], [1, 7], [2, 4], [3, 9]]))
        .expect("datum");
    chart.render().expect("render");
    let before: Vec<_> = chart.renderer().scene().into_iter().cloned().collect();
    let scales = chart.scales().cloned();

    chart.resize_now(Viewport::new(640, 360)).expect("resize");
    let after: Vec<_> = chart.renderer().scene().into_iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(chart.scales().cloned(), scales);
}

#[test]
fn every_band_center_hits_its_category() {
    let labels = ["a", "b", "c", "d", "e", "f", "g"];
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Simple),
        NullRenderer::new(),
        Container::fixed(600, 400),
    )
    .expect("chart");
    chart.datum(SeriesData::Categorical(
        labels
            .iter()
            .zip(1..)
            .map(|(label, value)| CategoryDatum::new(*label, f64::from(value)))
            .collect(),
    ));
    chart.render().expect("render");

    let band = chart
        .scales()
        .and_then(Scales::as_cartesian)
        .and_then(|info| info.x_scale.as_band())
        .cloned()
        .expect("band");
    let y = HEIGHT - (chart.rect().bottom + 1.0);
    for index in 0..labels.len() {
        let x = band.center(index).expect("center");
        let hit = chart.pointer_move(x, y).expect("hit at band center");
        assert_eq!(hit.target, HitTarget::Category { index });
    }
}

#[test]
fn resize_after_rebinding_data_renders_the_new_data() {
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Simple),
        NullRenderer::new(),
        Container::fluid(Viewport::new(600, 400)),
    )
    .expect("chart");
    chart.datum(fruit());
    chart.render().expect("render");

    chart.datum(SeriesData::Categorical(vec![
        CategoryDatum::new("fig", 3.0),
        CategoryDatum::new("kiwi", 6.0),
        CategoryDatum::new("lime", 1.0),
        CategoryDatum::new("date", 8.0),
    ]));
    assert_eq!(chart.state(), LifecycleState::DataBound);

    let start = Instant::now();
    assert!(chart.observe_resize(Viewport::new(500, 300), start));
    assert!(chart.poll_resize(start + Duration::from_millis(300)).expect("poll"));
    assert_eq!(chart.state(), LifecycleState::Rendered);
    assert_eq!(chart.renderer().viewport(), Viewport::new(500, 300));

    let band = chart
        .scales()
        .and_then(Scales::as_cartesian)
        .and_then(|info| info.x_scale.as_band())
        .cloned()
        .expect("band");
    assert_eq!(band.len(), 4);
    let rect = chart.rect();
    assert_eq!(band.range(), rect.x_range());
    assert!(rect.left + rect.width < 500.0);
    assert_eq!(chart.renderer().count_in(LayerKind::Series), 4);

    chart.datum(fruit());
    chart.resize_now(Viewport::new(520, 320)).expect("resize now");
    assert_eq!(chart.state(), LifecycleState::Rendered);
    assert_eq!(chart.renderer().count_in(LayerKind::Series), 3);
}

#[test]
fn donut_pointer_moves_present_frames_only_when_the_label_changes() {
    let mut chart = Chart::attached(ChartKind::Donut, NullRenderer::new(), Container::fixed(240, 240))
        .expect("chart");
    chart.datum(SeriesData::Categorical(vec![
        CategoryDatum::new("a", 1.0),
        CategoryDatum::new("b", 3.0),
    ]));
    chart.render().expect("render");
    let origin = chart.scales().and_then(Scales::as_polar).expect("polar").frame.origin;
    let y = 240.0 - origin.y;
    let frames = chart.renderer().frames_rendered;

    assert!(chart.pointer_move(origin.x, y).is_none());
    assert_eq!(chart.renderer().frames_rendered, frames);

    chart.pointer_move(origin.x + 75.0, y).expect("ring hit");
    assert_eq!(chart.renderer().frames_rendered, frames + 1);
    chart.pointer_move(origin.x + 78.0, y).expect("same wedge");
    assert_eq!(chart.renderer().frames_rendered, frames + 1);
    assert_eq!(chart.renderer().count_in(LayerKind::Overlay), 1);

    assert!(chart.pointer_move(origin.x, y).is_none());
    assert_eq!(chart.renderer().frames_rendered, frames + 2);
    chart.pointer_leave();
    assert_eq!(chart.renderer().frames_rendered, frames + 2);
}
