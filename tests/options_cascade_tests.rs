use scene_charts::core::{CategoryDatum, SeriesData, TickLabelFormatter};
use scene_charts::options::{LabelPosition, ResolvedOptions};
use scene_charts::render::Color;
use scene_charts::{BarMode, Chart, ChartError, ChartKind, NullRenderer};
use serde_json::json;

fn chart(kind: ChartKind) -> Chart<NullRenderer> {
    Chart::new(kind, NullRenderer::new()).expect("chart")
}

#[test]
fn walden_defaults_apply_without_user_options() {
    let options = chart(ChartKind::Line).populate_options().expect("resolve");
    assert_eq!(options, ResolvedOptions::from_document(options.document().clone()).expect("reparse"));
    assert!(!options.colors.is_empty());
    assert!(options.use_utc);
    assert!(!options.legend.show);
    assert_eq!(options.plot_options.line.line_width, 2.0);
}

#[test]
fn populate_options_is_idempotent() {
    let mut chart = chart(ChartKind::Bar(BarMode::Simple));
    chart
        .set_options(json!({ "title": { "text": "Sales" }, "axisTick": { "count": 5 } }))
        .set_plot_options(json!({ "paddingInner": 0.2 }));

    let first = chart.populate_options().expect("first");
    let second = chart.populate_options().expect("second");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first, second);
    assert_eq!(first.axis_tick.count, 5);
    assert_eq!(first.plot_options.bar.padding_inner, 0.2);
}

#[test]
fn later_set_options_calls_win_and_accumulate() {
    let mut chart = chart(ChartKind::Line);
    chart
        .set_options(json!({ "title": { "text": "first" }, "backgroundColor": "#000000" }))
        .set_options(json!({ "title": { "text": "second" } }));

    let options = chart.populate_options().expect("resolve");
    assert_eq!(options.title.text.as_deref(), Some("second"));
    assert_eq!(options.background_color, Color::from_hex("#000000").expect("hex"));
    assert_eq!(chart.current_title().as_deref(), Some("second"));
}

#[test]
fn plot_options_go_to_the_kind_bucket() {
    let mut donut = chart(ChartKind::Donut);
    donut.set_plot_options(json!({ "innerRadius": "30%", "label": { "position": "inside" } }));
    let options = donut.populate_options().expect("resolve");
    assert_eq!(options.plot_options.donut.inner_radius, "30%");
    assert_eq!(options.plot_options.donut.label.position, LabelPosition::Inside);
    assert_eq!(options.plot_options.pie.label.position, LabelPosition::Outside);
}

#[test]
fn unknown_theme_falls_back_to_walden() {
    let mut themed = chart(ChartKind::Line);
    themed.set_options(json!({ "theme": "no-such-theme" }));
    let plain = chart(ChartKind::Line);

    let themed = themed.populate_options().expect("resolve");
    let plain = plain.populate_options().expect("resolve");
    assert_eq!(themed.colors, plain.colors);
    assert_eq!(themed.labels, plain.labels);
}

#[test]
fn registered_theme_sits_between_defaults_and_user_options() {
    let mut chart = chart(ChartKind::Line);
    chart
        .register_theme(
            "dusk",
            json!({ "colors": ["#112233"], "labels": { "style": { "fontSize": 10 } } }),
        )
        .expect("register");
    chart.set_options(json!({ "theme": "dusk", "labels": { "style": { "color": "#ffffff" } } }));

    let options = chart.populate_options().expect("resolve");
    assert_eq!(options.colors, vec![Color::from_hex("#112233").expect("hex")]);
    assert_eq!(options.labels.style.font_size, 10.0);
    assert_eq!(options.labels.style.color, Color::from_hex("#ffffff").expect("hex"));
    assert_eq!(options.theme["colors"], json!(["#112233"]));
}

#[test]
fn inline_theme_object_is_merged_over_walden() {
    let mut chart = chart(ChartKind::Scatter);
    chart.set_options(json!({ "theme": { "plotOptions": { "scatter": { "radius": 7 } } } }));
    let options = chart.populate_options().expect("resolve");
    assert_eq!(options.plot_options.scatter.radius, 7.0);
    assert_eq!(options.plot_options.line.line_width, 2.0);
}

#[test]
fn register_theme_rejects_non_objects() {
    let mut chart = chart(ChartKind::Line);
    let err = chart
        .register_theme("broken", json!([1, 2, 3]))
        .expect_err("array theme");
    assert!(matches!(err, ChartError::InvalidOptions(_)));
}

#[test]
fn invalid_values_are_invalid_options() {
    let mut chart = chart(ChartKind::Bar(BarMode::Simple));
    chart.set_plot_options(json!({ "paddingInner": 1.5 }));
    assert!(matches!(
        chart.populate_options(),
        Err(ChartError::InvalidOptions(_))
    ));

    let mut line = self::chart(ChartKind::Line);
    line.set_options(json!({ "labels": { "style": { "color": "not-a-color" } } }));
    assert!(matches!(
        line.populate_options(),
        Err(ChartError::InvalidOptions(_))
    ));
}

#[test]
fn formatter_and_utc_builders_write_options() {
    let mut chart = chart(ChartKind::Line);
    chart
        .y_tick_label_formatter(TickLabelFormatter::AbbreviateNumber)
        .use_utc(false);
    let options = chart.populate_options().expect("resolve");
    assert_eq!(options.y_tick_label_formatter, TickLabelFormatter::AbbreviateNumber);
    assert!(!options.use_utc);
}

#[test]
fn copy_does_not_alias_option_layers() {
    let mut original = chart(ChartKind::Pie);
    original
        .title("original")
        .legends(json!({ "show": true }))
        .datum(SeriesData::Categorical(vec![CategoryDatum::new("a", 1.0)]));

    let mut copy = original.make_copy();
    assert!(copy.data().is_none());
    assert!(copy.live_drawables().is_empty());
    assert_eq!(copy.current_title().as_deref(), Some("original"));

    copy.title("copy").legends(json!({ "show": false }));
    assert_eq!(original.current_title().as_deref(), Some("original"));
    let resolved = original.populate_options().expect("resolve");
    assert!(resolved.legend.show);
    assert!(!copy.populate_options().expect("resolve").legend.show);
}
