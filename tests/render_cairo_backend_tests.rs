#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use scene_charts::core::{CategoryDatum, SeriesData};
use scene_charts::layout::Container;
use scene_charts::render::{CairoContextRenderer, CairoRenderer, SceneRenderer};
use scene_charts::{BarMode, Chart, ChartError, ChartKind};

fn fruit() -> SeriesData {
    SeriesData::Categorical(vec![
        CategoryDatum::new("apple", 4.0),
        CategoryDatum::new("pear", 9.0),
        CategoryDatum::new("plum", 2.0),
    ])
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 480 }));
}

#[test]
fn cairo_renderer_paints_bar_chart() {
    let renderer = CairoRenderer::new(900, 500).expect("renderer");
    let mut chart = Chart::attached(
        ChartKind::Bar(BarMode::Simple),
        renderer,
        Container::fixed(900, 500),
    )
    .expect("chart");
    chart.datum(fruit()).title("Fruit");
    chart.render().expect("render");

    let stats = chart.renderer().last_stats();
    assert_eq!(stats.shapes_drawn, 3);
    assert!(stats.lines_drawn >= 2);
    assert!(stats.texts_drawn >= 4);
    assert_eq!(chart.renderer().surface().width(), 900);
}

#[test]
fn cairo_renderer_paints_donut_sectors() {
    let renderer = CairoRenderer::new(400, 400).expect("renderer");
    let mut chart =
        Chart::attached(ChartKind::Donut, renderer, Container::fixed(400, 400)).expect("chart");
    chart.datum(fruit());
    chart.render().expect("render");
    assert_eq!(chart.renderer().last_stats().shapes_drawn, 3);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let mut chart =
        Chart::attached(ChartKind::Pie, renderer, Container::fixed(600, 320)).expect("chart");
    chart.datum(fruit());
    chart.render().expect("render");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    chart
        .renderer_mut()
        .render_on_cairo_context(&context)
        .expect("render on context");
    assert_eq!(chart.renderer().last_stats().shapes_drawn, 3);
}

#[test]
fn cairo_renderer_recreates_surface_on_resize() {
    let mut renderer = CairoRenderer::new(300, 200).expect("renderer");
    renderer.set_viewport_size(640, 480).expect("resize");
    assert_eq!(renderer.surface().width(), 640);
    assert_eq!(renderer.surface().height(), 480);
    assert!(renderer.set_viewport_size(0, 10).is_err());
}
