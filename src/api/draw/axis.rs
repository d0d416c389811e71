use crate::api::draw::{LABEL_GAP_PX, label};
use crate::api::scene::DrawContext;
use crate::core::time_scale::format_time_label;
use crate::core::ticks::format_tick;
use crate::core::{CartesianInfo, SeriesData, XScale};
use crate::layout::Rect;
use crate::options::ResolvedOptions;
use crate::render::{
    Drawable, DrawableGraph, LabelFactory, LayerKind, LinePrimitive, LineStrokeStyle, TextHAlign,
};

fn y_tick_labels(info: &CartesianInfo, options: &ResolvedOptions) -> Vec<(f64, String)> {
    let count = options.axis_tick.count;
    let step = info.y_scale.tick_step(count);
    info.y_ticks(count)
        .into_iter()
        .map(|value| (value, options.y_tick_label_formatter.format(value, step)))
        .collect()
}

/// Horizontal room the y axis needs left of the plot: widest tick label plus
/// the tick and gap. Feeds the left-margin expansion, so it must run before
/// the final scale build.
pub(crate) fn y_axis_width(
    info: &CartesianInfo,
    options: &ResolvedOptions,
    labels: &dyn LabelFactory,
) -> f64 {
    let style = &options.labels.style;
    let widest = y_tick_labels(info, options)
        .iter()
        .map(|(_, text)| {
            labels
                .measure_and_rasterize(text, style.font_size, style.color)
                .measured_width
        })
        .fold(0.0, f64::max);
    widest + options.axis_tick.style.length + LABEL_GAP_PX
}

/// Band labels: categories for bars, bin starts for histograms.
fn band_labels(data: &SeriesData, info: &CartesianInfo) -> Vec<String> {
    match data {
        SeriesData::Categorical(data) => data.iter().map(|d| d.label.clone()).collect(),
        SeriesData::Grouped(table) => table.categories.clone(),
        SeriesData::Samples(_) => info
            .histogram
            .as_ref()
            .map(|bins| bins.bins().iter().map(|bin| format!("{:.1}", bin.x0)).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn x_tick_labels(ctx: &DrawContext<'_>, info: &CartesianInfo) -> Vec<(f64, String)> {
    let count = ctx.options.axis_tick.count;
    match &info.x_scale {
        XScale::Band(band) => band_labels(ctx.data, info)
            .into_iter()
            .enumerate()
            .filter_map(|(i, text)| band.center(i).map(|px| (px, text)))
            .collect(),
        XScale::Linear(linear) => {
            let step = linear.tick_step(count);
            linear
                .ticks(count)
                .into_iter()
                .map(|value| (linear.domain_to_pixel(value), format_tick(value, step)))
                .collect()
        }
        XScale::Time(time) => {
            let spec = ctx
                .x_label
                .or(info.time_ticks)
                .unwrap_or_else(|| time.auto_tick_spec(count));
            time.ticks_every(spec)
                .into_iter()
                .map(|ms| {
                    (
                        time.domain_to_pixel(ms as f64),
                        format_time_label(ms, spec.unit, ctx.options.use_utc),
                    )
                })
                .collect()
        }
    }
}

/// Tick positions of the x axis; time axes tick at their own cadence, which
/// may be denser than the label cadence.
fn x_tick_positions(ctx: &DrawContext<'_>, info: &CartesianInfo) -> Vec<f64> {
    match (&info.x_scale, info.time_ticks) {
        (XScale::Time(time), Some(spec)) => time
            .ticks_every(spec)
            .into_iter()
            .map(|ms| time.domain_to_pixel(ms as f64))
            .collect(),
        _ => x_tick_labels(ctx, info).into_iter().map(|(px, _)| px).collect(),
    }
}

fn push_line(graph: &mut DrawableGraph, layer: LayerKind, line: LinePrimitive) {
    graph.push(layer, Drawable::Line(line));
}

/// Axis lines, ticks, tick labels and split lines of a cartesian chart.
pub(crate) fn draw_axes(ctx: &DrawContext<'_>, info: &CartesianInfo, graph: &mut DrawableGraph) {
    let options = ctx.options;
    let rect: Rect = ctx.rect;
    let (x0, x1) = rect.x_range();
    let (y0, _) = rect.y_range();
    let axis_style = &options.axis_line.style;
    let tick = &options.axis_tick.style;
    let text = &options.labels.style;
    let split = &options.split_line;

    push_line(
        graph,
        LayerKind::Axis,
        LinePrimitive::new(x0, y0, x1, y0, axis_style.width, axis_style.color),
    );
    push_line(
        graph,
        LayerKind::Axis,
        LinePrimitive::new(x0, y0, x0, y0 + rect.height, axis_style.width, axis_style.color),
    );

    for (value, caption) in y_tick_labels(info, options) {
        let py = info.y_scale.domain_to_pixel(value);
        push_line(
            graph,
            LayerKind::Axis,
            LinePrimitive::new(x0 - tick.length, py, x0, py, axis_style.width, tick.color),
        );
        graph.push(
            LayerKind::Labels,
            label(
                ctx.labels,
                &caption,
                text.font_size,
                text.color,
                x0 - tick.length - LABEL_GAP_PX,
                py,
                TextHAlign::Right,
            ),
        );
        if split.show && py > y0 {
            push_line(
                graph,
                LayerKind::Grid,
                LinePrimitive::new(x0, py, x1, py, split.style.width, split.style.color)
                    .with_stroke_style(LineStrokeStyle::Dashed {
                        dash: split.style.dash_size,
                        gap: split.style.gap_size,
                    }),
            );
        }
    }

    for px in x_tick_positions(ctx, info) {
        push_line(
            graph,
            LayerKind::Axis,
            LinePrimitive::new(px, y0, px, y0 - tick.length, axis_style.width, tick.color),
        );
    }
    let label_y = y0 - tick.length - LABEL_GAP_PX - text.font_size / 2.0;
    for (px, caption) in x_tick_labels(ctx, info) {
        if caption.is_empty() {
            continue;
        }
        graph.push(
            LayerKind::Labels,
            label(
                ctx.labels,
                &caption,
                text.font_size,
                text.color,
                px,
                label_y,
                TextHAlign::Center,
            ),
        );
    }
}
