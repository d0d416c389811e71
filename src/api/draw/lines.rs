use crate::api::ChartKind;
use crate::api::draw::{baseline, format_x};
use crate::api::scene::{DrawContext, DrawOutput, Scales, scales_mismatch, shape_mismatch};
use crate::core::{ScenePoint, SeriesData};
use crate::error::ChartResult;
use crate::interaction::{HitIndex, HitTarget, PointMark};
use crate::render::{Drawable, LayerKind, PolygonPrimitive, PolylinePrimitive};

/// Line and area series. Areas fill down to the zero baseline beneath the
/// stroke.
pub fn draw_lines(ctx: &DrawContext<'_>, scales: &Scales, out: &mut DrawOutput) -> ChartResult<()> {
    let info = scales.as_cartesian().ok_or_else(|| scales_mismatch(ctx.kind))?;
    let SeriesData::Temporal { series, .. } = ctx.data else {
        return Err(shape_mismatch(ctx.kind, ctx.data));
    };
    let plot = &ctx.options.plot_options;
    let (line_width, fill_opacity) = match ctx.kind {
        ChartKind::Area => (plot.area.line_width, Some(plot.area.fill_opacity)),
        _ => (plot.line.line_width, None),
    };
    let unit = info.time_ticks.map(|spec| spec.unit);
    let zero = baseline(info.y_scale);

    let mut marks = Vec::new();
    for (series_index, one) in series.iter().enumerate() {
        let color = ctx.options.color_at(series_index);
        let points: Vec<ScenePoint> = one
            .data
            .iter()
            .filter_map(|p| {
                info.x_scale
                    .project(p.x)
                    .map(|x| ScenePoint::new(x, info.y_scale.domain_to_pixel(p.y)))
            })
            .collect();

        if let (Some(opacity), Some(first), Some(last)) = (fill_opacity, points.first(), points.last())
        {
            if points.len() >= 2 {
                let mut outline = points.clone();
                outline.push(ScenePoint::new(last.x, zero));
                outline.push(ScenePoint::new(first.x, zero));
                out.graph.push(
                    LayerKind::Series,
                    Drawable::Polygon(PolygonPrimitive {
                        points: outline,
                        fill_color: color.with_alpha(opacity),
                    }),
                );
            }
        }
        if points.len() >= 2 {
            out.graph.push(
                LayerKind::Series,
                Drawable::Polyline(PolylinePrimitive {
                    points: points.clone(),
                    stroke_width: line_width,
                    color,
                }),
            );
        }

        marks.extend(one.data.iter().zip(points).enumerate().map(
            |(index, (datum, position))| PointMark {
                target: HitTarget::Point {
                    series: series_index,
                    index,
                },
                position,
                tooltip: format!(
                    "{} {}",
                    format_x(ctx.data, datum.x, unit, ctx.options.use_utc),
                    datum.y
                ),
            },
        ));
    }
    out.hit_index = HitIndex::points(ctx.rect, marks);
    Ok(())
}
