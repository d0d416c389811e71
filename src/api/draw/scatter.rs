use crate::api::scene::{DrawContext, DrawOutput, Scales, scales_mismatch, shape_mismatch};
use crate::core::{ScenePoint, SeriesData};
use crate::error::ChartResult;
use crate::interaction::{HitIndex, HitTarget, PointMark};
use crate::render::{CirclePrimitive, Drawable, LayerKind};

pub fn draw_scatter(
    ctx: &DrawContext<'_>,
    scales: &Scales,
    out: &mut DrawOutput,
) -> ChartResult<()> {
    let info = scales.as_cartesian().ok_or_else(|| scales_mismatch(ctx.kind))?;
    let SeriesData::Bivariate(series) = ctx.data else {
        return Err(shape_mismatch(ctx.kind, ctx.data));
    };
    let radius = ctx.options.plot_options.scatter.radius;

    let mut marks = Vec::new();
    for (series_index, one) in series.iter().enumerate() {
        let color = ctx.options.color_at(series_index);
        for (index, point) in one.data.iter().enumerate() {
            let Some(x) = info.x_scale.project(point.x) else {
                continue;
            };
            let center = ScenePoint::new(x, info.y_scale.domain_to_pixel(point.y));
            out.graph.push(
                LayerKind::Series,
                Drawable::Circle(CirclePrimitive {
                    center,
                    radius,
                    fill_color: color,
                }),
            );
            marks.push(PointMark {
                target: HitTarget::Point {
                    series: series_index,
                    index,
                },
                position: center,
                tooltip: format!("{} {}", point.x, point.y),
            });
        }
    }
    out.hit_index = HitIndex::scatter(ctx.rect, marks, radius);
    Ok(())
}
