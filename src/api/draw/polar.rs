use crate::api::ChartKind;
use crate::api::scene::{DrawContext, DrawOutput, Scales, scales_mismatch};
use crate::core::{PolarInfo, SeriesData};
use crate::error::ChartResult;
use crate::interaction::HitIndex;
use crate::options::LabelPosition;
use crate::render::{Drawable, LayerKind, LinePrimitive, RingSectorPrimitive};

/// Length of the radial ticks drawn outside pie wedges.
const OUTSIDE_TICK_PX: f64 = 4.0;

fn outside_ticks(ctx: &DrawContext<'_>, info: &PolarInfo, out: &mut DrawOutput) {
    let frame = info.frame;
    let style = &ctx.options.axis_tick.style;
    let end = frame.outer_radius + OUTSIDE_TICK_PX;
    for wedge in &info.wedges {
        let (sin, cos) = wedge.mid_theta().sin_cos();
        out.graph.push(
            LayerKind::Axis,
            Drawable::Line(LinePrimitive::new(
                frame.origin.x + frame.outer_radius * cos,
                frame.origin.y + frame.outer_radius * sin,
                frame.origin.x + end * cos,
                frame.origin.y + end * sin,
                ctx.options.axis_line.style.width,
                style.color,
            )),
        );
    }
}

/// Pie and donut wedges; colors follow the datum each wedge came from.
pub fn draw_polar(ctx: &DrawContext<'_>, scales: &Scales, out: &mut DrawOutput) -> ChartResult<()> {
    let info = scales.as_polar().ok_or_else(|| scales_mismatch(ctx.kind))?;
    let frame = info.frame;
    if frame.outer_radius > 0.0 {
        for wedge in info.wedges.iter().filter(|w| w.theta_length > 0.0) {
            out.graph.push(
                LayerKind::Series,
                Drawable::RingSector(RingSectorPrimitive {
                    center: frame.origin,
                    inner_radius: frame.inner_radius,
                    outer_radius: frame.outer_radius,
                    theta_start: wedge.theta_start,
                    theta_length: wedge.theta_length,
                    fill_color: ctx.options.color_at(wedge.datum_index),
                }),
            );
        }
        if ctx.kind == ChartKind::Pie
            && ctx.options.plot_options.pie.label.position == LabelPosition::Outside
        {
            outside_ticks(ctx, info, out);
        }
    }

    let labels = match ctx.data {
        SeriesData::Categorical(data) => data.iter().map(|d| d.label.clone()).collect(),
        _ => Vec::new(),
    };
    out.hit_index = HitIndex::Polar {
        info: info.clone(),
        labels,
    };
    Ok(())
}
