use crate::api::draw::baseline;
use crate::api::scene::{DrawContext, DrawOutput, Scales, scales_mismatch, shape_mismatch};
use crate::core::{CartesianInfo, SeriesData};
use crate::error::ChartResult;
use crate::interaction::{BarSpan, HitIndex, HitTarget};
use crate::render::{Color, Drawable, LayerKind, RectPrimitive};

struct Bar {
    target: HitTarget,
    left: f64,
    width: f64,
    y0: f64,
    y1: f64,
    color: Color,
    tooltip: String,
}

fn emit(out: &mut DrawOutput, bars: Vec<Bar>) -> Vec<BarSpan> {
    bars.into_iter()
        .map(|bar| {
            let bottom = bar.y0.min(bar.y1);
            out.graph.push(
                LayerKind::Series,
                Drawable::Rect(RectPrimitive::new(
                    bar.left,
                    bottom,
                    bar.width,
                    (bar.y1 - bar.y0).abs(),
                    bar.color,
                )),
            );
            BarSpan {
                target: bar.target,
                center_x: bar.left + bar.width / 2.0,
                width: bar.width,
                y0: bar.y0,
                y1: bar.y1,
                tooltip: bar.tooltip,
            }
        })
        .collect()
}

fn simple(ctx: &DrawContext<'_>, info: &CartesianInfo, bars: &mut Vec<Bar>) {
    let SeriesData::Categorical(data) = ctx.data else {
        return;
    };
    let Some(band) = info.x_scale.as_band() else {
        return;
    };
    let zero = baseline(info.y_scale);
    for (index, datum) in data.iter().enumerate() {
        let Some(left) = band.position(index) else {
            continue;
        };
        bars.push(Bar {
            target: HitTarget::Category { index },
            left,
            width: band.bandwidth(),
            y0: zero,
            y1: info.y_scale.domain_to_pixel(datum.value),
            color: ctx.options.color_at(index),
            tooltip: format!("{} {}", datum.label, datum.value),
        });
    }
}

fn grouped(ctx: &DrawContext<'_>, info: &CartesianInfo, bars: &mut Vec<Bar>) {
    let SeriesData::Grouped(table) = ctx.data else {
        return;
    };
    let (Some(outer), Some(inner)) = (info.x_scale.as_band(), info.x_scale2.as_ref()) else {
        return;
    };
    let zero = baseline(info.y_scale);
    for (category, name) in table.categories.iter().enumerate() {
        let Some(group_left) = outer.position(category) else {
            continue;
        };
        for (series, row) in table.series.iter().enumerate() {
            let Some(offset) = inner.position(series) else {
                continue;
            };
            let value = table.value(series, category);
            bars.push(Bar {
                target: HitTarget::Segment { category, series },
                left: group_left + offset,
                width: inner.bandwidth(),
                y0: zero,
                y1: info.y_scale.domain_to_pixel(value),
                color: ctx.options.color_at(series),
                tooltip: format!("{name} {}: {value}", row.name),
            });
        }
    }
}

fn stacked(ctx: &DrawContext<'_>, info: &CartesianInfo, bars: &mut Vec<Bar>) {
    let SeriesData::Grouped(table) = ctx.data else {
        return;
    };
    let (Some(band), Some(heights)) = (info.x_scale.as_band(), info.y_scale2) else {
        return;
    };
    let zero = info.y_scale.domain_to_pixel(0.0);
    for (category, name) in table.categories.iter().enumerate() {
        let Some(left) = band.position(category) else {
            continue;
        };
        let mut top = zero;
        for (series, row) in table.series.iter().enumerate() {
            let value = table.value(series, category);
            let height = heights.extent_to_pixels(value);
            bars.push(Bar {
                target: HitTarget::Segment { category, series },
                left,
                width: band.bandwidth(),
                y0: top,
                y1: top + height,
                color: ctx.options.color_at(series),
                tooltip: format!("{name} {}: {value}", row.name),
            });
            top += height;
        }
    }
}

/// Simple, grouped and stacked bars.
pub fn draw_bars(ctx: &DrawContext<'_>, scales: &Scales, out: &mut DrawOutput) -> ChartResult<()> {
    let info = scales.as_cartesian().ok_or_else(|| scales_mismatch(ctx.kind))?;
    let mut bars = Vec::new();
    let check_y = match (ctx.data, info.y_scale2.is_some(), info.x_scale2.is_some()) {
        (SeriesData::Categorical(_), _, _) => {
            simple(ctx, info, &mut bars);
            false
        }
        (SeriesData::Grouped(_), true, _) => {
            stacked(ctx, info, &mut bars);
            true
        }
        (SeriesData::Grouped(_), false, true) => {
            grouped(ctx, info, &mut bars);
            false
        }
        _ => return Err(shape_mismatch(ctx.kind, ctx.data)),
    };
    let spans = emit(out, bars);
    out.hit_index = HitIndex::Bars {
        plot: ctx.rect,
        spans,
        check_y,
    };
    Ok(())
}
