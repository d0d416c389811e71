use crate::api::scene::{DrawContext, DrawOutput, Scales, scales_mismatch};
use crate::core::SeriesData;
use crate::error::ChartResult;
use crate::interaction::{BarSpan, HitIndex, HitTarget};
use crate::render::{Drawable, LayerKind, RectPrimitive};

/// One bar per series inside each shared bin.
pub fn draw_histogram(
    ctx: &DrawContext<'_>,
    scales: &Scales,
    out: &mut DrawOutput,
) -> ChartResult<()> {
    let info = scales.as_cartesian().ok_or_else(|| scales_mismatch(ctx.kind))?;
    let (Some(bins), Some(band), Some(inner)) = (
        info.histogram.as_ref(),
        info.x_scale.as_band(),
        info.x_scale2.as_ref(),
    ) else {
        return Err(scales_mismatch(ctx.kind));
    };
    let series_count = match ctx.data {
        SeriesData::Samples(series) => series.len(),
        _ => 0,
    };
    let zero = info.y_scale.domain_to_pixel(0.0);

    let mut spans = Vec::new();
    for (series, color) in (0..series_count).map(|s| (s, ctx.options.color_at(s))) {
        let Some(offset) = inner.position(series) else {
            continue;
        };
        for (bin, count) in bins.bins().iter().zip(bins.counts(series)) {
            let Some(left) = band.position(bin.index) else {
                continue;
            };
            let top = info.y_scale.domain_to_pixel(*count as f64);
            let width = inner.bandwidth();
            out.graph.push(
                LayerKind::Series,
                Drawable::Rect(RectPrimitive::new(
                    left + offset,
                    zero,
                    width,
                    top - zero,
                    color,
                )),
            );
            spans.push(BarSpan {
                target: HitTarget::Bin {
                    bin: bin.index,
                    series,
                },
                center_x: left + offset + width / 2.0,
                width,
                y0: zero,
                y1: top,
                tooltip: format!("{:.1}-{:.1}\n{count}", bin.x0, bin.x1),
            });
        }
    }
    out.hit_index = HitIndex::Bars {
        plot: ctx.rect,
        spans,
        check_y: true,
    };
    Ok(())
}
