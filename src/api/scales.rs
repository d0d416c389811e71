//! Built-in `build` hooks: scale resolution per chart kind.

use crate::api::scene::{BuildContext, Scales, shape_mismatch};
use crate::api::{BarMode, ChartKind};
use crate::core::cartesian::{
    build_bar, build_grouped_bar, build_histogram, build_scatter, build_stacked_bar,
    build_temporal,
};
use crate::core::polar::{PolarFrame, PolarInfo, WedgeOrder, build_wedges};
use crate::core::{BandPadding, ScaleSettings, SeriesData};
use crate::error::ChartResult;

fn settings(ctx: &BuildContext<'_>, padding: BandPadding, include_zero: bool) -> ScaleSettings {
    ScaleSettings {
        padding,
        tick_count: ctx.options.axis_tick.count,
        include_zero,
        time_range: ctx.time_range,
    }
}

pub fn build_bar_scales(ctx: &BuildContext<'_>) -> ChartResult<Scales> {
    let plot = &ctx.options.plot_options;
    let settings = settings(ctx, plot.bar_padding(), plot.bar.include_zero);
    let info = match (ctx.kind, ctx.data) {
        (ChartKind::Bar(BarMode::Simple), SeriesData::Categorical(data)) => {
            build_bar(data, &ctx.rect, &settings)?
        }
        (ChartKind::Bar(BarMode::Grouped), SeriesData::Grouped(table)) => {
            build_grouped_bar(table, &ctx.rect, &settings)?
        }
        (ChartKind::Bar(BarMode::Stacked), SeriesData::Grouped(table)) => {
            build_stacked_bar(table, &ctx.rect, &settings)?
        }
        _ => return Err(shape_mismatch(ctx.kind, ctx.data)),
    };
    Ok(Scales::Cartesian(info))
}

pub fn build_line_scales(ctx: &BuildContext<'_>) -> ChartResult<Scales> {
    let SeriesData::Temporal { x_kind, series } = ctx.data else {
        return Err(shape_mismatch(ctx.kind, ctx.data));
    };
    let settings = settings(ctx, BandPadding::default(), false);
    Ok(Scales::Cartesian(build_temporal(
        *x_kind, series, &ctx.rect, &settings,
    )?))
}

pub fn build_scatter_scales(ctx: &BuildContext<'_>) -> ChartResult<Scales> {
    let SeriesData::Bivariate(series) = ctx.data else {
        return Err(shape_mismatch(ctx.kind, ctx.data));
    };
    let settings = settings(ctx, BandPadding::default(), false);
    Ok(Scales::Cartesian(build_scatter(series, &ctx.rect, &settings)?))
}

pub fn build_histogram_scales(ctx: &BuildContext<'_>) -> ChartResult<Scales> {
    let SeriesData::Samples(series) = ctx.data else {
        return Err(shape_mismatch(ctx.kind, ctx.data));
    };
    let settings = settings(ctx, ctx.options.plot_options.histogram_padding(), false);
    Ok(Scales::Cartesian(build_histogram(
        series, &ctx.rect, &settings,
    )?))
}

/// Pie and donut: wedges around the rectangle center.
pub fn build_polar_scales(ctx: &BuildContext<'_>) -> ChartResult<Scales> {
    let SeriesData::Categorical(data) = ctx.data else {
        return Err(shape_mismatch(ctx.kind, ctx.data));
    };
    let values: Vec<f64> = data.iter().map(|datum| datum.value).collect();
    let outer_radius = ctx.rect.width.min(ctx.rect.height).max(0.0) / 2.0;
    let plot = &ctx.options.plot_options;
    let (start, order, inner_radius) = match ctx.kind {
        ChartKind::Donut => (
            plot.donut.start_angle,
            WedgeOrder::ByValue {
                clockwise: plot.donut.clockwise,
            },
            plot.donut.inner_radius_fraction()? * outer_radius,
        ),
        _ => (plot.pie.start_angle, WedgeOrder::Reversed, 0.0),
    };
    let wedges = build_wedges(&values, start, order)?;
    Ok(Scales::Polar(PolarInfo {
        frame: PolarFrame {
            origin: ctx.rect.center(),
            outer_radius,
            inner_radius,
        },
        wedges,
        total: values.iter().sum(),
    }))
}
