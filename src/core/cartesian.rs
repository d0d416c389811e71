//! Scale resolution for cartesian chart kinds.
//!
//! Every `build_*` function takes the raw series and the current plotting
//! rectangle and returns a fresh `CartesianInfo`. Infos are never patched:
//! a new rectangle or new data always means a new build.

use tracing::debug;

use crate::core::band_scale::{BandPadding, BandScale};
use crate::core::histogram::HistogramBins;
use crate::core::scale::{DEFAULT_TICK_COUNT, LinearScale};
use crate::core::series::{CategoryDatum, GroupedTable, SampleSeries, TimeSeries, XKind, XySeries};
use crate::core::time_scale::{TimeScale, TimeTickSpec};
use crate::core::types::Extent;
use crate::error::{ChartError, ChartResult};
use crate::layout::Rect;

/// Pinned time domain with an explicit tick cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
    pub ticks: TimeTickSpec,
}

/// Knobs read by the scale builders, resolved from options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSettings {
    pub padding: BandPadding,
    pub tick_count: usize,
    pub include_zero: bool,
    pub time_range: Option<TimeRange>,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            padding: BandPadding::default(),
            tick_count: DEFAULT_TICK_COUNT,
            include_zero: false,
            time_range: None,
        }
    }
}

/// Horizontal scale of a cartesian chart.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Band(BandScale),
    Linear(LinearScale),
    Time(TimeScale),
}

impl XScale {
    /// Pixel of a continuous x value; band scales read `value` as an index
    /// and return the band center.
    #[must_use]
    pub fn project(&self, value: f64) -> Option<f64> {
        match self {
            Self::Band(band) => {
                if value < 0.0 || value.fract() != 0.0 {
                    return None;
                }
                band.center(value as usize)
            }
            Self::Linear(linear) => Some(linear.domain_to_pixel(value)),
            Self::Time(time) => Some(time.domain_to_pixel(value)),
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(band) => Some(band),
            _ => None,
        }
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.as_band().map_or(0.0, BandScale::bandwidth)
    }
}

/// Resolved scale bundle for one data + rectangle pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianInfo {
    pub x_scale: XScale,
    pub y_scale: LinearScale,
    /// Inner band scale: series within a group, or series within a bin.
    pub x_scale2: Option<BandScale>,
    /// Segment-height scale for stacked bars.
    pub y_scale2: Option<LinearScale>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Per-category totals of stacked bars.
    pub stack_totals: Vec<f64>,
    pub histogram: Option<HistogramBins>,
    /// Tick cadence of time axes.
    pub time_ticks: Option<TimeTickSpec>,
}

impl CartesianInfo {
    fn new(x_scale: XScale, y_scale: LinearScale, x: Extent, y: Extent) -> Self {
        Self {
            x_scale,
            y_scale,
            x_scale2: None,
            y_scale2: None,
            x_min: x.min,
            x_max: x.max,
            y_min: y.min,
            y_max: y.max,
            stack_totals: Vec::new(),
            histogram: None,
            time_ticks: None,
        }
    }

    #[must_use]
    pub fn y_ticks(&self, count: usize) -> Vec<f64> {
        self.y_scale.ticks(count)
    }
}

fn index_extent(len: usize) -> Extent {
    if len == 0 {
        Extent::EMPTY
    } else {
        Extent {
            min: 0.0,
            max: (len - 1) as f64,
        }
    }
}

fn value_scale(extent: Extent, rect: &Rect, settings: &ScaleSettings) -> ChartResult<LinearScale> {
    let extent = if settings.include_zero && !extent.is_empty() {
        extent.including_zero()
    } else {
        extent
    };
    LinearScale::from_extent(extent, rect.y_range(), Some(settings.tick_count))
}

/// Simple bars: band x over categories, niced linear y over values.
pub fn build_bar(
    data: &[CategoryDatum],
    rect: &Rect,
    settings: &ScaleSettings,
) -> ChartResult<CartesianInfo> {
    let x = BandScale::new(data.len(), rect.x_range(), settings.padding)?;
    let values = Extent::of(data.iter().map(|d| d.value));
    let y = value_scale(values, rect, settings)?;
    Ok(CartesianInfo::new(
        XScale::Band(x),
        y,
        index_extent(data.len()),
        values,
    ))
}

/// Grouped bars: outer band over categories, inner band over series.
///
/// The inner band spans the outer bandwidth edge to edge, so only the inner
/// padding separates the series bars of one category.
pub fn build_grouped_bar(
    table: &GroupedTable,
    rect: &Rect,
    settings: &ScaleSettings,
) -> ChartResult<CartesianInfo> {
    let outer = BandScale::new(table.categories.len(), rect.x_range(), settings.padding)?;
    let inner = BandScale::new(
        table.series.len(),
        (0.0, outer.bandwidth()),
        BandPadding::new(settings.padding.inner, 0.0),
    )?;
    let values = Extent::of(table.series.iter().flat_map(|s| s.values.iter().copied()));
    let y = value_scale(values, rect, settings)?;

    let mut info = CartesianInfo::new(
        XScale::Band(outer),
        y,
        index_extent(table.categories.len()),
        values,
    );
    info.x_scale2 = Some(inner);
    Ok(info)
}

/// Stacked bars: y over `[0, max category total]`, plus a segment-height scale.
///
/// Negative values are rejected: stacking them has no single baseline.
pub fn build_stacked_bar(
    table: &GroupedTable,
    rect: &Rect,
    settings: &ScaleSettings,
) -> ChartResult<CartesianInfo> {
    if let Some(row) = table
        .series
        .iter()
        .find(|row| row.values.iter().any(|v| *v < 0.0))
    {
        return Err(ChartError::InvalidData(format!(
            "stacked bars require non-negative values; series `{}` has a negative value",
            row.name
        )));
    }

    let x = BandScale::new(table.categories.len(), rect.x_range(), settings.padding)?;
    let totals = table.category_totals();
    let stacked = Extent::of(totals.iter().copied()).include(0.0);
    let y = LinearScale::from_extent(stacked, rect.y_range(), Some(settings.tick_count))?;
    // Same domain as `y`, measured from zero pixels so segment heights add up.
    let y2 = y.with_range((0.0, rect.height));
    debug!(categories = totals.len(), max_total = stacked.max, "built stacked scales");

    let mut info = CartesianInfo::new(
        XScale::Band(x),
        y,
        index_extent(table.categories.len()),
        stacked,
    );
    info.y_scale2 = Some(y2);
    info.stack_totals = totals;
    Ok(info)
}

/// Line and area charts: time or numeric x, niced linear y.
pub fn build_temporal(
    x_kind: XKind,
    series: &[TimeSeries],
    rect: &Rect,
    settings: &ScaleSettings,
) -> ChartResult<CartesianInfo> {
    let xs = Extent::of(series.iter().flat_map(|s| s.data.iter().map(|p| p.x)));
    let ys = Extent::of(series.iter().flat_map(|s| s.data.iter().map(|p| p.y)));
    let y = value_scale(ys, rect, settings)?;

    let (x_scale, ticks) = match (x_kind, settings.time_range) {
        (XKind::Time, Some(range)) => (
            XScale::Time(TimeScale::new(range.start_ms, range.end_ms, rect.x_range())?),
            Some(range.ticks),
        ),
        (XKind::Time, None) if !xs.is_empty() => {
            let time = TimeScale::from_extent(xs.min as i64, xs.max as i64, rect.x_range())?;
            (XScale::Time(time), Some(time.auto_tick_spec(settings.tick_count)))
        }
        _ => (
            XScale::Linear(LinearScale::from_extent(xs, rect.x_range(), None)?),
            None,
        ),
    };

    let x_extent = match (&x_scale, settings.time_range) {
        (XScale::Time(_), Some(range)) => Extent {
            min: range.start_ms as f64,
            max: range.end_ms as f64,
        },
        _ => xs,
    };
    let mut info = CartesianInfo::new(x_scale, y, x_extent, ys);
    info.time_ticks = ticks;
    Ok(info)
}

/// Scatter charts: niced linear scales on both axes.
pub fn build_scatter(
    series: &[XySeries],
    rect: &Rect,
    settings: &ScaleSettings,
) -> ChartResult<CartesianInfo> {
    let xs = Extent::of(series.iter().flat_map(|s| s.data.iter().map(|p| p.x)));
    let ys = Extent::of(series.iter().flat_map(|s| s.data.iter().map(|p| p.y)));
    let x = LinearScale::from_extent(xs, rect.x_range(), Some(settings.tick_count))?;
    let y = value_scale(ys, rect, settings)?;
    Ok(CartesianInfo::new(XScale::Linear(x), y, xs, ys))
}

/// Histograms: band x over shared bin indices, y over `[0, max count]`.
pub fn build_histogram(
    series: &[SampleSeries],
    rect: &Rect,
    settings: &ScaleSettings,
) -> ChartResult<CartesianInfo> {
    let samples: Vec<&[f64]> = series.iter().map(|s| s.data.as_slice()).collect();
    let bins = HistogramBins::compute(&samples);
    let x = BandScale::new(bins.bins().len(), rect.x_range(), settings.padding)?;
    let inner = BandScale::new(
        series.len().max(1),
        (0.0, x.bandwidth()),
        BandPadding::new(0.0, 0.0),
    )?;
    let counts = Extent::of([0.0, bins.max_count() as f64]);
    let y = LinearScale::from_extent(counts, rect.y_range(), Some(settings.tick_count))?;
    let x_extent = match (bins.bins().first(), bins.bins().last()) {
        (Some(first), Some(last)) => Extent {
            min: first.x0,
            max: last.x1,
        },
        _ => Extent::EMPTY,
    };

    let mut info = CartesianInfo::new(XScale::Band(x), y, x_extent, counts);
    info.x_scale2 = Some(inner);
    info.histogram = Some(bins);
    Ok(info)
}
