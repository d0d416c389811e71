use crate::api::ChartKind;
use crate::core::{CartesianInfo, PolarInfo, SeriesData, TimeRange, TimeTickSpec, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HitIndex;
use crate::layout::Rect;
use crate::options::ResolvedOptions;
use crate::render::{DrawableGraph, LabelFactory};

/// Scales built for one data + rectangle pair. Never patched: a new
/// rectangle or new data means a new build.
#[derive(Debug, Clone, PartialEq)]
pub enum Scales {
    Cartesian(CartesianInfo),
    Polar(PolarInfo),
}

impl Scales {
    #[must_use]
    pub fn as_cartesian(&self) -> Option<&CartesianInfo> {
        match self {
            Self::Cartesian(info) => Some(info),
            Self::Polar(_) => None,
        }
    }

    #[must_use]
    pub fn as_polar(&self) -> Option<&PolarInfo> {
        match self {
            Self::Polar(info) => Some(info),
            Self::Cartesian(_) => None,
        }
    }
}

/// Inputs of a `build` hook.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub kind: ChartKind,
    pub data: &'a SeriesData,
    pub rect: Rect,
    pub options: &'a ResolvedOptions,
    pub time_range: Option<TimeRange>,
}

/// Inputs of a `draw` hook.
#[derive(Clone, Copy)]
pub struct DrawContext<'a> {
    pub kind: ChartKind,
    pub data: &'a SeriesData,
    pub rect: Rect,
    pub size: Viewport,
    pub options: &'a ResolvedOptions,
    pub labels: &'a dyn LabelFactory,
    /// Label cadence of time axes; defaults to the tick cadence.
    pub x_label: Option<TimeTickSpec>,
}

/// What a draw pass produces: the staged graph and the hit-test index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawOutput {
    pub graph: DrawableGraph,
    pub hit_index: HitIndex,
}

pub type BuildFn = fn(&BuildContext<'_>) -> ChartResult<Scales>;
pub type DrawFn = fn(&DrawContext<'_>, &Scales, &mut DrawOutput) -> ChartResult<()>;

/// Error for data whose point shape does not fit the chart kind.
pub(crate) fn shape_mismatch(kind: ChartKind, data: &SeriesData) -> ChartError {
    ChartError::InvalidData(format!(
        "{kind} expects {:?} series, got {:?}",
        kind.series_shape(),
        data.shape()
    ))
}

/// Error for scales of the wrong family reaching a draw hook.
pub(crate) fn scales_mismatch(kind: ChartKind) -> ChartError {
    ChartError::InvalidData(format!("{kind} received scales of another chart family"))
}
