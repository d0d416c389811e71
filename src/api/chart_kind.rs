use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::scene::{BuildFn, DrawFn};
use crate::api::{draw, scales};
use crate::core::SeriesShape;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{self, LocateFn};
use crate::options::plot_bucket;

/// Bar layout; `grouped()` and `stacked()` switch between them, last call wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarMode {
    #[default]
    Simple,
    Grouped,
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar(BarMode),
    Line,
    Area,
    Scatter,
    Histogram,
    Pie,
    Donut,
}

impl ChartKind {
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Bar(_) => "BarChart",
            Self::Line => "LineChart",
            Self::Area => "AreaChart",
            Self::Scatter => "ScatterChart",
            Self::Histogram => "HistogramChart",
            Self::Pie => "PieChart",
            Self::Donut => "DonutChart",
        }
    }

    /// Plot-options bucket read by this kind, e.g. `"bar"`.
    #[must_use]
    pub fn bucket(self) -> String {
        plot_bucket(self.type_name())
    }

    /// Point shape `datum` must receive.
    #[must_use]
    pub fn series_shape(self) -> SeriesShape {
        match self {
            Self::Bar(BarMode::Simple) | Self::Pie | Self::Donut => SeriesShape::Categorical,
            Self::Bar(BarMode::Grouped | BarMode::Stacked) => SeriesShape::Grouped,
            Self::Line | Self::Area => SeriesShape::Temporal,
            Self::Scatter => SeriesShape::Bivariate,
            Self::Histogram => SeriesShape::Samples,
        }
    }

    #[must_use]
    pub fn is_polar(self) -> bool {
        matches!(self, Self::Pie | Self::Donut)
    }

    /// Built-in hook table for this kind.
    #[must_use]
    pub fn hooks(self) -> ChartHooks {
        let (build, draw): (BuildFn, DrawFn) = match self {
            Self::Bar(_) => (scales::build_bar_scales, draw::bars::draw_bars),
            Self::Line | Self::Area => (scales::build_line_scales, draw::lines::draw_lines),
            Self::Scatter => (scales::build_scatter_scales, draw::scatter::draw_scatter),
            Self::Histogram => (
                scales::build_histogram_scales,
                draw::histogram::draw_histogram,
            ),
            Self::Pie | Self::Donut => (scales::build_polar_scales, draw::polar::draw_polar),
        };
        ChartHooks {
            build: Some(build),
            draw: Some(draw),
            locate: Some(interaction::locate),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar(BarMode::Grouped) => f.write_str("BarChart(grouped)"),
            Self::Bar(BarMode::Stacked) => f.write_str("BarChart(stacked)"),
            other => f.write_str(other.type_name()),
        }
    }
}

/// Capability table of a chart kind.
///
/// `build` (scales) and `draw` (drawable graph) are required; a missing
/// `locate` makes the chart non-interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartHooks {
    pub build: Option<BuildFn>,
    pub draw: Option<DrawFn>,
    pub locate: Option<LocateFn>,
}

/// Hook table that passed the construction-time capability check.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedHooks {
    pub build: BuildFn,
    pub draw: DrawFn,
    pub locate: Option<LocateFn>,
}

impl ChartHooks {
    pub(crate) fn require(self, kind: ChartKind) -> ChartResult<ResolvedHooks> {
        let missing = |hook| ChartError::NotImplemented {
            kind: kind.to_string(),
            hook,
        };
        Ok(ResolvedHooks {
            build: self.build.ok_or_else(|| missing("build"))?,
            draw: self.draw.ok_or_else(|| missing("draw"))?,
            locate: self.locate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BarMode, ChartHooks, ChartKind};
    use crate::error::ChartError;

    #[test]
    fn buckets_follow_type_names() {
        assert_eq!(ChartKind::Bar(BarMode::Stacked).bucket(), "bar");
        assert_eq!(ChartKind::Donut.bucket(), "donut");
        assert_eq!(ChartKind::Histogram.bucket(), "histogram");
    }

    #[test]
    fn missing_draw_hook_fails_fast() {
        let hooks = ChartHooks {
            draw: None,
            ..ChartKind::Line.hooks()
        };
        let err = hooks.require(ChartKind::Line).expect_err("draw is required");
        assert!(matches!(err, ChartError::NotImplemented { hook: "draw", .. }));
    }
}
