use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::lifecycle::LifecycleState;
use crate::api::{BarMode, Chart, ChartKind};
use crate::core::{SeriesData, TimeRange, TimeTickSpec, TimeUnit};
use crate::error::ChartResult;
use crate::render::SceneRenderer;

impl<R: SceneRenderer> Chart<R> {
    /// Stores `series` for the next render. Replaces earlier data; never
    /// renders by itself.
    pub fn datum(&mut self, series: SeriesData) -> &mut Self {
        if self.lifecycle.is_disposed() {
            warn!(kind = %self.kind, "ignoring datum on a disposed chart");
            return self;
        }
        let series = series.canonicalized();
        debug!(
            kind = %self.kind,
            shape = ?series.shape(),
            series = series.series_names().len(),
            "bound data"
        );
        self.data = Some(series);
        if let Err(err) = self.lifecycle.advance(LifecycleState::DataBound) {
            warn!(kind = %self.kind, %err, "unexpected lifecycle state while binding data");
        }
        self
    }

    /// Parses a JSON payload in the shape this chart kind expects, then binds it.
    pub fn datum_json(&mut self, payload: &Value) -> ChartResult<&mut Self> {
        let series = SeriesData::from_json(self.kind.series_shape(), payload)?;
        Ok(self.datum(series))
    }

    /// Pins the time axis to `[start, end]` with one tick every `interval` units.
    pub fn time_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        unit: TimeUnit,
        interval: u32,
    ) -> &mut Self {
        self.time_range = Some(TimeRange {
            start_ms: start.timestamp_millis(),
            end_ms: end.timestamp_millis(),
            ticks: TimeTickSpec::new(unit, interval),
        });
        self
    }

    /// Sets the label cadence of the time axis.
    pub fn x_label(&mut self, unit: TimeUnit, interval: u32) -> &mut Self {
        self.x_label = Some(TimeTickSpec::new(unit, interval));
        self
    }

    #[must_use]
    pub fn current_time_range(&self) -> Option<TimeRange> {
        self.time_range
    }

    /// Switches a bar chart to grouped bars. No effect on other kinds.
    pub fn grouped(&mut self) -> &mut Self {
        self.set_bar_mode(BarMode::Grouped)
    }

    /// Switches a bar chart to stacked bars. No effect on other kinds.
    pub fn stacked(&mut self) -> &mut Self {
        self.set_bar_mode(BarMode::Stacked)
    }

    fn set_bar_mode(&mut self, mode: BarMode) -> &mut Self {
        match self.kind {
            ChartKind::Bar(_) => self.kind = ChartKind::Bar(mode),
            other => warn!(kind = %other, ?mode, "bar mode ignored for non-bar chart"),
        }
        self
    }
}
