use serde_json::{Value, json};

use crate::api::Chart;
use crate::core::TickLabelFormatter;
use crate::error::ChartResult;
use crate::options::{ResolvedOptions, merge_document, resolve};
use crate::render::SceneRenderer;

impl<R: SceneRenderer> Chart<R> {
    /// Merges a partial options document over earlier `set_options` calls.
    /// A `theme` key names a registered theme or carries an inline theme object.
    pub fn set_options(&mut self, options: Value) -> &mut Self {
        self.layers.set_options(options);
        self
    }

    /// Merges overrides into this kind's plot-options bucket.
    pub fn set_plot_options(&mut self, plot_options: Value) -> &mut Self {
        self.layers.set_plot_options(plot_options);
        self
    }

    /// Merges legend overrides, e.g. `{"show": true}`.
    pub fn legends(&mut self, legend: Value) -> &mut Self {
        self.layers.set_legend_options(legend);
        self
    }

    pub fn title(&mut self, text: impl Into<String>) -> &mut Self {
        self.set_options(json!({ "title": { "text": text.into() } }))
    }

    /// Title the next render would draw.
    #[must_use]
    pub fn current_title(&self) -> Option<String> {
        merge_document(&self.themes, &self.layers, &self.kind.bucket())
            .get("title")
            .and_then(|title| title.get("text"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    pub fn y_tick_label_formatter(&mut self, formatter: TickLabelFormatter) -> &mut Self {
        let name = match formatter {
            TickLabelFormatter::Plain => "plain",
            TickLabelFormatter::AbbreviateNumber => "abbreviateNumber",
        };
        self.set_options(json!({ "yTickLabelFormatter": name }))
    }

    /// Formats time-axis labels in UTC (`true`) or local time.
    pub fn use_utc(&mut self, use_utc: bool) -> &mut Self {
        self.set_options(json!({ "useUTC": use_utc }))
    }

    /// Adds a named theme that `set_options({"theme": name})` can select.
    pub fn register_theme(&mut self, name: impl Into<String>, theme: Value) -> ChartResult<&mut Self> {
        self.themes.register(name, theme)?;
        Ok(self)
    }

    /// Runs the options cascade without rendering.
    pub fn populate_options(&self) -> ChartResult<ResolvedOptions> {
        resolve(&self.themes, &self.layers, &self.kind.bucket())
    }
}
