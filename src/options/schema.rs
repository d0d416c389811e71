//! Typed view of the resolved options document.
//!
//! Every struct deserializes with `#[serde(default)]`, so the `Default`
//! impls here are also the content of the built-in `walden` theme.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{BandPadding, TickLabelFormatter};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

fn color(hex: &str) -> Color {
    // Only used with the literal palette below.
    Color::from_hex(hex).unwrap_or(Color::rgb(0.0, 0.0, 0.0))
}

pub(crate) const WALDEN_COLORS: [&str; 6] =
    ["#3fb1e3", "#6be6c1", "#626c91", "#a0a7e6", "#c4ebad", "#96dee8"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: color("#444444"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: color("#000000"),
            width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisLineOptions {
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickStyle {
    pub color: Color,
    pub length: f64,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            color: color("#000000"),
            length: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisTickOptions {
    /// Approximate number of ticks requested from continuous scales.
    pub count: usize,
    pub style: TickStyle,
}

impl Default for AxisTickOptions {
    fn default() -> Self {
        Self {
            count: crate::core::DEFAULT_TICK_COUNT,
            style: TickStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelOptions {
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitLineStyle {
    pub color: Color,
    pub width: f64,
    pub dash_size: f64,
    pub gap_size: f64,
}

impl Default for SplitLineStyle {
    fn default() -> Self {
        Self {
            color: color("#cccccc"),
            width: 1.0,
            dash_size: 5.0,
            gap_size: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitLineOptions {
    pub show: bool,
    pub style: SplitLineStyle,
}

impl Default for SplitLineOptions {
    fn default() -> Self {
        Self {
            show: true,
            style: SplitLineStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleOptions {
    pub text: Option<String>,
    pub style: TextStyle,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            text: None,
            style: TextStyle {
                font_size: 16.0,
                color: color("#333333"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendOptions {
    pub show: bool,
    pub style: TextStyle,
    pub marker_radius: f64,
    pub gap: f64,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            show: false,
            style: TextStyle::default(),
            marker_radius: 6.0,
            gap: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarPlotOptions {
    pub padding_inner: f64,
    pub padding_outer: f64,
    /// Extends the value domain to contain zero so bars share a baseline.
    pub include_zero: bool,
}

impl Default for BarPlotOptions {
    fn default() -> Self {
        Self {
            padding_inner: 0.1,
            padding_outer: 0.1,
            include_zero: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinePlotOptions {
    pub line_width: f64,
}

impl Default for LinePlotOptions {
    fn default() -> Self {
        Self { line_width: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AreaPlotOptions {
    pub line_width: f64,
    pub fill_opacity: f64,
}

impl Default for AreaPlotOptions {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            fill_opacity: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterPlotOptions {
    pub radius: f64,
}

impl Default for ScatterPlotOptions {
    fn default() -> Self {
        Self { radius: 4.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistogramPlotOptions {
    pub padding_inner: f64,
    pub padding_outer: f64,
}

impl Default for HistogramPlotOptions {
    fn default() -> Self {
        Self {
            padding_inner: 0.05,
            padding_outer: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
    #[default]
    None,
    Inside,
    Outside,
    Center,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WedgeLabelOptions {
    pub position: LabelPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PiePlotOptions {
    pub start_angle: f64,
    pub label: WedgeLabelOptions,
}

impl Default for PiePlotOptions {
    fn default() -> Self {
        Self {
            start_angle: 90.0,
            label: WedgeLabelOptions {
                position: LabelPosition::Outside,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DonutPlotOptions {
    pub start_angle: f64,
    pub clockwise: bool,
    /// Inner radius as a percentage of the outer radius, e.g. `"50%"`.
    pub inner_radius: String,
    pub label: WedgeLabelOptions,
}

impl Default for DonutPlotOptions {
    fn default() -> Self {
        Self {
            start_angle: 90.0,
            clockwise: true,
            inner_radius: "50%".to_owned(),
            label: WedgeLabelOptions {
                position: LabelPosition::Center,
            },
        }
    }
}

impl DonutPlotOptions {
    /// Inner radius fraction in `[0, 1)`.
    pub fn inner_radius_fraction(&self) -> ChartResult<f64> {
        let text = self.inner_radius.trim();
        let number = text.strip_suffix('%').unwrap_or(text).trim();
        let percent: f64 = number.parse().map_err(|_| {
            ChartError::InvalidOptions(format!("invalid donut inner radius `{text}`"))
        })?;
        if !(0.0..100.0).contains(&percent) {
            return Err(ChartError::InvalidOptions(format!(
                "donut inner radius must be in [0%, 100%), got `{text}`"
            )));
        }
        Ok(percent / 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotOptions {
    pub bar: BarPlotOptions,
    pub line: LinePlotOptions,
    pub area: AreaPlotOptions,
    pub scatter: ScatterPlotOptions,
    pub histogram: HistogramPlotOptions,
    pub pie: PiePlotOptions,
    pub donut: DonutPlotOptions,
}

impl PlotOptions {
    #[must_use]
    pub fn bar_padding(&self) -> BandPadding {
        BandPadding::new(self.bar.padding_inner, self.bar.padding_outer)
    }

    #[must_use]
    pub fn histogram_padding(&self) -> BandPadding {
        BandPadding::new(self.histogram.padding_inner, self.histogram.padding_outer)
    }
}

/// Resolved configuration read by layout, scale and drawing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub colors: Vec<Color>,
    pub background_color: Color,
    pub axis_line: AxisLineOptions,
    pub axis_tick: AxisTickOptions,
    pub labels: LabelOptions,
    pub split_line: SplitLineOptions,
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub y_tick_label_formatter: TickLabelFormatter,
    #[serde(rename = "useUTC")]
    pub use_utc: bool,
    pub plot_options: PlotOptions,
    /// Theme layers merged before user options, kept for inspection.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub theme: Value,
    #[serde(skip)]
    document: Value,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            colors: WALDEN_COLORS.iter().map(|hex| color(hex)).collect(),
            background_color: color("#ffffff"),
            axis_line: AxisLineOptions::default(),
            axis_tick: AxisTickOptions::default(),
            labels: LabelOptions::default(),
            split_line: SplitLineOptions::default(),
            title: TitleOptions::default(),
            legend: LegendOptions::default(),
            y_tick_label_formatter: TickLabelFormatter::Plain,
            use_utc: true,
            plot_options: PlotOptions::default(),
            theme: Value::Null,
            document: Value::Null,
        }
    }
}

impl ResolvedOptions {
    /// Deserializes and validates a merged options document.
    pub fn from_document(document: Value) -> ChartResult<Self> {
        let mut resolved: Self = serde_json::from_value(document.clone())
            .map_err(|e| ChartError::InvalidOptions(format!("failed to parse options: {e}")))?;
        resolved.document = document;
        resolved.validate()?;
        Ok(resolved)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.colors.is_empty() {
            return Err(ChartError::InvalidOptions(
                "color palette must not be empty".to_owned(),
            ));
        }
        for (what, size) in [
            ("labels.style.fontSize", self.labels.style.font_size),
            ("title.style.fontSize", self.title.style.font_size),
            ("legend.style.fontSize", self.legend.style.font_size),
            ("plotOptions.scatter.radius", self.plot_options.scatter.radius),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidOptions(format!(
                    "`{what}` must be finite and > 0"
                )));
            }
        }
        if self.axis_tick.count == 0 {
            return Err(ChartError::InvalidOptions(
                "`axisTick.count` must be > 0".to_owned(),
            ));
        }
        self.plot_options.bar_padding().validate()?;
        self.plot_options.histogram_padding().validate()?;
        self.plot_options.donut.inner_radius_fraction()?;
        Ok(())
    }

    /// Ordinal color scale: index `i` takes `colors[i % len]`.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::rgb(0.0, 0.0, 0.0);
        }
        self.colors[index % self.colors.len()]
    }

    /// The merged JSON document this snapshot was parsed from.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Stable hash of the merged document, for idempotence checks.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.document.to_string().hash(&mut hasher);
        hasher.finish()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.document)
            .map_err(|e| ChartError::InvalidOptions(format!("failed to serialize options: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DonutPlotOptions, ResolvedOptions};

    #[test]
    fn defaults_survive_serde_round_trip() {
        let document = serde_json::to_value(ResolvedOptions::default()).expect("serialize");
        let parsed = ResolvedOptions::from_document(document).expect("parse");
        assert_eq!(parsed.colors, ResolvedOptions::default().colors);
        assert_eq!(parsed.plot_options.pie.start_angle, 90.0);
    }

    #[test]
    fn bad_colors_are_invalid_options() {
        let result = ResolvedOptions::from_document(json!({"colors": ["not-a-color"]}));
        assert!(result.is_err());
    }

    #[test]
    fn donut_inner_radius_parses_percent() {
        let donut = DonutPlotOptions::default();
        assert_eq!(donut.inner_radius_fraction().expect("fraction"), 0.5);
        let bad = DonutPlotOptions {
            inner_radius: "120%".to_owned(),
            ..DonutPlotOptions::default()
        };
        assert!(bad.inner_radius_fraction().is_err());
    }
}
