//! Options cascade: theme defaults, user options and per-call overrides.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::options::merge::{merge_layers, object_or_empty};
use crate::options::schema::ResolvedOptions;
use crate::options::theme::{DEFAULT_THEME, ThemeRegistry};

/// Mutable override stores owned by one chart.
///
/// Every `set_*` call merges over what was stored before, so the newest call
/// wins key by key. The stores are owned JSON values; cloning them is a deep
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionLayers {
    options: Value,
    plot_options: Value,
    legend_options: Value,
}

impl Default for OptionLayers {
    fn default() -> Self {
        Self {
            options: Value::Object(Map::new()),
            plot_options: Value::Object(Map::new()),
            legend_options: Value::Object(Map::new()),
        }
    }
}

impl OptionLayers {
    pub fn set_options(&mut self, options: Value) {
        self.options = merge_layers(&self.options, &options);
    }

    pub fn set_plot_options(&mut self, plot_options: Value) {
        self.plot_options = merge_layers(&self.plot_options, &plot_options);
    }

    pub fn set_legend_options(&mut self, legend_options: Value) {
        self.legend_options = merge_layers(&self.legend_options, &legend_options);
    }

    #[must_use]
    pub fn options(&self) -> &Value {
        &self.options
    }

    #[must_use]
    pub fn plot_options(&self) -> &Value {
        &self.plot_options
    }

    #[must_use]
    pub fn legend_options(&self) -> &Value {
        &self.legend_options
    }

    /// Theme requested by the user options, by name or as an inline object.
    fn theme_layer<'a>(&'a self, registry: &'a ThemeRegistry) -> (&'a Value, Option<&'a Value>) {
        match self.options.get("theme") {
            Some(Value::String(name)) => (registry.resolve(name), None),
            Some(inline @ Value::Object(_)) => (registry.default_theme(), Some(inline)),
            _ => (registry.resolve(DEFAULT_THEME), None),
        }
    }
}

/// Plot-options bucket for a chart type name: lower-cased with the `chart`
/// suffix stripped, so `"BarChart"` maps to `"bar"`.
#[must_use]
pub fn plot_bucket(type_name: &str) -> String {
    let lower = type_name.to_lowercase();
    lower
        .strip_suffix("chart")
        .map(str::to_owned)
        .unwrap_or(lower)
}

/// Builds the merged options document for one render.
///
/// Priority low to high: the default theme, the requested theme, the user
/// options, the theme's plot bucket merged with the user plot options, then
/// the user legend options over the theme legend.
#[must_use]
pub fn merge_document(registry: &ThemeRegistry, layers: &OptionLayers, bucket: &str) -> Value {
    let (named, inline) = layers.theme_layer(registry);
    let mut theme = merge_layers(registry.default_theme(), named);
    if let Some(inline) = inline {
        theme = merge_layers(&theme, inline);
    }

    let mut user = object_or_empty(Some(&layers.options));
    if let Value::Object(map) = &mut user {
        map.remove("theme");
    }
    let mut document = merge_layers(&theme, &user);

    if let Value::Object(root) = &mut document {
        let plot_root = root
            .entry("plotOptions")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(plot_map) = plot_root {
            let themed = object_or_empty(plot_map.get(bucket));
            if !plot_map.contains_key(bucket) {
                trace!(bucket, "no themed plot options for chart type");
            }
            plot_map.insert(bucket.to_owned(), merge_layers(&themed, &layers.plot_options));
        }

        let legend = object_or_empty(root.get("legend"));
        root.insert(
            "legend".to_owned(),
            merge_layers(&legend, &layers.legend_options),
        );
        root.insert("theme".to_owned(), theme);
    }
    document
}

/// Runs the cascade and parses the result into the typed schema.
pub fn resolve(
    registry: &ThemeRegistry,
    layers: &OptionLayers,
    bucket: &str,
) -> ChartResult<ResolvedOptions> {
    let document = merge_document(registry, layers, bucket);
    let resolved = ResolvedOptions::from_document(document)?;
    debug!(
        bucket,
        fingerprint = resolved.fingerprint(),
        "resolved options"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{OptionLayers, merge_document, plot_bucket, resolve};
    use crate::options::theme::ThemeRegistry;

    #[test]
    fn bucket_strips_chart_suffix() {
        assert_eq!(plot_bucket("BarChart"), "bar");
        assert_eq!(plot_bucket("Donut"), "donut");
    }

    #[test]
    fn user_plot_options_land_in_the_bucket() {
        let registry = ThemeRegistry::new();
        let mut layers = OptionLayers::default();
        layers.set_plot_options(json!({"paddingInner": 0.3}));
        let document = merge_document(&registry, &layers, "bar");
        assert_eq!(document["plotOptions"]["bar"]["paddingInner"], json!(0.3));
        assert_eq!(document["plotOptions"]["bar"]["paddingOuter"], json!(0.1));
    }

    #[test]
    fn inline_theme_overrides_defaults() {
        let registry = ThemeRegistry::new();
        let mut layers = OptionLayers::default();
        layers.set_options(json!({"theme": {"colors": ["#ff0000"]}}));
        let resolved = resolve(&registry, &layers, "line").expect("resolve");
        assert_eq!(resolved.colors.len(), 1);
        assert_eq!(resolved.theme["colors"], json!(["#ff0000"]));
    }

    #[test]
    fn repeated_resolution_is_identical() {
        let registry = ThemeRegistry::new();
        let mut layers = OptionLayers::default();
        layers.set_options(json!({"labels": {"style": {"fontSize": 14}}}));
        let first = resolve(&registry, &layers, "bar").expect("first");
        let second = resolve(&registry, &layers, "bar").expect("second");
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(first, second);
    }
}
