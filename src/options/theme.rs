use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::options::schema::ResolvedOptions;

/// Theme used for every key a requested theme leaves out.
pub const DEFAULT_THEME: &str = "walden";

/// Named theme documents, in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Value>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    /// Registry holding only the built-in theme.
    #[must_use]
    pub fn new() -> Self {
        let mut themes = IndexMap::new();
        themes.insert(DEFAULT_THEME.to_owned(), walden_document());
        Self { themes }
    }

    /// Adds or replaces a theme. Theme documents must be JSON objects.
    pub fn register(&mut self, name: impl Into<String>, theme: Value) -> ChartResult<()> {
        let name = name.into();
        if !theme.is_object() {
            return Err(ChartError::InvalidOptions(format!(
                "theme `{name}` must be a JSON object"
            )));
        }
        debug!(theme = %name, "registered theme");
        self.themes.insert(name, theme);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.themes.get(name)
    }

    #[must_use]
    pub fn default_theme(&self) -> &Value {
        self.themes
            .get(DEFAULT_THEME)
            .unwrap_or(&Value::Null)
    }

    /// Looks `name` up, falling back to the default theme for unknown names.
    #[must_use]
    pub fn resolve(&self, name: &str) -> &Value {
        match self.themes.get(name) {
            Some(theme) => theme,
            None => {
                warn!(theme = %name, fallback = DEFAULT_THEME, "unknown theme, using default");
                self.default_theme()
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

/// The built-in defaults serialized as a theme document.
#[must_use]
pub fn walden_document() -> Value {
    match serde_json::to_value(ResolvedOptions::default()) {
        Ok(Value::Object(mut map)) => {
            map.remove("theme");
            Value::Object(map)
        }
        _ => Value::Object(serde_json::Map::new()),
    }
}
