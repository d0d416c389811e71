//! Layered JSON merging with "defaults-deep" semantics.

use serde_json::{Map, Value};

/// Merges `higher` over `lower`.
///
/// Objects merge key by key and recurse, so the lower layer supplies every
/// key the higher layer omits. Arrays and scalars from the higher layer
/// replace the lower value wholesale. A `null` in the higher layer keeps the
/// lower value.
#[must_use]
pub fn merge_layers(lower: &Value, higher: &Value) -> Value {
    match (lower, higher) {
        (Value::Object(low), Value::Object(high)) => Value::Object(merge_objects(low, high)),
        (_, Value::Null) => lower.clone(),
        (_, other) => other.clone(),
    }
}

fn merge_objects(lower: &Map<String, Value>, higher: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = lower.clone();
    for (key, high) in higher {
        let value = match merged.get(key) {
            Some(low) => merge_layers(low, high),
            None => high.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

/// Folds `layers` from lowest to highest priority.
#[must_use]
pub fn merge_all<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Object(Map::new()), |acc, layer| merge_layers(&acc, layer))
}

/// Returns `value` when it is an object, otherwise an empty object.
#[must_use]
pub fn object_or_empty(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Object(map)) => Value::Object(map.clone()),
        _ => Value::Object(Map::new()),
    }
}
