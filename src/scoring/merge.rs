use serde_json::{Map, Value};

/// Layer `overrides` on top of `base`.
///
/// Objects merge key by key, recursively. Arrays and scalars in `overrides`
/// replace the base value whole. A `null` override keeps the base value,
/// at any depth, so no `null` from `overrides` reaches the result.
/// Neither input is modified.
pub fn deep_merge_config(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (_, Value::Null) => base.clone(),
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged = base_map.clone();
            for (key, override_value) in override_map {
                let value = match base_map.get(key) {
                    Some(base_value) => deep_merge_config(base_value, override_value),
                    None if override_value.is_null() => continue,
                    None => deep_merge_config(&Value::Null, override_value),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (_, Value::Object(_)) => deep_merge_config(&Value::Object(Map::new()), overrides),
        _ => overrides.clone(),
    }
}
