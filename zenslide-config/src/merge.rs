//! Deep merge of option documents.

use serde_json::Value;

/// Merge `overrides` over `defaults`.
///
/// Objects merge key by key, recursing into nested option groups. Scalars and
/// arrays in `overrides` replace the default outright. Keys that `defaults`
/// does not know are carried over unchanged. A non-object `overrides` leaves
/// the defaults untouched.
pub fn resolve(defaults: &Value, overrides: &Value) -> Value {
    let (Value::Object(base), Value::Object(patch)) = (defaults, overrides)
    else {
        return defaults.clone();
    };

    let mut output = base.clone();
    for (key, value) in patch {
        let merged = match (output.get(key), value) {
            (Some(existing @ Value::Object(_)), Value::Object(_)) => {
                resolve(existing, value)
            }
            _ => value.clone(),
        };
        output.insert(key.clone(), merged);
    }
    Value::Object(output)
}
