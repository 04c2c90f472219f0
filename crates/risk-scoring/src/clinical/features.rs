use serde_json::{Map, Value};

/// Required names absent from the request, in model order.
pub(crate) fn missing_features(required: &[String], body: Option<&Map<String, Value>>) -> Vec<String> {
    required
        .iter()
        .filter(|name| body.map_or(true, |fields| !fields.contains_key(name.as_str())))
        .cloned()
        .collect()
}

/// Reads a feature value as a number. Numeric strings and booleans are accepted.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Renders names as `['A', 'B']`.
pub(crate) fn quoted_list(names: &[String]) -> String {
    let inner = names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}
