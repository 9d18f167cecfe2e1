use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Interpret an arbitrary JSON value as a finite number, or 0.
pub fn coerce(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|number| number.is_finite()).unwrap_or(0.0)
}

/// True when `value` is present but would not survive coercion.
pub fn is_malformed(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Number(number) => !number.as_f64().is_some_and(f64::is_finite),
        Value::String(text) => !text
            .trim()
            .parse::<f64>()
            .is_ok_and(|number| number.is_finite()),
        _ => true,
    }
}

/// Serde adapter for numeric record fields. Never fails.
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Serde adapter for optional text fields. Scalars are kept as text,
/// anything else reads as absent.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value))
}

/// Like [`lenient_text`], for names that render as empty when unusable.
pub fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value).unwrap_or_default())
}

/// Only a JSON `true` sets the flag.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Serde adapter for record lists. A non-array reads as empty and elements
/// that cannot become a `T` are dropped, so one bad entry costs only itself.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!(found = %other, "expected a list, reading it as empty");
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(index = idx, error = %err, "skipping unreadable list entry");
                None
            }
        })
        .collect())
}

/// Render a coerced number without a trailing `.0` for whole values.
///
/// Values that round to zero print as `0`, never `-0`.
pub fn format_number(value: f64) -> String {
    let text = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    match text.strip_prefix('-') {
        Some("0") => "0".to_string(),
        _ => text,
    }
}

/// True when `value` displays as a negative number.
pub fn displays_negative(value: f64) -> bool {
    format_number(value).starts_with('-')
}
