//! Invocation payload parsing.
//!
//! The payload is a single JSON document (`calculation` + `items`, see the
//! type docs). Numeric fields are coerced eagerly here so every later stage
//! works with plain `f64`/`i64`; a field that cannot be coerced fails the
//! whole run rather than degrading to zero.

use serde::Deserializer;
use serde::de::{self, Deserialize};
use serde_json::Value;

use super::error::ExportError;
use super::types::ExportPayload;

/// Marker embedded in coercion failures so they can be told apart from
/// structural deserialization errors.
const COERCE_ERR: &str = "cannot coerce";

/// Parse the JSON invocation payload.
///
/// Invalid JSON and missing `calculation`/`items` keys are malformed input;
/// a field that fails numeric coercion aborts with
/// [`ExportError::NumericConversion`].
pub fn parse_payload(input: &str) -> Result<ExportPayload, ExportError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| ExportError::MalformedInput(format!("invalid JSON: {e}")))?;
    payload_from_value(value)
}

/// Build a payload from an already-parsed JSON value.
pub fn payload_from_value(value: Value) -> Result<ExportPayload, ExportError> {
    let object = value
        .as_object()
        .ok_or_else(|| ExportError::MalformedInput("payload must be a JSON object".into()))?;
    for key in ["calculation", "items"] {
        if !object.contains_key(key) {
            return Err(ExportError::MalformedInput(format!(
                "missing required key `{key}`"
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        if message.contains(COERCE_ERR) {
            ExportError::NumericConversion(message)
        } else {
            ExportError::MalformedInput(message)
        }
    })
}

/// Accept a JSON number or a numeric string as `f64`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    coerce_f64(&Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// Accept a JSON number or an integer string as `i64`. Fractional numbers
/// truncate; fractional strings are rejected.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    coerce_i64(&Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// [`lenient_f64`] for optional fields: absent stays `None`, present must
/// coerce.
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    coerce_f64(&Value::deserialize(deserializer)?)
        .map(Some)
        .map_err(de::Error::custom)
}

fn coerce_f64(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{COERCE_ERR} {n} to float")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{COERCE_ERR} {s:?} to float")),
        other => Err(format!("{COERCE_ERR} {other} to float")),
    }
}

fn coerce_i64(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| format!("{COERCE_ERR} {n} to integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{COERCE_ERR} {s:?} to integer")),
        other => Err(format!("{COERCE_ERR} {other} to integer")),
    }
}
