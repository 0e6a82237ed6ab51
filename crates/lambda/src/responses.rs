//! Replies from the render function.
//!
//! A reply is either empty (`null`, `{}` or no body at all), an error
//! envelope, or the JSON object for the request that was sent.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::LambdaError;

/// Acknowledgment of a started render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub render_id: String,
    pub bucket_name: String,
}

/// Status snapshot of a render.
///
/// Only the fields the client acts on are typed; everything else the
/// function reports is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderProgress {
    /// Fraction of the whole render completed, `0.0..=1.0`. Kept as the
    /// number the function sent so it prints exactly as received.
    pub overall_progress: Number,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub chunks: u64,
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub fatal_error_encountered: bool,
    #[serde(default)]
    pub errors: Vec<Value>,
    #[serde(default)]
    pub costs: Option<Value>,
    #[serde(default)]
    pub time_to_finish: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode a raw reply body.
///
/// Returns `Ok(None)` for an empty reply and [`LambdaError::Function`]
/// for either error envelope the function produces.
pub(crate) fn decode_body(body: &[u8]) -> Result<Option<Value>, LambdaError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)?;
    if let Some(message) = error_message(&value) {
        return Err(LambdaError::Function(message));
    }

    match &value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => Ok(Some(value)),
    }
}

/// Extract the message from a Lambda runtime error (`errorMessage`) or a
/// render function error (`{"type": "error", "message": ..}`).
pub(crate) fn error_message(value: &Value) -> Option<String> {
    if let Some(message) = value.get("errorMessage").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    if value.get("type").and_then(Value::as_str) == Some("error") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown render function error");
        return Some(message.to_string());
    }

    None
}
