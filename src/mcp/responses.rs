// src/mcp/responses.rs
// JSON envelopes returned by every tool

use serde_json::{Map, Value, json};
use std::fmt::Display;

/// `{"success": true, "message": ..., "data": ...}`; `data` omitted when `None`
pub fn success_response(message: impl Into<String>, data: Option<Value>) -> String {
    let mut envelope = Map::new();
    envelope.insert("success".into(), Value::Bool(true));
    envelope.insert("message".into(), Value::String(message.into()));
    if let Some(data) = data {
        envelope.insert("data".into(), data);
    }
    Value::Object(envelope).to_string()
}

/// `{"success": false, "message": ..., "error": ...}`
pub fn error_response(message: impl Into<String>, error: &dyn Display) -> String {
    json!({
        "success": false,
        "message": message.into(),
        "error": error.to_string(),
    })
    .to_string()
}

/// Error envelope that also carries structured data for the caller to act on
pub fn error_response_with_data(message: impl Into<String>, error: &dyn Display, data: Value) -> String {
    json!({
        "success": false,
        "message": message.into(),
        "error": error.to_string(),
        "data": data,
    })
    .to_string()
}
