//! Request body normalization.
//!
//! Bodies arrive either as raw text or already structured (e.g. url-encoded
//! forms parsed by the HTTP layer). Handlers only ever see a [`Body`].

use serde_json::{Map, Value};

use tablegate_core::{DispatchFailure, DispatchResult};

/// Normalized request body: a JSON object keyed by field name.
pub type Body = Map<String, Value>;

/// Request body as received.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Text(String),
    Structured(Body),
}

impl Default for RawPayload {
    fn default() -> Self {
        RawPayload::Text(String::new())
    }
}

impl RawPayload {
    pub fn is_empty(&self) -> bool {
        match self {
            RawPayload::Text(s) => s.is_empty(),
            RawPayload::Structured(map) => map.is_empty(),
        }
    }
}

impl From<&str> for RawPayload {
    fn from(value: &str) -> Self {
        RawPayload::Text(value.to_string())
    }
}

impl From<String> for RawPayload {
    fn from(value: String) -> Self {
        RawPayload::Text(value)
    }
}

impl From<Body> for RawPayload {
    fn from(value: Body) -> Self {
        RawPayload::Structured(value)
    }
}

/// Turn a raw payload into a [`Body`].
///
/// Empty payloads become an empty body and structured payloads pass through
/// unchanged. Text must decode to a JSON object; anything else is
/// [`DispatchFailure::MalformedPayload`].
pub fn normalize(raw: RawPayload) -> DispatchResult<Body> {
    match raw {
        RawPayload::Structured(body) => Ok(body),
        RawPayload::Text(text) if text.is_empty() => Ok(Body::new()),
        RawPayload::Text(text) => decode_object(&text),
    }
}

fn decode_object(text: &str) -> DispatchResult<Body> {
    // Shortest possible object is `{}`.
    if text.len() < 2 {
        return Err(DispatchFailure::MalformedPayload);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(body)) => Ok(body),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "payload is valid JSON but not an object");
            Err(DispatchFailure::MalformedPayload)
        }
        Err(e) => {
            tracing::debug!(error = %e, "payload is not valid JSON");
            Err(DispatchFailure::MalformedPayload)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
