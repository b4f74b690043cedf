use axum::http::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payload::RawPayload;

/// Content type set on every dispatched response.
pub const CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Identifier of a single request (log correlation only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Per-request state handed to the dispatcher.
///
/// Created at request entry and dropped once the response is built; never
/// shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    method: Method,
    payload: RawPayload,
    content_type: Option<&'static str>,
}

impl RequestContext {
    pub fn new(method: Method, payload: RawPayload) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            payload,
            content_type: None,
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn payload(&self) -> &RawPayload {
        &self.payload
    }

    /// Move the payload out, leaving an empty one behind.
    pub fn take_payload(&mut self) -> RawPayload {
        std::mem::take(&mut self.payload)
    }

    pub fn set_content_type(&mut self, content_type: &'static str) {
        self.content_type = Some(content_type);
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }
}
