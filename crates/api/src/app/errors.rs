use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::context::CONTENT_TYPE;
use crate::dispatcher::Halt;
use crate::envelope::Envelope;

/// Content type of resolver short-circuit responses.
const HALT_CONTENT_TYPE: &str = "application/json";

pub fn envelope_to_response(envelope: Envelope, content_type: Option<&'static str>) -> Response {
    (
        envelope.status,
        [(header::CONTENT_TYPE, content_type.unwrap_or(CONTENT_TYPE))],
        envelope.body,
    )
        .into_response()
}

pub fn halt_to_response(halt: Halt) -> Response {
    match halt {
        Halt::Resolve(e) => (
            e.status(),
            [(header::CONTENT_TYPE, HALT_CONTENT_TYPE)],
            e.body(),
        )
            .into_response(),
        Halt::Uncaught(failure) => {
            tracing::error!(error = %failure, "unhandled dispatch failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                failure.to_string(),
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
