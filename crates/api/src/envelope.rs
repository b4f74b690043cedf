//! Response envelope and error envelope builder.

use axum::http::StatusCode;
use serde_json::{json, Value};

use tablegate_core::DispatchFailure;

/// Status code reported for every enveloped failure.
pub const ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Final `(status, body)` pair produced by a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub status: StatusCode,
    /// JSON text, free of raw newline characters.
    pub body: String,
}

impl Envelope {
    pub fn new(status: StatusCode, body: &Value) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status,
            body: serialize_body(body)?,
        })
    }

    /// Error envelope for a caught failure.
    pub fn failure(failure: &DispatchFailure) -> Result<Self, serde_json::Error> {
        Self::new(ERROR_STATUS, &build_envelope(failure))
    }
}

/// `{"error": {"msg": ..., "status_code": 400}}` for a caught failure.
pub fn build_envelope(failure: &DispatchFailure) -> Value {
    json!({
        "error": {
            "msg": failure.client_message(),
            "status_code": ERROR_STATUS.as_u16(),
        }
    })
}

/// Serialize to compact JSON text with raw newlines removed.
pub fn serialize_body(body: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string(body)?;
    text.retain(|c| c != '\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tablegate_core::ConstraintKind;

    #[test]
    fn model_failure_envelope() {
        let env = Envelope::failure(&DispatchFailure::model("Parameter name not found. Invalid payload.")).unwrap();
        assert_eq!(env.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            env.body,
            r#"{"error":{"msg":"Parameter name not found. Invalid payload.","status_code":400}}"#
        );
    }

    #[test]
    fn constraint_failure_uses_detail() {
        let failure = DispatchFailure::constraint(
            ConstraintKind::Unique,
            "duplicate key value violates unique constraint\nDETAIL: key already exists",
        );
        assert_eq!(
            build_envelope(&failure),
            json!({"error": {"msg": " key already exists", "status_code": 400}})
        );
    }

    #[test]
    fn every_constraint_kind_maps_to_400() {
        for kind in [
            ConstraintKind::Unique,
            ConstraintKind::Check,
            ConstraintKind::NotNull,
            ConstraintKind::ForeignKey,
            ConstraintKind::MassAssignment,
            ConstraintKind::ValidationFailed,
            ConstraintKind::Generic,
        ] {
            let env = Envelope::failure(&DispatchFailure::constraint(kind, "boom")).unwrap();
            assert_eq!(env.status, StatusCode::BAD_REQUEST, "{kind}");
            assert_eq!(env.body, r#"{"error":{"msg":"boom","status_code":400}}"#);
        }
    }

    proptest! {
        #[test]
        fn envelope_text_has_no_raw_newlines_and_parses_back(msg in "(?s).{0,64}") {
            let failure = DispatchFailure::model(msg.clone());
            let env = Envelope::failure(&failure).unwrap();
            prop_assert!(!env.body.contains('\n'));

            let parsed: Value = serde_json::from_str(&env.body).unwrap();
            prop_assert_eq!(parsed, build_envelope(&failure));
            prop_assert_eq!(&build_envelope(&failure)["error"]["msg"], &json!(msg));
        }
    }
}
