use axum::body::Bytes;
use axum::http::{header, HeaderMap};

use crate::payload::{Body, RawPayload};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Turn a request body into a raw payload.
///
/// Url-encoded forms are parsed up front into a structured payload; every
/// other body is handed over as text (invalid UTF-8 is replaced, which makes
/// it fail JSON decoding later on).
pub fn raw_payload(headers: &HeaderMap, bytes: &Bytes) -> RawPayload {
    if bytes.is_empty() {
        return RawPayload::default();
    }

    if is_form(headers) {
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(bytes) {
            Ok(pairs) => {
                let body: Body = pairs
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                return RawPayload::Structured(body);
            }
            Err(e) => tracing::debug!(error = %e, "form body did not parse; passing it on as text"),
        }
    }

    RawPayload::Text(String::from_utf8_lossy(bytes).into_owned())
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        h
    }

    #[test]
    fn empty_body_is_empty_payload() {
        assert!(raw_payload(&HeaderMap::new(), &Bytes::new()).is_empty());
    }

    #[test]
    fn json_body_is_text() {
        let payload = raw_payload(&headers("application/json"), &Bytes::from_static(b"{\"a\":1}"));
        assert_eq!(payload, RawPayload::Text("{\"a\":1}".to_string()));
    }

    #[test]
    fn form_body_is_structured() {
        let payload = raw_payload(
            &headers("application/x-www-form-urlencoded; charset=utf-8"),
            &Bytes::from_static(b"name=a&qty=2"),
        );
        match payload {
            RawPayload::Structured(body) => {
                assert_eq!(body.get("name"), Some(&json!("a")));
                assert_eq!(body.get("qty"), Some(&json!("2")));
            }
            other => panic!("expected structured payload, got {other:?}"),
        }
    }
}
