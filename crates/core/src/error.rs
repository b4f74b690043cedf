//! Failure model shared by the dispatcher and the handlers it invokes.

use thiserror::Error;

/// Message carried by [`DispatchFailure::MalformedPayload`].
pub const MALFORMED_PAYLOAD_MSG: &str = "Cannot parse Payload.";

/// Result type returned by handlers and by payload normalization.
pub type DispatchResult<T> = Result<T, DispatchFailure>;

/// Every failure a handler (or the normalizer) may raise.
///
/// `Model` and `MalformedPayload` are domain-level failures whose message is
/// shown to the client verbatim. `Constraint` comes from the persistence layer
/// and is only shown through its `DETAIL:` part. `Internal` is outside the
/// taxonomy and is never turned into an envelope by the dispatcher.
#[derive(Debug, Error)]
pub enum DispatchFailure {
    /// A business rule or parameter-presence check failed.
    #[error("{0}")]
    Model(String),

    /// The request body could not be turned into a structured object.
    #[error("Cannot parse Payload.")]
    MalformedPayload,

    /// A data-integrity rule was breached in the persistence layer.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// Anything else; propagates to the HTTP layer untouched.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DispatchFailure {
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn constraint(kind: ConstraintKind, msg: impl Into<String>) -> Self {
        Self::Constraint(ConstraintViolation::new(kind, msg))
    }

    /// Domain-level failures: the only kind caught on read-only requests.
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_) | Self::MalformedPayload)
    }

    /// Whether the dispatcher converts this failure into an error envelope.
    pub fn is_enveloped(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// Message placed in the `error.msg` field of the envelope.
    ///
    /// Model failures use their message as-is; constraint violations expose
    /// the text following `DETAIL:` when the backend supplied one.
    pub fn client_message(&self) -> String {
        match self {
            Self::Constraint(violation) => violation
                .detail()
                .map(str::to_owned)
                .unwrap_or_else(|| violation.to_string()),
            other => other.to_string(),
        }
    }
}

/// Category of a persistence-layer constraint violation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Unique,
    Check,
    NotNull,
    ForeignKey,
    MassAssignment,
    ValidationFailed,
    /// A constraint failure the backend did not classify further.
    Generic,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::Check => "check",
            ConstraintKind::NotNull => "not_null",
            ConstraintKind::ForeignKey => "foreign_key",
            ConstraintKind::MassAssignment => "mass_assignment",
            ConstraintKind::ValidationFailed => "validation_failed",
            ConstraintKind::Generic => "generic",
        }
    }
}

impl core::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint violation as reported by the backend (message kept raw).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConstraintViolation {
    kind: ConstraintKind,
    message: String,
}

impl ConstraintViolation {
    pub fn new(kind: ConstraintKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text following the first `DETAIL:` marker, up to the end of that line.
    ///
    /// Leading whitespace is preserved.
    pub fn detail(&self) -> Option<&str> {
        let (_, rest) = self.message.split_once("DETAIL:")?;
        Some(rest.split('\n').next().unwrap_or(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_text_after_marker() {
        let v = ConstraintViolation::new(
            ConstraintKind::Unique,
            "duplicate key value violates unique constraint \"widgets_name_key\"\nDETAIL: key already exists",
        );
        assert_eq!(v.detail(), Some(" key already exists"));
    }

    #[test]
    fn detail_stops_at_end_of_line() {
        let v = ConstraintViolation::new(
            ConstraintKind::ForeignKey,
            "fk violation\nDETAIL: Key (owner_id)=(7) is not present.\nHINT: none",
        );
        assert_eq!(v.detail(), Some(" Key (owner_id)=(7) is not present."));
    }

    #[test]
    fn client_message_falls_back_to_display_without_detail() {
        let failure = DispatchFailure::constraint(ConstraintKind::NotNull, "null value in column \"name\"");
        assert_eq!(failure.client_message(), "null value in column \"name\"");
    }

    #[test]
    fn model_messages_are_verbatim() {
        let failure = DispatchFailure::model("DETAIL: not stripped for model failures");
        assert_eq!(failure.client_message(), "DETAIL: not stripped for model failures");
        assert_eq!(DispatchFailure::MalformedPayload.client_message(), MALFORMED_PAYLOAD_MSG);
    }

    #[test]
    fn classification() {
        assert!(DispatchFailure::model("x").is_model());
        assert!(DispatchFailure::MalformedPayload.is_model());

        let constraint = DispatchFailure::constraint(ConstraintKind::Check, "x");
        assert!(!constraint.is_model());
        assert!(constraint.is_enveloped());

        let internal = DispatchFailure::from(anyhow::anyhow!("db down"));
        assert!(!internal.is_model());
        assert!(!internal.is_enveloped());
    }
}
