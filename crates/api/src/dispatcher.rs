//! Request dispatch pipeline.
//!
//! Every request tied to a resource goes through the same steps:
//!
//! ```text
//! RequestContext + table name + handler
//!   ↓
//! 1. Resolve the table name (short-circuits on failure)
//!   ↓
//! 2. Set the response content type
//!   ↓
//! 3. Read-only request? call `handler.read`
//!    Otherwise normalize the body and call `handler.write`
//!   ↓
//! 4. Map caught failures into the error envelope
//!   ↓
//! 5. Serialize (status, JSON text)
//! ```
//!
//! Two result shapes leave the dispatcher:
//!
//! - `Ok(Envelope)`: success, or a caught domain/constraint failure (400).
//! - `Err(Halt)`: a resolver short-circuit carrying its own status and body,
//!   or a failure this layer does not handle.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use tablegate_core::{DispatchFailure, ResourceRegistry};

use crate::context::{CONTENT_TYPE, RequestContext};
use crate::envelope::Envelope;
use crate::handler::{not_implemented, HandlerOutcome, ResourceHandler};
use crate::payload;
use crate::resolver::{self, ResolveError, ResolvedResource};

/// Dispatch outcomes that bypass the error envelope.
#[derive(Debug)]
pub enum Halt {
    /// Resolution failed; answer with [`ResolveError::status`] and body.
    Resolve(ResolveError),
    /// Not handled here; the HTTP layer decides what to answer.
    Uncaught(DispatchFailure),
}

impl From<ResolveError> for Halt {
    fn from(value: ResolveError) -> Self {
        Halt::Resolve(value)
    }
}

impl From<serde_json::Error> for Halt {
    fn from(value: serde_json::Error) -> Self {
        Halt::Uncaught(DispatchFailure::Internal(value.into()))
    }
}

/// Verbs served by the read branch when the payload is empty.
fn is_read_only(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE || *method == Method::OPTIONS
}

/// Stateless dispatcher over a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ResourceRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Dispatch one request.
    ///
    /// `table_name` is `None` for endpoints that do not operate on a named
    /// resource; the handler then receives no target. With no handler the
    /// response is `{"msg":"Api not implemented yet."}`.
    ///
    /// On the read branch only model failures are caught; on the mutating
    /// branch model and constraint failures are. `Internal` failures always
    /// come back as [`Halt::Uncaught`].
    pub fn dispatch(
        &self,
        ctx: &mut RequestContext,
        table_name: Option<&str>,
        handler: Option<&dyn ResourceHandler>,
    ) -> Result<Envelope, Halt> {
        let resolved = resolver::resolve(&self.registry, table_name).inspect_err(|e| {
            tracing::info!(
                request_id = %ctx.request_id(),
                table = table_name.unwrap_or_default(),
                status = e.status().as_u16(),
                "resolution short-circuit: {e}"
            );
        })?;

        ctx.set_content_type(CONTENT_TYPE);

        if ctx.payload().is_empty() && is_read_only(ctx.method()) {
            tracing::debug!(request_id = %ctx.request_id(), method = %ctx.method(), "read branch");
            self.read(ctx, resolved.as_ref(), handler)
        } else {
            tracing::debug!(request_id = %ctx.request_id(), method = %ctx.method(), "mutating branch");
            self.write(ctx, resolved.as_ref(), handler)
        }
    }

    fn read(
        &self,
        ctx: &RequestContext,
        target: Option<&ResolvedResource>,
        handler: Option<&dyn ResourceHandler>,
    ) -> Result<Envelope, Halt> {
        let outcome = match handler {
            Some(handler) => handler.read(target),
            None => Ok(not_implemented()),
        };

        match outcome {
            Ok(body) => Ok(Envelope::new(StatusCode::OK, &body)?),
            Err(failure) if failure.is_model() => caught(ctx, failure),
            Err(failure) => Err(Halt::Uncaught(failure)),
        }
    }

    fn write(
        &self,
        ctx: &mut RequestContext,
        target: Option<&ResolvedResource>,
        handler: Option<&dyn ResourceHandler>,
    ) -> Result<Envelope, Halt> {
        let outcome = payload::normalize(ctx.take_payload()).and_then(|body| match handler {
            Some(handler) => handler.write(body, StatusCode::OK, target),
            None => Ok(HandlerOutcome::ok(not_implemented())),
        });

        match outcome {
            Ok(outcome) => Ok(Envelope::new(outcome.status, &outcome.response)?),
            Err(failure) if failure.is_enveloped() => caught(ctx, failure),
            Err(failure) => Err(Halt::Uncaught(failure)),
        }
    }
}

fn caught(ctx: &RequestContext, failure: DispatchFailure) -> Result<Envelope, Halt> {
    tracing::warn!(request_id = %ctx.request_id(), "request failed: {failure}");
    Ok(Envelope::failure(&failure)?)
}

/// Convenience for handlers answering with an arbitrary serializable value.
pub fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, DispatchFailure> {
    serde_json::to_value(value).map_err(|e| DispatchFailure::Internal(e.into()))
}
