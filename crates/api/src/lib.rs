//! Dispatch-and-normalization layer for a table-backed JSON API.
//!
//! A request naming a resource ("table") is resolved against the registry,
//! its body normalized, the caller's handler invoked, and the outcome turned
//! into a uniform JSON envelope. `app` wires this into an axum router.

pub mod app;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod envelope;
pub mod handler;
pub mod payload;
pub mod resolver;
pub mod validation;

pub use context::{RequestContext, RequestId, CONTENT_TYPE};
pub use dispatcher::{Dispatcher, Halt};
pub use envelope::{build_envelope, Envelope};
pub use handler::{HandlerOutcome, HandlerSet, ReadFn, ResourceHandler, WriteFn};
pub use payload::{normalize, Body, RawPayload};
pub use resolver::{resolve, ResolveError, ResolvedResource};
pub use validation::validate_params;
