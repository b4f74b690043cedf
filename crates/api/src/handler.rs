//! Per-resource business logic plugged into the dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};

use tablegate_core::DispatchResult;

use crate::payload::Body;
use crate::resolver::ResolvedResource;

/// Body answered when no handler is wired for a request.
pub fn not_implemented() -> Value {
    json!({ "msg": "Api not implemented yet." })
}

/// Status and response produced by a write handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutcome {
    pub status: StatusCode,
    pub response: Value,
}

impl HandlerOutcome {
    pub fn new(status: StatusCode, response: Value) -> Self {
        Self { status, response }
    }

    pub fn ok(response: Value) -> Self {
        Self::new(StatusCode::OK, response)
    }
}

/// Business logic for one resource.
///
/// `target` is `Some` when the request named a resource. Both methods default
/// to the "not implemented" answer so handlers only override what they serve.
pub trait ResourceHandler: Send + Sync {
    /// Read-only requests (`GET`, `DELETE`, `OPTIONS` without a body).
    fn read(&self, target: Option<&ResolvedResource>) -> DispatchResult<Value> {
        let _ = target;
        Ok(not_implemented())
    }

    /// Everything else. `status` is the status the dispatcher would answer
    /// with; the returned outcome replaces it.
    fn write(
        &self,
        body: Body,
        status: StatusCode,
        target: Option<&ResolvedResource>,
    ) -> DispatchResult<HandlerOutcome> {
        let _ = (body, target);
        Ok(HandlerOutcome::new(status, not_implemented()))
    }
}

/// Closure adapter serving read-only requests.
pub struct ReadFn<F>(pub F);

impl<F> ReadFn<F> {
    pub fn new(f: F) -> Self
    where
        F: Fn(Option<&ResolvedResource>) -> DispatchResult<Value> + Send + Sync,
    {
        Self(f)
    }
}

impl<F> ResourceHandler for ReadFn<F>
where
    F: Fn(Option<&ResolvedResource>) -> DispatchResult<Value> + Send + Sync,
{
    fn read(&self, target: Option<&ResolvedResource>) -> DispatchResult<Value> {
        (self.0)(target)
    }
}

/// Closure adapter serving mutating requests.
pub struct WriteFn<F>(pub F);

impl<F> WriteFn<F> {
    pub fn new(f: F) -> Self
    where
        F: Fn(Body, StatusCode, Option<&ResolvedResource>) -> DispatchResult<HandlerOutcome>
            + Send
            + Sync,
    {
        Self(f)
    }
}

impl<F> ResourceHandler for WriteFn<F>
where
    F: Fn(Body, StatusCode, Option<&ResolvedResource>) -> DispatchResult<HandlerOutcome>
        + Send
        + Sync,
{
    fn write(
        &self,
        body: Body,
        status: StatusCode,
        target: Option<&ResolvedResource>,
    ) -> DispatchResult<HandlerOutcome> {
        (self.0)(body, status, target)
    }
}

/// Handlers keyed by table name, plus an optional handler for requests that
/// do not name a resource.
#[derive(Clone, Default)]
pub struct HandlerSet {
    root: Option<Arc<dyn ResourceHandler>>,
    by_table: HashMap<String, Arc<dyn ResourceHandler>>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, handler: impl ResourceHandler + 'static) -> Self {
        self.root = Some(Arc::new(handler));
        self
    }

    pub fn with_table(
        mut self,
        table_name: impl Into<String>,
        handler: impl ResourceHandler + 'static,
    ) -> Self {
        self.insert(table_name, Arc::new(handler));
        self
    }

    pub fn insert(&mut self, table_name: impl Into<String>, handler: Arc<dyn ResourceHandler>) {
        self.by_table.insert(table_name.into(), handler);
    }

    /// Handler for `table_name`, or the root handler when `None`.
    pub fn get(&self, table_name: Option<&str>) -> Option<&dyn ResourceHandler> {
        match table_name {
            Some(name) => self.by_table.get(name).map(|h| h.as_ref()),
            None => self.root.as_deref(),
        }
    }
}

impl core::fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut tables: Vec<&String> = self.by_table.keys().collect();
        tables.sort();
        f.debug_struct("HandlerSet")
            .field("root", &self.root.is_some())
            .field("tables", &tables)
            .finish()
    }
}
