//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: dispatcher + handler set shared by every route
//! - `routes/`: HTTP routes (health, resource-less and per-table dispatch)
//! - `dto.rs`: request body extraction into raw payloads
//! - `errors.rs`: mapping of dispatch outcomes to HTTP responses
//! - `handlers.rs`: reference handlers mounted by the binary

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
