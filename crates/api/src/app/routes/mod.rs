use axum::{routing::any, Router};

pub mod system;
pub mod tables;

/// Router for every dispatched endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", any(tables::root_request))
        .route("/:table", any(tables::table_request))
}
