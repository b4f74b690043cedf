use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderMap, Method},
    response::Response,
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::RequestContext;

/// Any verb on `/`: dispatch without a named resource.
pub async fn root_request(
    Extension(services): Extension<Arc<AppServices>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    serve(&services, method, None, &headers, &body)
}

/// Any verb on `/:table`: dispatch against the named resource.
pub async fn table_request(
    Extension(services): Extension<Arc<AppServices>>,
    method: Method,
    Path(table): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    serve(&services, method, Some(&table), &headers, &body)
}

fn serve(
    services: &AppServices,
    method: Method,
    table: Option<&str>,
    headers: &HeaderMap,
    body: &Bytes,
) -> Response {
    let mut ctx = RequestContext::new(method, dto::raw_payload(headers, body));
    let span = tracing::info_span!(
        "dispatch",
        request_id = %ctx.request_id(),
        method = %ctx.method(),
        table = table.unwrap_or("-"),
    );

    span.in_scope(|| {
        let handler = services.handlers.get(table);
        match services.dispatcher.dispatch(&mut ctx, table, handler) {
            Ok(envelope) => {
                tracing::info!(status = envelope.status.as_u16(), "dispatched");
                errors::envelope_to_response(envelope, ctx.content_type())
            }
            Err(halt) => errors::halt_to_response(halt),
        }
    })
}
