//! Request logging middleware using tracing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info};

/// Logs each request with its outcome and latency.
///
/// 404 "nothing found" responses are an expected outcome for reporting
/// queries, so everything is logged at info; request bodies are never logged.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(ToString::to_string);
    let start = Instant::now();

    debug!(method = %method, path = %path, "Request received");

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        query = query.as_deref().unwrap_or(""),
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}
