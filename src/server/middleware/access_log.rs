use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::server::AppState;

/// Per-request log line, gated by the runtime `access_log` flag.
pub async fn access_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !*state.access_log_enabled.read().await {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    // Health probes are noise at info level.
    if path == "/health" {
        tracing::trace!("[Access] {} {} {}", method, path, status);
    } else {
        tracing::info!("[Access] {} {} {} {}ms", method, path, status, duration_ms);
    }

    response
}
