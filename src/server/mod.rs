//! HTTP surface for the cloaking library.
//!
//! Endpoints:
//! - GET  /health        liveness probe
//! - POST /cloak/ip      cloak one IP address
//! - POST /cloak/host    cloak one hostname
//! - POST /cloak/batch   cloak a bounded list of values
//!
//! The handlers only marshal text in and text out; all transform behavior
//! lives in [`crate::cloak`].

pub mod errors;
pub mod middleware;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use crate::cloak;
use crate::config::Settings;
use errors::{bad_payload, invalid_request, ApiError};
use middleware::access_log::access_log_middleware;
use middleware::auth::auth_middleware;

/// Upper bound on values per batch request. Keeps one call's work bounded the
/// same way the per-value buffer does.
pub const MAX_BATCH_VALUES: usize = 256;

/// Shared server state; read-mostly configuration only, the transforms
/// themselves are stateless.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<RwLock<Settings>>,
    pub access_log_enabled: Arc<RwLock<bool>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let access_log = settings.access_log;
        Self {
            settings: Arc::new(RwLock::new(settings)),
            access_log_enabled: Arc::new(RwLock::new(access_log)),
        }
    }
}

// ============================================================================
// Request / Response types
// ============================================================================

#[derive(Deserialize)]
struct CloakRequest {
    value: String,
}

#[derive(Serialize)]
struct CloakResponse {
    value: String,
    cloaked: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CloakKind {
    Ip,
    Host,
}

#[derive(Deserialize)]
struct BatchRequest {
    kind: CloakKind,
    values: Vec<String>,
}

#[derive(Serialize)]
struct BatchResponse {
    cloaked: Vec<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn cloak_ip_handler(
    payload: Result<Json<CloakRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(bad_payload)?;
    let cloaked = cloak::cloak_ip(&req.value);
    Ok(Json(CloakResponse {
        value: req.value,
        cloaked,
    }))
}

async fn cloak_host_handler(
    payload: Result<Json<CloakRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(bad_payload)?;
    let cloaked = cloak::cloak_host(&req.value);
    Ok(Json(CloakResponse {
        value: req.value,
        cloaked,
    }))
}

async fn cloak_batch_handler(
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(bad_payload)?;

    if req.values.len() > MAX_BATCH_VALUES {
        return Err(invalid_request(format!(
            "batch is limited to {} values per request",
            MAX_BATCH_VALUES
        )));
    }

    let cloak_one: fn(&str) -> String = match req.kind {
        CloakKind::Ip => cloak::cloak_ip,
        CloakKind::Host => cloak::cloak_host,
    };

    let cloaked = req.values.iter().map(|v| cloak_one(v)).collect();
    Ok(Json(BatchResponse { cloaked }))
}

// ============================================================================
// Server
// ============================================================================

pub fn build_router(state: AppState) -> Router {
    // Local tooling calls this directly; keep CORS open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/cloak/ip", post(cloak_ip_handler))
        .route("/cloak/host", post(cloak_host_handler))
        .route("/cloak/batch", post(cloak_batch_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            access_log_middleware,
        ))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(settings: Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.bind, settings.port);
    let state = AppState::new(settings);
    let app = build_router(state);

    tracing::info!("[HTTP API] listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
