// API-key gate for the cloaking endpoints.
use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::AuthMode;
use crate::server::AppState;

fn extract_query_api_key<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    for pair in query.split('&') {
        let mut iter = pair.splitn(2, '=');
        if iter.next().unwrap_or_default() == key {
            return iter.next().or(Some(""));
        }
    }
    None
}

fn extract_api_key(request: &Request) -> Option<&str> {
    if let Some(value) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return Some(value.strip_prefix("Bearer ").unwrap_or(value));
    }

    for name in ["x-api-key", "api-key"] {
        if let Some(value) = request.headers().get(name).and_then(|h| h.to_str().ok()) {
            return Some(value);
        }
    }

    request
        .uri()
        .query()
        .and_then(|query| extract_query_api_key(query, "key"))
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // CORS preflight is allowed through regardless of policy.
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let (mode, expected) = {
        let settings = state.settings.read().await;
        (settings.auth_mode, settings.api_key.clone())
    };

    if mode == AuthMode::Off {
        return Ok(next.run(request).await);
    }

    if mode == AuthMode::AllExceptHealth && request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    if expected.is_empty() {
        tracing::error!("[Auth] auth is enabled but api_key is empty; denying request");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let authorized = extract_api_key(&request)
        .map(|key| key == expected)
        .unwrap_or(false);

    if authorized {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}
