//! Simple API Key Authentication (Bearer Token)

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::Settings;
use crate::models::ErrorBody;

fn unauthorized(detail: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}

/// Authentication middleware
/// Validates the Bearer token against `API_KEY`; no key configured means
/// authentication is disabled.
pub async fn require_api_key(
    State(settings): State<Arc<Settings>>,
    request: Request,
    next: Next,
) -> Response {
    let api_key = match settings.api_key.as_deref() {
        Some(key) if !key.is_empty() => key,
        _ => return next.run(request).await,
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == api_key => next.run(request).await,
        Some(_) => {
            tracing::warn!("Invalid API key attempted");
            unauthorized("Invalid API key")
        }
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            unauthorized("Missing bearer token")
        }
    }
}
