//! Health check

use axum::{extract::State, routing::get, Json, Router};

use crate::models::HealthResponse;
use crate::AppState;

/// Database connectivity check
///
/// Always answers 200; a failing database is reported in the body.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.db.ping().await {
        Ok(()) => Json(HealthResponse {
            status: "ok".to_string(),
            detail: None,
        }),
        Err(e) => {
            tracing::error!("Health check failed: {:?}", e);
            Json(HealthResponse {
                status: "error".to_string(),
                detail: Some("database unavailable".to_string()),
            })
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
