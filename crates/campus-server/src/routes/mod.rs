//! Campus API Routes
//!
//! - /api/health - Database connectivity check
//! - /api/admin/students - Student records (administrative slice)
//! - /api/financial/invoices - Invoices and payments (financial slice)
//! - /api/academic, /api/communication - Reserved slices
//! - /docs - Swagger UI

pub mod academic;
pub mod communication;
pub mod error;
pub mod health;
pub mod invoices;
pub mod students;
pub mod swagger;

use axum::{middleware, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, security, AppState};

/// Application factory
pub fn app(state: AppState) -> Router {
    // Domain routes (require authentication when API_KEY is set)
    let domain_routes = Router::new()
        .nest("/api/academic", academic::router())
        .nest("/api/financial", invoices::router())
        .nest("/api/admin", students::router())
        .nest("/api/communication", communication::router())
        .layer(middleware::from_fn_with_state(
            state.settings.clone(),
            auth::require_api_key,
        ));

    let cors = if state.settings.app_debug {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", swagger::ApiDoc::openapi()))
        .nest("/api", health::router())
        .merge(domain_routes)
        .layer(middleware::from_fn(security::security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
