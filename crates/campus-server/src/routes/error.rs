//! AppError → HTTP translation
//!
//! The only place that knows about both the error taxonomy and status codes.

use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use campus::AppError;

use crate::models::ErrorBody;

/// Returned instead of infrastructure or unclassified error text
pub const GENERIC_ERROR_MESSAGE: &str = "The request could not be processed";

/// Status code and client-facing message for an application error
pub fn translate(err: &AppError) -> (StatusCode, String) {
    match err {
        AppError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        AppError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
        AppError::PermissionDenied(message) => (StatusCode::FORBIDDEN, message.clone()),
        AppError::Infrastructure { .. } | AppError::Unexpected(_) => {
            (StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE.to_string())
        }
    }
}

/// Like [`translate`], for errors that may not be an `AppError` at all
pub fn translate_dyn(err: &(dyn StdError + 'static)) -> (StatusCode, String) {
    match err.downcast_ref::<AppError>() {
        Some(app_err) => translate(app_err),
        None => (StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE.to_string()),
    }
}

/// Handler error type
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = translate_dyn(&self.0);
        if !self.0.is_expected() {
            let cause = self.0.source().map(ToString::to_string);
            tracing::error!(error = %self.0, cause = ?cause, "request failed");
        }
        (status, Json(ErrorBody { detail })).into_response()
    }
}
