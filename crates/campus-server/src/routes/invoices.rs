//! Financial routes: invoices

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use campus::{Page, UseCase};

use super::error::ApiError;
use crate::adapters::sql::{InvoiceMapper, InvoiceRepository, StudentMapper};
use crate::application::{GetInvoice, IssueInvoice, ListInvoices, PayInvoice, VoidInvoice};
use crate::models::{CreateInvoiceRequest, InvoiceResponse, PageParams};
use crate::AppState;

async fn repository(state: &AppState) -> Result<Arc<InvoiceRepository>, ApiError> {
    let session = state.db.session().await?;
    Ok(Arc::new(session.repository::<InvoiceMapper>()))
}

/// List invoices
#[utoipa::path(
    get,
    path = "/api/financial/invoices",
    params(PageParams),
    responses(
        (status = 200, description = "One page of invoices", body = Vec<InvoiceResponse>),
        (status = 400, description = "Request could not be processed", body = crate::models::ErrorBody)
    ),
    tag = "Financial"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = ListInvoices::new(repository(&state).await?)
        .execute(Page::from(params))
        .await
        .into_result()?;

    Ok(Json(invoices.into_iter().map(InvoiceResponse::from).collect()))
}

/// Issue an invoice to a student
#[utoipa::path(
    post,
    path = "/api/financial/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice issued", body = InvoiceResponse),
        (status = 404, description = "Student not found", body = crate::models::ErrorBody),
        (status = 422, description = "Invalid invoice data", body = crate::models::ErrorBody)
    ),
    tag = "Financial"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    // Both repositories share one session
    let session = state.db.session().await?;
    let students = Arc::new(session.repository::<StudentMapper>());
    let invoices = Arc::new(session.repository::<InvoiceMapper>());

    let invoice = IssueInvoice::new(students, invoices)
        .execute(payload.into())
        .await
        .into_result()?;

    Ok((StatusCode::CREATED, Json(invoice.into())))
}

/// Get an invoice by ID
#[utoipa::path(
    get,
    path = "/api/financial/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceResponse),
        (status = 404, description = "Invoice not found", body = crate::models::ErrorBody)
    ),
    tag = "Financial"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = GetInvoice::new(repository(&state).await?)
        .execute(id)
        .await
        .into_result()?;

    Ok(Json(invoice.into()))
}

/// Mark an open invoice as paid
#[utoipa::path(
    post,
    path = "/api/financial/invoices/{id}/pay",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice paid", body = InvoiceResponse),
        (status = 404, description = "Invoice not found", body = crate::models::ErrorBody),
        (status = 422, description = "Invoice is not open", body = crate::models::ErrorBody)
    ),
    tag = "Financial"
)]
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = PayInvoice::new(repository(&state).await?)
        .execute(id)
        .await
        .into_result()?;

    Ok(Json(invoice.into()))
}

/// Void an open invoice
#[utoipa::path(
    post,
    path = "/api/financial/invoices/{id}/void",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice voided", body = InvoiceResponse),
        (status = 403, description = "Invoice already paid", body = crate::models::ErrorBody),
        (status = 404, description = "Invoice not found", body = crate::models::ErrorBody),
        (status = 422, description = "Invoice already void", body = crate::models::ErrorBody)
    ),
    tag = "Financial"
)]
pub async fn void_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = VoidInvoice::new(repository(&state).await?)
        .execute(id)
        .await
        .into_result()?;

    Ok(Json(invoice.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/:id", get(get_invoice))
        .route("/invoices/:id/pay", post(pay_invoice))
        .route("/invoices/:id/void", post(void_invoice))
}
