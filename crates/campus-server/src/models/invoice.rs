//! Invoice DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use campus::{Invoice, InvoiceStatus};

/// Issue invoice request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub student_id: Uuid,
    pub description: String,
    /// Amount in minor units (cents)
    pub amount_cents: i64,
    /// ISO 4217 code, e.g. `USD`
    pub currency: String,
}

impl From<CreateInvoiceRequest> for Invoice {
    fn from(request: CreateInvoiceRequest) -> Self {
        Invoice::new(
            request.student_id,
            request.description,
            request.amount_cents,
            request.currency,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub currency: String,
    /// One of `open`, `paid`, `void`
    #[schema(value_type = String)]
    pub status: InvoiceStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.unwrap_or_default(),
            student_id: invoice.student_id,
            description: invoice.description,
            amount_cents: invoice.amount_cents,
            currency: invoice.currency,
            status: invoice.status,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}
