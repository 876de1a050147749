//! Invoice - Financial charge raised against a student
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{errors::AppError, value_objects::InvoiceStatus};

/// Invoice - an amount owed by a student
///
/// Amounts are integer minor units (cents) in `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Option<Uuid>,
    pub student_id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: InvoiceStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Create a new, not yet persisted, open invoice
    pub fn new(student_id: Uuid, description: String, amount_cents: i64, currency: String) -> Self {
        Self {
            id: None,
            student_id,
            description: description.trim().to_string(),
            amount_cents,
            currency: currency.trim().to_uppercase(),
            status: InvoiceStatus::Open,
            created_at: None,
            updated_at: None,
        }
    }

    /// Check the entity invariants
    pub fn validate(&self) -> Result<(), AppError> {
        if self.description.trim().is_empty() {
            return Err(AppError::validation("description must not be empty"));
        }
        if self.amount_cents <= 0 {
            return Err(AppError::validation("amount_cents must be positive"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(AppError::validation(format!(
                "'{}' is not a three-letter currency code",
                self.currency
            )));
        }
        Ok(())
    }

    /// Settle an open invoice
    pub fn pay(&mut self) -> Result<(), AppError> {
        match self.status {
            InvoiceStatus::Open => {
                self.status = InvoiceStatus::Paid;
                Ok(())
            }
            InvoiceStatus::Paid => Err(AppError::validation("invoice is already paid")),
            InvoiceStatus::Void => Err(AppError::validation("a void invoice cannot be paid")),
        }
    }

    /// Cancel an open invoice
    pub fn void(&mut self) -> Result<(), AppError> {
        match self.status {
            InvoiceStatus::Open => {
                self.status = InvoiceStatus::Void;
                Ok(())
            }
            InvoiceStatus::Void => Err(AppError::validation("invoice is already void")),
            InvoiceStatus::Paid => Err(AppError::validation("a paid invoice cannot be voided")),
        }
    }
}
