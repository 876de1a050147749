//! Invoice Ledger Port
//!
//! Invoice status changes must not be lost to a concurrent change of the same
//! invoice, so they go through a guarded write instead of a plain `save`.

use async_trait::async_trait;
use uuid::Uuid;

use super::Repository;
use crate::domain::{entities::Invoice, errors::AppError, value_objects::InvoiceStatus};

#[async_trait]
pub trait InvoiceLedger: Repository<Invoice, Uuid> {
    /// Move invoice `id` from `from` to `to` in one atomic write.
    ///
    /// Returns `Ok(false)` when the stored invoice is no longer in `from`
    /// (or no longer exists); nothing is written in that case.
    async fn transition(
        &self,
        id: Uuid,
        from: InvoiceStatus,
        to: InvoiceStatus,
    ) -> Result<bool, AppError>;
}
