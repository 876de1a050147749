//! Invoice persistence record

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use campus::{AppError, Invoice, InvoiceLedger, InvoiceStatus};

use crate::adapters::sql::repository::{
    format_timestamp, parse_timestamp, parse_uuid, AnyQuery, Mapper, Record, SqlRepository,
};

pub type InvoiceRepository = SqlRepository<InvoiceMapper>;

/// Row of the `invoices` table
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct InvoiceRecord {
    pub id: String,
    pub student_id: String,
    pub description: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for InvoiceRecord {
    const TABLE: &'static str = "invoices";
    const COLUMNS: &'static [&'static str] = &[
        "student_id",
        "description",
        "amount_cents",
        "currency",
        "status",
    ];

    fn key(&self) -> &str {
        &self.id
    }

    fn bind_columns<'q>(self, query: AnyQuery<'q>) -> AnyQuery<'q> {
        query
            .bind(self.student_id)
            .bind(self.description)
            .bind(self.amount_cents)
            .bind(self.currency)
            .bind(self.status)
    }
}

pub struct InvoiceMapper;

impl Mapper for InvoiceMapper {
    type Entity = Invoice;
    type Id = Uuid;
    type Record = InvoiceRecord;

    const ENTITY: &'static str = "Invoice";

    fn key(id: &Uuid) -> String {
        id.to_string()
    }

    fn to_record(invoice: Invoice) -> InvoiceRecord {
        InvoiceRecord {
            id: invoice.id.unwrap_or_else(Uuid::new_v4).to_string(),
            student_id: invoice.student_id.to_string(),
            description: invoice.description,
            amount_cents: invoice.amount_cents,
            currency: invoice.currency,
            status: invoice.status.to_string(),
            created_at: invoice.created_at.as_ref().map(format_timestamp).unwrap_or_default(),
            updated_at: invoice.updated_at.as_ref().map(format_timestamp).unwrap_or_default(),
        }
    }

    fn to_domain(record: InvoiceRecord) -> Result<Invoice, AppError> {
        let status = record
            .status
            .parse::<InvoiceStatus>()
            .map_err(|e| AppError::unexpected(format!("corrupt invoice {}: {}", record.id, e)))?;

        Ok(Invoice {
            id: Some(parse_uuid(&record.id)?),
            student_id: parse_uuid(&record.student_id)?,
            description: record.description,
            amount_cents: record.amount_cents,
            currency: record.currency,
            status,
            created_at: Some(parse_timestamp(&record.created_at)?),
            updated_at: Some(parse_timestamp(&record.updated_at)?),
        })
    }
}

#[async_trait]
impl InvoiceLedger for InvoiceRepository {
    async fn transition(
        &self,
        id: Uuid,
        from: InvoiceStatus,
        to: InvoiceStatus,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET status = $1, updated_at = $2 WHERE id = $3 AND status = $4",
            InvoiceRecord::TABLE
        );
        let query = sqlx::query(&sql)
            .bind(to.to_string())
            .bind(format_timestamp(&Utc::now()))
            .bind(id.to_string())
            .bind(from.to_string());

        let rows = self.write(query, "update status of").await?;
        Ok(rows == 1)
    }
}
