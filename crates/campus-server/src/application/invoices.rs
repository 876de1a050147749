//! Financial slice: invoice use cases

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use campus::{AppError, Invoice, InvoiceLedger, InvoiceStatus, Page, Repository, Student, UseCase};

/// Raise a new invoice against an existing student
pub struct IssueInvoice<S, I> {
    students: Arc<S>,
    invoices: Arc<I>,
}

impl<S, I> IssueInvoice<S, I>
where
    S: Repository<Student, Uuid>,
    I: Repository<Invoice, Uuid>,
{
    pub fn new(students: Arc<S>, invoices: Arc<I>) -> Self {
        Self { students, invoices }
    }
}

#[async_trait]
impl<S, I> UseCase for IssueInvoice<S, I>
where
    S: Repository<Student, Uuid>,
    I: Repository<Invoice, Uuid>,
{
    type Input = Invoice;
    type Output = Invoice;

    async fn validate(&self, invoice: &Invoice) -> Result<(), AppError> {
        if invoice.id.is_some() {
            return Err(AppError::validation("a new invoice must not carry an id"));
        }
        if invoice.status != InvoiceStatus::Open {
            return Err(AppError::validation("a new invoice must be open"));
        }
        invoice.validate()
    }

    async fn perform(&self, invoice: Invoice) -> Result<Invoice, AppError> {
        if self.students.get_by_id(invoice.student_id).await?.is_none() {
            return Err(AppError::not_found("Student", invoice.student_id));
        }

        let saved = self.invoices.save(invoice).await?;
        tracing::info!(
            "Issued invoice {} for student {}: {} {}",
            saved.id.unwrap_or_default(),
            saved.student_id,
            saved.amount_cents,
            saved.currency
        );
        Ok(saved)
    }
}

pub struct GetInvoice<I> {
    invoices: Arc<I>,
}

impl<I: Repository<Invoice, Uuid>> GetInvoice<I> {
    pub fn new(invoices: Arc<I>) -> Self {
        Self { invoices }
    }
}

#[async_trait]
impl<I: Repository<Invoice, Uuid>> UseCase for GetInvoice<I> {
    type Input = Uuid;
    type Output = Invoice;

    async fn perform(&self, id: Uuid) -> Result<Invoice, AppError> {
        load(self.invoices.as_ref(), id).await
    }
}

pub struct ListInvoices<I> {
    invoices: Arc<I>,
}

impl<I: Repository<Invoice, Uuid>> ListInvoices<I> {
    pub fn new(invoices: Arc<I>) -> Self {
        Self { invoices }
    }
}

#[async_trait]
impl<I: Repository<Invoice, Uuid>> UseCase for ListInvoices<I> {
    type Input = Page;
    type Output = Vec<Invoice>;

    async fn perform(&self, page: Page) -> Result<Vec<Invoice>, AppError> {
        self.invoices.list(page).await
    }
}

/// Settle an open invoice
pub struct PayInvoice<I> {
    invoices: Arc<I>,
}

impl<I: InvoiceLedger> PayInvoice<I> {
    pub fn new(invoices: Arc<I>) -> Self {
        Self { invoices }
    }
}

#[async_trait]
impl<I: InvoiceLedger> UseCase for PayInvoice<I> {
    type Input = Uuid;
    type Output = Invoice;

    async fn perform(&self, id: Uuid) -> Result<Invoice, AppError> {
        let paid = settle(self.invoices.as_ref(), id, Invoice::pay).await?;
        tracing::info!("Invoice {} paid", id);
        Ok(paid)
    }
}

/// Cancel an open invoice
///
/// Paid invoices are money already received; reversing them is not
/// something this API is allowed to do.
pub struct VoidInvoice<I> {
    invoices: Arc<I>,
}

impl<I: InvoiceLedger> VoidInvoice<I> {
    pub fn new(invoices: Arc<I>) -> Self {
        Self { invoices }
    }
}

#[async_trait]
impl<I: InvoiceLedger> UseCase for VoidInvoice<I> {
    type Input = Uuid;
    type Output = Invoice;

    async fn perform(&self, id: Uuid) -> Result<Invoice, AppError> {
        let voided = settle(self.invoices.as_ref(), id, void_unpaid).await?;
        tracing::info!("Invoice {} voided", id);
        Ok(voided)
    }
}

fn void_unpaid(invoice: &mut Invoice) -> Result<(), AppError> {
    if invoice.status == InvoiceStatus::Paid {
        return Err(AppError::permission_denied(
            "paid invoices cannot be voided",
        ));
    }
    invoice.void()
}

/// Apply a status change through the ledger's guarded write
///
/// When another request changed the invoice between our read and our write,
/// the change is judged again against the stored state so the caller gets
/// the same error it would have got had it arrived second.
async fn settle<I: InvoiceLedger>(
    invoices: &I,
    id: Uuid,
    change: fn(&mut Invoice) -> Result<(), AppError>,
) -> Result<Invoice, AppError> {
    let mut invoice = load(invoices, id).await?;
    let from = invoice.status;
    change(&mut invoice)?;

    if !invoices.transition(id, from, invoice.status).await? {
        let mut current = load(invoices, id).await?;
        change(&mut current)?;
        return Err(AppError::validation(
            "invoice was changed by another request, try again",
        ));
    }

    load(invoices, id).await
}

async fn load<I: Repository<Invoice, Uuid>>(invoices: &I, id: Uuid) -> Result<Invoice, AppError> {
    invoices
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sql::{InvoiceMapper, InvoiceRepository, StudentMapper, StudentRepository};
    use crate::test_support::memory_database;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    struct Fixture {
        students: Arc<StudentRepository>,
        invoices: Arc<InvoiceRepository>,
        student_id: Uuid,
        // Keeps the in-memory database alive for the test
        _db: crate::adapters::Database,
    }

    async fn fixture() -> Fixture {
        let db = memory_database().await;
        let session = db.session().await.unwrap();
        let students = Arc::new(session.repository::<StudentMapper>());
        let invoices = Arc::new(session.repository::<InvoiceMapper>());
        let student_id = students
            .save(Student::new("Ada".to_string(), "ada@example.org".to_string()))
            .await
            .unwrap()
            .id
            .unwrap();
        Fixture {
            students,
            invoices,
            student_id,
            _db: db,
        }
    }

    fn tuition(student_id: Uuid) -> Invoice {
        Invoice::new(student_id, "Tuition".to_string(), 120_000, "usd".to_string())
    }

    async fn issued(fx: &Fixture) -> Invoice {
        IssueInvoice::new(fx.students.clone(), fx.invoices.clone())
            .execute(tuition(fx.student_id))
            .await
            .into_result()
            .unwrap()
    }

    #[tokio::test]
    async fn test_issue_invoice() {
        let fx = fixture().await;
        let invoice = issued(&fx).await;

        assert!(invoice.id.is_some());
        assert_eq!(invoice.currency, "USD");
        assert_eq!(invoice.status, InvoiceStatus::Open);

        let fetched = GetInvoice::new(fx.invoices.clone())
            .execute(invoice.id.unwrap())
            .await
            .into_result()
            .unwrap();
        assert_eq!(fetched, invoice);
    }

    #[tokio::test]
    async fn test_issue_for_unknown_student_is_not_found() {
        let fx = fixture().await;
        let outcome = IssueInvoice::new(fx.students.clone(), fx.invoices.clone())
            .execute(tuition(Uuid::new_v4()))
            .await;

        assert!(matches!(
            outcome.error(),
            Some(AppError::NotFound { entity, .. }) if entity == "Student"
        ));
        assert!(fx.invoices.list(Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_issue_rejects_zero_amount() {
        let fx = fixture().await;
        let mut invoice = tuition(fx.student_id);
        invoice.amount_cents = 0;

        let outcome = IssueInvoice::new(fx.students.clone(), fx.invoices.clone())
            .execute(invoice)
            .await;
        assert!(matches!(outcome.error(), Some(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_pay_then_pay_again() {
        let fx = fixture().await;
        let id = issued(&fx).await.id.unwrap();
        let pay = PayInvoice::new(fx.invoices.clone());

        let paid = pay.execute(id).await.into_result().unwrap();
        assert_eq!(paid.status, InvoiceStatus::Paid);

        let again = pay.execute(id).await;
        assert!(matches!(again.error(), Some(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_void_paid_invoice_is_denied() {
        let fx = fixture().await;
        let id = issued(&fx).await.id.unwrap();
        PayInvoice::new(fx.invoices.clone())
            .execute(id)
            .await
            .into_result()
            .unwrap();

        let outcome = VoidInvoice::new(fx.invoices.clone()).execute(id).await;
        assert!(matches!(outcome.error(), Some(AppError::PermissionDenied(_))));

        let stored = fx.invoices.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_void_open_invoice() {
        let fx = fixture().await;
        let id = issued(&fx).await.id.unwrap();

        let voided = VoidInvoice::new(fx.invoices.clone())
            .execute(id)
            .await
            .into_result()
            .unwrap();
        assert_eq!(voided.status, InvoiceStatus::Void);

        let listed = ListInvoices::new(fx.invoices.clone())
            .execute(Page::default())
            .await
            .into_result()
            .unwrap();
        assert_eq!(listed, vec![voided]);
    }

    #[tokio::test]
    async fn test_missing_invoice_is_not_found() {
        let fx = fixture().await;
        let outcome = PayInvoice::new(fx.invoices.clone())
            .execute(Uuid::new_v4())
            .await;
        assert!(matches!(outcome.error(), Some(AppError::NotFound { .. })));
    }

    /// Ledger that holds the first two readers until both have read
    struct ReadGate<I> {
        inner: Arc<I>,
        gate: Barrier,
        reads: AtomicUsize,
    }

    impl<I> ReadGate<I> {
        fn new(inner: Arc<I>) -> Self {
            Self {
                inner,
                gate: Barrier::new(2),
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl<I: InvoiceLedger> Repository<Invoice, Uuid> for ReadGate<I> {
        async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
            let found = self.inner.get_by_id(id).await?;
            if self.reads.fetch_add(1, Ordering::SeqCst) < 2 {
                self.gate.wait().await;
            }
            Ok(found)
        }

        async fn save(&self, invoice: Invoice) -> Result<Invoice, AppError> {
            self.inner.save(invoice).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), AppError> {
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl<I: InvoiceLedger> InvoiceLedger for ReadGate<I> {
        async fn transition(
            &self,
            id: Uuid,
            from: InvoiceStatus,
            to: InvoiceStatus,
        ) -> Result<bool, AppError> {
            self.inner.transition(id, from, to).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_pay_and_void_settle_once() {
        let fx = fixture().await;
        let id = issued(&fx).await.id.unwrap();
        let gated = Arc::new(ReadGate::new(fx.invoices.clone()));
        let pay = PayInvoice::new(gated.clone());
        let void = VoidInvoice::new(gated);

        // Both read the invoice as open before either writes
        let (paid, voided) = tokio::join!(pay.execute(id), void.execute(id));
        assert_ne!(paid.is_ok(), voided.is_ok());

        let stored = fx.invoices.get_by_id(id).await.unwrap().unwrap();
        if paid.is_ok() {
            assert_eq!(stored.status, InvoiceStatus::Paid);
            assert!(matches!(voided.error(), Some(AppError::PermissionDenied(_))));
        } else {
            assert_eq!(stored.status, InvoiceStatus::Void);
            assert!(matches!(paid.error(), Some(AppError::Validation(_))));
        }
    }
}
