//! Generic SQL repository
//!
//! One implementation of the `Repository` port for every slice. A slice only
//! supplies its persistence record (`Record`) and the entity mapping
//! (`Mapper`); the statements are derived from the record's table and
//! column list.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Connection, FromRow};

use campus::{AppError, Page, Repository};

use super::Session;

pub type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// Stored row shape of one table
///
/// Every table has a TEXT `id` primary key plus `created_at`/`updated_at`
/// columns; `COLUMNS` lists the remaining data columns in the order
/// `bind_columns` binds them.
pub trait Record: for<'r> FromRow<'r, AnyRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> &str;

    fn bind_columns<'q>(self, query: AnyQuery<'q>) -> AnyQuery<'q>;
}

/// Translation between a domain entity and its stored record
pub trait Mapper: Send + Sync + 'static {
    type Entity: Send + 'static;
    type Id: Send + 'static;
    type Record: Record;

    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    fn key(id: &Self::Id) -> String;

    /// Entities without an id get a freshly generated one
    fn to_record(entity: Self::Entity) -> Self::Record;

    fn to_domain(record: Self::Record) -> Result<Self::Entity, AppError>;
}

/// `Repository` over any mapped table, bound to one session
pub struct SqlRepository<M: Mapper> {
    session: Arc<Session>,
    _mapper: PhantomData<fn() -> M>,
}

impl<M: Mapper> SqlRepository<M> {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            _mapper: PhantomData,
        }
    }

    /// Run one write statement in its own transaction
    ///
    /// Commits on success and returns the affected row count. On failure the
    /// transaction is rolled back before the error is returned; if the future
    /// is dropped instead, sqlx rolls the transaction back.
    pub(crate) async fn write(&self, query: AnyQuery<'_>, action: &str) -> Result<u64, AppError> {
        let mut conn = self.session.connection().await;
        let mut tx = Connection::begin(&mut **conn)
            .await
            .map_err(|e| AppError::infrastructure("failed to open a transaction", e))?;

        let done = match query.execute(&mut *tx).await {
            Ok(done) => done,
            Err(e) => {
                let err = AppError::infrastructure(format!("failed to {} {}", action, M::ENTITY), e);
                if let Err(e) = tx.rollback().await {
                    tracing::error!(error = %e, "rollback failed after: {}", err);
                }
                return Err(err);
            }
        };

        tx.commit()
            .await
            .map_err(|e| AppError::infrastructure(format!("failed to commit {}", M::ENTITY), e))?;

        Ok(done.rows_affected())
    }

    /// Zero-or-one row lookup on a column the schema keeps unique
    pub(crate) async fn find_one_by(
        &self,
        column: &'static str,
        value: String,
    ) -> Result<Option<M::Entity>, AppError> {
        let sql = format!("{} WHERE {} = $1", select_sql::<M::Record>(), column);
        let mut conn = self.session.connection().await;

        let row = sqlx::query_as::<_, M::Record>(&sql)
            .bind(value)
            .fetch_optional(&mut **conn)
            .await
            .map_err(|e| AppError::infrastructure(format!("failed to load {}", M::ENTITY), e))?;

        row.map(M::to_domain).transpose()
    }
}

#[async_trait]
impl<M: Mapper> Repository<M::Entity, M::Id> for SqlRepository<M> {
    async fn get_by_id(&self, id: M::Id) -> Result<Option<M::Entity>, AppError> {
        self.find_one_by("id", M::key(&id)).await
    }

    async fn save(&self, entity: M::Entity) -> Result<M::Entity, AppError> {
        let record = M::to_record(entity);
        let key = record.key().to_string();
        let now = format_timestamp(&Utc::now());
        let upsert = upsert_sql::<M::Record>();
        let refresh = format!("{} WHERE id = $1", select_sql::<M::Record>());

        let query = record
            .bind_columns(sqlx::query(&upsert).bind(key.clone()))
            .bind(now.clone())
            .bind(now);
        self.write(query, "save").await?;

        let mut conn = self.session.connection().await;
        let stored = sqlx::query_as::<_, M::Record>(&refresh)
            .bind(key)
            .fetch_one(&mut **conn)
            .await
            .map_err(|e| {
                AppError::infrastructure(format!("failed to refresh {}", M::ENTITY), e)
            })?;

        M::to_domain(stored)
    }

    async fn delete(&self, id: M::Id) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", M::Record::TABLE);
        let key = M::key(&id);

        let rows = self
            .write(sqlx::query(&sql).bind(key.clone()), "delete")
            .await?;

        tracing::debug!(entity = M::ENTITY, id = %key, rows, "delete committed");
        Ok(())
    }

    async fn list(&self, page: Page) -> Result<Vec<M::Entity>, AppError> {
        let sql = format!(
            "{} ORDER BY created_at, id LIMIT $1 OFFSET $2",
            select_sql::<M::Record>()
        );
        let mut conn = self.session.connection().await;

        let rows = sqlx::query_as::<_, M::Record>(&sql)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **conn)
            .await
            .map_err(|e| AppError::infrastructure(format!("failed to list {}", M::ENTITY), e))?;

        rows.into_iter().map(M::to_domain).collect()
    }
}

fn select_sql<R: Record>() -> String {
    format!(
        "SELECT id, {}, created_at, updated_at FROM {}",
        R::COLUMNS.join(", "),
        R::TABLE
    )
}

/// Insert-or-update keyed on `id`; `created_at` survives updates
fn upsert_sql<R: Record>() -> String {
    let count = R::COLUMNS.len();
    let placeholders: Vec<String> = (2..count + 2).map(|i| format!("${i}")).collect();
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();

    format!(
        "INSERT INTO {table} (id, {columns}, created_at, updated_at) \
         VALUES ($1, {placeholders}, ${created}, ${updated}) \
         ON CONFLICT (id) DO UPDATE SET {assignments}, updated_at = excluded.updated_at",
        table = R::TABLE,
        columns = R::COLUMNS.join(", "),
        placeholders = placeholders.join(", "),
        created = count + 2,
        updated = count + 3,
        assignments = assignments.join(", "),
    )
}

/// Fixed-width RFC 3339 so stored timestamps sort as text
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| AppError::infrastructure(format!("corrupt timestamp '{value}'"), e))
}

pub fn parse_uuid(value: &str) -> Result<uuid::Uuid, AppError> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| AppError::infrastructure(format!("corrupt identifier '{value}'"), e))
}
