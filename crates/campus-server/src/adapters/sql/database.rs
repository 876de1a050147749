//! Database handle and per-unit-of-work sessions

use std::sync::Arc;

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool};
use tokio::sync::{Mutex, MutexGuard};

use campus::AppError;

use super::{Mapper, SqlRepository};
use crate::config::DatabaseSettings;

/// Connection pool shared by the whole process
///
/// The driver is picked from the URL scheme: `postgres://` in production,
/// `sqlite:` for local runs and tests.
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .test_before_acquire(true)
            .connect(&settings.url)
            .await
            .map_err(|e| AppError::infrastructure("failed to connect to the database", e))?;

        tracing::info!(url = %settings.redacted_url(), "Database pool ready");

        Ok(Self { pool })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| AppError::infrastructure("failed to run database migrations", e))
    }

    /// Connectivity check (`SELECT 1`)
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::infrastructure("database did not answer", e))
    }

    /// Acquire a session for one unit of work
    ///
    /// The connection goes back to the pool when the last handle to the
    /// session is dropped, whatever the outcome of the work.
    pub async fn session(&self) -> Result<Arc<Session>, AppError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::infrastructure("failed to acquire a database session", e))?;

        Ok(Arc::new(Session {
            conn: Mutex::new(conn),
        }))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One exclusively owned connection
///
/// Repositories bound to the same session take turns on the connection;
/// nothing else can use it while the session is alive.
pub struct Session {
    conn: Mutex<PoolConnection<Any>>,
}

impl Session {
    pub(crate) async fn connection(&self) -> MutexGuard<'_, PoolConnection<Any>> {
        self.conn.lock().await
    }

    /// Build a repository bound to this session
    pub fn repository<M: Mapper>(self: &Arc<Self>) -> SqlRepository<M> {
        SqlRepository::new(Arc::clone(self))
    }
}
