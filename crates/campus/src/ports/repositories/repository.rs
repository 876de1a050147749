//! Generic Repository Port
//!
//! Contract every persistence-backed repository fulfils, whatever the
//! entity. Implementations are bound to one unit of work and are not
//! shared across sessions.

use async_trait::async_trait;

use crate::domain::{errors::AppError, value_objects::Page};

/// Repository interface over entity `T` identified by `ID`
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + 'static,
    ID: Send + 'static,
{
    /// Find an entity by ID; a missing record is `Ok(None)`
    async fn get_by_id(&self, id: ID) -> Result<Option<T>, AppError>;

    /// Save an entity (insert or update) and return it as stored
    async fn save(&self, entity: T) -> Result<T, AppError>;

    /// Delete an entity by ID; deleting a missing record is a no-op
    async fn delete(&self, id: ID) -> Result<(), AppError>;

    /// List a page of entities in a stable order
    async fn list(&self, _page: Page) -> Result<Vec<T>, AppError> {
        Err(AppError::unexpected(
            "list is not supported by this repository",
        ))
    }
}
