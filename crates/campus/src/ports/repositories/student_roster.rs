//! Student Roster Port

use async_trait::async_trait;
use uuid::Uuid;

use super::Repository;
use crate::domain::{entities::Student, errors::AppError};

#[async_trait]
pub trait StudentRoster: Repository<Student, Uuid> {
    /// Find the student holding `email` (already normalized)
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError>;
}
