//! Student - Administrative record of a learner
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{errors::AppError, value_objects::StudentStatus};

const MAX_NAME_LEN: usize = 200;

/// Student - an enrolled learner
///
/// `id` and the timestamps stay `None` until the record has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub status: StudentStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Student {
    /// Create a new, not yet persisted, active student
    pub fn new(full_name: String, email: String) -> Self {
        Self {
            id: None,
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            status: StudentStatus::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Check the entity invariants
    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.full_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("full_name must not be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::validation(format!(
                "full_name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }
        if !is_plausible_email(&self.email) {
            return Err(AppError::validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
