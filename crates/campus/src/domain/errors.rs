//! Application Errors
//!
//! Single error root shared by every layer. Domain code, use cases and
//! repositories all return `AppError`; the HTTP layer translates it into a
//! status code at the very edge.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed cause carried by infrastructure failures
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Coarse classification of an [`AppError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Broken domain invariant or missing entity
    Domain,
    /// Use-case level refusal (authorization)
    UseCase,
    /// Storage or adapter failure
    Infrastructure,
    /// Anything that fits none of the above
    Unclassified,
}

/// Application error root
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Infrastructure error: {message}")]
    Infrastructure {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn not_found<T: AsRef<str>>(entity: T, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    /// Wrap a lower-level failure, keeping it reachable through `source()`
    pub fn infrastructure<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Infrastructure {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::Validation(_) => ErrorKind::Domain,
            Self::PermissionDenied(_) => ErrorKind::UseCase,
            Self::Infrastructure { .. } => ErrorKind::Infrastructure,
            Self::Unexpected(_) => ErrorKind::Unclassified,
        }
    }

    /// True for failures that are part of normal business flow.
    ///
    /// Infrastructure and unclassified errors point at a defect or an outage
    /// and should be looked at by an operator.
    pub fn is_expected(&self) -> bool {
        matches!(self.kind(), ErrorKind::Domain | ErrorKind::UseCase)
    }
}
