//! Outcome - resolved success/failure of one use-case execution

use crate::domain::errors::AppError;

/// Result of a use-case execution
///
/// Always constructed already resolved: it holds either the output value or
/// the error that stopped the execution, never both and never neither.
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    inner: Result<T, AppError>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self { inner: Ok(value) }
    }

    pub fn fail(error: AppError) -> Self {
        Self { inner: Err(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    pub fn value(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.inner.as_ref().err()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        Outcome {
            inner: self.inner.map(f),
        }
    }

    pub fn into_result(self) -> Result<T, AppError> {
        self.inner
    }
}

impl<T> From<Result<T, AppError>> for Outcome<T> {
    fn from(inner: Result<T, AppError>) -> Self {
        Self { inner }
    }
}

impl<T> From<Outcome<T>> for Result<T, AppError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.inner
    }
}
