//! UseCase - template for one application-level business operation
//!
//! `execute` is the single place where failures are captured: `validate`
//! and `perform` (and any repository they call) just return `Err` with `?`,
//! and callers above only ever see an [`Outcome`].

use async_trait::async_trait;

use super::Outcome;
use crate::domain::errors::AppError;

/// Application use case
#[async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send + Sync + 'static;
    type Output: Send + 'static;

    /// Optional input validation hook, runs before `perform`
    async fn validate(&self, _input: &Self::Input) -> Result<(), AppError> {
        Ok(())
    }

    /// Business logic; free of transport types
    async fn perform(&self, input: Self::Input) -> Result<Self::Output, AppError>;

    /// Run `validate` then `perform`, capturing any failure into the outcome
    async fn execute(&self, input: Self::Input) -> Outcome<Self::Output> {
        let result = match self.validate(&input).await {
            Ok(()) => self.perform(input).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(output) => Outcome::ok(output),
            Err(err) => {
                let use_case = std::any::type_name::<Self>();
                if err.is_expected() {
                    tracing::debug!(use_case, error = %err, "use case rejected input");
                } else {
                    tracing::warn!(use_case, error = %err, "use case failed");
                }
                Outcome::fail(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Halves even numbers; odd input fails validation, zero fails in perform
    #[derive(Default)]
    struct Halve {
        performed: AtomicUsize,
    }

    #[async_trait]
    impl UseCase for Halve {
        type Input = i64;
        type Output = i64;

        async fn validate(&self, input: &i64) -> Result<(), AppError> {
            if input % 2 != 0 {
                return Err(AppError::validation("odd input"));
            }
            Ok(())
        }

        async fn perform(&self, input: i64) -> Result<i64, AppError> {
            self.performed.fetch_add(1, Ordering::SeqCst);
            if input == 0 {
                return Err(AppError::not_found("Number", 0));
            }
            Ok(input / 2)
        }
    }

    struct Echo;

    #[async_trait]
    impl UseCase for Echo {
        type Input = String;
        type Output = String;

        async fn perform(&self, input: String) -> Result<String, AppError> {
            Ok(input)
        }
    }

    #[tokio::test]
    async fn test_success_wraps_value() {
        let outcome = Halve::default().execute(84).await;
        assert!(outcome.is_ok());
        assert!(!outcome.is_err());
        assert_eq!(outcome.value(), Some(&42));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_perform() {
        let use_case = Halve::default();
        let outcome = use_case.execute(3).await;
        assert!(outcome.is_err());
        assert!(matches!(outcome.error(), Some(AppError::Validation(_))));
        assert_eq!(use_case.performed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_perform_failure_is_captured() {
        let outcome = Halve::default().execute(0).await;
        assert!(outcome.is_err());
        assert!(!outcome.is_ok());
        assert!(matches!(
            outcome.into_result(),
            Err(AppError::NotFound { ref entity, .. }) if entity == "Number"
        ));
    }

    #[tokio::test]
    async fn test_default_validate_accepts_everything() {
        let outcome = Echo.execute(String::new()).await;
        assert_eq!(outcome.value().map(String::as_str), Some(""));
    }
}
