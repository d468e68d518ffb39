//! Lifting synchronous validators into [`AsyncValidate`].

use std::borrow::Borrow;
use std::sync::Arc;

use crate::foundation::{AsyncValidate, Validate, ValidationError};

/// Runs a synchronous validator on the task that polls it.
///
/// Suited to cheap rules. Under a timeout the rule always runs to
/// completion before the timer is observed.
#[derive(Debug, Clone, Copy)]
pub struct Inline<V> {
    inner: V,
}

impl<V> Inline<V> {
    /// Wraps a synchronous validator; it runs on the calling task.
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns the wrapped validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V> AsyncValidate for Inline<V>
where
    V: Validate + Send + Sync,
    V::Input: Sync,
{
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move { self.inner.validate(input) }
    }
}

/// Runs a synchronous validator on tokio's blocking pool.
///
/// The input is cloned into the task. If the returned future is dropped
/// (a timeout fired, a race was won elsewhere) the task keeps running to
/// completion and its result is discarded.
#[derive(Debug)]
pub struct Blocking<V> {
    inner: Arc<V>,
}

impl<V> Blocking<V> {
    /// Wraps a synchronous validator that runs on the blocking pool.
    pub fn new(inner: V) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<V> Clone for Blocking<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> AsyncValidate for Blocking<V>
where
    V: Validate + Send + Sync + 'static,
    V::Input: ToOwned + Sync,
    <V::Input as ToOwned>::Owned: Send + 'static,
{
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        let inner = Arc::clone(&self.inner);
        let owned = input.to_owned();
        async move {
            tokio::task::spawn_blocking(move || {
                inner.validate(Borrow::<V::Input>::borrow(&owned))
            })
            .await
            .unwrap_or_else(|join_error| {
                Err(ValidationError::new(
                    "task_failed",
                    format!("validation task failed: {join_error}"),
                ))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateExt;
    use crate::validators::{min, min_length};

    #[tokio::test]
    async fn inline_matches_sync_result() {
        let rule = min(10).inline();
        assert!(rule.validate_async(&11).await.is_ok());
        assert_eq!(rule.validate_async(&9).await.unwrap_err().code, "min");
    }

    #[tokio::test]
    async fn blocking_runs_unsized_inputs() {
        let rule = min_length(3).blocking();
        assert!(rule.validate_async("abc").await.is_ok());
        assert_eq!(rule.validate_async("ab").await.unwrap_err().code, "min_length");
    }

    #[tokio::test]
    async fn panicking_rule_reports_task_failure() {
        let rule = crate::foundation::from_fn(|_: &i32| -> Result<(), ValidationError> {
            panic!("rule bug")
        })
        .blocking();
        assert_eq!(rule.validate_async(&1).await.unwrap_err().code, "task_failed");
    }
}
