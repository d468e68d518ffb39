//! Re-running a failing async validator.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::RetryConfig;
use crate::foundation::{AsyncValidate, ValidationError};

type RetryPredicate = Arc<dyn Fn(&ValidationError) -> bool + Send + Sync>;

/// Runs the inner validator up to `max_retries + 1` times until it passes.
///
/// - With backoff, waits `initial_delay` before the first retry and
///   doubles the wait after every further failure.
/// - With a retry predicate, a failure the predicate rejects is returned
///   unchanged without further attempts.
/// - On exhaustion fails with
///   `"validation failed after <n> retries: <last error>"`
///   (`"... retries with backoff: ..."` when backing off).
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use std::time::Duration;
/// use fieldcheck::concurrent::Retry;
/// use fieldcheck::prelude::*;
///
/// let flaky = Retry::new(min(10).inline(), 2).with_backoff(Duration::from_millis(1));
/// let error = flaky.validate_async(&3).await.unwrap_err();
/// assert!(error.message.starts_with("validation failed after 2 retries with backoff: "));
/// # }
/// ```
#[derive(Clone)]
pub struct Retry<V> {
    inner: V,
    max_retries: u32,
    initial_delay: Option<Duration>,
    retry_if: Option<RetryPredicate>,
}

impl<V> Retry<V> {
    /// Retries `inner` up to `max_retries` times after the first failure, without delay.
    pub fn new(inner: V, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            initial_delay: None,
            retry_if: None,
        }
    }

    /// Builds from a [`RetryConfig`]; backoff is enabled by `config.backoff`.
    pub fn from_config(inner: V, config: &RetryConfig) -> Self {
        let retry = Self::new(inner, config.max_retries);
        if config.backoff {
            retry.with_backoff(config.initial_delay)
        } else {
            retry
        }
    }

    /// Waits between attempts, starting at `initial_delay` and doubling.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_backoff(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = Some(initial_delay);
        self
    }

    /// Retries only failures for which `predicate` returns true.
    #[must_use = "builder methods must be chained or built"]
    pub fn retry_if<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&ValidationError) -> bool + Send + Sync + 'static,
    {
        self.retry_if = Some(Arc::new(predicate));
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn exhausted(&self, last: ValidationError) -> ValidationError {
        let n = self.max_retries;
        let message = if self.initial_delay.is_some() {
            format!("validation failed after {n} retries with backoff: {last}")
        } else {
            format!("validation failed after {n} retries: {last}")
        };
        ValidationError::new("retries_exhausted", message)
            .with_param("retries", n.to_string())
            .with_nested_error(last)
    }
}

impl<V: AsyncValidate> AsyncValidate for Retry<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            let mut delay = self.initial_delay;
            let mut attempt = 0;

            loop {
                let Err(error) = self.inner.validate_async(input).await else {
                    return Ok(());
                };

                if let Some(retry_if) = &self.retry_if
                    && !retry_if(&error)
                {
                    debug!(attempt, %error, "failure not retryable");
                    return Err(error);
                }
                if attempt >= self.max_retries {
                    return Err(self.exhausted(error));
                }

                attempt += 1;
                debug!(attempt, delay = ?delay, %error, "retrying validation");
                if let Some(wait) = delay {
                    tokio::time::sleep(wait).await;
                    delay = Some(wait.saturating_mul(2));
                }
            }
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Retry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("inner", &self.inner)
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("retry_if", &self.retry_if.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concurrent::test_support::Flaky;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    #[tokio::test]
    async fn passes_once_inner_recovers() {
        let flaky = Flaky::failing_times(2);
        let rule = Retry::new(flaky.clone(), 3);
        assert!(rule.validate_async(&0).await.is_ok());
        assert_eq!(flaky.calls(), 3);
    }

    #[tokio::test]
    async fn exhaustion_wraps_last_error() {
        let flaky = Flaky::failing_times(10);
        let rule = Retry::new(flaky.clone(), 2);
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.message, "validation failed after 2 retries: attempt 3 failed");
        assert_eq!(flaky.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_delay() {
        let flaky = Flaky::failing_times(10);
        let rule = Retry::new(flaky.clone(), 3).with_backoff(Duration::from_millis(10));

        let started = Instant::now();
        let error = rule.validate_async(&0).await.unwrap_err();
        // 10 + 20 + 40
        assert_eq!(started.elapsed(), Duration::from_millis(70));
        assert!(error.message.starts_with("validation failed after 3 retries with backoff: "));
        assert_eq!(flaky.calls(), 4);
    }

    #[tokio::test]
    async fn predicate_stops_non_retryable_failures() {
        let flaky = Flaky::failing_times(10);
        let rule = Retry::new(flaky.clone(), 5).retry_if(|e| e.code != "flaky");
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.message, "attempt 1 failed");
        assert_eq!(flaky.calls(), 1);
    }

    #[test]
    fn from_config_enables_backoff() {
        let config = RetryConfig {
            max_retries: 4,
            initial_delay: Duration::from_millis(25),
            backoff: true,
        };
        let rule = Retry::from_config((), &config);
        assert_eq!(rule.max_retries(), 4);
        assert_eq!(rule.initial_delay, Some(Duration::from_millis(25)));
    }
}
