//! Time limits and external cancellation for async validators.
//!
//! When a limit fires the wrapped validation is abandoned: its future is
//! dropped and any result it would have produced is discarded. Validators
//! lifted with [`Blocking`](super::Blocking) keep running on the blocking
//! pool until they finish on their own.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::ValidatorConfig;
use crate::foundation::{AsyncValidate, ValidationError};

// ============================================================================
// TIMEOUT
// ============================================================================

/// Fails with `"validation timed out after <d>"` if the inner validator
/// has not finished within `duration`.
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use std::time::Duration;
/// use fieldcheck::concurrent::Timeout;
/// use fieldcheck::prelude::*;
///
/// let bounded = Timeout::new(min_length(3).blocking(), Duration::from_secs(1));
/// assert!(bounded.validate_async("abc").await.is_ok());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Timeout<V> {
    inner: V,
    duration: Duration,
}

impl<V> Timeout<V> {
    /// Fails with a timeout error if `inner` runs longer than `duration`.
    pub fn new(inner: V, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Uses [`ValidatorConfig::timeout`]; `None` when no timeout is set.
    pub fn from_config(inner: V, config: &ValidatorConfig) -> Option<Self> {
        config.timeout.map(|duration| Self::new(inner, duration))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<V: AsyncValidate> AsyncValidate for Timeout<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            if let Ok(result) = tokio::time::timeout(self.duration, self.inner.validate_async(input)).await {
                result
            } else {
                warn!(timeout = ?self.duration, "validation abandoned after timeout");
                Err(ValidationError::timeout(self.duration))
            }
        }
    }
}

// ============================================================================
// DEADLINE
// ============================================================================

const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Fails with `"validation deadline exceeded"` if the inner validator has
/// not finished by a fixed instant. A deadline already in the past fails
/// every call that does not complete on its first poll.
#[derive(Debug, Clone)]
pub struct Deadline<V> {
    inner: V,
    deadline: Instant,
}

impl<V> Deadline<V> {
    /// Fails if `inner` has not finished by `deadline`.
    pub fn new(inner: V, deadline: Instant) -> Self {
        Self { inner, deadline }
    }

    /// Deadline `after` from now. Durations past the clock's range are
    /// capped at roughly thirty years.
    pub fn after(inner: V, after: Duration) -> Self {
        let now = Instant::now();
        let deadline = now.checked_add(after).unwrap_or_else(|| now + FAR_FUTURE);
        Self::new(inner, deadline)
    }

    /// The instant validation gives up.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

impl<V: AsyncValidate> AsyncValidate for Deadline<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            if let Ok(result) =
                tokio::time::timeout_at(self.deadline, self.inner.validate_async(input)).await
            {
                result
            } else {
                warn!(deadline = ?self.deadline, "validation abandoned at deadline");
                Err(ValidationError::deadline_exceeded())
            }
        }
    }
}

// ============================================================================
// CANCELLATION
// ============================================================================

/// Fails with `"validation cancelled"` once `token` is cancelled.
///
/// An already-cancelled token fails without starting the inner validator.
#[derive(Debug, Clone)]
pub struct Cancellable<V> {
    inner: V,
    token: CancellationToken,
}

impl<V> Cancellable<V> {
    /// Fails with a cancellation error once `token` is cancelled.
    pub fn new(inner: V, token: CancellationToken) -> Self {
        Self { inner, token }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl<V: AsyncValidate> AsyncValidate for Cancellable<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            tokio::select! {
                biased;
                () = self.token.cancelled() => {
                    warn!("validation abandoned after cancellation");
                    Err(ValidationError::cancelled())
                }
                result = self.inner.validate_async(input) => result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concurrent::test_support::Delayed;
    use crate::foundation::ErrorKind;

    #[tokio::test(start_paused = true)]
    async fn finishes_inside_timeout() {
        let rule = Timeout::new(Delayed::pass(Duration::from_millis(10)), Duration::from_millis(50));
        assert!(rule.validate_async(&0).await.is_ok());

        let failing = Timeout::new(Delayed::fail(Duration::from_millis(10), "no"), Duration::from_millis(50));
        assert_eq!(failing.validate_async(&0).await.unwrap_err().message, "no");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_validator_times_out() {
        let rule = Timeout::new(Delayed::pass(Duration::from_secs(5)), Duration::from_millis(50));
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Timeout);
        assert_eq!(error.message, "validation timed out after 50ms");
        assert_eq!(error.param("timeout_ms"), Some("50"));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_exceeded() {
        let rule = Deadline::after(Delayed::pass(Duration::from_secs(1)), Duration::from_millis(100));
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.code, "deadline_exceeded");

        let roomy = Deadline::after(Delayed::pass(Duration::from_millis(1)), Duration::from_secs(1));
        assert!(roomy.validate_async(&0).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_deadline_saturates() {
        let started = Instant::now();
        let rule = Deadline::after(Delayed::pass(Duration::from_millis(5)), Duration::MAX);
        assert!(rule.deadline() >= started + FAR_FUTURE);
        assert!(rule.validate_async(&0).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_abandons_validation() {
        let token = CancellationToken::new();
        let rule = Cancellable::new(Delayed::pass(Duration::from_secs(60)), token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Cancelled);
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn already_cancelled_token_fails_fast() {
        let token = CancellationToken::new();
        token.cancel();
        let rule = Cancellable::new(Delayed::pass(Duration::ZERO), token);
        assert_eq!(rule.validate_async(&0).await.unwrap_err().message, "validation cancelled");
    }

    #[test]
    fn timeout_from_config() {
        let mut config = ValidatorConfig::default();
        assert!(Timeout::from_config((), &config).is_none());

        config.timeout = Some(Duration::from_millis(250));
        let rule = Timeout::from_config((), &config).unwrap();
        assert_eq!(rule.duration(), Duration::from_millis(250));
    }
}
