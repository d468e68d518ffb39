//! Async validation and concurrency wrappers
//!
//! Everything here works on [`AsyncValidate`](crate::foundation::AsyncValidate).
//! Synchronous validators are lifted with
//! [`ValidateExt::inline`](crate::foundation::ValidateExt::inline) or
//! [`ValidateExt::blocking`](crate::foundation::ValidateExt::blocking).
//!
//! Wrappers never spawn tasks of their own: [`Parallel`], [`Race`] and the
//! batch functions poll their children concurrently on the calling task,
//! and only [`Blocking`] moves work onto tokio's blocking pool. Dropping a
//! wrapper's future drops every child future with it.
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use std::time::Duration;
//! use fieldcheck::concurrent::{Race, Timeout};
//! use fieldcheck::prelude::*;
//!
//! let either = Race::new(vec![min(100).blocking(), min(-10).blocking()]);
//! let bounded = Timeout::new(either, Duration::from_secs(1));
//!
//! assert!(bounded.validate_async(&-5).await.is_ok());
//! assert!(bounded.validate_async(&-50).await.is_err());
//! # }
//! ```

mod adapter;
mod batch;
mod parallel;
mod retry;
mod timeout;

pub use adapter::{Blocking, Inline};
pub use batch::{AnyElementParallel, EachParallel, validate_all_parallel, validate_any_parallel};
pub use parallel::{Parallel, Race, parallel, race};
pub use retry::Retry;
pub use timeout::{Cancellable, Deadline, Timeout};
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use crate::foundation::{AsyncValidate, ValidationError};

    /// Sleeps, then passes or fails with a fixed message.
    #[derive(Debug, Clone)]
    pub(crate) struct Delayed {
        delay: Duration,
        failure: Option<&'static str>,
    }

    impl Delayed {
        pub(crate) fn pass(delay: Duration) -> Self {
            Self { delay, failure: None }
        }

        pub(crate) fn fail(delay: Duration, message: &'static str) -> Self {
            Self {
                delay,
                failure: Some(message),
            }
        }
    }

    impl AsyncValidate for Delayed {
        type Input = i32;

        fn validate_async(
            &self,
            _input: &i32,
        ) -> impl Future<Output = Result<(), ValidationError>> + Send {
            let Self { delay, failure } = self.clone();
            async move {
                tokio::time::sleep(delay).await;
                failure.map_or(Ok(()), |message| Err(ValidationError::custom(message)))
            }
        }
    }

    /// Fails its first `n` calls with code `flaky`, then passes.
    #[derive(Debug, Clone)]
    pub(crate) struct Flaky {
        failures: u32,
        calls: Arc<AtomicU32>,
    }

    impl Flaky {
        pub(crate) fn failing_times(failures: u32) -> Self {
            Self {
                failures,
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        pub(crate) fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AsyncValidate for Flaky {
        type Input = i32;

        fn validate_async(
            &self,
            _input: &i32,
        ) -> impl Future<Output = Result<(), ValidationError>> + Send {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let result = if attempt > self.failures {
                Ok(())
            } else {
                Err(ValidationError::new("flaky", format!("attempt {attempt} failed")))
            };
            std::future::ready(result)
        }
    }
}
