//! Fan-out over several async validators of the same value.

use futures::StreamExt;
use futures::future::join_all;
use futures::stream::FuturesUnordered;
use tracing::debug;

use crate::foundation::{AsyncValidate, ValidationError, ValidationErrors};

// ============================================================================
// PARALLEL
// ============================================================================

/// Runs every validator concurrently and waits for all of them.
///
/// Failures are reported in the order of the validator list, regardless of
/// completion order.
#[derive(Debug, Clone)]
pub struct Parallel<V> {
    validators: Vec<V>,
}

impl<V> Parallel<V> {
    pub fn new(validators: Vec<V>) -> Self {
        Self { validators }
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<V: AsyncValidate> AsyncValidate for Parallel<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            join_all(self.validators.iter().map(|v| v.validate_async(input)))
                .await
                .into_iter()
                .filter_map(Result::err)
                .collect::<ValidationErrors>()
                .into_result()
        }
    }
}

/// Runs every validator concurrently and reports all failures in input order.
pub fn parallel<V>(validators: Vec<V>) -> Parallel<V> {
    Parallel::new(validators)
}

// ============================================================================
// RACE
// ============================================================================

/// Runs every validator concurrently and succeeds on the first success.
///
/// The remaining validations are dropped as soon as one passes. When all
/// fail, the failures are reported in list order. An empty list fails
/// immediately.
#[derive(Debug, Clone)]
pub struct Race<V> {
    validators: Vec<V>,
}

impl<V> Race<V> {
    pub fn new(validators: Vec<V>) -> Self {
        Self { validators }
    }
}

impl<V: AsyncValidate> AsyncValidate for Race<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            if self.validators.is_empty() {
                return Err(ValidationError::new("no_validators", "no validators to race"));
            }

            let mut pending: FuturesUnordered<_> = self
                .validators
                .iter()
                .enumerate()
                .map(|(index, v)| async move { (index, v.validate_async(input).await) })
                .collect();

            let mut failures = Vec::with_capacity(self.validators.len());
            while let Some((index, result)) = pending.next().await {
                match result {
                    Ok(()) => {
                        debug!(winner = index, dropped = pending.len(), "race resolved");
                        return Ok(());
                    }
                    Err(error) => failures.push((index, error)),
                }
            }

            failures.sort_by_key(|(index, _)| *index);
            failures
                .into_iter()
                .map(|(_, error)| error)
                .collect::<ValidationErrors>()
                .into_result()
        }
    }
}

/// Passes as soon as any validator passes, dropping the rest.
pub fn race<V>(validators: Vec<V>) -> Race<V> {
    Race::new(validators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concurrent::test_support::Delayed;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn parallel_waits_for_all_and_keeps_list_order() {
        let rule = parallel(vec![
            Delayed::fail(Duration::from_millis(30), "slow failure"),
            Delayed::pass(Duration::from_millis(10)),
            Delayed::fail(Duration::from_millis(5), "fast failure"),
        ]);

        let started = Instant::now();
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.messages(), vec!["slow failure", "fast failure"]);
        assert_eq!(started.elapsed(), Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn parallel_passes_when_all_pass() {
        let rule = parallel(vec![Delayed::pass(Duration::from_millis(1)); 3]);
        assert!(rule.validate_async(&0).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn race_returns_on_first_success() {
        let rule = race(vec![
            Delayed::pass(Duration::from_secs(60)),
            Delayed::fail(Duration::from_millis(1), "quick no"),
            Delayed::pass(Duration::from_millis(20)),
        ]);

        let started = Instant::now();
        assert!(rule.validate_async(&0).await.is_ok());
        assert_eq!(started.elapsed(), Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn race_reports_all_failures_in_list_order() {
        let rule = race(vec![
            Delayed::fail(Duration::from_millis(9), "first"),
            Delayed::fail(Duration::from_millis(1), "second"),
        ]);
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.messages(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn empty_race_fails_without_waiting() {
        let rule: Race<Delayed> = race(Vec::new());
        let error = rule.validate_async(&0).await.unwrap_err();
        assert_eq!(error.message, "no validators to race");
    }
}
