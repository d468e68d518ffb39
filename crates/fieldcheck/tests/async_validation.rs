//! Async validators against a simulated remote lookup.

#![cfg(feature = "async")]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use fieldcheck::concurrent::{
    Cancellable, CancellationToken, Parallel, Race, Retry, Timeout, validate_all_parallel,
};
use fieldcheck::config::ValidatorConfig;
use fieldcheck::prelude::*;
use pretty_assertions::assert_eq;
use tokio::time::Instant;

/// Username registry behind a fixed network latency.
#[derive(Clone)]
struct Registry {
    taken: Arc<HashSet<&'static str>>,
    latency: Duration,
    lookups: Arc<AtomicU32>,
}

impl Registry {
    fn new(latency: Duration) -> Self {
        Self {
            taken: Arc::new(["admin", "root"].into_iter().collect()),
            latency,
            lookups: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl AsyncValidate for Registry {
    type Input = str;

    fn validate_async(
        &self,
        input: &str,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let taken = self.taken.contains(input);
        let latency = self.latency;
        let name = input.to_owned();
        async move {
            tokio::time::sleep(latency).await;
            if taken {
                Err(ValidationError::new("username_taken", format!("'{name}' is taken")))
            } else {
                Ok(())
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn parallel_lookups_overlap() {
    let registry = Registry::new(Duration::from_millis(40));
    let rules = Parallel::new(vec![registry.clone(), registry.clone(), registry.clone()]);

    let started = Instant::now();
    assert!(rules.validate_async("alice").await.is_ok());
    assert_eq!(started.elapsed(), Duration::from_millis(40));
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 3);

    let error = rules.validate_async("root").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Aggregate);
    assert_eq!(error.nested.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn race_takes_the_fastest_success() {
    let slow = Registry::new(Duration::from_secs(5));
    let fast = Registry::new(Duration::from_millis(5));
    let either = Race::new(vec![slow, fast]);

    let started = Instant::now();
    assert!(either.validate_async("alice").await.is_ok());
    assert_eq!(started.elapsed(), Duration::from_millis(5));
}

#[tokio::test(start_paused = true)]
async fn slow_lookup_times_out() {
    let rule = Timeout::new(Registry::new(Duration::from_secs(10)), Duration::from_secs(1));

    let error = rule.validate_async("alice").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Timeout);
    assert_eq!(error.message, "validation timed out after 1s");
}

#[tokio::test(start_paused = true)]
async fn timeout_from_config() {
    let config: ValidatorConfig = serde_json::from_str(r#"{ "timeout": "300ms" }"#).unwrap();
    let registry = Registry::new(Duration::from_millis(200));

    let rule = Timeout::from_config(registry, &config).unwrap();
    assert_eq!(rule.duration(), Duration::from_millis(300));
    assert!(rule.validate_async("bob").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn cancelled_token_stops_lookup() {
    let token = CancellationToken::new();
    let rule = Cancellable::new(Registry::new(Duration::from_secs(60)), token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
    });

    let error = rule.validate_async("alice").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Cancelled);
    canceller.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn retry_gives_up_on_permanent_failure() {
    let registry = Registry::new(Duration::from_millis(1));
    let rule = Retry::new(registry.clone(), 2).with_backoff(Duration::from_millis(10));

    let error = rule.validate_async("admin").await.unwrap_err();
    assert_eq!(
        error.message,
        "validation failed after 2 retries with backoff: 'admin' is taken"
    );
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn sync_rules_join_async_ones() {
    let format = length_range(3, 16).blocking();
    let names = ["alice".to_owned(), "x".to_owned(), "bob".to_owned()];

    let error = validate_all_parallel(&names, &transform(String::clone, length_range(3, 16)).inline())
        .await
        .unwrap_err();
    assert_eq!(error.messages(), vec!["element[1]: length must be between 3 and 16, got 1"]);

    assert!(format.validate_async("carol").await.is_ok());
}
