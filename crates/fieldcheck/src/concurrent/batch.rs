//! Concurrent batch validation over slices.

use futures::StreamExt;
use futures::future::join_all;
use futures::stream::FuturesUnordered;

use crate::combinators::each::{element_failed, no_elements};
use crate::foundation::{AsyncValidate, ValidationError, ValidationErrors};

/// Validates every element concurrently; every element must pass.
///
/// Failures are tagged `element[i]` and reported in index order no matter
/// which element finished first.
#[derive(Debug, Clone, Copy)]
pub struct EachParallel<V> {
    inner: V,
}

impl<V> EachParallel<V> {
    /// Validates every element with `inner`, concurrently.
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V, T> AsyncValidate for EachParallel<V>
where
    V: AsyncValidate<Input = T>,
    T: Sync,
{
    type Input = [T];

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            join_all(input.iter().map(|element| self.inner.validate_async(element)))
                .await
                .into_iter()
                .enumerate()
                .filter_map(|(index, result)| result.err().map(|e| element_failed(index, e)))
                .collect::<ValidationErrors>()
                .into_result()
        }
    }
}

/// Validates every element concurrently; passes on the first element that
/// passes and drops the rest. An empty slice fails.
#[derive(Debug, Clone, Copy)]
pub struct AnyElementParallel<V> {
    inner: V,
}

impl<V> AnyElementParallel<V> {
    /// Passes once any element passes `inner`.
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V, T> AsyncValidate for AnyElementParallel<V>
where
    V: AsyncValidate<Input = T>,
    T: Sync,
{
    type Input = [T];

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        async move {
            if input.is_empty() {
                return Err(no_elements());
            }

            let mut pending: FuturesUnordered<_> = input
                .iter()
                .enumerate()
                .map(|(index, element)| async move {
                    (index, self.inner.validate_async(element).await)
                })
                .collect();

            let mut failures = Vec::with_capacity(input.len());
            while let Some((index, result)) = pending.next().await {
                match result {
                    Ok(()) => return Ok(()),
                    Err(e) => failures.push((index, e)),
                }
            }

            failures.sort_by_key(|(index, _)| *index);
            failures
                .into_iter()
                .map(|(index, e)| element_failed(index, e))
                .collect::<ValidationErrors>()
                .into_result()
        }
    }
}

/// Validates every element of `values` concurrently.
///
/// # Errors
///
/// An aggregate of `element[i]: <err>` failures in index order.
pub async fn validate_all_parallel<V, T>(values: &[T], validator: &V) -> Result<(), ValidationError>
where
    V: AsyncValidate<Input = T>,
    T: Sync,
{
    EachParallel::new(validator).validate_async(values).await
}

/// Passes if any element of `values` passes.
///
/// # Errors
///
/// Fails on an empty slice, or with every element's failure when none pass.
pub async fn validate_any_parallel<V, T>(values: &[T], validator: &V) -> Result<(), ValidationError>
where
    V: AsyncValidate<Input = T>,
    T: Sync,
{
    AnyElementParallel::new(validator).validate_async(values).await
}
