//! Memoizing combinators
//!
//! [`Cached`] keeps every result until it is removed or cleared.
//! [`TtlCached`] attaches a time-to-live and, depending on its
//! [`TtlMode`], either only records it or actually expires entries.
//!
//! Both caches are per instance and safe to share across threads; a
//! concurrent miss on the same key may run the inner validator twice,
//! the last write wins.

use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use dashmap::DashMap;
use tracing::trace;

pub use crate::config::TtlMode;
use crate::config::CacheConfig;
use crate::foundation::{Validate, ValidationError};

type CachedResult = Result<(), ValidationError>;

type Key<V> = <<V as Validate>::Input as ToOwned>::Owned;

// ============================================================================
// PERMANENT CACHE
// ============================================================================

/// Caches validation results per input value.
///
/// ```
/// use fieldcheck::prelude::*;
///
/// let cached = min_length(3).cached();
/// assert!(cached.validate("ab").is_err());
/// assert!(cached.validate("abc").is_ok());
/// assert_eq!(cached.cache_size(), 2);
///
/// cached.remove_from_cache("ab");
/// assert_eq!(cached.cache_size(), 1);
/// ```
pub struct Cached<V>
where
    V: Validate,
    V::Input: ToOwned,
{
    validator: V,
    cache: DashMap<Key<V>, CachedResult>,
}

impl<V> Cached<V>
where
    V: Validate,
    V::Input: ToOwned + Hash + Eq,
    Key<V>: Hash + Eq,
{
    /// Wraps `validator` with an empty, unbounded cache.
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            cache: DashMap::new(),
        }
    }

    /// Pre-sizes the map for `capacity` entries. The cache is still
    /// unbounded.
    pub fn with_capacity(validator: V, capacity: usize) -> Self {
        Self {
            validator,
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn from_config(validator: V, config: &CacheConfig) -> Self {
        Self::with_capacity(validator, usize::try_from(config.capacity).unwrap_or(usize::MAX))
    }

    /// The wrapped validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Number of cached inputs.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drops the cached result for `input`, if any.
    pub fn remove_from_cache(&self, input: &V::Input) {
        self.cache.remove(input);
    }
}

impl<V> Validate for Cached<V>
where
    V: Validate,
    V::Input: ToOwned + Hash + Eq,
    Key<V>: Hash + Eq,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if let Some(hit) = self.cache.get(input) {
            trace!("validation cache hit");
            return hit.value().clone();
        }

        trace!("validation cache miss");
        let result = self.validator.validate(input);
        self.cache.insert(input.to_owned(), result.clone());
        result
    }
}

impl<V> fmt::Debug for Cached<V>
where
    V: Validate + fmt::Debug,
    V::Input: ToOwned,
    Key<V>: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached")
            .field("validator", &self.validator)
            .field("entries", &self.cache.len())
            .finish()
    }
}

// ============================================================================
// TTL CACHE
// ============================================================================

enum Store<K> {
    Legacy(DashMap<K, CachedResult>),
    Expiring(moka::sync::Cache<K, CachedResult>),
}

/// Caches validation results with a time-to-live.
///
/// - [`TtlMode::Legacy`] stores the ttl but never expires an entry; a
///   zero ttl disables caching.
/// - [`TtlMode::Expiring`] evicts entries once `ttl` has elapsed since
///   they were written.
pub struct TtlCached<V>
where
    V: Validate,
    V::Input: ToOwned,
{
    validator: V,
    ttl: Duration,
    store: Store<Key<V>>,
}

impl<V> TtlCached<V>
where
    V: Validate,
    V::Input: ToOwned + Hash + Eq,
    Key<V>: Hash + Eq + Send + Sync + 'static,
{
    /// Wraps `validator` with a cache tagged with `ttl`; see [`TtlMode`] for expiry.
    pub fn new(validator: V, ttl: Duration, mode: TtlMode) -> Self {
        Self::build(validator, ttl, mode, None)
    }

    /// Builds from a [`CacheConfig`]; `capacity` bounds the expiring store.
    pub fn from_config(validator: V, config: &CacheConfig) -> Self {
        Self::build(validator, config.ttl, config.mode, Some(config.capacity))
    }

    fn build(validator: V, ttl: Duration, mode: TtlMode, capacity: Option<u64>) -> Self {
        let store = match mode {
            TtlMode::Legacy => Store::Legacy(DashMap::new()),
            TtlMode::Expiring => {
                let mut builder = moka::sync::Cache::builder();
                if !ttl.is_zero() {
                    builder = builder.time_to_live(ttl);
                }
                if let Some(capacity) = capacity {
                    builder = builder.max_capacity(capacity);
                }
                Store::Expiring(builder.build())
            }
        };
        Self {
            validator,
            ttl,
            store,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether entries actually expire.
    pub fn mode(&self) -> TtlMode {
        match self.store {
            Store::Legacy(_) => TtlMode::Legacy,
            Store::Expiring(_) => TtlMode::Expiring,
        }
    }

    /// Number of live entries.
    pub fn cache_size(&self) -> usize {
        match &self.store {
            Store::Legacy(map) => map.len(),
            Store::Expiring(cache) => {
                cache.run_pending_tasks();
                usize::try_from(cache.entry_count()).unwrap_or(usize::MAX)
            }
        }
    }

    /// Drops every cached result.
    pub fn clear_cache(&self) {
        match &self.store {
            Store::Legacy(map) => map.clear(),
            Store::Expiring(cache) => {
                cache.invalidate_all();
                cache.run_pending_tasks();
            }
        }
    }

    /// Forgets the cached result for `input`, if any.
    pub fn remove_from_cache(&self, input: &V::Input) {
        match &self.store {
            Store::Legacy(map) => {
                map.remove(input);
            }
            Store::Expiring(cache) => cache.invalidate(input),
        }
    }

    fn lookup(&self, input: &V::Input) -> Option<CachedResult> {
        match &self.store {
            Store::Legacy(map) => map.get(input).map(|hit| hit.value().clone()),
            Store::Expiring(cache) => cache.get(input),
        }
    }

    fn store(&self, input: &V::Input, result: CachedResult) {
        match &self.store {
            Store::Legacy(map) => {
                map.insert(input.to_owned(), result);
            }
            Store::Expiring(cache) => cache.insert(input.to_owned(), result),
        }
    }
}

impl<V> Validate for TtlCached<V>
where
    V: Validate,
    V::Input: ToOwned + Hash + Eq,
    Key<V>: Hash + Eq + Send + Sync + 'static,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.ttl.is_zero() {
            return self.validator.validate(input);
        }

        if let Some(hit) = self.lookup(input) {
            trace!(ttl = ?self.ttl, "validation cache hit");
            return hit;
        }

        trace!(ttl = ?self.ttl, "validation cache miss");
        let result = self.validator.validate(input);
        self.store(input, result.clone());
        result
    }
}

impl<V> fmt::Debug for TtlCached<V>
where
    V: Validate + fmt::Debug,
    V::Input: ToOwned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.store {
            Store::Legacy(_) => TtlMode::Legacy,
            Store::Expiring(_) => TtlMode::Expiring,
        };
        f.debug_struct("TtlCached")
            .field("validator", &self.validator)
            .field("ttl", &self.ttl)
            .field("mode", &mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ValidateExt, from_fn};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(calls: Arc<AtomicUsize>) -> impl Validate<Input = str> {
        from_fn(move |s: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            if s.len() >= 3 {
                Ok(())
            } else {
                Err(ValidationError::min_length(3, s.len()))
            }
        })
    }

    #[test]
    fn second_call_hits_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = counting(calls.clone()).cached();

        assert!(validator.validate("hello").is_ok());
        assert!(validator.validate("hello").is_ok());
        assert!(validator.validate("hi").is_err());
        assert!(validator.validate("hi").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn remove_and_clear_force_revalidation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = counting(calls.clone()).cached();

        validator.validate("hello").unwrap();
        validator.validate("world").unwrap();
        validator.remove_from_cache("hello");
        assert_eq!(validator.cache_size(), 1);

        validator.validate("hello").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        validator.clear_cache();
        assert_eq!(validator.cache_size(), 0);
        validator.validate("world").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn debug_reports_entry_count() {
        let validator = crate::validators::min_length(3).cached();
        validator.validate("abc").unwrap();
        validator.validate("ab").unwrap_err();

        let rendered = format!("{validator:?}");
        assert!(rendered.starts_with("Cached"), "{rendered}");
        assert!(rendered.contains("entries: 2"), "{rendered}");
    }

    #[test]
    fn legacy_mode_never_expires() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = counting(calls.clone()).cached_with_ttl(Duration::from_millis(1), TtlMode::Legacy);

        validator.validate("hello").unwrap();
        std::thread::sleep(Duration::from_millis(5));
        validator.validate("hello").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_ttl_bypasses_cache() {
        for mode in [TtlMode::Legacy, TtlMode::Expiring] {
            let calls = Arc::new(AtomicUsize::new(0));
            let validator = counting(calls.clone()).cached_with_ttl(Duration::ZERO, mode);

            validator.validate("hello").unwrap();
            validator.validate("hello").unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), 2);
            assert_eq!(validator.cache_size(), 0);
        }
    }

    #[test]
    fn expiring_mode_evicts_after_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator =
            counting(calls.clone()).cached_with_ttl(Duration::from_millis(20), TtlMode::Expiring);

        validator.validate("hello").unwrap();
        validator.validate("hello").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        std::thread::sleep(Duration::from_millis(60));
        validator.validate("hello").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn from_config_uses_mode_and_ttl() {
        let config = CacheConfig {
            capacity: 10,
            ttl: Duration::from_secs(30),
            mode: TtlMode::Expiring,
        };
        let validator = TtlCached::from_config(counting(Arc::new(AtomicUsize::new(0))), &config);
        assert_eq!(validator.mode(), TtlMode::Expiring);
        assert_eq!(validator.ttl(), Duration::from_secs(30));
    }

    #[test]
    fn shared_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = Arc::new(counting(calls.clone()).cached());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let validator = Arc::clone(&validator);
                scope.spawn(move || {
                    for word in ["alpha", "be", "gamma"] {
                        let _ = validator.validate(word);
                    }
                });
            }
        });

        assert_eq!(validator.cache_size(), 3);
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }
}
