//! Serializable settings for the stateful combinators.
//!
//! ```
//! use fieldcheck::config::ValidatorConfig;
//!
//! let config: ValidatorConfig = serde_json::from_str(r#"{
//!     "default_field": "payload",
//!     "cache": { "capacity": 500, "ttl": "2m", "mode": "expiring" },
//!     "retry": { "max_retries": 2, "initial_delay": "50ms", "backoff": true },
//!     "timeout": "250ms"
//! }"#).unwrap();
//!
//! assert!(config.check().is_ok());
//! assert_eq!(config.retry.max_retries, 2);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::{BuildError, DEFAULT_FIELD};

/// Whether a TTL cache actually expires its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtlMode {
    /// The ttl is recorded but entries never expire. A zero ttl disables
    /// caching.
    #[default]
    Legacy,
    /// Entries are evicted once the ttl has elapsed since insertion.
    Expiring,
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Field name used by
    /// [`validate_with_config`](crate::foundation::validate_with_config) and
    /// [`Chain::from_config`](crate::combinators::Chain::from_config).
    pub default_field: String,

    pub cache: CacheConfig,

    pub retry: RetryConfig,

    /// Timeout applied by [`Timeout::from_config`](crate::concurrent::Timeout).
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            default_field: DEFAULT_FIELD.to_owned(),
            cache: CacheConfig::default(),
            retry: RetryConfig::default(),
            timeout: None,
        }
    }
}

impl ValidatorConfig {
    /// Rejects settings no combinator can be built from.
    ///
    /// # Errors
    ///
    /// [`BuildError::Zero`] for a zero cache capacity or a zero timeout.
    pub fn check(&self) -> Result<(), BuildError> {
        if self.cache.capacity == 0 {
            return Err(BuildError::Zero("cache.capacity"));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(BuildError::Zero("timeout"));
        }
        Ok(())
    }
}

/// Cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Upper bound on entries for expiring caches; a sizing hint otherwise.
    pub capacity: u64,

    #[serde(with = "humantime_serde")]
    pub ttl: Duration,

    pub mode: TtlMode,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl: Duration::from_secs(300),
            mode: TtlMode::Legacy,
        }
    }
}

/// Retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,

    /// First backoff delay; doubled after every failed attempt.
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,

    /// Wait between attempts. Without backoff attempts run back to back.
    pub backoff: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            backoff: false,
        }
    }
}
