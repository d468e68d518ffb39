//! Slice and map rules.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// SLICES
// ============================================================================

/// At least `min` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinSize<T> {
    pub min: usize,
    _marker: PhantomData<fn(&T)>,
}

/// At most `max` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxSize<T> {
    pub max: usize,
    _marker: PhantomData<fn(&T)>,
}

impl<T> Validate for MinSize<T> {
    type Input = [T];

    fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
        if input.len() >= self.min {
            return Ok(());
        }
        Err(ValidationError::new(
            "min_size",
            format!("must have at least {} elements, got {}", self.min, input.len()),
        )
        .with_param("min", self.min.to_string())
        .with_param("actual", input.len().to_string()))
    }
}

impl<T> Validate for MaxSize<T> {
    type Input = [T];

    fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
        if input.len() <= self.max {
            return Ok(());
        }
        Err(ValidationError::new(
            "max_size",
            format!("must have at most {} elements, got {}", self.max, input.len()),
        )
        .with_param("max", self.max.to_string())
        .with_param("actual", input.len().to_string()))
    }
}

crate::rule! {
    pub NotEmptySlice<T> for [T];
    check(input) { !input.is_empty() }
    fail(input) { ValidationError::new("not_empty", "must not be empty") }
    fn not_empty_slice();
}

crate::rule! {
    /// The slice must have no elements.
    pub EmptySlice<T> for [T];
    check(input) { input.is_empty() }
    fail(input) {
        ValidationError::new("empty", "must be empty").with_param("actual", input.len().to_string())
    }
    fn empty_slice();
}

/// At least `min` elements.
#[must_use]
pub const fn min_size<T>(min: usize) -> MinSize<T> {
    MinSize {
        min,
        _marker: PhantomData,
    }
}

/// At most `max` elements.
#[must_use]
pub const fn max_size<T>(max: usize) -> MaxSize<T> {
    MaxSize {
        max,
        _marker: PhantomData,
    }
}

crate::rule! {
    /// The slice must contain `element`.
    pub ContainsElement<T: PartialEq + Display> { element: T } for [T];
    check(self, input) { input.contains(&self.element) }
    fail(self, input) {
        ValidationError::new("contains_element", format!("must contain {}", self.element))
            .with_param("element", self.element.to_string())
    }
    fn contains_element(element: T);
}

/// Every element must be distinct. Reports the index of each repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Unique<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T: Eq + Hash> Validate for Unique<T> {
    type Input = [T];

    fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(input.len());
        let duplicates: Vec<String> = input
            .iter()
            .enumerate()
            .filter(|(_, element)| !seen.insert(*element))
            .map(|(index, _)| index.to_string())
            .collect();

        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new("unique", "elements must be unique")
                .with_param("duplicates", duplicates.join(",")))
        }
    }
}

/// No repeated elements.
#[must_use]
pub const fn unique<T>() -> Unique<T> {
    Unique {
        _marker: PhantomData,
    }
}

// ============================================================================
// MAPS
// ============================================================================

/// At least `min` entries.
pub struct MinEntries<K, V> {
    min: usize,
    _marker: PhantomData<fn(&K, &V)>,
}

/// At most `max` entries.
pub struct MaxEntries<K, V> {
    max: usize,
    _marker: PhantomData<fn(&K, &V)>,
}

impl<K, V> Validate for MinEntries<K, V> {
    type Input = HashMap<K, V>;

    fn validate(&self, input: &HashMap<K, V>) -> Result<(), ValidationError> {
        if input.len() >= self.min {
            Ok(())
        } else {
            Err(ValidationError::new(
                "min_entries",
                format!("must have at least {} entries, got {}", self.min, input.len()),
            )
            .with_param("min", self.min.to_string()))
        }
    }
}

impl<K, V> Validate for MaxEntries<K, V> {
    type Input = HashMap<K, V>;

    fn validate(&self, input: &HashMap<K, V>) -> Result<(), ValidationError> {
        if input.len() <= self.max {
            Ok(())
        } else {
            Err(ValidationError::new(
                "max_entries",
                format!("must have at most {} entries, got {}", self.max, input.len()),
            )
            .with_param("max", self.max.to_string()))
        }
    }
}

impl<K, V> fmt::Debug for MinEntries<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinEntries").field("min", &self.min).finish()
    }
}

impl<K, V> fmt::Debug for MaxEntries<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaxEntries").field("max", &self.max).finish()
    }
}

/// At least `min` entries.
#[must_use]
pub fn min_entries<K, V>(min: usize) -> MinEntries<K, V> {
    MinEntries {
        min,
        _marker: PhantomData,
    }
}

/// At most `max` entries.
#[must_use]
pub fn max_entries<K, V>(max: usize) -> MaxEntries<K, V> {
    MaxEntries {
        max,
        _marker: PhantomData,
    }
}

/// The map must have no entries.
pub struct NoEntries<K, V> {
    _marker: PhantomData<fn(&K, &V)>,
}

impl<K, V> Validate for NoEntries<K, V> {
    type Input = HashMap<K, V>;

    fn validate(&self, input: &HashMap<K, V>) -> Result<(), ValidationError> {
        if input.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new("empty", "must be empty")
                .with_param("actual", input.len().to_string()))
        }
    }
}

impl<K, V> fmt::Debug for NoEntries<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NoEntries")
    }
}

/// The map must be empty.
#[must_use]
pub const fn no_entries<K, V>() -> NoEntries<K, V> {
    NoEntries {
        _marker: PhantomData,
    }
}

/// The map must contain `key`.
#[derive(Debug, Clone)]
pub struct HasKey<K, V> {
    key: K,
    _marker: PhantomData<fn(&V)>,
}

/// The map must not contain `key`.
#[derive(Debug, Clone)]
pub struct NoKey<K, V> {
    key: K,
    _marker: PhantomData<fn(&V)>,
}

impl<K: Eq + Hash + Display, V> Validate for HasKey<K, V> {
    type Input = HashMap<K, V>;

    fn validate(&self, input: &HashMap<K, V>) -> Result<(), ValidationError> {
        if input.contains_key(&self.key) {
            Ok(())
        } else {
            Err(ValidationError::new("has_key", format!("missing key '{}'", self.key))
                .with_param("key", self.key.to_string()))
        }
    }
}

impl<K: Eq + Hash + Display, V> Validate for NoKey<K, V> {
    type Input = HashMap<K, V>;

    fn validate(&self, input: &HashMap<K, V>) -> Result<(), ValidationError> {
        if input.contains_key(&self.key) {
            Err(ValidationError::new("no_key", format!("key '{}' is not allowed", self.key))
                .with_param("key", self.key.to_string()))
        } else {
            Ok(())
        }
    }
}

/// The map must contain `key`.
pub fn has_key<K, V>(key: impl Into<K>) -> HasKey<K, V> {
    HasKey {
        key: key.into(),
        _marker: PhantomData,
    }
}

/// The map must not contain `key`.
pub fn no_key<K, V>(key: impl Into<K>) -> NoKey<K, V> {
    NoKey {
        key: key.into(),
        _marker: PhantomData,
    }
}
