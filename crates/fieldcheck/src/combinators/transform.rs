//! Transform combinators
//!
//! Adapt a validator of `U` to accept `T` through a mapping `T -> U`.
//! The element and map variants tag each failure with its index or key
//! and report all of them.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError, ValidationErrors};

fn transform_failed(reason: impl Display) -> ValidationError {
    ValidationError::new("transform_failed", format!("transform failed: {reason}"))
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Maps the input before validating it.
///
/// ```
/// use fieldcheck::combinators::transform;
/// use fieldcheck::prelude::*;
///
/// let trimmed = transform(|s: &str| s.trim().to_owned(), min_length(3));
/// assert!(trimmed.validate("  abc  ").is_ok());
/// assert!(trimmed.validate("  a  ").is_err());
/// ```
pub struct Transform<T: ?Sized, F, V> {
    map: F,
    validator: V,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, U, F, V> Validate for Transform<T, F, V>
where
    F: Fn(&T) -> U,
    U: Borrow<V::Input>,
    V: Validate,
{
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        let mapped = (self.map)(input);
        self.validator.validate(mapped.borrow())
    }
}

/// Maps the input with a fallible function before validating it.
pub struct TryTransform<T: ?Sized, F, V> {
    map: F,
    validator: V,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, U, E, F, V> Validate for TryTransform<T, F, V>
where
    F: Fn(&T) -> Result<U, E>,
    E: Display,
    V: Validate<Input = U>,
{
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        let mapped = (self.map)(input).map_err(transform_failed)?;
        self.validator.validate(&mapped)
    }
}

/// Like [`TryTransform`], but validates `default` when the mapping fails.
pub struct TransformOr<T: ?Sized, F, V, U> {
    map: F,
    validator: V,
    default: U,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, U, E, F, V> Validate for TransformOr<T, F, V, U>
where
    F: Fn(&T) -> Result<U, E>,
    V: Validate<Input = U>,
{
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        match (self.map)(input) {
            Ok(mapped) => self.validator.validate(&mapped),
            Err(_) => self.validator.validate(&self.default),
        }
    }
}

/// Validates the value `map` produces.
pub fn transform<T: ?Sized, U, F, V>(map: F, validator: V) -> Transform<T, F, V>
where
    F: Fn(&T) -> U,
{
    Transform {
        map,
        validator,
        _input: PhantomData,
    }
}

/// ```
/// use fieldcheck::combinators::try_transform;
/// use fieldcheck::prelude::*;
///
/// let port = try_transform(|s: &str| s.parse::<u16>(), min(1024_u16));
/// assert!(port.validate("8080").is_ok());
/// assert!(port.validate("80").is_err());
/// assert!(port.validate("http").unwrap_err().message.starts_with("transform failed"));
/// ```
pub fn try_transform<T: ?Sized, U, E, F, V>(map: F, validator: V) -> TryTransform<T, F, V>
where
    F: Fn(&T) -> Result<U, E>,
{
    TryTransform {
        map,
        validator,
        _input: PhantomData,
    }
}

/// Validates the mapped value, or `default` when `map` fails.
pub fn transform_or<T: ?Sized, U, E, F, V>(map: F, validator: V, default: U) -> TransformOr<T, F, V, U>
where
    F: Fn(&T) -> Result<U, E>,
{
    TransformOr {
        map,
        validator,
        default,
        _input: PhantomData,
    }
}

// ============================================================================
// PER-ELEMENT / PER-VALUE
// ============================================================================

/// Maps and validates every element of a slice, reporting failures as
/// `element[i]: ...`.
pub struct TransformEach<T, F, V> {
    map: F,
    validator: V,
    _input: PhantomData<fn(&T)>,
}

impl<T, U, F, V> Validate for TransformEach<T, F, V>
where
    F: Fn(&T) -> U,
    U: Borrow<V::Input>,
    V: Validate,
{
    type Input = [T];

    fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
        input
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                self.validator
                    .validate((self.map)(element).borrow())
                    .err()
                    .map(|e| e.with_context(format_args!("element[{index}]")))
            })
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// Maps and validates every value of a map, reporting failures as
/// `key[k]: ...` in ascending key order.
pub struct TransformValues<K, T, F, V> {
    map: F,
    validator: V,
    _input: PhantomData<fn(&K, &T)>,
}

impl<K, T, U, F, V> Validate for TransformValues<K, T, F, V>
where
    K: Eq + Hash + Ord + Display,
    F: Fn(&T) -> U,
    U: Borrow<V::Input>,
    V: Validate,
{
    type Input = HashMap<K, T>;

    fn validate(&self, input: &HashMap<K, T>) -> Result<(), ValidationError> {
        let mut failures: Vec<(&K, ValidationError)> = input
            .iter()
            .filter_map(|(key, value)| {
                self.validator
                    .validate((self.map)(value).borrow())
                    .err()
                    .map(|e| (key, e))
            })
            .collect();
        failures.sort_by(|(a, _), (b, _)| a.cmp(b));

        failures
            .into_iter()
            .map(|(key, e)| e.with_context(format_args!("key[{key}]")))
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// Maps and validates every element of a slice.
pub fn transform_each<T, U, F, V>(map: F, validator: V) -> TransformEach<T, F, V>
where
    F: Fn(&T) -> U,
{
    TransformEach {
        map,
        validator,
        _input: PhantomData,
    }
}

/// Maps and validates every value of a map.
pub fn transform_values<K, T, U, F, V>(map: F, validator: V) -> TransformValues<K, T, F, V>
where
    F: Fn(&T) -> U,
{
    TransformValues {
        map,
        validator,
        _input: PhantomData,
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// Validates only the elements matching `keep`; the rest are skipped.
pub struct Filter<T, P, V> {
    keep: P,
    validator: V,
    _input: PhantomData<fn(&T)>,
}

impl<T, P, V> Validate for Filter<T, P, V>
where
    P: Fn(&T) -> bool,
    V: Validate<Input = T>,
{
    type Input = [T];

    fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
        input
            .iter()
            .enumerate()
            .filter(|(_, element)| (self.keep)(element))
            .filter_map(|(index, element)| {
                self.validator
                    .validate(element)
                    .err()
                    .map(|e| e.with_context(format_args!("element[{index}]")))
            })
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// Validates only the elements `keep` accepts.
pub fn filter<T, P, V>(keep: P, validator: V) -> Filter<T, P, V>
where
    P: Fn(&T) -> bool,
{
    Filter {
        keep,
        validator,
        _input: PhantomData,
    }
}
