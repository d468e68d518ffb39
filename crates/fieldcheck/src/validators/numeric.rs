//! Numeric bounds and sign checks.
//!
//! Every rule here is generic over any `PartialOrd + Display` value, so the
//! same rule covers integers, floats and ordered domain types.

use std::fmt::Display;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

crate::rule! {
    /// Rejects values below `min`.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Min<T: PartialOrd + Display> { min: T } for T;
    check(self, input) { *input >= self.min }
    fail(self, input) {
        ValidationError::new("min", format!("value is too small, must be at least {}", self.min))
            .with_param("min", self.min.to_string())
            .with_param("actual", input.to_string())
    }
    fn min(min: T);
}

crate::rule! {
    /// Rejects values above `max`.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Max<T: PartialOrd + Display> { max: T } for T;
    check(self, input) { *input <= self.max }
    fail(self, input) {
        ValidationError::new("max", format!("value is too big, must be at most {}", self.max))
            .with_param("max", self.max.to_string())
            .with_param("actual", input.to_string())
    }
    fn max(max: T);
}

crate::rule! {
    /// Accepts values in `min..=max`.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub InRange<T: PartialOrd + Display> { min: T, max: T } for T;
    check(self, input) { *input >= self.min && *input <= self.max }
    fail(self, input) { ValidationError::out_of_range(&self.min, &self.max, input) }
    fn in_range(min: T, max: T);
}

// ============================================================================
// SIGN
// ============================================================================

/// Accepts values strictly greater than `T::default()` (zero for numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Positive<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T: PartialOrd + Default + Display> Validate for Positive<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input > T::default() {
            Ok(())
        } else {
            Err(ValidationError::new("positive", "value must be positive")
                .with_param("actual", input.to_string()))
        }
    }
}

/// Accepts values strictly less than `T::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Negative<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T: PartialOrd + Default + Display> Validate for Negative<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input < T::default() {
            Ok(())
        } else {
            Err(ValidationError::new("negative", "value must be negative")
                .with_param("actual", input.to_string()))
        }
    }
}

/// Strictly greater than zero.
#[must_use]
pub const fn positive<T>() -> Positive<T> {
    Positive {
        _marker: PhantomData,
    }
}

/// Strictly less than zero.
#[must_use]
pub const fn negative<T>() -> Negative<T> {
    Negative {
        _marker: PhantomData,
    }
}
