//! Closure adapters for the [`Validate`] contract.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

/// A validator backed by a closure returning `Result`.
///
/// ```
/// use fieldcheck::foundation::{from_fn, Validate, ValidationError};
///
/// let even = from_fn(|n: &i32| {
///     if n % 2 == 0 {
///         Ok(())
///     } else {
///         Err(ValidationError::new("even", "value must be even"))
///     }
/// });
///
/// assert!(even.validate(&2).is_ok());
/// assert!(even.validate(&3).is_err());
/// ```
pub struct FnValidator<T: ?Sized, F> {
    f: F,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> FnValidator<T, F>
where
    F: Fn(&T) -> Result<(), ValidationError>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _input: PhantomData,
        }
    }
}

impl<T: ?Sized, F> Validate for FnValidator<T, F>
where
    F: Fn(&T) -> Result<(), ValidationError>,
{
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        (self.f)(input)
    }
}

impl<T: ?Sized, F: Clone> Clone for FnValidator<T, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _input: PhantomData,
        }
    }
}

impl<T: ?Sized, F> fmt::Debug for FnValidator<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

/// Wraps a closure returning `Result` into a validator.
pub fn from_fn<T: ?Sized, F>(f: F) -> FnValidator<T, F>
where
    F: Fn(&T) -> Result<(), ValidationError>,
{
    FnValidator::new(f)
}

/// A validator backed by a boolean predicate and a fixed failure message.
pub struct Predicate<T: ?Sized, F> {
    f: F,
    message: Cow<'static, str>,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> Validate for Predicate<T, F>
where
    F: Fn(&T) -> bool,
{
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if (self.f)(input) {
            Ok(())
        } else {
            Err(ValidationError::new("predicate", self.message.clone()))
        }
    }
}

impl<T: ?Sized, F> fmt::Debug for Predicate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Wraps a boolean predicate into a validator failing with `message`.
///
/// ```
/// use fieldcheck::foundation::{predicate, Validate};
///
/// let lowercase = predicate(|s: &str| s.chars().all(char::is_lowercase), "must be lowercase");
/// assert!(lowercase.validate("abc").is_ok());
/// assert_eq!(lowercase.validate("Abc").unwrap_err().message, "must be lowercase");
/// ```
pub fn predicate<T: ?Sized, F>(f: F, message: impl Into<Cow<'static, str>>) -> Predicate<T, F>
where
    F: Fn(&T) -> bool,
{
    Predicate {
        f,
        message: message.into(),
        _input: PhantomData,
    }
}
