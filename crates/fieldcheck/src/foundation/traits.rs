//! Core traits for the validation system
//!
//! [`Validate`] is the single-method contract every rule and combinator
//! implements. [`ValidateExt`] adds the fluent composition methods, and
//! [`AsyncValidate`] is the asynchronous counterpart used by the
//! concurrency wrappers.

use std::borrow::Cow;
use std::sync::Arc;

use crate::combinators::{And, Named, Not, Optional, Or, Unless, When, WithMessage};
use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait every validator implements.
///
/// A validator is immutable once built: `validate` takes `&self`, so one
/// instance can be shared across threads and calls.
///
/// # Examples
///
/// ```
/// use fieldcheck::foundation::{Validate, ValidationError};
///
/// struct Even;
///
/// impl Validate for Even {
///     type Input = i64;
///
///     fn validate(&self, input: &i64) -> Result<(), ValidationError> {
///         if input % 2 == 0 {
///             Ok(())
///         } else {
///             Err(ValidationError::new("even", "value must be even"))
///         }
///     }
/// }
///
/// assert!(Even.validate(&4).is_ok());
/// assert!(Even.validate(&3).is_err());
/// ```
pub trait Validate {
    /// The type being validated. May be unsized (`str`, `[T]`).
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

/// Type-erased, owned validator. Used wherever validators of different
/// concrete types share one list.
pub type BoxedValidator<T> = Box<dyn Validate<Input = T> + Send + Sync>;

/// Type-erased, shareable validator.
pub type SharedValidator<T> = Arc<dyn Validate<Input = T> + Send + Sync>;

// ============================================================================
// CONDITIONS
// ============================================================================

/// A condition evaluated when a conditional combinator runs.
///
/// Implemented for `bool` (a flag fixed at construction) and for any
/// `Fn(&T) -> bool` (a predicate over the value being validated).
pub trait Condition<T: ?Sized> {
    /// Returns true if the condition holds for `input`.
    fn holds(&self, input: &T) -> bool;
}

impl<T: ?Sized> Condition<T> for bool {
    fn holds(&self, _input: &T) -> bool {
        *self
    }
}

impl<T: ?Sized, F> Condition<T> for F
where
    F: Fn(&T) -> bool,
{
    fn holds(&self, input: &T) -> bool {
        self(input)
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Fluent composition methods, implemented for every [`Validate`].
///
/// ```
/// use fieldcheck::prelude::*;
///
/// let username = min_length(3).and(max_length(16)).named("username");
/// assert!(username.validate("alice").is_ok());
/// assert_eq!(
///     username.validate("al").unwrap_err().to_string(),
///     "username: length must be at least 3, got 2",
/// );
/// ```
pub trait ValidateExt: Validate + Sized {
    /// Both validators must pass. Stops at the first failure.
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }

    /// At least one validator must pass. Stops at the first success.
    fn or<V>(self, other: V) -> Or<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        Or::new(self, other)
    }

    /// Succeeds iff `self` fails.
    fn not(self) -> Not<Self> {
        Not::new(self)
    }

    /// Runs only while `condition` holds; succeeds otherwise.
    fn when<C>(self, condition: C) -> When<Self, C>
    where
        C: Condition<Self::Input>,
    {
        When::new(condition, self)
    }

    /// Runs only while `condition` does not hold; succeeds otherwise.
    fn unless<C>(self, condition: C) -> Unless<Self, C>
    where
        C: Condition<Self::Input>,
    {
        Unless::new(condition, self)
    }

    /// Accepts `None` and validates the contents of `Some`.
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Replaces the failure message.
    fn with_message(self, message: impl Into<Cow<'static, str>>) -> WithMessage<Self> {
        WithMessage::new(self, message)
    }

    /// Tags every failure with a field name.
    fn named(self, field: impl Into<Cow<'static, str>>) -> Named<Self> {
        Named::new(self, field)
    }

    /// Erases the concrete type.
    fn boxed(self) -> BoxedValidator<Self::Input>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }

    /// Erases the concrete type behind an `Arc`.
    fn shared(self) -> SharedValidator<Self::Input>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }

    /// Memoizes results per input value until explicitly cleared.
    #[cfg(feature = "caching")]
    fn cached(self) -> crate::combinators::Cached<Self>
    where
        Self::Input: ToOwned + std::hash::Hash + Eq,
        <Self::Input as ToOwned>::Owned: std::hash::Hash + Eq,
    {
        crate::combinators::Cached::new(self)
    }

    /// Memoizes results per input value with a time-to-live.
    #[cfg(feature = "caching")]
    fn cached_with_ttl(
        self,
        ttl: std::time::Duration,
        mode: crate::combinators::TtlMode,
    ) -> crate::combinators::TtlCached<Self>
    where
        Self::Input: ToOwned + std::hash::Hash + Eq,
        <Self::Input as ToOwned>::Owned: std::hash::Hash + Eq + Send + Sync + 'static,
    {
        crate::combinators::TtlCached::new(self, ttl, mode)
    }

    /// Lifts into [`AsyncValidate`], running on the polling task.
    #[cfg(feature = "async")]
    fn inline(self) -> crate::concurrent::Inline<Self> {
        crate::concurrent::Inline::new(self)
    }

    /// Lifts into [`AsyncValidate`], running on tokio's blocking pool.
    #[cfg(feature = "async")]
    fn blocking(self) -> crate::concurrent::Blocking<Self> {
        crate::concurrent::Blocking::new(self)
    }
}

impl<T: Validate> ValidateExt for T {}

// ============================================================================
// ASYNC VALIDATOR TRAIT
// ============================================================================

/// Asynchronous validation.
///
/// Dropping the returned future before it completes cancels the
/// validation at its next suspension point.
#[cfg(feature = "async")]
pub trait AsyncValidate: Send + Sync {
    /// The type being validated.
    type Input: ?Sized + Sync;

    /// Validates the input value.
    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send;
}

#[cfg(feature = "async")]
impl<V: AsyncValidate> AsyncValidate for &V {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        (**self).validate_async(input)
    }
}

#[cfg(feature = "async")]
impl<V: AsyncValidate> AsyncValidate for Arc<V> {
    type Input = V::Input;

    fn validate_async(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<(), ValidationError>> + Send {
        (**self).validate_async(input)
    }
}

// ============================================================================
// TESTS
// ============================================================================
