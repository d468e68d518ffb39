//! Wrappers that adjust how a single validator reports or what it accepts.

use std::borrow::Cow;

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// WITH MESSAGE
// ============================================================================

/// Replaces the failure message of a validator, keeping its code.
///
/// The original failure is kept as the only nested error.
///
/// ```
/// use fieldcheck::prelude::*;
///
/// let adult = min(18).with_message("you must be an adult");
/// let error = adult.validate(&16).unwrap_err();
/// assert_eq!(error.message, "you must be an adult");
/// assert_eq!(error.code, "min");
/// ```
#[derive(Debug, Clone)]
pub struct WithMessage<V> {
    inner: V,
    message: Cow<'static, str>,
}

impl<V> WithMessage<V> {
    /// Replaces the message of every failure from `inner` with `message`.
    pub fn new(inner: V, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }

    /// Returns the custom message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validate> Validate for WithMessage<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.inner.validate(input).map_err(|original| {
            ValidationError::new(original.code.clone(), self.message.clone())
                .with_nested_error(original)
        })
    }
}

/// Creates a WithMessage combinator.
pub fn with_message<V>(validator: V, message: impl Into<Cow<'static, str>>) -> WithMessage<V> {
    WithMessage::new(validator, message)
}

// ============================================================================
// NAMED
// ============================================================================

/// Tags every failure of the inner validator with a field name.
#[derive(Debug, Clone)]
pub struct Named<V> {
    inner: V,
    field: Cow<'static, str>,
}

impl<V> Named<V> {
    /// Reports failures from `inner` under `field`.
    pub fn new(inner: V, field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl<V: Validate> Validate for Named<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.inner
            .validate(input)
            .map_err(|error| error.with_field(self.field.clone()))
    }
}

// ============================================================================
// OPTIONAL
// ============================================================================

/// Accepts `None`; validates the contents of `Some`.
///
/// Pair with [`Required`](crate::validators::Required) when absence must be
/// rejected instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optional<V> {
    inner: V,
}

impl<V> Optional<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns the wrapped validator.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V, T> Validate for Optional<V>
where
    V: Validate<Input = T>,
{
    type Input = Option<T>;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        match input {
            None => Ok(()),
            Some(value) => self.inner.validate(value),
        }
    }
}

/// Skips `None` and validates the contained value otherwise.
pub fn optional<V>(validator: V) -> Optional<V> {
    Optional::new(validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateExt;
    use crate::validators::{max, min, min_length};

    #[test]
    fn message_override_keeps_code_and_original() {
        let error = min_length(5).with_message("too short").validate("abc").unwrap_err();
        assert_eq!(error.message, "too short");
        assert_eq!(error.code, "min_length");
        assert_eq!(error.nested[0].code, "min_length");
    }

    #[test]
    fn named_sets_field() {
        let error = max(10).named("quantity").validate(&11).unwrap_err();
        assert_eq!(error.field.as_deref(), Some("quantity"));
        assert!(error.to_string().starts_with("quantity: "));
    }

    #[test]
    fn optional_skips_none() {
        let validator = optional(min(3));
        assert!(validator.validate(&None).is_ok());
        assert!(validator.validate(&Some(5)).is_ok());
        assert!(validator.validate(&Some(1)).is_err());
    }
}
