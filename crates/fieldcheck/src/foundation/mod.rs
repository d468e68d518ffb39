//! Core validation types, traits and entry points
//!
//! - **Traits**: [`Validate`], [`ValidateExt`], [`AsyncValidate`], [`Condition`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`BuildError`]
//! - **Entry points**: [`validate`], [`validate_field`], [`validate_with_config`],
//!   [`validate_first`], [`get`], [`get_ref`], [`get_json`]
//!
//! # Failure policies
//!
//! [`validate`] and [`validate_field`] run every validator and report every
//! failure under one field name, which is what form validation wants.
//! [`validate_first`] stops at the first failure and returns it unchanged.
//!
//! ```
//! use fieldcheck::foundation::{validate, validate_first};
//! use fieldcheck::validators::{max, min};
//!
//! let age: i32 = 17;
//! let error = validate(&age, &[&min(18), &max(30)]).unwrap_err();
//! assert_eq!(error.messages().len(), 1);
//! assert!(error.to_string().starts_with("field: value is too small"));
//!
//! assert!(validate_first(&25, &[&min(18), &max(30)]).is_ok());
//! ```

pub mod error;
pub mod func;
pub mod get;
pub mod traits;

use std::borrow::Cow;

pub use error::{
    AGGREGATE_CODE, BuildError, ErrorKind, MESSAGE_SEPARATOR, ValidationError, ValidationErrors,
};
pub use func::{FnValidator, Predicate, from_fn, predicate};
pub use get::{FromJson, get, get_json, get_ref};
#[cfg(feature = "async")]
pub use traits::AsyncValidate;
pub use traits::{BoxedValidator, Condition, SharedValidator, Validate, ValidateExt};

use crate::config::ValidatorConfig;

/// Field name used by [`validate`] when the caller does not name one.
pub const DEFAULT_FIELD: &str = "field";

/// Runs every validator and accumulates all failures under
/// [`DEFAULT_FIELD`].
pub fn validate<T: ?Sized>(
    value: &T,
    validators: &[&dyn Validate<Input = T>],
) -> Result<(), ValidationError> {
    validate_field(DEFAULT_FIELD, value, validators)
}

/// Runs every validator and accumulates all failures under `field`.
///
/// Succeeds iff every validator succeeds. Failures keep the order of
/// `validators`.
pub fn validate_field<T: ?Sized>(
    field: impl Into<Cow<'static, str>>,
    value: &T,
    validators: &[&dyn Validate<Input = T>],
) -> Result<(), ValidationError> {
    let mut errors = ValidationErrors::named(field);
    for validator in validators {
        if let Err(error) = validator.validate(value) {
            errors.add(error);
        }
    }
    errors.into_result()
}

/// Like [`validate`], but names the field after
/// [`ValidatorConfig::default_field`].
pub fn validate_with_config<T: ?Sized>(
    config: &ValidatorConfig,
    value: &T,
    validators: &[&dyn Validate<Input = T>],
) -> Result<(), ValidationError> {
    validate_field(config.default_field.clone(), value, validators)
}

/// Runs validators in order and returns the first failure unchanged.
pub fn validate_first<T: ?Sized>(
    value: &T,
    validators: &[&dyn Validate<Input = T>],
) -> Result<(), ValidationError> {
    validators
        .iter()
        .try_for_each(|validator| validator.validate(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{max, min, min_length};
    use pretty_assertions::assert_eq;

    #[test]
    fn accumulate_reports_only_failing_rules() {
        let age: i32 = 17;
        let error = validate(&age, &[&min(18), &max(30)]).unwrap_err();

        assert_eq!(error.field.as_deref(), Some(DEFAULT_FIELD));
        assert_eq!(error.nested.len(), 1);
        assert_eq!(error.nested[0].code, "min");
    }

    #[test]
    fn accumulate_keeps_validator_order() {
        let value: i32 = 50;
        let error = validate_field("score", &value, &[&max(10), &min(0), &max(20)]).unwrap_err();

        let codes: Vec<_> = error.nested.iter().map(|e| e.code.to_string()).collect();
        assert_eq!(codes, vec!["max", "max"]);
        assert_eq!(error.param("max"), None);
        assert_eq!(error.nested[1].param("max"), Some("20"));
    }

    #[test]
    fn configured_default_field_names_the_aggregate() {
        let config = ValidatorConfig {
            default_field: "payload".to_owned(),
            ..ValidatorConfig::default()
        };
        let error = validate_with_config(&config, "a", &[&min_length(2)]).unwrap_err();
        assert_eq!(error.field.as_deref(), Some("payload"));
        insta::assert_snapshot!(error, @"payload: length must be at least 2, got 1");

        let defaults = ValidatorConfig::default();
        let error = validate_with_config(&defaults, &5, &[&min(10)]).unwrap_err();
        assert_eq!(error.field.as_deref(), Some(DEFAULT_FIELD));
    }

    #[test]
    fn first_failure_returns_first_only() {
        let value: i32 = 50;
        let error = validate_first(&value, &[&min(100), &max(10)]).unwrap_err();
        assert_eq!(error.code, "min");
    }

    #[test]
    fn zero_validators_pass() {
        assert!(validate::<str>("anything", &[]).is_ok());
        assert!(validate_first::<str>("anything", &[]).is_ok());
    }

    #[test]
    fn unsized_input() {
        assert!(validate("abc", &[&min_length(2)]).is_ok());
        assert!(validate("a", &[&min_length(2)]).is_err());
    }
}
