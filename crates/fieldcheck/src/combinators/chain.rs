//! Named, growable validator chain.

use std::borrow::Cow;
use std::fmt;

use crate::config::ValidatorConfig;
use crate::foundation::{BoxedValidator, Validate, ValidationError, ValidationErrors};

/// An ordered list of validators for one named field.
///
/// The chain owns its validators. It can be grown with [`add`](Self::add),
/// emptied with [`clear`](Self::clear) and reused.
///
/// - [`Validate::validate`] and [`validate_all_errors`](Self::validate_all_errors)
///   run every validator and report every failure under the field name.
/// - [`validate_first_error`](Self::validate_first_error) returns the first
///   failure, tagged with the field name.
///
/// ```
/// use fieldcheck::combinators::Chain;
/// use fieldcheck::prelude::*;
///
/// let mut chain = Chain::new("username");
/// chain.add(min_length(3)).add(max_length(8)).add(not_empty());
/// assert_eq!(chain.len(), 3);
///
/// let error = chain.validate("ab").unwrap_err();
/// assert_eq!(error.to_string(), "username: length must be at least 3, got 2");
/// ```
pub struct Chain<T: ?Sized> {
    field: Cow<'static, str>,
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> Chain<T> {
    /// Creates an empty chain for `field`.
    pub fn new(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            validators: Vec::new(),
        }
    }

    /// Creates an empty chain named after
    /// [`ValidatorConfig::default_field`].
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.default_field.clone())
    }

    /// Appends a validator.
    pub fn add<V>(&mut self, validator: V) -> &mut Self
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Appends a validator, consuming and returning the chain.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.add(validator);
        self
    }

    /// Removes every validator.
    pub fn clear(&mut self) -> &mut Self {
        self.validators.clear();
        self
    }

    /// Number of validators in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// The field name failures are reported under.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the first failure, tagged with the field name.
    pub fn validate_first_error(&self, input: &T) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .try_for_each(|v| v.validate(input))
            .map_err(|error| error.with_field(self.field.clone()))
    }

    /// Runs every validator and reports every failure.
    pub fn validate_all_errors(&self, input: &T) -> Result<(), ValidationError> {
        let mut errors = ValidationErrors::named(self.field.clone());
        errors.extend(self.validators.iter().filter_map(|v| v.validate(input).err()));
        errors.into_result()
    }
}

impl<T: ?Sized> Validate for Chain<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        self.validate_all_errors(input)
    }
}

impl<T: ?Sized> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("field", &self.field)
            .field("len", &self.validators.len())
            .finish()
    }
}
