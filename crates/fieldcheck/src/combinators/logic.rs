//! Logical combinators
//!
//! Binary `And` / `Or` short-circuit and return a single child failure.
//! The list forms `AllOf` / `AnyOf` / `NoneOf` report every relevant
//! child failure as one aggregate.

use crate::foundation::{Validate, ValidationError, ValidationErrors};

// ============================================================================
// AND / OR
// ============================================================================

/// Both validators must pass; the first failure is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Splits into the left and right validators.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.left.validate(input)?;
        self.right.validate(input)
    }
}

/// At least one validator must pass. If both fail, both failures are
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Splits into the left and right validators.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Validate for Or<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let Err(left) = self.left.validate(input) else {
            return Ok(());
        };
        let Err(right) = self.right.validate(input) else {
            return Ok(());
        };
        Err([left, right].into_iter().collect::<ValidationErrors>().into_error())
    }
}

// ============================================================================
// NOT
// ============================================================================

/// Succeeds iff the inner validator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<V> {
    inner: V,
}

impl<V> Not<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// The negated validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Validate> Validate for Not<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        match self.inner.validate(input) {
            Ok(()) => Err(ValidationError::new("not", "validator should fail")),
            Err(_) => Ok(()),
        }
    }
}

/// Creates a NOT combinator.
pub fn not<V>(validator: V) -> Not<V> {
    Not::new(validator)
}

// ============================================================================
// ALL / ANY / NONE
// ============================================================================

/// Every validator must pass. All failures are reported, in order.
///
/// ```
/// use fieldcheck::combinators::all_of;
/// use fieldcheck::prelude::*;
///
/// let rules = all_of(vec![min_length(3).boxed(), contains("@").boxed()]);
/// let error = rules.validate("a").unwrap_err();
/// assert_eq!(error.messages().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllOf<V> {
    validators: Vec<V>,
}

impl<V> AllOf<V> {
    pub fn new(validators: Vec<V>) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &[V] {
        &self.validators
    }
}

impl<V: Validate> Validate for AllOf<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .filter_map(|v| v.validate(input).err())
            .collect::<ValidationErrors>()
            .into_result()
    }
}

/// At least one validator must pass. Stops at the first success; if all
/// fail, every failure is reported. An empty list never passes.
#[derive(Debug, Clone, Default)]
pub struct AnyOf<V> {
    validators: Vec<V>,
}

impl<V> AnyOf<V> {
    pub fn new(validators: Vec<V>) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &[V] {
        &self.validators
    }
}

impl<V: Validate> Validate for AnyOf<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.validators.is_empty() {
            return Err(no_validators());
        }
        let mut errors = ValidationErrors::new();
        for validator in &self.validators {
            match validator.validate(input) {
                Ok(()) => return Ok(()),
                Err(e) => errors.add(e),
            }
        }
        errors.into_result()
    }
}

/// Every validator must fail. Each one that passes is reported by index.
#[derive(Debug, Clone, Default)]
pub struct NoneOf<V> {
    validators: Vec<V>,
}

impl<V> NoneOf<V> {
    pub fn new(validators: Vec<V>) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &[V] {
        &self.validators
    }
}

impl<V: Validate> Validate for NoneOf<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .enumerate()
            .filter(|(_, v)| v.validate(input).is_ok())
            .map(|(index, _)| {
                ValidationError::new("none", format!("validator[{index}] should fail"))
                    .with_param("index", index.to_string())
            })
            .collect::<ValidationErrors>()
            .into_result()
    }
}

pub(crate) fn no_validators() -> ValidationError {
    ValidationError::new("no_validators", "no validators supplied")
}

/// Creates an ALL combinator.
pub fn all_of<V>(validators: Vec<V>) -> AllOf<V> {
    AllOf::new(validators)
}

/// Creates an ANY combinator.
pub fn any_of<V>(validators: Vec<V>) -> AnyOf<V> {
    AnyOf::new(validators)
}

/// Creates a NONE combinator.
pub fn none_of<V>(validators: Vec<V>) -> NoneOf<V> {
    NoneOf::new(validators)
}

// ============================================================================
// TESTS
// ============================================================================
