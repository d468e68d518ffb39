//! Voting across several validators of the same input.
//!
//! Every variant runs the whole list (except [`Aggregate`], which stops
//! at the first success) and tags each failure with the index of the
//! validator that produced it.

use crate::combinators::logic::no_validators;
use crate::foundation::{BuildError, Validate, ValidationError, ValidationErrors};

/// Success rate required by [`AggregateWeighted`].
pub const WEIGHTED_THRESHOLD: f64 = 0.5;

fn tagged(index: usize, error: ValidationError) -> ValidationError {
    error.with_context(format_args!("validator[{index}]"))
}

fn below_threshold(rate: f64, threshold: f64, failures: ValidationErrors) -> ValidationError {
    let error = if failures.has_errors() {
        failures.into_error()
    } else {
        ValidationError::new(
            "threshold_not_met",
            format!("success rate {rate:.2} is below threshold {threshold:.2}"),
        )
    };
    error
        .with_param("success_rate", format!("{rate:.2}"))
        .with_param("threshold", format!("{threshold:.2}"))
}

// ============================================================================
// AGGREGATE
// ============================================================================

/// Passes as soon as one validator passes. On total failure every
/// failure is reported as `validator[i]: <err>`.
#[derive(Debug, Clone)]
pub struct Aggregate<V> {
    validators: Vec<V>,
}

impl<V> Aggregate<V> {
    pub fn new(validators: Vec<V>) -> Self {
        Self { validators }
    }
}

impl<V: Validate> Validate for Aggregate<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.validators.is_empty() {
            return Err(no_validators());
        }
        let mut errors = ValidationErrors::new();
        for (index, validator) in self.validators.iter().enumerate() {
            match validator.validate(input) {
                Ok(()) => return Ok(()),
                Err(e) => errors.add(tagged(index, e)),
            }
        }
        errors.into_result()
    }
}

/// Passes as soon as one validator passes.
pub fn aggregate<V>(validators: Vec<V>) -> Aggregate<V> {
    Aggregate::new(validators)
}

// ============================================================================
// WEIGHTED
// ============================================================================

/// A validator paired with its vote weight.
#[derive(Debug, Clone, Copy)]
pub struct Weighted<V> {
    pub validator: V,
    pub weight: f64,
}

/// Pairs a validator with its vote weight.
pub fn weighted<V>(validator: V, weight: f64) -> Weighted<V> {
    Weighted { validator, weight }
}

/// Passes when the weight of the passing validators is at least half of
/// the total weight. A total weight of zero never passes.
///
/// ```
/// use fieldcheck::combinators::{AggregateWeighted, weighted};
/// use fieldcheck::prelude::*;
///
/// let vote = AggregateWeighted::new(vec![
///     weighted(min(0).boxed(), 3.0),
///     weighted(max(10).boxed(), 1.0),
/// ]);
/// // 3 of 4 passes.
/// assert!(vote.validate(&20).is_ok());
/// // 1 of 4 fails.
/// let error = vote.validate(&-1).unwrap_err();
/// assert_eq!(
///     error.messages(),
///     vec!["validator[0, weight=3.00]: value is too small, must be at least 0"],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AggregateWeighted<V> {
    validators: Vec<Weighted<V>>,
}

impl<V> AggregateWeighted<V> {
    pub fn new(validators: Vec<Weighted<V>>) -> Self {
        Self { validators }
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.validators.iter().map(|w| w.weight).sum()
    }
}

impl<V: Validate> Validate for AggregateWeighted<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let total = self.total_weight();
        if total <= 0.0 {
            return Err(ValidationError::new(
                "no_weight",
                "total weight must be greater than zero",
            ));
        }

        let mut passed = 0.0;
        let mut failures = ValidationErrors::new();
        for (index, Weighted { validator, weight }) in self.validators.iter().enumerate() {
            match validator.validate(input) {
                Ok(()) => passed += weight,
                Err(e) => failures.add(
                    e.with_context(format_args!("validator[{index}, weight={weight:.2}]")),
                ),
            }
        }

        let rate = passed / total;
        if rate >= WEIGHTED_THRESHOLD {
            Ok(())
        } else {
            Err(below_threshold(rate, WEIGHTED_THRESHOLD, failures))
        }
    }
}

// ============================================================================
// THRESHOLD
// ============================================================================

/// Passes when the share of passing validators reaches `threshold`.
#[derive(Debug, Clone)]
pub struct AggregateThreshold<V> {
    validators: Vec<V>,
    threshold: f64,
}

impl<V> AggregateThreshold<V> {
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidThreshold`] unless `threshold` is in
    /// `[0, 1]`.
    pub fn new(validators: Vec<V>, threshold: f64) -> Result<Self, BuildError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(BuildError::InvalidThreshold(threshold));
        }
        Ok(Self {
            validators,
            threshold,
        })
    }

    /// Minimum passing share, between 0 and 1.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl<V: Validate> Validate for AggregateThreshold<V> {
    type Input = V::Input;

    #[allow(clippy::cast_precision_loss)]
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let failures: ValidationErrors = self
            .validators
            .iter()
            .enumerate()
            .filter_map(|(index, v)| v.validate(input).err().map(|e| tagged(index, e)))
            .collect();

        let total = self.validators.len();
        let rate = if total == 0 {
            0.0
        } else {
            (total - failures.len()) as f64 / total as f64
        };

        if rate >= self.threshold {
            Ok(())
        } else {
            Err(below_threshold(rate, self.threshold, failures))
        }
    }
}

/// Passes when the passing share reaches `threshold`, which must lie in
/// `0.0..=1.0`.
pub fn aggregate_threshold<V>(
    validators: Vec<V>,
    threshold: f64,
) -> Result<AggregateThreshold<V>, BuildError> {
    AggregateThreshold::new(validators, threshold)
}

// ============================================================================
// CUSTOM REDUCER
// ============================================================================

/// Runs every validator and hands the ordered, tagged failures to a
/// reducer that makes the final decision.
pub struct AggregateWith<V, R> {
    validators: Vec<V>,
    reducer: R,
}

impl<V, R> AggregateWith<V, R> {
    pub fn new(validators: Vec<V>, reducer: R) -> Self {
        Self {
            validators,
            reducer,
        }
    }
}

impl<V, R> Validate for AggregateWith<V, R>
where
    V: Validate,
    R: Fn(&[ValidationError]) -> Result<(), ValidationError>,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let failures: Vec<ValidationError> = self
            .validators
            .iter()
            .enumerate()
            .filter_map(|(index, v)| v.validate(input).err().map(|e| tagged(index, e)))
            .collect();
        (self.reducer)(&failures)
    }
}

/// Hands the tagged failures to `reducer`, which decides the outcome.
pub fn aggregate_with<V, R>(validators: Vec<V>, reducer: R) -> AggregateWith<V, R>
where
    R: Fn(&[ValidationError]) -> Result<(), ValidationError>,
{
    AggregateWith::new(validators, reducer)
}
