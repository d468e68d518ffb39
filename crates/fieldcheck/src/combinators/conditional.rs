//! Conditional combinators: `When`, `Unless`, `IfElse`, `Switch`.
//!
//! Conditions are anything implementing [`Condition`]: a `bool` fixed at
//! construction or a predicate over the value being validated.

use crate::foundation::{BoxedValidator, Condition, Validate, ValidationError};

// ============================================================================
// WHEN / UNLESS
// ============================================================================

/// Runs the validator only while the condition holds; otherwise succeeds.
///
/// ```
/// use fieldcheck::combinators::when;
/// use fieldcheck::prelude::*;
///
/// assert!(when(false, min(10)).validate(&1).is_ok());
/// assert!(when(true, min(10)).validate(&1).is_err());
///
/// let only_long = min_length(8).when(|s: &str| s.starts_with("pw:"));
/// assert!(only_long.validate("short").is_ok());
/// assert!(only_long.validate("pw:abc").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct When<V, C> {
    condition: C,
    validator: V,
}

impl<V, C> When<V, C> {
    pub fn new(condition: C, validator: V) -> Self {
        Self {
            condition,
            validator,
        }
    }
}

impl<V, C> Validate for When<V, C>
where
    V: Validate,
    C: Condition<V::Input>,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.condition.holds(input) {
            self.validator.validate(input)
        } else {
            Ok(())
        }
    }
}

/// Runs the validator only while the condition does not hold.
#[derive(Debug, Clone, Copy)]
pub struct Unless<V, C> {
    condition: C,
    validator: V,
}

impl<V, C> Unless<V, C> {
    pub fn new(condition: C, validator: V) -> Self {
        Self {
            condition,
            validator,
        }
    }
}

impl<V, C> Validate for Unless<V, C>
where
    V: Validate,
    C: Condition<V::Input>,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.condition.holds(input) {
            Ok(())
        } else {
            self.validator.validate(input)
        }
    }
}

/// Runs `validator` only when `condition` holds.
pub fn when<V, C>(condition: C, validator: V) -> When<V, C> {
    When::new(condition, validator)
}

/// Runs `validator` only when `condition` does not hold.
pub fn unless<V, C>(condition: C, validator: V) -> Unless<V, C> {
    Unless::new(condition, validator)
}

// ============================================================================
// IF / ELSE
// ============================================================================

/// Runs exactly one branch: `then` if the condition holds, else
/// `otherwise`.
#[derive(Debug, Clone, Copy)]
pub struct IfElse<C, A, B> {
    condition: C,
    then: A,
    otherwise: B,
}

impl<C, A, B> IfElse<C, A, B> {
    pub fn new(condition: C, then: A, otherwise: B) -> Self {
        Self {
            condition,
            then,
            otherwise,
        }
    }
}

impl<C, A, B> Validate for IfElse<C, A, B>
where
    A: Validate,
    B: Validate<Input = A::Input>,
    C: Condition<A::Input>,
{
    type Input = A::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.condition.holds(input) {
            self.then.validate(input)
        } else {
            self.otherwise.validate(input)
        }
    }
}

/// Runs `then` when `condition` holds, otherwise `otherwise`.
pub fn if_else<C, A, B>(condition: C, then: A, otherwise: B) -> IfElse<C, A, B> {
    IfElse::new(condition, then, otherwise)
}

// ============================================================================
// SWITCH
// ============================================================================

type BoxedCondition<T> = Box<dyn Condition<T> + Send + Sync>;

/// Ordered case list: the first case whose condition holds runs; the
/// fallback runs if none match. With no match and no fallback, succeeds.
///
/// ```
/// use fieldcheck::combinators::Switch;
/// use fieldcheck::prelude::*;
///
/// let by_prefix = Switch::new()
///     .case(|s: &str| s.starts_with("id:"), min_length(10))
///     .case(|s: &str| s.starts_with("tag:"), max_length(8))
///     .otherwise(not_empty());
///
/// assert!(by_prefix.validate("id:1234567").is_ok());
/// assert!(by_prefix.validate("tag:too-long").is_err());
/// assert!(by_prefix.validate("").is_err());
/// ```
pub struct Switch<T: ?Sized> {
    cases: Vec<(BoxedCondition<T>, BoxedValidator<T>)>,
    fallback: Option<BoxedValidator<T>>,
}

impl<T: ?Sized> Switch<T> {
    /// Creates a switch with no cases and no fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            fallback: None,
        }
    }

    /// Appends a case. Cases are tried in insertion order.
    #[must_use = "builder methods must be chained or built"]
    pub fn case<C, V>(mut self, condition: C, validator: V) -> Self
    where
        C: Condition<T> + Send + Sync + 'static,
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.cases.push((Box::new(condition), Box::new(validator)));
        self
    }

    /// Sets the validator used when no case matches.
    #[must_use = "builder methods must be chained or built"]
    pub fn otherwise<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(validator));
        self
    }

    /// Number of cases, not counting the fallback.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<T: ?Sized> Default for Switch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Validate for Switch<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        let matched = self
            .cases
            .iter()
            .find(|(condition, _)| condition.holds(input))
            .map(|(_, validator)| validator);

        match matched.or(self.fallback.as_ref()) {
            Some(validator) => validator.validate(input),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ValidateExt, from_fn};
    use crate::validators::{max, min};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn when_false_never_runs() {
        let calls = AtomicUsize::new(0);
        let counted = from_fn(|_: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ValidationError::new("always", "always fails"))
        });

        assert!(when(false, &counted).validate(&1).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(when(true, &counted).validate(&1).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unless_is_negated_when() {
        assert!(unless(true, min(10)).validate(&1).is_ok());
        assert!(unless(false, min(10)).validate(&1).is_err());
        assert!(min(10).unless(|n: &i32| *n < 0).validate(&-5).is_ok());
    }

    #[test]
    fn if_else_runs_exactly_one_branch() {
        let rule = if_else(|n: &i32| *n >= 0, max(100), min(-100));
        assert!(rule.validate(&50).is_ok());
        assert!(rule.validate(&150).is_err());
        assert!(rule.validate(&-50).is_ok());
        assert!(rule.validate(&-150).is_err());
    }

    #[test]
    fn switch_first_match_wins() {
        let rule = Switch::new()
            .case(|n: &i32| *n > 0, max(10))
            .case(|n: &i32| *n > 5, max(1000))
            .otherwise(min(-10));

        // 50 matches both cases; the first (max 10) wins.
        assert!(rule.validate(&50).is_err());
        assert!(rule.validate(&-5).is_ok());
        assert!(rule.validate(&-50).is_err());
        assert_eq!(rule.len(), 2);
    }

    #[test]
    fn switch_without_fallback_passes_on_no_match() {
        let rule: Switch<i32> = Switch::new().case(false, min(10));
        assert!(rule.validate(&1).is_ok());
    }
}
