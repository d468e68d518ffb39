//! Dependency-gated validation
//!
//! The main validator runs only after its dependencies pass. Unlike
//! [`When`](super::When), an unmet dependency is a failure, not a skip.

use crate::combinators::logic::no_validators;
use crate::foundation::{Validate, ValidationError, ValidationErrors};

fn dependency_failed(error: ValidationError) -> ValidationError {
    ValidationError::new(
        "dependency_failed",
        format!("dependency validation failed: {error}"),
    )
    .with_nested_error(error)
}

fn indexed_dependency_failed(index: usize, error: ValidationError) -> ValidationError {
    ValidationError::new(
        "dependency_failed",
        format!("dependency[{index}] validation failed: {error}"),
    )
    .with_param("index", index.to_string())
    .with_nested_error(error)
}

/// Runs `dependency` first; the main validator runs only if it passes.
#[derive(Debug, Clone, Copy)]
pub struct DependsOn<D, V> {
    dependency: D,
    validator: V,
}

impl<D, V> DependsOn<D, V> {
    pub fn new(dependency: D, validator: V) -> Self {
        Self {
            dependency,
            validator,
        }
    }
}

impl<D, V> Validate for DependsOn<D, V>
where
    D: Validate,
    V: Validate<Input = D::Input>,
{
    type Input = D::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.dependency.validate(input).map_err(dependency_failed)?;
        self.validator.validate(input)
    }
}

/// Every dependency must pass (all failures reported) before the main
/// validator runs.
#[derive(Debug, Clone)]
pub struct DependsOnAll<D, V> {
    dependencies: Vec<D>,
    validator: V,
}

impl<D, V> DependsOnAll<D, V> {
    pub fn new(dependencies: Vec<D>, validator: V) -> Self {
        Self {
            dependencies,
            validator,
        }
    }
}

impl<D, V> Validate for DependsOnAll<D, V>
where
    D: Validate,
    V: Validate<Input = D::Input>,
{
    type Input = D::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.dependencies
            .iter()
            .enumerate()
            .filter_map(|(index, dep)| {
                dep.validate(input)
                    .err()
                    .map(|e| indexed_dependency_failed(index, e))
            })
            .collect::<ValidationErrors>()
            .into_result()?;
        self.validator.validate(input)
    }
}

/// At least one dependency must pass before the main validator runs.
/// Stops at the first passing dependency. An empty list never passes.
#[derive(Debug, Clone)]
pub struct DependsOnAny<D, V> {
    dependencies: Vec<D>,
    validator: V,
}

impl<D, V> DependsOnAny<D, V> {
    pub fn new(dependencies: Vec<D>, validator: V) -> Self {
        Self {
            dependencies,
            validator,
        }
    }
}

impl<D, V> Validate for DependsOnAny<D, V>
where
    D: Validate,
    V: Validate<Input = D::Input>,
{
    type Input = D::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.dependencies.is_empty() {
            return Err(dependency_failed(no_validators()));
        }
        let mut errors = ValidationErrors::new();
        for (index, dep) in self.dependencies.iter().enumerate() {
            match dep.validate(input) {
                Ok(()) => return self.validator.validate(input),
                Err(e) => errors.add(indexed_dependency_failed(index, e)),
            }
        }
        errors.into_result()
    }
}

/// Runs the validator only if `condition` holds; otherwise fails with
/// "dependency condition not met".
#[derive(Debug, Clone, Copy)]
pub struct DependsOnCondition<P, V> {
    condition: P,
    validator: V,
}

impl<P, V> DependsOnCondition<P, V> {
    pub fn new(condition: P, validator: V) -> Self {
        Self {
            condition,
            validator,
        }
    }
}

impl<P, V> Validate for DependsOnCondition<P, V>
where
    V: Validate,
    P: Fn(&V::Input) -> bool,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if (self.condition)(input) {
            self.validator.validate(input)
        } else {
            Err(ValidationError::new(
                "dependency_condition",
                "dependency condition not met",
            ))
        }
    }
}

/// Runs `validator` only after `dependency` passes.
pub fn depends_on<D, V>(dependency: D, validator: V) -> DependsOn<D, V> {
    DependsOn::new(dependency, validator)
}

/// Runs `validator` only after every dependency passes.
pub fn depends_on_all<D, V>(dependencies: Vec<D>, validator: V) -> DependsOnAll<D, V> {
    DependsOnAll::new(dependencies, validator)
}

/// Runs `validator` only after some dependency passes.
pub fn depends_on_any<D, V>(dependencies: Vec<D>, validator: V) -> DependsOnAny<D, V> {
    DependsOnAny::new(dependencies, validator)
}

/// Runs `validator` only when `condition` accepts the input.
pub fn depends_on_condition<P, V>(condition: P, validator: V) -> DependsOnCondition<P, V> {
    DependsOnCondition::new(condition, validator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::from_fn;
    use crate::validators::{max, min};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(calls: &AtomicUsize) -> impl Validate<Input = i32> + '_ {
        from_fn(move |_: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn failed_dependency_skips_main_validator() {
        let calls = AtomicUsize::new(0);
        let rule = depends_on(min(10), counting(&calls));

        let error = rule.validate(&5).unwrap_err();
        assert_eq!(error.code, "dependency_failed");
        assert!(error.message.starts_with("dependency validation failed: "));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(rule.validate(&15).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn passing_dependency_returns_main_result() {
        let rule = depends_on(min(0), max(10));
        let error = rule.validate(&11).unwrap_err();
        assert_eq!(error.code, "max");
    }

    #[test]
    fn all_dependencies_reported() {
        let calls = AtomicUsize::new(0);
        let rule = depends_on_all(vec![min(10), min(20), min(0)], counting(&calls));

        let error = rule.validate(&5).unwrap_err();
        assert_eq!(
            error.messages(),
            vec![
                "dependency[0] validation failed: value is too small, must be at least 10",
                "dependency[1] validation failed: value is too small, must be at least 20",
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn any_dependency_is_enough() {
        let calls = AtomicUsize::new(0);
        let rule = depends_on_any(vec![min(100), min(0)], counting(&calls));

        assert!(rule.validate(&5).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let error = rule.validate(&-5).unwrap_err();
        assert_eq!(error.nested.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmet_condition_fails() {
        let rule = depends_on_condition(|n: &i32| *n % 2 == 0, max(100));
        assert_eq!(rule.validate(&3).unwrap_err().message, "dependency condition not met");
        assert!(rule.validate(&4).is_ok());
        assert!(rule.validate(&200).is_err());
    }
}
