//! Batch validation: one validator applied to every element of a slice.

use crate::foundation::{Validate, ValidationError, ValidationErrors};

pub(crate) fn element_failed(index: usize, error: ValidationError) -> ValidationError {
    error.with_context(format_args!("element[{index}]"))
}

pub(crate) fn no_elements() -> ValidationError {
    ValidationError::new("no_elements", "no elements to validate")
}

// ============================================================================
// EACH
// ============================================================================

/// Every element must pass.
///
/// Failures are reported as `element[i]: <err>` in index order. With
/// `fail_fast` only the first failing element is reported.
///
/// ```
/// use fieldcheck::combinators::each;
/// use fieldcheck::prelude::*;
///
/// let all_positive = each(positive::<i32>());
/// assert!(all_positive.validate(&[1, 2, 3]).is_ok());
///
/// let error = all_positive.validate(&[1, -2, 0]).unwrap_err();
/// assert_eq!(error.nested.len(), 2);
/// assert!(error.to_string().starts_with("element[1]: "));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Each<V> {
    inner: V,
    fail_fast: bool,
}

impl<V> Each<V> {
    /// Validates all elements and collects all errors.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            fail_fast: false,
        }
    }

    /// Stops at the first failing element.
    pub fn fail_fast(inner: V) -> Self {
        Self {
            inner,
            fail_fast: true,
        }
    }

    /// Stops at the first failing element when `fail_fast` is set.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// The per-element validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V, T> Validate for Each<V>
where
    V: Validate<Input = T>,
{
    type Input = [T];

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        let mut errors = ValidationErrors::new();

        for (index, element) in input.iter().enumerate() {
            if let Err(e) = self.inner.validate(element) {
                if self.fail_fast {
                    return Err(element_failed(index, e));
                }
                errors.add(element_failed(index, e));
            }
        }

        errors.into_result()
    }
}

/// Every element must pass; failures are tagged `element[i]`.
pub fn each<V>(validator: V) -> Each<V> {
    Each::new(validator)
}

/// Like [`each`], but stops at the first failing element.
pub fn each_fail_fast<V>(validator: V) -> Each<V> {
    Each::fail_fast(validator)
}

// ============================================================================
// ANY ELEMENT
// ============================================================================

/// At least one element must pass. Stops at the first passing element;
/// an empty slice fails.
#[derive(Debug, Clone, Copy)]
pub struct AnyElement<V> {
    inner: V,
}

impl<V> AnyElement<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<V, T> Validate for AnyElement<V>
where
    V: Validate<Input = T>,
{
    type Input = [T];

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if input.is_empty() {
            return Err(no_elements());
        }
        let mut errors = ValidationErrors::new();
        for (index, element) in input.iter().enumerate() {
            match self.inner.validate(element) {
                Ok(()) => return Ok(()),
                Err(e) => errors.add(element_failed(index, e)),
            }
        }
        errors.into_result()
    }
}

/// At least one element must pass.
pub fn any_element<V>(validator: V) -> AnyElement<V> {
    AnyElement::new(validator)
}

/// Validates every element, reporting all failures.
///
/// # Errors
///
/// An aggregate of `element[i]: <err>` failures in index order.
pub fn validate_all<V: Validate>(values: &[V::Input], validator: &V) -> Result<(), ValidationError>
where
    V::Input: Sized,
{
    each(validator).validate(values)
}

/// Passes if any element passes.
///
/// # Errors
///
/// Fails on an empty slice, or with every element's failure when none pass.
pub fn validate_any<V: Validate>(values: &[V::Input], validator: &V) -> Result<(), ValidationError>
where
    V::Input: Sized,
{
    any_element(validator).validate(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::from_fn;
    use crate::validators::{min, min_length};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_failure_tagged_by_index() {
        let error = validate_all(&[5, 1, 7, 0], &min(3)).unwrap_err();
        assert_eq!(
            error.messages(),
            vec![
                "element[1]: value is too small, must be at least 3",
                "element[3]: value is too small, must be at least 3",
            ]
        );
    }

    #[test]
    fn fail_fast_reports_first_only() {
        let error = each_fail_fast(min(3)).validate(&[5, 1, 0]).unwrap_err();
        assert_eq!(error.to_string(), "element[1]: value is too small, must be at least 3");
        assert_eq!(error.code, "min");
    }

    #[test]
    fn empty_slice_passes_each_and_fails_any() {
        let empty: [i32; 0] = [];
        assert!(validate_all(&empty, &min(3)).is_ok());
        assert_eq!(validate_any(&empty, &min(3)).unwrap_err().code, "no_elements");
    }

    #[test]
    fn any_element_short_circuits() {
        let calls = AtomicUsize::new(0);
        let counted = from_fn(|n: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            min(3).validate(n)
        });

        assert!(validate_any(&[1, 5, 9], &counted).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn nested_aggregate_keeps_index_on_every_entry() {
        use crate::foundation::ErrorKind;
        use crate::validators::max;

        let rule = each(crate::all_of![min(10), max(0)]);
        let error = rule.validate(&[5][..]).unwrap_err();
        assert_eq!(error.nested.len(), 1);

        let element = &error.nested[0];
        assert_eq!(element.kind(), ErrorKind::Aggregate);
        assert_eq!(element.param("count"), Some("2"));
        assert_eq!(
            element.messages(),
            vec![
                "element[0]: value is too small, must be at least 10",
                "element[0]: value is too big, must be at most 0",
            ]
        );
    }

    #[test]
    fn works_over_string_elements() {
        let names = vec!["alice".to_owned(), "b".to_owned()];
        let rule = each(crate::combinators::transform(|s: &String| s.clone(), min_length(2)));
        assert_eq!(rule.validate(&names).unwrap_err().nested.len(), 1);
    }
}
