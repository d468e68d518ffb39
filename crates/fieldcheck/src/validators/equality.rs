//! Equality against a fixed value.

use std::fmt::Display;

use crate::foundation::ValidationError;

crate::rule! {
    /// Accepts only values equal to `expected`.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Equals<T: PartialEq + Display> { expected: T } for T;
    check(self, input) { *input == self.expected }
    fail(self, input) {
        ValidationError::new("equals", format!("value must equal {}", self.expected))
            .with_param("expected", self.expected.to_string())
            .with_param("actual", input.to_string())
    }
    fn equals(expected: T);
}

crate::rule! {
    /// Rejects values equal to `forbidden`.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub NotEquals<T: PartialEq + Display> { forbidden: T } for T;
    check(self, input) { *input != self.forbidden }
    fail(self, input) {
        ValidationError::new("not_equals", format!("value must not equal {}", self.forbidden))
            .with_param("forbidden", self.forbidden.to_string())
    }
    fn not_equals(forbidden: T);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn equals_and_not_equals_are_complements() {
        for value in [1, 2, 3] {
            assert_ne!(equals(2).validate(&value).is_ok(), not_equals(2).validate(&value).is_ok());
        }
    }

    #[test]
    fn equals_reports_both_sides() {
        let error = equals("yes").validate(&"no").unwrap_err();
        assert_eq!(error.message, "value must equal yes");
        assert_eq!(error.param("actual"), Some("no"));
    }
}
