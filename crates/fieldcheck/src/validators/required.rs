//! Presence and boolean flags.

use crate::foundation::ValidationError;

crate::rule! {
    /// Rejects `None`.
    ///
    /// Combine with [`Optional`](crate::combinators::Optional) when absence
    /// is allowed but a present value must pass a rule.
    pub Required<T> for Option<T>;
    check(input) { input.is_some() }
    fail(input) { ValidationError::required() }
    fn required();
}

crate::rule! {
    pub IsTrue for bool;
    check(input) { *input }
    fail(input) { ValidationError::new("is_true", "value must be true") }
    fn is_true();
}

crate::rule! {
    pub IsFalse for bool;
    check(input) { !*input }
    fail(input) { ValidationError::new("is_false", "value must be false") }
    fn is_false();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Validate, ValidateExt};
    use crate::validators::min_length;

    #[test]
    fn required_rejects_none() {
        let error = required::<i32>().validate(&None).unwrap_err();
        assert_eq!(error.message, "the value is required");
        assert!(required().validate(&Some("x")).is_ok());
    }

    #[test]
    fn required_then_rule_on_contents() {
        let name = required::<String>().and(
            crate::combinators::transform(
                |v: &Option<String>| v.clone().unwrap_or_default(),
                min_length(2),
            ),
        );
        assert!(name.validate(&Some("al".into())).is_ok());
        assert_eq!(name.validate(&None).unwrap_err().code, "required");
        assert_eq!(name.validate(&Some("a".into())).unwrap_err().code, "min_length");
    }

    #[test]
    fn booleans() {
        assert!(is_true().validate(&true).is_ok());
        assert!(is_true().validate(&false).is_err());
        assert!(is_false().validate(&false).is_ok());
        assert_eq!(is_false().validate(&true).unwrap_err().code, "is_false");
    }
}
