//! String length validators
//!
//! [`MinLength`], [`MaxLength`] and [`LengthRange`] measure bytes, which
//! equals characters for ASCII input. Use [`MinChars`] to count Unicode
//! scalar values.

use crate::foundation::ValidationError;

crate::rule! {
    /// Rejects the empty string.
    pub NotEmpty for str;
    check(input) { !input.is_empty() }
    fail(input) { ValidationError::new("not_empty", "must not be empty") }
    fn not_empty();
}

crate::rule! {
    /// At least `min` bytes.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize } for str;
    check(self, input) { input.len() >= self.min }
    fail(self, input) { ValidationError::min_length(self.min, input.len()) }
    fn min_length(min: usize);
}

crate::rule! {
    /// At most `max` bytes.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize } for str;
    check(self, input) { input.len() <= self.max }
    fail(self, input) { ValidationError::max_length(self.max, input.len()) }
    fn max_length(max: usize);
}

crate::rule! {
    /// Between `min` and `max` bytes, inclusive.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub LengthRange { min: usize, max: usize } for str;
    check(self, input) { (self.min..=self.max).contains(&input.len()) }
    fail(self, input) {
        ValidationError::new(
            "length_range",
            format!("length must be between {} and {}, got {}", self.min, self.max, input.len()),
        )
        .with_param("min", self.min.to_string())
        .with_param("max", self.max.to_string())
        .with_param("actual", input.len().to_string())
    }
    fn length_range(min: usize, max: usize);
}

crate::rule! {
    /// At least `min` characters.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinChars { min: usize } for str;
    check(self, input) { input.chars().count() >= self.min }
    fail(self, input) {
        let actual = input.chars().count();
        ValidationError::new(
            "min_chars",
            format!("must have at least {} characters, got {actual}", self.min),
        )
        .with_param("min", self.min.to_string())
        .with_param("actual", actual.to_string())
    }
    fn min_chars(min: usize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("ab", false)]
    #[case("abc", true)]
    #[case("abcdef", true)]
    fn min_length_cases(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(min_length(3).validate(input).is_ok(), ok);
    }

    #[test]
    fn max_length_message() {
        let error = max_length(2).validate("abc").unwrap_err();
        assert_eq!(error.message, "length must be at most 2, got 3");
    }

    #[test]
    fn range_is_inclusive() {
        let rule = length_range(2, 4);
        assert!(rule.validate("ab").is_ok());
        assert!(rule.validate("abcd").is_ok());
        assert_eq!(
            rule.validate("abcde").unwrap_err().message,
            "length must be between 2 and 4, got 5"
        );
    }

    #[test]
    fn bytes_versus_chars() {
        // Four characters, twelve bytes.
        let word = "日本語か";
        assert!(min_length(10).validate(word).is_ok());
        assert!(min_chars(10).validate(word).is_err());
        assert!(min_chars(4).validate(word).is_ok());
    }

    #[test]
    fn not_empty_rejects_only_empty() {
        assert!(not_empty().validate(" ").is_ok());
        assert_eq!(not_empty().validate("").unwrap_err().code, "not_empty");
    }
}
