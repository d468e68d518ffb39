//! Substring and pattern checks.

use regex::Regex;

use crate::foundation::{BuildError, Validate, ValidationError};

crate::rule! {
    /// The input must contain `substring`.
    pub Contains { substring: String } for str;
    check(self, input) { input.contains(self.substring.as_str()) }
    fail(self, input) {
        ValidationError::new("contains", format!("must contain '{}'", self.substring))
            .with_param("substring", self.substring.clone())
    }
    new(substring: impl Into<String>) { Self { substring: substring.into() } }
    fn contains(substring: impl Into<String>);
}

crate::rule! {
    pub StartsWith { prefix: String } for str;
    check(self, input) { input.starts_with(self.prefix.as_str()) }
    fail(self, input) {
        ValidationError::new("starts_with", format!("must start with '{}'", self.prefix))
            .with_param("prefix", self.prefix.clone())
    }
    new(prefix: impl Into<String>) { Self { prefix: prefix.into() } }
    fn starts_with(prefix: impl Into<String>);
}

crate::rule! {
    pub EndsWith { suffix: String } for str;
    check(self, input) { input.ends_with(self.suffix.as_str()) }
    fail(self, input) {
        ValidationError::new("ends_with", format!("must end with '{}'", self.suffix))
            .with_param("suffix", self.suffix.clone())
    }
    new(suffix: impl Into<String>) { Self { suffix: suffix.into() } }
    fn ends_with(suffix: impl Into<String>);
}

/// The input must match a regular expression somewhere. Anchor the
/// pattern with `^...$` to require a full match.
///
/// ```
/// use fieldcheck::validators::matches_regex;
/// use fieldcheck::foundation::Validate;
///
/// let slug = matches_regex(r"^[a-z0-9-]+$").unwrap();
/// assert!(slug.validate("hello-world").is_ok());
/// assert!(slug.validate("Hello World").is_err());
/// assert!(matches_regex("(").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MatchesRegex {
    pattern: Regex,
}

impl MatchesRegex {
    /// # Errors
    ///
    /// [`BuildError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(pattern: &str) -> Result<Self, BuildError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Uses an already compiled pattern.
    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// The source text of the pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Validate for MatchesRegex {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.pattern.is_match(input) {
            Ok(())
        } else {
            Err(
                ValidationError::new("pattern", format!("must match pattern {}", self.pattern))
                    .with_param("pattern", self.pattern.as_str().to_owned()),
            )
        }
    }
}

/// # Errors
///
/// [`BuildError::InvalidPattern`] if `pattern` does not compile.
pub fn matches_regex(pattern: &str) -> Result<MatchesRegex, BuildError> {
    MatchesRegex::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_checks() {
        assert!(contains("@").validate("a@b").is_ok());
        assert_eq!(contains("@").validate("ab").unwrap_err().message, "must contain '@'");
        assert!(starts_with("https://").validate("https://x").is_ok());
        assert!(starts_with("https://").validate("http://x").is_err());
        assert!(ends_with(".rs").validate("main.rs").is_ok());
        assert_eq!(ends_with(".rs").validate("main.go").unwrap_err().code, "ends_with");
    }

    #[test]
    fn regex_is_unanchored_by_default() {
        let digits = matches_regex(r"\d+").unwrap();
        assert!(digits.validate("abc123").is_ok());
        assert!(digits.validate("abc").is_err());
        assert_eq!(digits.pattern(), r"\d+");
    }

    #[test]
    fn bad_pattern_is_build_error() {
        assert!(matches!(matches_regex("[unclosed"), Err(BuildError::InvalidPattern(_))));
    }
}
