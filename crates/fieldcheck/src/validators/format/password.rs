//! Password policy.

use std::collections::HashSet;

use crate::foundation::{Validate, ValidationError, ValidationErrors};

/// Frequently leaked passwords, compared case-insensitively.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "123456",
    "12345678",
    "123456789",
    "qwerty",
    "qwerty123",
    "abc123",
    "111111",
    "letmein",
    "welcome",
    "admin",
    "admin123",
    "iloveyou",
    "monkey",
    "dragon",
    "sunshine",
    "football",
    "p@ssw0rd",
];

/// An immutable password policy, built with chained setters.
///
/// Every violated requirement is reported: the error is an aggregate whose
/// nested errors list each failure in the order length, character
/// classes, class count, common password.
///
/// | Setting | Default |
/// |---|---|
/// | length | 8 to 32 characters |
/// | uppercase, lowercase, digit, special | all required |
/// | special characters | [`Password::DEFAULT_SPECIAL_CHARS`] |
/// | minimum distinct classes | off |
/// | common password list | off |
///
/// ```
/// use fieldcheck::validators::Password;
/// use fieldcheck::foundation::Validate;
///
/// let policy = Password::new();
/// assert!(policy.validate("Str0ng!pass").is_ok());
///
/// let error = policy.validate("weak").unwrap_err();
/// assert_eq!(error.nested.len(), 4);
///
/// let relaxed = Password::new().require_special(false).min_length(6);
/// assert!(relaxed.validate("Abc123").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password {
    min_length: usize,
    max_length: usize,
    require_uppercase: bool,
    require_lowercase: bool,
    require_digit: bool,
    require_special: bool,
    special_chars: String,
    min_classes: usize,
    blocked: HashSet<String>,
}

impl Password {
    pub const DEFAULT_SPECIAL_CHARS: &'static str = r#"!@#$%^&*()-_+={}[]|\:;"'<>,.?/"#;

    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 8,
            max_length: 32,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            special_chars: Self::DEFAULT_SPECIAL_CHARS.to_owned(),
            min_classes: 0,
            blocked: HashSet::new(),
        }
    }

    /// Minimum length in characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    /// Maximum length in characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn require_uppercase(mut self, required: bool) -> Self {
        self.require_uppercase = required;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn require_lowercase(mut self, required: bool) -> Self {
        self.require_lowercase = required;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn require_digit(mut self, required: bool) -> Self {
        self.require_digit = required;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn require_special(mut self, required: bool) -> Self {
        self.require_special = required;
        self
    }

    /// Replaces the set of characters that count as special.
    #[must_use = "builder methods must be chained or built"]
    pub fn special_chars(mut self, chars: impl Into<String>) -> Self {
        self.special_chars = chars.into();
        self
    }

    /// Requires at least `count` of the four classes (uppercase,
    /// lowercase, digit, special), whichever they are.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_classes(mut self, count: usize) -> Self {
        self.min_classes = count;
        self
    }

    /// Rejects the given passwords (case-insensitive).
    #[must_use = "builder methods must be chained or built"]
    pub fn block<I, S>(mut self, passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blocked
            .extend(passwords.into_iter().map(|p| p.as_ref().to_lowercase()));
        self
    }

    /// Rejects a built-in list of frequently leaked passwords.
    #[must_use = "builder methods must be chained or built"]
    pub fn block_common(self) -> Self {
        self.block(COMMON_PASSWORDS)
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new()
    }
}

/// Which classes a password uses.
#[derive(Debug, Default)]
struct Classes {
    upper: bool,
    lower: bool,
    digit: bool,
    special: bool,
}

impl Classes {
    fn of(input: &str, special_chars: &str) -> Self {
        input.chars().fold(Self::default(), |mut classes, c| {
            classes.upper |= c.is_uppercase();
            classes.lower |= c.is_lowercase();
            classes.digit |= c.is_ascii_digit();
            classes.special |= special_chars.contains(c);
            classes
        })
    }

    fn count(&self) -> usize {
        [self.upper, self.lower, self.digit, self.special]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}

impl Validate for Password {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let mut errors = ValidationErrors::new();
        let len = input.chars().count();

        if len < self.min_length {
            errors.add(ValidationError::new(
                "password_length",
                format!("password must be at least {} characters", self.min_length),
            ));
        } else if len > self.max_length {
            errors.add(ValidationError::new(
                "password_length",
                format!("password must be at most {} characters", self.max_length),
            ));
        }

        let classes = Classes::of(input, &self.special_chars);
        let required = [
            (self.require_uppercase, classes.upper, "password_uppercase", "an uppercase letter"),
            (self.require_lowercase, classes.lower, "password_lowercase", "a lowercase letter"),
            (self.require_digit, classes.digit, "password_digit", "a digit"),
            (self.require_special, classes.special, "password_special", "a special character"),
        ];
        for (_, _, code, what) in required.into_iter().filter(|(req, has, _, _)| *req && !*has) {
            errors.add(ValidationError::new(code, format!("password must contain {what}")));
        }

        let used = classes.count();
        if used < self.min_classes {
            errors.add(
                ValidationError::new(
                    "password_classes",
                    format!(
                        "password must use at least {} character classes, got {used}",
                        self.min_classes
                    ),
                )
                .with_param("min", self.min_classes.to_string()),
            );
        }

        if self.blocked.contains(&input.to_lowercase()) {
            errors.add(ValidationError::new("password_common", "password is too common"));
        }

        errors.into_result()
    }
}

/// The default policy.
#[must_use]
pub fn password() -> Password {
    Password::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(policy: &Password, input: &str) -> Vec<String> {
        policy
            .validate(input)
            .err()
            .map(|e| e.nested.iter().map(|n| n.code.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn accumulates_every_failure() {
        assert_eq!(
            codes(&password(), "abc"),
            vec!["password_length", "password_uppercase", "password_digit", "password_special"]
        );
        assert!(codes(&password(), "Abcdef1!").is_empty());
    }

    #[test]
    fn length_counts_characters() {
        let policy = password().min_length(4).max_length(5).min_classes(0);
        let policy = policy
            .require_uppercase(false)
            .require_digit(false)
            .require_special(false);
        assert!(policy.validate("ééééé").is_ok());
        assert_eq!(
            policy.validate("éééééé").unwrap_err().messages(),
            vec!["password must be at most 5 characters"]
        );
    }

    #[test]
    fn class_count_instead_of_fixed_classes() {
        let policy = Password::new()
            .require_uppercase(false)
            .require_lowercase(false)
            .require_digit(false)
            .require_special(false)
            .min_classes(3);

        assert!(policy.validate("abcDEF12").is_ok());
        assert_eq!(
            policy.validate("abcdefgh").unwrap_err().messages(),
            vec!["password must use at least 3 character classes, got 1"]
        );
    }

    #[test]
    fn custom_special_set() {
        let policy = password().special_chars("~");
        assert_eq!(codes(&policy, "Abcdef1!"), vec!["password_special"]);
        assert!(policy.validate("Abcdef1~").is_ok());
    }

    #[test]
    fn common_passwords_are_case_insensitive() {
        let policy = password().block_common().block(["Company2024!"]);
        assert_eq!(codes(&policy, "P@ssw0rd"), vec!["password_common"]);
        assert_eq!(codes(&policy, "company2024!"), vec!["password_uppercase", "password_common"]);
    }
}
