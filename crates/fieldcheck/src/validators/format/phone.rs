//! Phone number rules.

use std::collections::HashSet;

use super::strip_separators;
use crate::foundation::{Validate, ValidationError};

/// Phone validation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneMode {
    /// Mainland China mobile: 11 digits, `1[3-9]xxxxxxxxx`.
    CnMobile,
    /// International: `+`, a non-zero country digit, 7 to 15 digits total.
    E164,
    /// Digits with optional `+ - . ( )` and spaces, 7 to 15 digits.
    Generic,
}

/// Validates phone numbers in one of three [`PhoneMode`]s.
///
/// Spaces and dashes are stripped before the CN and E.164 checks.
///
/// ```
/// use fieldcheck::validators::Phone;
/// use fieldcheck::foundation::Validate;
///
/// assert!(Phone::cn_mobile().validate("138 0013 8000").is_ok());
/// assert!(Phone::cn_mobile().validate("12800138000").is_err());
/// assert!(Phone::e164().validate("+86-138-0013-8000").is_ok());
/// assert!(Phone::generic().validate("(415) 555-1234").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phone {
    mode: PhoneMode,
}

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

impl Phone {
    /// Eleven-digit mainland China mobile numbers.
    #[must_use]
    pub const fn cn_mobile() -> Self {
        Self {
            mode: PhoneMode::CnMobile,
        }
    }

    /// International numbers in E.164 form, leading `+` included.
    #[must_use]
    pub const fn e164() -> Self {
        Self {
            mode: PhoneMode::E164,
        }
    }

    #[must_use]
    pub const fn generic() -> Self {
        Self {
            mode: PhoneMode::Generic,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> PhoneMode {
        self.mode
    }

    fn validate_cn(input: &str) -> Result<(), ValidationError> {
        let number = strip_separators(input);
        let bytes = number.as_bytes();

        if bytes.len() != 11 {
            return Err(ValidationError::new(
                "phone_length",
                "mobile number must have 11 digits",
            ));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ValidationError::new(
                "phone_digits",
                "mobile number must contain only digits",
            ));
        }
        if bytes[0] != b'1' {
            return Err(ValidationError::new("phone_prefix", "mobile number must start with 1"));
        }
        if !(b'3'..=b'9').contains(&bytes[1]) {
            return Err(ValidationError::new(
                "phone_prefix",
                "second digit of a mobile number must be between 3 and 9",
            ));
        }
        Ok(())
    }

    fn validate_e164(input: &str) -> Result<(), ValidationError> {
        let number = strip_separators(input);
        let Some(digits) = number.strip_prefix('+') else {
            return Err(ValidationError::new(
                "e164_missing_plus",
                "international number must start with '+'",
            ));
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new(
                "e164_invalid_chars",
                "international number must contain only digits after '+'",
            ));
        }
        if digits.starts_with('0') {
            return Err(ValidationError::new(
                "e164_country_code",
                "country code must not start with 0",
            ));
        }
        Self::validate_digit_count(digits.len())
    }

    fn validate_generic(input: &str) -> Result<(), ValidationError> {
        let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.');
        if !input.chars().all(allowed) {
            return Err(ValidationError::new(
                "phone_invalid_chars",
                "phone number contains invalid characters",
            ));
        }
        if input.rfind('+').is_some_and(|pos| pos != 0) {
            return Err(ValidationError::new(
                "phone_plus_position",
                "'+' can only appear at the start of the phone number",
            ));
        }
        Self::validate_digit_count(input.chars().filter(char::is_ascii_digit).count())
    }

    fn validate_digit_count(count: usize) -> Result<(), ValidationError> {
        if (MIN_DIGITS..=MAX_DIGITS).contains(&count) {
            return Ok(());
        }
        Err(ValidationError::new(
            "phone_digit_count",
            format!("phone number must have {MIN_DIGITS} to {MAX_DIGITS} digits, got {count}"),
        )
        .with_param("actual", count.to_string()))
    }
}

impl Validate for Phone {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let input = input.trim();
        match self.mode {
            PhoneMode::CnMobile => Self::validate_cn(input),
            PhoneMode::E164 => Self::validate_e164(input),
            PhoneMode::Generic => Self::validate_generic(input),
        }
    }
}

/// The first three digits must be one of a carrier's number blocks.
///
/// ```
/// use fieldcheck::validators::carrier_prefix;
/// use fieldcheck::foundation::Validate;
///
/// let mobile = carrier_prefix(["134", "135", "138"]);
/// assert!(mobile.validate("138-0013-8000").is_ok());
/// assert!(mobile.validate("18900138000").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CarrierPrefix {
    prefixes: HashSet<String>,
}

impl CarrierPrefix {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validate for CarrierPrefix {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let number = strip_separators(input.trim());
        let prefix = number
            .get(..3)
            .ok_or_else(|| ValidationError::invalid_format("phone number"))?;
        if self.prefixes.contains(prefix) {
            return Ok(());
        }
        Err(
            ValidationError::new("carrier_prefix", format!("unknown carrier prefix '{prefix}'"))
                .with_param("prefix", prefix.to_owned()),
        )
    }
}

/// Phone number starting with one of `prefixes`.
pub fn carrier_prefix<I, S>(prefixes: I) -> CarrierPrefix
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CarrierPrefix::new(prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("13800138000", None)]
    #[case("199-0000-1111", None)]
    #[case("1380013800", Some("phone_length"))]
    #[case("1380013800a", Some("phone_digits"))]
    #[case("23800138000", Some("phone_prefix"))]
    #[case("12800138000", Some("phone_prefix"))]
    fn cn_mobile(#[case] input: &str, #[case] code: Option<&str>) {
        let result = Phone::cn_mobile().validate(input);
        assert_eq!(result.err().map(|e| e.code.to_string()).as_deref(), code);
    }

    #[rstest]
    #[case("+14155551234", None)]
    #[case("+44 20 7123 4567", None)]
    #[case("14155551234", Some("e164_missing_plus"))]
    #[case("+0123456789", Some("e164_country_code"))]
    #[case("+1(415)5551234", Some("e164_invalid_chars"))]
    #[case("+123", Some("phone_digit_count"))]
    #[case("+1234567890123456", Some("phone_digit_count"))]
    fn e164(#[case] input: &str, #[case] code: Option<&str>) {
        let result = Phone::e164().validate(input);
        assert_eq!(result.err().map(|e| e.code.to_string()).as_deref(), code);
    }

    #[test]
    fn generic_format() {
        let phone = Phone::generic();
        assert!(phone.validate("+1 (415) 555.1234").is_ok());
        assert!(phone.validate("555-1234").is_ok());
        assert_eq!(phone.validate("555-12a4").unwrap_err().code, "phone_invalid_chars");
        assert_eq!(phone.validate("1+5551234").unwrap_err().code, "phone_plus_position");
        assert_eq!(
            phone.validate("12-34").unwrap_err().message,
            "phone number must have 7 to 15 digits, got 4"
        );
    }

    #[test]
    fn carrier_prefix_needs_three_digits() {
        let rule = carrier_prefix(["130"]);
        assert_eq!(rule.validate("13").unwrap_err().code, "invalid_format");
        assert_eq!(
            rule.validate("139 0000 0000").unwrap_err().message,
            "unknown carrier prefix '139'"
        );
    }
}
