//! Mainland China resident identity card numbers (18 digits).
//!
//! Layout: 6-digit area code, 8-digit birth date `YYYYMMDD`, 3-digit
//! sequence, 1 check character (`0`-`9` or `X`).

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};

use crate::foundation::{Validate, ValidationError};

const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];
const CHECK_CODES: &[u8; 11] = b"10X98765432";

/// Expected check character for the first 17 digits.
fn check_code(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .zip(WEIGHTS)
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();
    CHECK_CODES[(sum % 11) as usize]
}

/// Validates an 18-digit identity card number.
///
/// Checks run in order: format, area code (when an allow list is set),
/// birth date, age range (when set), check character. The first failure
/// is reported.
///
/// ```
/// use fieldcheck::validators::IdCard;
/// use fieldcheck::foundation::Validate;
///
/// let card = IdCard::new();
/// assert!(card.validate("11010519491231002X").is_ok());
/// assert!(card.validate("110105194912310021").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdCard {
    area_codes: Option<HashSet<String>>,
    age_range: Option<(u32, u32)>,
    today: Option<NaiveDate>,
    skip_check_code: bool,
}

impl IdCard {
    /// Accepts any area code and age. The check digit is verified.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accepts the listed 6-digit area codes.
    #[must_use = "builder methods must be chained or built"]
    pub fn area_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.area_codes = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// The holder's age in whole years must be within `min..=max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn age_range(mut self, min: u32, max: u32) -> Self {
        self.age_range = Some((min, max));
        self
    }

    /// Computes ages against a fixed date instead of today (UTC).
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Accepts a wrong final check digit.
    #[must_use = "builder methods must be chained or built"]
    pub fn skip_check_code(mut self) -> Self {
        self.skip_check_code = true;
        self
    }

    fn check_format(input: &str) -> Result<(), ValidationError> {
        let bytes = input.as_bytes();
        if bytes.len() != 18 {
            return Err(ValidationError::new(
                "id_card_length",
                "identity card number must have 18 characters",
            ));
        }
        if !bytes[..17].iter().all(u8::is_ascii_digit) {
            return Err(ValidationError::new(
                "id_card_digits",
                "the first 17 characters must be digits",
            ));
        }
        if !(bytes[17].is_ascii_digit() || bytes[17].eq_ignore_ascii_case(&b'X')) {
            return Err(ValidationError::new(
                "id_card_last",
                "the last character must be a digit or X",
            ));
        }
        Ok(())
    }

    fn birth_date(input: &str) -> Result<NaiveDate, ValidationError> {
        let date = &input[6..14];
        NaiveDate::parse_from_str(date, "%Y%m%d").map_err(|_| {
            ValidationError::new("id_card_birth_date", format!("invalid birth date '{date}'"))
        })
    }

    fn check_age(&self, birth: NaiveDate) -> Result<(), ValidationError> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let Some(age) = today.years_since(birth) else {
            return Err(ValidationError::new(
                "id_card_birth_date",
                "birth date is in the future",
            ));
        };

        match self.age_range {
            Some((min, max)) if !(min..=max).contains(&age) => Err(ValidationError::new(
                "id_card_age",
                format!("age must be between {min} and {max}, got {age}"),
            )
            .with_param("age", age.to_string())),
            _ => Ok(()),
        }
    }
}

impl Validate for IdCard {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let input = input.trim();
        Self::check_format(input)?;

        if let Some(codes) = &self.area_codes
            && !codes.contains(&input[..6])
        {
            return Err(ValidationError::new(
                "id_card_area",
                format!("unknown area code '{}'", &input[..6]),
            ));
        }

        let birth = Self::birth_date(input)?;
        self.check_age(birth)?;

        let bytes = input.as_bytes();
        if !self.skip_check_code && check_code(&bytes[..17]) != bytes[17].to_ascii_uppercase() {
            return Err(ValidationError::new(
                "id_card_check_code",
                "identity card check code does not match",
            ));
        }
        Ok(())
    }
}

/// Eighteen-digit resident ID with a valid checksum.
#[must_use]
pub fn id_card() -> IdCard {
    IdCard::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn code_of(input: &str) -> Option<String> {
        id_card()
            .at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .validate(input)
            .err()
            .map(|e| e.code.to_string())
    }

    #[rstest]
    #[case("11010519491231002X", None)]
    #[case("11010519491231002x", None)]
    #[case("440304199001011233", None)]
    #[case("110105200002290013", None)]
    #[case("1101051949123100", Some("id_card_length"))]
    #[case("11010519491231A02X", Some("id_card_digits"))]
    #[case("11010519491231002Y", Some("id_card_last"))]
    #[case("110105194902300020", Some("id_card_birth_date"))]
    #[case("110105203001010010", Some("id_card_birth_date"))]
    #[case("440304199001011234", Some("id_card_check_code"))]
    fn validation_order(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(code_of(input).as_deref(), expected);
    }

    #[test]
    fn check_code_weights() {
        assert_eq!(check_code(b"11010519491231002"), b'X');
        assert_eq!(check_code(b"44030419900101123"), b'3');
    }

    #[test]
    fn area_codes_and_age_range() {
        let card = IdCard::new()
            .area_codes(["110105"])
            .age_range(18, 60)
            .at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        assert_eq!(
            card.validate("440304199001011233").unwrap_err().message,
            "unknown area code '440304'"
        );
        assert_eq!(
            card.validate("11010519491231002X").unwrap_err().message,
            "age must be between 18 and 60, got 75"
        );
        assert!(card.age_range(18, 80).validate("11010519491231002X").is_ok());
    }

    #[test]
    fn check_code_can_be_skipped() {
        assert!(id_card().skip_check_code().validate("440304199001011234").is_ok());
    }
}
