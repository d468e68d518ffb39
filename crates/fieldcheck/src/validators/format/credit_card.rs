//! Payment card numbers and expiry dates.

use chrono::{Datelike, NaiveDate, Utc};

use super::strip_separators;
use crate::foundation::{Validate, ValidationError};

// ============================================================================
// CARD TYPE
// ============================================================================

/// Card networks recognised by prefix and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardType {
    /// `4`, 13 or 16 digits.
    Visa,
    /// `51`-`55`, 16 digits.
    Mastercard,
    /// `34` or `37`, 15 digits.
    Amex,
    /// `6011` or `65`, 16 digits.
    Discover,
}

impl CardType {
    pub const ALL: [Self; 4] = [Self::Visa, Self::Mastercard, Self::Amex, Self::Discover];

    /// Detects the network of a digits-only card number.
    pub fn detect(digits: &str) -> Option<Self> {
        let len = digits.len();
        let two = digits.get(..2).unwrap_or_default();

        if digits.starts_with('4') && (len == 13 || len == 16) {
            Some(Self::Visa)
        } else if ("51"..="55").contains(&two) && len == 16 {
            Some(Self::Mastercard)
        } else if (two == "34" || two == "37") && len == 15 {
            Some(Self::Amex)
        } else if (digits.starts_with("6011") || two == "65") && len == 16 {
            Some(Self::Discover)
        } else {
            None
        }
    }

    /// Brand name, as shown in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
        }
    }
}

/// Luhn mod-10 checksum over ASCII digits.
pub(crate) fn luhn(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| match (i % 2 == 1, d * 2) {
            (true, doubled) if doubled > 9 => doubled - 9,
            (true, doubled) => doubled,
            (false, _) => d,
        })
        .sum();
    sum % 10 == 0
}

// ============================================================================
// CARD NUMBER
// ============================================================================

/// Validates a card number.
///
/// Spaces and dashes are ignored. The number must be 13 to 19 digits and,
/// unless [`format_only`](Self::format_only) is set, pass the Luhn check.
/// [`card_types`](Self::card_types) additionally restricts the network.
///
/// ```
/// use fieldcheck::validators::{CardType, CreditCard};
/// use fieldcheck::foundation::Validate;
///
/// let card = CreditCard::new();
/// assert!(card.validate("4111 1111 1111 1111").is_ok());
/// assert!(card.validate("4111 1111 1111 1112").is_err());
///
/// let visa_only = CreditCard::new().card_types([CardType::Visa]);
/// assert!(visa_only.validate("5500-0000-0000-0004").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCard {
    luhn: bool,
    allowed_types: Vec<CardType>,
}

impl CreditCard {
    /// Any brand, with the Luhn check enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            luhn: true,
            allowed_types: Vec::new(),
        }
    }

    /// Skips the Luhn checksum.
    #[must_use = "builder methods must be chained or built"]
    pub fn format_only(mut self) -> Self {
        self.luhn = false;
        self
    }

    /// Only accepts numbers of the listed networks.
    #[must_use = "builder methods must be chained or built"]
    pub fn card_types(mut self, types: impl IntoIterator<Item = CardType>) -> Self {
        self.allowed_types = types.into_iter().collect();
        self
    }

    /// Only accepts numbers of a recognised network.
    #[must_use = "builder methods must be chained or built"]
    pub fn known_types(self) -> Self {
        self.card_types(CardType::ALL)
    }
}

impl Default for CreditCard {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for CreditCard {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let digits = strip_separators(input.trim());

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new(
                "card_invalid_chars",
                "card number must contain only digits",
            ));
        }
        if !(13..=19).contains(&digits.len()) {
            return Err(ValidationError::new(
                "card_length",
                format!("card number must have 13 to 19 digits, got {}", digits.len()),
            ));
        }

        if !self.allowed_types.is_empty() {
            let allowed = CardType::detect(&digits).is_some_and(|t| self.allowed_types.contains(&t));
            if !allowed {
                let names: Vec<_> = self.allowed_types.iter().map(|t| t.name()).collect();
                return Err(ValidationError::new("card_type", "unsupported card type")
                    .with_param("allowed", names.join(",")));
            }
        }

        if self.luhn && !luhn(&digits) {
            return Err(ValidationError::new("card_checksum", "card number checksum is invalid"));
        }
        Ok(())
    }
}

/// Card number passing the Luhn check.
#[must_use]
pub fn credit_card() -> CreditCard {
    CreditCard::new()
}

// ============================================================================
// EXPIRY
// ============================================================================

/// An `MM/YY` expiry that is not in the past. A card is valid through the
/// last day of its expiry month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardExpiry {
    today: Option<NaiveDate>,
}

impl CardExpiry {
    /// Compares against the current UTC date.
    #[must_use]
    pub const fn new() -> Self {
        Self { today: None }
    }

    /// Compares against a fixed date.
    #[must_use]
    pub const fn at(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn parse(input: &str) -> Option<(i32, u32)> {
        let (month, year) = input.trim().split_once('/')?;
        if month.len() != 2 || year.len() != 2 {
            return None;
        }
        let month: u32 = month.parse().ok()?;
        let year: i32 = year.parse().ok()?;
        (1..=12).contains(&month).then_some((2000 + year, month))
    }
}

impl Validate for CardExpiry {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let (year, month) = Self::parse(input).ok_or_else(|| ValidationError::invalid_format("MM/YY"))?;
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());

        if (year, month) >= (today.year(), today.month()) {
            return Ok(());
        }
        Err(ValidationError::new("card_expired", "card has expired")
            .with_param("expiry", input.trim().to_owned()))
    }
}

/// `MM/YY` expiry date not in the past.
#[must_use]
pub const fn card_expiry() -> CardExpiry {
    CardExpiry::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("4111111111111111", Some(CardType::Visa))]
    #[case("4222222222222", Some(CardType::Visa))]
    #[case("5500000000000004", Some(CardType::Mastercard))]
    #[case("378282246310005", Some(CardType::Amex))]
    #[case("6011111111111117", Some(CardType::Discover))]
    #[case("6500000000000002", Some(CardType::Discover))]
    #[case("3530111333300000", None)]
    fn detects_network(#[case] digits: &str, #[case] expected: Option<CardType>) {
        assert_eq!(CardType::detect(digits), expected);
    }

    #[test]
    fn luhn_checksum() {
        assert!(luhn("79927398713"));
        assert!(!luhn("79927398710"));
        assert!(luhn("378282246310005"));
    }

    #[test]
    fn number_rules_in_order() {
        let card = credit_card();
        assert_eq!(card.validate("4111-1111-1111-111x").unwrap_err().code, "card_invalid_chars");
        assert_eq!(
            card.validate("4111 1111").unwrap_err().message,
            "card number must have 13 to 19 digits, got 8"
        );
        assert_eq!(card.validate("1234567890123456").unwrap_err().code, "card_checksum");
        assert!(card.format_only().validate("1234567890123456").is_ok());
    }

    #[test]
    fn known_types_rejects_unrecognised_network() {
        let card = credit_card().known_types();
        assert!(card.validate("378282246310005").is_ok());
        // JCB passes Luhn but is not a supported network
        let error = card.validate("3530111333300000").unwrap_err();
        assert_eq!(error.code, "card_type");
    }

    #[test]
    fn expiry_is_inclusive_of_current_month() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let expiry = CardExpiry::at(today);
        assert!(expiry.validate("06/25").is_ok());
        assert!(expiry.validate("01/30").is_ok());
        assert_eq!(expiry.validate("05/25").unwrap_err().code, "card_expired");
        assert_eq!(expiry.validate("13/25").unwrap_err().code, "invalid_format");
        assert_eq!(expiry.validate("6/25").unwrap_err().code, "invalid_format");
    }
}
