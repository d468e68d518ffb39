//! Postal code formats.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::foundation::{BuildError, Validate, ValidationError};

macro_rules! postcode_regex {
    ($name:ident, $pattern:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect(concat!("postcode regex ", $pattern)));
    };
}

postcode_regex!(CN, r"^[1-9]\d{5}$");
postcode_regex!(US, r"^\d{5}(-\d{4})?$");
postcode_regex!(UK, r"^[A-Z]{1,2}\d[A-Z\d]?\d[A-Z]{2}$");
postcode_regex!(CA, r"^[A-Z]\d[A-Z]\d[A-Z]\d$");
postcode_regex!(AU, r"^\d{4}$");
postcode_regex!(JP, r"^\d{7}$");

/// Countries with a built-in postcode format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    /// Six digits, first digit non-zero.
    Cn,
    /// ZIP (`12345`) or ZIP+4 (`12345-6789`).
    Us,
    Uk,
    /// `A1A 1A1`.
    Ca,
    Au,
    /// Seven digits, `123-4567` accepted.
    Jp,
}

impl Country {
    const fn code(self) -> &'static str {
        match self {
            Self::Cn => "CN",
            Self::Us => "US",
            Self::Uk => "UK",
            Self::Ca => "CA",
            Self::Au => "AU",
            Self::Jp => "JP",
        }
    }
}

/// A postal code for one country or a custom pattern.
///
/// Spaces are ignored everywhere. UK and Canadian codes are matched
/// case-insensitively; Japanese codes also ignore dashes.
///
/// ```
/// use fieldcheck::validators::{Country, Postcode, postcode};
/// use fieldcheck::foundation::Validate;
///
/// assert!(postcode(Country::Us).validate("94105-1804").is_ok());
/// assert!(postcode(Country::Uk).validate("sw1a 1aa").is_ok());
/// assert!(postcode(Country::Cn).validate("012345").is_err());
///
/// let nl = Postcode::custom("NL", r"^\d{4}[A-Z]{2}$").unwrap();
/// assert!(nl.validate("1012 AB").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Postcode {
    name: Cow<'static, str>,
    pattern: Regex,
    uppercase: bool,
    strip_dashes: bool,
}

impl Postcode {
    #[must_use]
    pub fn new(country: Country) -> Self {
        let pattern = match country {
            Country::Cn => &CN,
            Country::Us => &US,
            Country::Uk => &UK,
            Country::Ca => &CA,
            Country::Au => &AU,
            Country::Jp => &JP,
        };
        Self {
            name: Cow::Borrowed(country.code()),
            pattern: Regex::clone(pattern),
            uppercase: matches!(country, Country::Uk | Country::Ca),
            strip_dashes: country == Country::Jp,
        }
    }

    /// A custom format, matched after removing spaces.
    ///
    /// # Errors
    ///
    /// [`BuildError::InvalidPattern`] when `pattern` does not compile.
    pub fn custom(name: impl Into<Cow<'static, str>>, pattern: &str) -> Result<Self, BuildError> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            uppercase: false,
            strip_dashes: false,
        })
    }

    /// Country code, or the name given to [`custom`](Self::custom), as used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn normalize(&self, input: &str) -> String {
        input
            .chars()
            .filter(|c| !c.is_whitespace() && !(self.strip_dashes && *c == '-'))
            .map(|c| if self.uppercase { c.to_ascii_uppercase() } else { c })
            .collect()
    }
}

impl Validate for Postcode {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.pattern.is_match(&self.normalize(input)) {
            return Ok(());
        }
        Err(
            ValidationError::new("postcode", format!("invalid {} postcode", self.name))
                .with_param("country", self.name.clone()),
        )
    }
}

/// Postal code for `country`.
#[must_use]
pub fn postcode(country: Country) -> Postcode {
    Postcode::new(country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Country::Cn, "100 080", true)]
    #[case(Country::Cn, "10008", false)]
    #[case(Country::Us, "94105", true)]
    #[case(Country::Us, "9410", false)]
    #[case(Country::Us, "94105-18", false)]
    #[case(Country::Uk, "EC1A 1BB", true)]
    #[case(Country::Uk, "W1A0AX", true)]
    #[case(Country::Uk, "1234", false)]
    #[case(Country::Ca, "k1a 0b1", true)]
    #[case(Country::Ca, "K1A 0B", false)]
    #[case(Country::Au, "2000", true)]
    #[case(Country::Au, "200", false)]
    #[case(Country::Jp, "100-0001", true)]
    #[case(Country::Jp, "100-001", false)]
    fn country_formats(#[case] country: Country, #[case] input: &str, #[case] ok: bool) {
        assert_eq!(postcode(country).validate(input).is_ok(), ok, "{country:?} {input}");
    }

    #[test]
    fn error_names_the_country() {
        let error = postcode(Country::Au).validate("abc").unwrap_err();
        assert_eq!(error.message, "invalid AU postcode");
        assert_eq!(error.param("country"), Some("AU"));
    }

    #[test]
    fn custom_pattern_must_compile() {
        assert!(matches!(
            Postcode::custom("XX", "("),
            Err(BuildError::InvalidPattern(_))
        ));
    }

    #[test]
    fn country_deserializes_from_code() {
        let country: Country = serde_json::from_str("\"JP\"").unwrap();
        assert_eq!(country, Country::Jp);
    }
}
