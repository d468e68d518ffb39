//! Email address rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{Validate, ValidationError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex literal")
});

/// Splits `user@domain`, rejecting anything without exactly one `@`.
fn split_address(input: &str) -> Result<(&str, &str), ValidationError> {
    match input.split_once('@') {
        Some((user, domain)) if !domain.contains('@') => Ok((user, domain)),
        _ => Err(ValidationError::invalid_format("email")),
    }
}

fn normalize_domains<I, S>(domains: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    domains.into_iter().map(|d| d.into().to_ascii_lowercase()).collect()
}

crate::rule! {
    /// A syntactically plausible address: `local@domain.tld`, surrounding
    /// whitespace ignored.
    ///
    /// ```
    /// use fieldcheck::validators::email;
    /// use fieldcheck::foundation::Validate;
    ///
    /// assert!(email().validate("lyon.nee@outlook.com").is_ok());
    /// assert!(email().validate("not-an-email").is_err());
    /// ```
    pub Email for str;
    check(input) { EMAIL_REGEX.is_match(input.trim()) }
    fail(input) { ValidationError::invalid_format("email") }
    fn email();
}

/// The domain part must be one of an allow list (case-insensitive).
#[derive(Debug, Clone)]
pub struct EmailDomain {
    allowed: Vec<String>,
}

impl EmailDomain {
    /// Allows the listed domains, compared case-insensitively.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: normalize_domains(allowed),
        }
    }
}

impl Validate for EmailDomain {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let (_, domain) = split_address(input.trim())?;
        let domain = domain.to_ascii_lowercase();
        if self.allowed.contains(&domain) {
            return Ok(());
        }
        Err(
            ValidationError::new("email_domain", format!("email domain '{domain}' is not allowed"))
                .with_param("domain", domain)
                .with_param("allowed", self.allowed.join(",")),
        )
    }
}

/// Email whose domain is one of `allowed`.
pub fn email_domain<I, S>(allowed: I) -> EmailDomain
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EmailDomain::new(allowed)
}

/// Bounds the local part's length and rejects consecutive dots in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmailUsername {
    max_length: usize,
}

impl Validate for EmailUsername {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let (user, _) = split_address(input.trim())?;
        if user.len() > self.max_length {
            return Err(ValidationError::new(
                "email_username",
                format!("email username must be at most {} characters", self.max_length),
            )
            .with_param("max", self.max_length.to_string()));
        }
        if user.contains("..") {
            return Err(ValidationError::new(
                "email_username",
                "email username must not contain consecutive dots",
            ));
        }
        Ok(())
    }
}

/// Email whose local part is at most `max_length` bytes.
#[must_use]
pub const fn email_username(max_length: usize) -> EmailUsername {
    EmailUsername { max_length }
}

/// Rejects addresses at throwaway-mailbox providers.
#[derive(Debug, Clone)]
pub struct DisposableEmail {
    blocked: Vec<String>,
}

impl DisposableEmail {
    /// Rejects the listed domains, compared case-insensitively.
    pub fn new<I, S>(blocked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocked: normalize_domains(blocked),
        }
    }
}

impl Validate for DisposableEmail {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let (_, domain) = split_address(input.trim())?;
        let domain = domain.to_ascii_lowercase();
        if self.blocked.contains(&domain) {
            return Err(ValidationError::new(
                "disposable_email",
                "disposable email addresses are not allowed",
            )
            .with_param("domain", domain));
        }
        Ok(())
    }
}

/// Email whose domain is not in `blocked`.
pub fn not_disposable<I, S>(blocked: I) -> DisposableEmail
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DisposableEmail::new(blocked)
}
