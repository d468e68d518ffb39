//! Absolute URL validation on top of the `url` crate.

use url::Host;

use crate::foundation::{Validate, ValidationError};

/// A parseable absolute URL, optionally constrained further.
///
/// Constraints are checked in the order the builder methods are listed
/// below and the first violated one is reported.
///
/// ```
/// use fieldcheck::validators::Url;
/// use fieldcheck::foundation::Validate;
///
/// let api = Url::new()
///     .schemes(["https"])
///     .domain_suffixes(["example.com"])
///     .path_prefix("/api/")
///     .required_query(["key"]);
///
/// assert!(api.validate("https://cdn.example.com/api/v1?key=abc").is_ok());
/// assert!(api.validate("http://cdn.example.com/api/v1?key=abc").is_err());
/// assert!(api.validate("https://example.org/api/v1?key=abc").is_err());
/// assert!(api.validate("not a url").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    schemes: Vec<String>,
    domain_suffixes: Vec<String>,
    path_prefix: Option<String>,
    required_query: Vec<String>,
    require_fragment: bool,
    ports: Vec<u16>,
    require_ip_host: bool,
}

fn lowercased<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(|v| v.into().to_ascii_lowercase()).collect()
}

impl Url {
    /// Accepts any absolute URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the scheme (case-insensitive).
    #[must_use = "builder methods must be chained or built"]
    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = lowercased(schemes);
        self
    }

    /// The host must end with one of `suffixes`.
    #[must_use = "builder methods must be chained or built"]
    pub fn domain_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_suffixes = lowercased(suffixes);
        self
    }

    /// Requires the path to start with `prefix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Every key must appear in the query string.
    #[must_use = "builder methods must be chained or built"]
    pub fn required_query<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_query = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Requires a `#fragment`.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_fragment(mut self) -> Self {
        self.require_fragment = true;
        self
    }

    /// Restricts the port. A URL without an explicit port is checked
    /// against its scheme's default port.
    #[must_use = "builder methods must be chained or built"]
    pub fn ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.ports = ports.into_iter().collect();
        self
    }

    /// The host must be an IPv4 or IPv6 literal.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_ip_host(mut self) -> Self {
        self.require_ip_host = true;
        self
    }

    fn check(&self, url: &url::Url) -> Result<(), ValidationError> {
        if !self.schemes.is_empty() && !self.schemes.iter().any(|s| s == url.scheme()) {
            return Err(ValidationError::new(
                "url_scheme",
                format!("url scheme '{}' is not allowed", url.scheme()),
            )
            .with_param("allowed", self.schemes.join(",")));
        }

        if !self.domain_suffixes.is_empty() {
            let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
            if !self.domain_suffixes.iter().any(|suffix| host.ends_with(suffix.as_str())) {
                return Err(ValidationError::new(
                    "url_domain",
                    format!("url host '{host}' is not in an allowed domain"),
                )
                .with_param("allowed", self.domain_suffixes.join(",")));
            }
        }

        if let Some(prefix) = &self.path_prefix
            && !url.path().starts_with(prefix.as_str())
        {
            return Err(ValidationError::new(
                "url_path",
                format!("url path must start with '{prefix}'"),
            ));
        }

        if let Some(missing) = self
            .required_query
            .iter()
            .find(|key| !url.query_pairs().any(|(k, _)| k == key.as_str()))
        {
            return Err(ValidationError::new(
                "url_query",
                format!("missing required query parameter '{missing}'"),
            )
            .with_param("key", missing.clone()));
        }

        if self.require_fragment && url.fragment().is_none_or(str::is_empty) {
            return Err(ValidationError::new("url_fragment", "url must include a fragment"));
        }

        if !self.ports.is_empty() {
            match url.port_or_known_default() {
                Some(port) if self.ports.contains(&port) => {}
                Some(port) => {
                    return Err(ValidationError::new(
                        "url_port",
                        format!("url port {port} is not allowed"),
                    ));
                }
                None => return Err(ValidationError::new("url_port", "url must specify a port")),
            }
        }

        if self.require_ip_host && !matches!(url.host(), Some(Host::Ipv4(_) | Host::Ipv6(_))) {
            return Err(ValidationError::new(
                "url_ip_host",
                "url host must be an IP address",
            ));
        }

        Ok(())
    }
}

impl Validate for Url {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let parsed = url::Url::parse(input).map_err(|e| {
            ValidationError::invalid_format("url").with_param("reason", e.to_string())
        })?;
        self.check(&parsed)
    }
}

/// Any absolute URL.
#[must_use]
pub fn url() -> Url {
    Url::new()
}
