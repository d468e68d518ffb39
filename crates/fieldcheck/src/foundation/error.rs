//! Error types for validation failures
//!
//! A [`ValidationError`] describes either a single failed rule or an
//! aggregate built by a combinator from several child failures.
//! [`ValidationErrors`] is the accumulator combinators collect into.
//!
//! All string fields use `Cow<'static, str>` so static codes and messages
//! never allocate.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Code carried by every aggregate error built from [`ValidationErrors`].
pub const AGGREGATE_CODE: &str = "validation_errors";

/// Separator placed between child messages when an aggregate is rendered.
pub const MESSAGE_SEPARATOR: &str = "; ";

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure.
///
/// # Examples
///
/// ```
/// use fieldcheck::foundation::ValidationError;
///
/// let error = ValidationError::new("min", "value is too small")
///     .with_field("age")
///     .with_param("min", "18");
///
/// assert_eq!(error.to_string(), "age: value is too small");
/// assert_eq!(error.param("min"), Some("18"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Machine-readable error code, e.g. `"min"`, `"email"`, `"timeout"`.
    pub code: Cow<'static, str>,

    /// Human-readable message.
    ///
    /// For aggregates this is the child renders joined with `"; "`.
    pub message: Cow<'static, str>,

    /// Field the failure belongs to, if one was named.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key/value parameters describing the failure.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Child failures, in the order they were collected.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Sets the field name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Appends a single nested error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_error(mut self, error: ValidationError) -> Self {
        self.nested.push(error);
        self
    }

    /// Prefixes the rendered error with a context tag such as `element[3]`.
    ///
    /// The code is preserved so [`kind`](Self::kind) still reports the
    /// original failure class.
    ///
    /// - A single failure becomes `"<context>: <render>"` with the original
    ///   error as its only nested child.
    /// - An aggregate stays an aggregate with the same params; each child is
    ///   tagged instead (field included), so [`messages`](Self::messages)
    ///   keeps the tag on every entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(self, context: impl fmt::Display) -> Self {
        if self.kind() != ErrorKind::Aggregate {
            return Self::new(self.code.clone(), format!("{context}: {self}")).with_nested_error(self);
        }

        let prefix = match &self.field {
            Some(field) => format!("{context}: {field}"),
            None => context.to_string(),
        };
        let nested: Vec<Self> = self
            .nested
            .into_iter()
            .map(|child| child.with_context(&prefix))
            .collect();
        let message = nested
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR);

        Self {
            code: self.code,
            message: message.into(),
            field: None,
            params: self.params,
            nested,
        }
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.code.as_ref() {
            "type_mismatch" => ErrorKind::TypeMismatch,
            AGGREGATE_CODE => ErrorKind::Aggregate,
            "timeout" | "deadline_exceeded" => ErrorKind::Timeout,
            "cancelled" => ErrorKind::Cancelled,
            _ => ErrorKind::Rule,
        }
    }

    /// Returns the individual failure messages.
    ///
    /// An aggregate yields the render of each child in order; any other
    /// error yields its own message.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        if self.kind() == ErrorKind::Aggregate {
            self.nested.iter().map(ToString::to_string).collect()
        } else {
            vec![self.message.to_string()]
        }
    }

    /// Flattens the error tree depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidationError> {
        let mut result = vec![self];
        for nested in &self.nested {
            result.extend(nested.flatten());
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure classes a caller may want to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A rule rejected the value.
    Rule,
    /// An untyped input did not have the expected type.
    TypeMismatch,
    /// Several failures combined by a combinator.
    Aggregate,
    /// A timeout or deadline expired before the validator finished.
    Timeout,
    /// An external cancellation signal fired first.
    Cancelled,
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error.
    pub fn required() -> Self {
        Self::new("required", "the value is required")
    }

    /// Creates a "min_length" error.
    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("length must be at least {min}, got {actual}"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "max_length" error.
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("length must be at most {max}, got {actual}"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates an "invalid_format" error.
    pub fn invalid_format(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new("invalid_format", format!("invalid {expected} format")).with_param("expected", expected)
    }

    /// Creates a "type_mismatch" error.
    pub fn type_mismatch(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new("type_mismatch", format!("type mismatch: expected {expected}"))
            .with_param("expected", expected)
    }

    /// Creates an "out_of_range" error.
    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new("out_of_range", format!("value must be between {min} and {max}"))
            .with_param("min", min.to_string())
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "timeout" error.
    pub fn timeout(after: Duration) -> Self {
        Self::new("timeout", format!("validation timed out after {after:?}"))
            .with_param("timeout_ms", after.as_millis().to_string())
    }

    /// Creates a "deadline_exceeded" error.
    pub fn deadline_exceeded() -> Self {
        Self::new("deadline_exceeded", "validation deadline exceeded")
    }

    /// Creates a "cancelled" error.
    pub fn cancelled() -> Self {
        Self::new("cancelled", "validation cancelled")
    }

    /// Creates a "custom" error with a message.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }
}

// ============================================================================
// ERROR ACCUMULATOR
// ============================================================================

/// Collects failures under an optional field name.
///
/// Presence of failure is decided by [`has_errors`](Self::has_errors), never
/// by the rendered text.
///
/// # Examples
///
/// ```
/// use fieldcheck::foundation::ValidationErrors;
///
/// let mut errors = ValidationErrors::named("password");
/// assert_eq!(errors.render(), "");
///
/// errors.add_error("too short");
/// errors.add_error("missing digit");
/// assert!(errors.has_errors());
/// assert_eq!(errors.render(), "password: too short; missing digit");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    field: Option<Cow<'static, str>>,
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty, unnamed accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty accumulator for a named field.
    pub fn named(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: Some(field.into()),
            errors: Vec::new(),
        }
    }

    /// Returns the field name, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Appends a failure.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends a plain failure message.
    pub fn add_error(&mut self, message: impl Into<Cow<'static, str>>) {
        self.errors.push(ValidationError::custom(message));
    }

    /// Returns true if at least one failure was collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of collected failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the collected failures.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the render of each collected failure, in insertion order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Renders `"<field>: <msg1>; <msg2>"`, or an empty string if nothing
    /// was collected.
    #[must_use]
    pub fn render(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        let joined = self.messages().join(MESSAGE_SEPARATOR);
        match &self.field {
            Some(field) => format!("{field}: {joined}"),
            None => joined,
        }
    }

    /// Converts the accumulator into one aggregate error.
    pub fn into_error(self) -> ValidationError {
        let message = self.messages().join(MESSAGE_SEPARATOR);
        let error = ValidationError::new(AGGREGATE_CODE, message)
            .with_param("count", self.errors.len().to_string())
            .with_nested(self.errors);
        match self.field {
            Some(field) => error.with_field(field),
            None => error,
        }
    }

    /// `Ok(())` if nothing was collected, otherwise the aggregate error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.has_errors() {
            Err(self.into_error())
        } else {
            Ok(())
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            field: None,
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// BUILD ERROR
// ============================================================================

/// Rejected validator configuration, reported when a validator is built.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A regular expression failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A success-rate threshold outside `[0, 1]`.
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// A CIDR block that does not parse.
    #[error("invalid CIDR block `{0}`")]
    InvalidCidr(String),

    /// An IP address that does not parse.
    #[error("invalid IP address `{0}`")]
    InvalidAddress(String),

    /// A range whose bounds are of different families or inverted.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A setting that must be non-zero.
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
}

// ============================================================================
// TESTS
// ============================================================================
