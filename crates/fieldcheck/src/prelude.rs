//! Prelude module for convenient imports.
//!
//! `use fieldcheck::prelude::*;` brings in the traits, the error types,
//! the entry points, every built-in rule and the combinator factories.
//!
//! ```
//! use fieldcheck::prelude::*;
//!
//! let tags = min_size::<String>(1).and(max_size(10)).and(unique());
//! let email_field = not_empty().and(email()).named("email");
//!
//! assert!(tags.validate(&["rust".to_owned(), "web".to_owned()]).is_ok());
//! assert!(email_field.validate("lyon.nee@outlook.com").is_ok());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, entry points
// ============================================================================

#[cfg(feature = "async")]
pub use crate::foundation::AsyncValidate;
pub use crate::foundation::{
    BoxedValidator, BuildError, Condition, ErrorKind, SharedValidator, Validate, ValidateExt,
    ValidationError, ValidationErrors, from_fn, get, get_json, get_ref, predicate, validate,
    validate_field, validate_first, validate_with_config,
};

// ============================================================================
// VALIDATORS: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{
    AllOf, And, AnyOf, Chain, IfElse, NoneOf, Not, Optional, Or, Switch, Unless, When,
    WithMessage, aggregate, any_element, depends_on, depends_on_all, depends_on_any,
    depends_on_condition, each, each_fail_fast, filter, if_else, none_of, optional, transform,
    transform_each, try_transform, unless, validate_all, validate_any, when, with_message,
};

// ============================================================================
// CACHING-GATED: Memoized validators
// ============================================================================

#[cfg(feature = "caching")]
pub use crate::combinators::{Cached, TtlCached, TtlMode};
