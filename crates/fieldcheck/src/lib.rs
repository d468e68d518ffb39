//! # fieldcheck
//!
//! Composable field validation: leaf rules, combinators that build bigger
//! rules out of smaller ones, and async wrappers for validators that wait
//! on something.
//!
//! ## Quick Start
//!
//! ```
//! use fieldcheck::prelude::*;
//!
//! let username = min_length(3).and(max_length(16)).named("username");
//! assert!(username.validate("alice").is_ok());
//!
//! // Accumulate every failure for one field
//! let age: i32 = 17;
//! let error = validate_field("age", &age, &[&min(18), &max(30)]).unwrap_err();
//! assert_eq!(error.to_string(), "age: value is too small, must be at least 18");
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`rule!`] macro for leaf rules, [`from_fn`](foundation::from_fn)
//! or [`predicate`](foundation::predicate) for closures, or implement
//! [`Validate`](foundation::Validate) by hand.
//!
//! ## Modules
//!
//! - [`foundation`]: traits, errors and the `validate` / `get` entry points
//! - [`combinators`]: logic, conditional, dependency, chain, transform,
//!   aggregate, batch and cache combinators
//! - [`concurrent`]: async adapters, parallel, race, timeout, retry
//!   (feature `async`)
//! - [`validators`]: built-in rules, including real-world formats
//! - [`config`]: serde configuration for cache, retry and timeout
//!
//! ## Features
//!
//! - `caching` (default): `Cached` and `TtlCached`
//! - `async` (default): the [`concurrent`] module

// ValidationError carries a field, params and nested errors; every rule
// returns it by value.
#![allow(clippy::result_large_err)]
// Nested combinators (And<Or<Not<...>, ...>, ...>) produce long types.
#![allow(clippy::type_complexity)]

pub mod combinators;
#[cfg(feature = "async")]
pub mod concurrent;
pub mod config;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
