//! Validator combinators
//!
//! Higher-order validators built from other validators. Every combinator
//! is a plain struct implementing [`Validate`](crate::foundation::Validate)
//! with a matching factory function, and most are also reachable through
//! [`ValidateExt`](crate::foundation::ValidateExt).
//!
//! | Family | Types |
//! |---|---|
//! | logic | [`And`], [`Or`], [`Not`], [`AllOf`], [`AnyOf`], [`NoneOf`] |
//! | wrappers | [`WithMessage`], [`Named`], [`Optional`] |
//! | conditional | [`When`], [`Unless`], [`IfElse`], [`Switch`] |
//! | dependency | [`DependsOn`], [`DependsOnAll`], [`DependsOnAny`], [`DependsOnCondition`] |
//! | chain | [`Chain`] |
//! | transform | [`Transform`], [`TryTransform`], [`TransformOr`], [`TransformEach`], [`TransformValues`], [`Filter`] |
//! | aggregate | [`Aggregate`], [`AggregateWeighted`], [`AggregateThreshold`], [`AggregateWith`] |
//! | batch | [`Each`], [`AnyElement`] |
//! | cache | `Cached`, `TtlCached` (feature `caching`) |

pub mod aggregate;
#[cfg(feature = "caching")]
pub mod cached;
pub mod chain;
pub mod conditional;
pub mod dependency;
pub mod each;
pub mod logic;
pub mod transform;
pub mod wrap;

pub use aggregate::{
    Aggregate, AggregateThreshold, AggregateWeighted, AggregateWith, WEIGHTED_THRESHOLD, Weighted,
    aggregate, aggregate_threshold, aggregate_with, weighted,
};
#[cfg(feature = "caching")]
pub use cached::{Cached, TtlCached, TtlMode};
pub use chain::Chain;
pub use conditional::{IfElse, Switch, Unless, When, if_else, unless, when};
pub use dependency::{
    DependsOn, DependsOnAll, DependsOnAny, DependsOnCondition, depends_on, depends_on_all,
    depends_on_any, depends_on_condition,
};
pub use each::{AnyElement, Each, any_element, each, each_fail_fast, validate_all, validate_any};
pub use logic::{AllOf, And, AnyOf, NoneOf, Not, Or, all_of, any_of, none_of, not};
pub use transform::{
    Filter, Transform, TransformEach, TransformOr, TransformValues, TryTransform, filter, transform,
    transform_each, transform_or, transform_values, try_transform,
};
pub use wrap::{Named, Optional, WithMessage, optional, with_message};
