//! Macros for declaring rules and composing validator lists.
//!
//! - [`rule!`](crate::rule) declares a leaf validator: struct, `Validate`
//!   impl, constructor and an optional factory function.
//! - [`all_of!`](crate::all_of) / [`any_of!`](crate::any_of) box a mixed list
//!   of validators into an [`AllOf`](crate::combinators::AllOf) /
//!   [`AnyOf`](crate::combinators::AnyOf).
//!
//! ```
//! use fieldcheck::foundation::{Validate, ValidationError};
//! use fieldcheck::rule;
//!
//! rule! {
//!     /// Rejects odd numbers.
//!     pub Even for u32;
//!     check(input) { input % 2 == 0 }
//!     fail(input) { ValidationError::new("even", format!("{input} is odd")) }
//!     fn even();
//! }
//!
//! rule! {
//!     #[derive(Copy, PartialEq, Eq)]
//!     pub DivisibleBy { divisor: u32 } for u32;
//!     check(self, input) { input % self.divisor == 0 }
//!     fail(self, input) {
//!         ValidationError::new("divisible_by", format!("must be divisible by {}", self.divisor))
//!     }
//!     fn divisible_by(divisor: u32);
//! }
//!
//! assert!(even().validate(&4).is_ok());
//! assert_eq!(divisible_by(3).validate(&4).unwrap_err().message, "must be divisible by 3");
//! ```

/// Declares a leaf validator.
///
/// `#[derive(Debug, Clone)]` is always applied; unit rules also derive
/// `Copy, PartialEq, Eq, Hash`. Extra derives go in a `#[derive(...)]`
/// attribute. The `check` block decides; `fail` builds the error and only
/// runs when `check` is false.
///
/// | Shape | Header |
/// |---|---|
/// | unit | `pub Name for Input;` |
/// | fields, generated `new` | `pub Name { a: A } for Input;` |
/// | fields, custom `new` | as above, then `new(args) { .. }` after `fail` |
/// | generic with bounds | `pub Name<T: Bound + Other> { a: T } for T;` |
/// | generic marker | `pub Name<T> for Option<T>;` |
///
/// Every shape accepts a trailing `fn factory(args);`.
#[macro_export]
macro_rules! rule {
    // Shared `Validate` impl.
    (@validate [$($generics:tt)*] $ty:ty; $input:ty;
        $s:ident, $inp:ident $check:block;
        $einp:ident $fail:block
    ) => {
        impl<$($generics)*> $crate::foundation::Validate for $ty {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$s, $inp: &Self::Input) -> ::std::result::Result<(), $crate::foundation::ValidationError> {
                if $check {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($fail)
                }
            }
        }
    };

    // Optional factory for a generic rule. The bounds are captured once by
    // the caller so they never repeat inside the optional group.
    (@factory [$($bounds:tt)*] $vis:vis $name:ident<$gen:ident>;) => {};
    (@factory [$($bounds:tt)*] $vis:vis $name:ident<$gen:ident>;
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        #[must_use]
        $vis fn $factory<$($bounds)*>($($farg: $faty),*) -> $name<$gen> {
            $name::new($($farg),*)
        }
    };

    // Unit rule.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        check($inp:ident) $check:block
        fail($einp:ident) $fail:block
        $(fn $factory:ident();)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        $crate::rule!(@validate [] $name; $input; self, $inp $check; $einp $fail);

        $(
            #[must_use]
            $vis const fn $factory() -> $name {
                $name
            }
        )?
    };

    // Fields with a custom constructor.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($s:ident, $inp:ident) $check:block
        fail($s2:ident, $einp:ident) $fail:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        $(fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::rule!(@validate [] $name; $input; $s, $inp $check; $einp $fail);

        $(
            #[must_use]
            $vis fn $factory($($farg: $faty),*) -> $name {
                $name::new($($farg),*)
            }
        )?
    };

    // Fields with a generated constructor.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($s:ident, $inp:ident) $check:block
        fail($s2:ident, $einp:ident) $fail:block
        $(fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);)?
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            check($s, $inp) $check
            fail($s2, $einp) $fail
            new($($field: $fty),+) { Self { $($field),+ } }
            $(fn $factory($($farg: $faty),*);)?
        }
    };

    // Generic with bounds and a generated constructor.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident: $first:ident $(+ $rest:ident)*>
            { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        check($s:ident, $inp:ident) $check:block
        fail($s2:ident, $einp:ident) $fail:block
        $($factory:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name<$gen> {
            $(pub $field: $fty,)+
        }

        impl<$gen: $first $(+ $rest)*> $name<$gen> {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        $crate::rule!(@validate [$gen: $first $(+ $rest)*] $name<$gen>; $input; $s, $inp $check; $einp $fail);

        $crate::rule!(@factory [$gen: $first $(+ $rest)*] $vis $name<$gen>; $($factory)*);
    };

    // Generic marker without fields.
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident> for $input:ty;
        check($inp:ident) $check:block
        fail($einp:ident) $fail:block
        $(fn $factory:ident();)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name<$gen> {
            _marker: ::std::marker::PhantomData<fn(&$gen)>,
        }

        impl<$gen> $name<$gen> {
            #[must_use]
            pub const fn new() -> Self {
                Self { _marker: ::std::marker::PhantomData }
            }
        }

        impl<$gen> ::std::default::Default for $name<$gen> {
            fn default() -> Self {
                Self::new()
            }
        }

        $crate::rule!(@validate [$gen] $name<$gen>; $input; self, $inp $check; $einp $fail);

        $(
            #[must_use]
            $vis const fn $factory<$gen>() -> $name<$gen> {
                $name::new()
            }
        )?
    };
}

/// Boxes each argument into an [`AllOf`](crate::combinators::AllOf).
///
/// ```
/// use fieldcheck::all_of;
/// use fieldcheck::prelude::*;
///
/// let username = all_of![min_length(3), max_length(16), not_empty()];
/// assert_eq!(username.validate("ab").unwrap_err().messages().len(), 1);
/// ```
#[macro_export]
macro_rules! all_of {
    ($($validator:expr),+ $(,)?) => {
        $crate::combinators::AllOf::new(::std::vec![
            $($crate::foundation::ValidateExt::boxed($validator)),+
        ])
    };
}

/// Boxes each argument into an [`AnyOf`](crate::combinators::AnyOf).
#[macro_export]
macro_rules! any_of {
    ($($validator:expr),+ $(,)?) => {
        $crate::combinators::AnyOf::new(::std::vec![
            $($crate::foundation::ValidateExt::boxed($validator)),+
        ])
    };
}
