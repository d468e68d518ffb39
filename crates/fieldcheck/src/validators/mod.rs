//! Built-in leaf rules
//!
//! # Categories
//!
//! - **Numeric**: [`Min`], [`Max`], [`InRange`], [`Positive`], [`Negative`]
//! - **Equality**: [`Equals`], [`NotEquals`]
//! - **Presence**: [`Required`], [`IsTrue`], [`IsFalse`]
//! - **Strings**: length ([`MinLength`], [`MaxLength`], [`LengthRange`],
//!   [`NotEmpty`], [`MinChars`]) and content ([`Contains`], [`StartsWith`],
//!   [`EndsWith`], [`MatchesRegex`])
//! - **Bytes**: [`MinBytes`], [`MaxBytes`], [`ContainsBytes`]
//! - **Collections**: slices ([`MinSize`], [`MaxSize`], [`NotEmptySlice`],
//!   [`ContainsElement`], [`Unique`]) and maps ([`MinEntries`],
//!   [`MaxEntries`], [`HasKey`], [`NoKey`])
//! - **Time**: [`Before`], [`After`], [`Between`], [`SameInstant`]
//! - **Formats**: see [`format`]
//!
//! String lengths are byte lengths, except [`MinChars`] and
//! [`Password`], which count characters.
//!
//! ```
//! use fieldcheck::prelude::*;
//!
//! let username = not_empty().and(length_range(3, 16)).and(matches_regex("^[a-z0-9_]+$").unwrap());
//! let age = in_range(18, 120);
//!
//! assert!(username.validate("lyon_nee").is_ok());
//! assert!(age.validate(&17).is_err());
//! ```

pub mod bytes;
pub mod collection;
pub mod content;
pub mod equality;
pub mod format;
pub mod length;
pub mod numeric;
pub mod required;
pub mod temporal;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use bytes::{ContainsBytes, MaxBytes, MinBytes, contains_bytes, max_bytes, min_bytes};
pub use collection::{
    ContainsElement, EmptySlice, HasKey, MaxEntries, MaxSize, MinEntries, MinSize, NoEntries,
    NoKey, NotEmptySlice, Unique, contains_element, empty_slice, has_key, max_entries, max_size,
    min_entries, min_size, no_entries, no_key, not_empty_slice, unique,
};
pub use content::{
    Contains, EndsWith, MatchesRegex, StartsWith, contains, ends_with, matches_regex, starts_with,
};
pub use equality::{Equals, NotEquals, equals, not_equals};
pub use format::{
    CardExpiry, CardType, CarrierPrefix, Cidr, Country, CreditCard, DisposableEmail, Email,
    EmailDomain, EmailUsername, IdCard, InCidr, InIpRange, IpAddress, IpKind, Password, Phone,
    PhoneMode, Postcode, Url, card_expiry, carrier_prefix, cidr, credit_card, email, email_domain,
    email_username, id_card, ip, ipv4, ipv6, not_disposable, password, postcode, private_ip,
    public_ip, url,
};
pub use length::{
    LengthRange, MaxLength, MinChars, MinLength, NotEmpty, length_range, max_length, min_chars,
    min_length, not_empty,
};
pub use numeric::{InRange, Max, Min, Negative, Positive, in_range, max, min, negative, positive};
pub use required::{IsFalse, IsTrue, Required, is_false, is_true, required};
pub use temporal::{After, Before, Between, SameInstant, after, before, between, same_instant};
