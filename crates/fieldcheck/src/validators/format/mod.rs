//! Real-world string formats
//!
//! - **Contact**: [`Email`], [`Phone`]
//! - **Network**: [`Url`], [`IpAddress`], [`InCidr`], [`InIpRange`]
//! - **Postal**: [`Postcode`]
//! - **Financial**: [`CreditCard`], [`CardExpiry`]
//! - **Identity**: [`IdCard`]
//! - **Secrets**: [`Password`]
//!
//! Every rule validates `str`. Rules that take a list of allowed values
//! (domains, schemes, ports) are built once and shared.

mod credit_card;
mod email;
mod id_card;
mod ip;
mod password;
mod phone;
mod postcode;
mod url;

pub use credit_card::{CardExpiry, CardType, CreditCard, card_expiry, credit_card};
pub use email::{
    DisposableEmail, Email, EmailDomain, EmailUsername, email, email_domain, email_username,
    not_disposable,
};
pub use id_card::{IdCard, id_card};
pub use ip::{
    Cidr, InCidr, InIpRange, IpAddress, IpKind, cidr, ip, ipv4, ipv6, private_ip, public_ip,
};
pub use password::{Password, password};
pub use phone::{CarrierPrefix, Phone, PhoneMode, carrier_prefix};
pub use postcode::{Country, Postcode, postcode};
pub use self::url::{Url, url};

/// Removes spaces and dashes, the separators every form-entry rule here
/// tolerates.
pub(crate) fn strip_separators(input: &str) -> String {
    input.chars().filter(|c| *c != ' ' && *c != '-').collect()
}
