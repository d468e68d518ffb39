//! IP address rules.
//!
//! Addresses parse with `std::net`. IPv4-mapped IPv6 addresses
//! (`::ffff:a.b.c.d`) are treated as the IPv4 address they carry.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::foundation::{BuildError, Validate, ValidationError};

fn parse_ip(input: &str) -> Result<IpAddr, ValidationError> {
    input
        .trim()
        .parse::<IpAddr>()
        .map(|addr| addr.to_canonical())
        .map_err(|_| ValidationError::invalid_format("ip address"))
}

fn is_private_v4(addr: Ipv4Addr) -> bool {
    addr.is_private() || addr.is_link_local() || addr.is_loopback()
}

fn is_private_v6(addr: Ipv6Addr) -> bool {
    let first = addr.segments()[0];
    // fc00::/7 unique local, fe80::/10 link local
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80 || addr.is_loopback()
}

/// Private, link-local or loopback.
fn is_private(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => is_private_v4(v4),
        IpAddr::V6(v6) => is_private_v6(v6),
    }
}

// ============================================================================
// ADDRESS KIND
// ============================================================================

/// Which addresses an [`IpAddress`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IpKind {
    #[default]
    Any,
    V4,
    V6,
    /// RFC 1918 / RFC 4193 ranges plus link-local and loopback.
    Private,
    /// Anything not [`IpKind::Private`].
    Public,
}

/// A textual IP address of the configured [`IpKind`].
///
/// ```
/// use fieldcheck::validators::{ip, ipv4, private_ip};
/// use fieldcheck::foundation::Validate;
///
/// assert!(ip().validate("2001:db8::1").is_ok());
/// assert!(ipv4().validate("2001:db8::1").is_err());
/// assert!(private_ip().validate("192.168.1.10").is_ok());
/// assert!(private_ip().validate("8.8.8.8").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IpAddress {
    kind: IpKind,
}

impl IpAddress {
    #[must_use]
    pub const fn new(kind: IpKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(&self) -> IpKind {
        self.kind
    }
}

impl Validate for IpAddress {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let addr = parse_ip(input)?;
        let (ok, code, message) = match self.kind {
            IpKind::Any => (true, "", ""),
            IpKind::V4 => (addr.is_ipv4(), "ipv4", "must be an IPv4 address"),
            IpKind::V6 => (addr.is_ipv6(), "ipv6", "must be an IPv6 address"),
            IpKind::Private => (is_private(addr), "private_ip", "must be a private IP address"),
            IpKind::Public => (!is_private(addr), "public_ip", "must be a public IP address"),
        };
        if ok {
            Ok(())
        } else {
            Err(ValidationError::new(code, message).with_param("address", addr.to_string()))
        }
    }
}

/// Any IPv4 or IPv6 address.
#[must_use]
pub const fn ip() -> IpAddress {
    IpAddress::new(IpKind::Any)
}

/// IPv4 address only.
#[must_use]
pub const fn ipv4() -> IpAddress {
    IpAddress::new(IpKind::V4)
}

/// IPv6 address only.
#[must_use]
pub const fn ipv6() -> IpAddress {
    IpAddress::new(IpKind::V6)
}

/// Only addresses in private ranges, loopback included.
#[must_use]
pub const fn private_ip() -> IpAddress {
    IpAddress::new(IpKind::Private)
}

/// Only addresses outside the private ranges.
#[must_use]
pub const fn public_ip() -> IpAddress {
    IpAddress::new(IpKind::Public)
}

// ============================================================================
// CIDR
// ============================================================================

/// A parsed `address/prefix` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Block {
    network: IpAddr,
    prefix: u8,
}

impl Block {
    fn parse(text: &str) -> Option<Self> {
        let (addr, prefix) = text.trim().split_once('/')?;
        let network = addr.parse::<IpAddr>().ok()?.to_canonical();
        let prefix: u8 = prefix.parse().ok()?;
        let width = if network.is_ipv4() { 32 } else { 128 };
        (prefix <= width).then_some(Self { network, prefix })
    }

    fn contains(&self, addr: IpAddr) -> bool {
        match (self.network, addr) {
            (IpAddr::V4(net), IpAddr::V4(a)) => {
                let mask = u32::MAX.checked_shl(32 - u32::from(self.prefix)).unwrap_or(0);
                u32::from(net) & mask == u32::from(a) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(a)) => {
                let mask = u128::MAX.checked_shl(128 - u32::from(self.prefix)).unwrap_or(0);
                u128::from(net) & mask == u128::from(a) & mask
            }
            _ => false,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

crate::rule! {
    /// The input must be a well-formed CIDR block such as `10.0.0.0/8`.
    pub Cidr for str;
    check(input) { Block::parse(input).is_some() }
    fail(input) { ValidationError::invalid_format("CIDR") }
    fn cidr();
}

/// The address must fall inside a CIDR block.
///
/// ```
/// use fieldcheck::validators::InCidr;
/// use fieldcheck::foundation::Validate;
///
/// let office = InCidr::new("10.20.0.0/16").unwrap();
/// assert!(office.validate("10.20.3.4").is_ok());
/// assert!(office.validate("10.21.0.1").is_err());
/// assert!(InCidr::new("10.0.0.0/33").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InCidr {
    block: Block,
}

impl InCidr {
    /// # Errors
    ///
    /// [`BuildError::InvalidCidr`] when `cidr` is not `address/prefix`
    /// with a prefix that fits the address family.
    pub fn new(cidr: &str) -> Result<Self, BuildError> {
        Block::parse(cidr)
            .map(|block| Self { block })
            .ok_or_else(|| BuildError::InvalidCidr(cidr.to_owned()))
    }
}

impl Validate for InCidr {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let addr = parse_ip(input)?;
        if self.block.contains(addr) {
            return Ok(());
        }
        Err(
            ValidationError::new("in_cidr", format!("address {addr} is not within {}", self.block))
                .with_param("cidr", self.block.to_string()),
        )
    }
}

// ============================================================================
// RANGE
// ============================================================================

/// The address must lie in `start..=end`, compared numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InIpRange {
    start: IpAddr,
    end: IpAddr,
}

impl InIpRange {
    /// # Errors
    ///
    /// - [`BuildError::InvalidAddress`] when a bound does not parse.
    /// - [`BuildError::InvalidRange`] when the bounds are of different
    ///   families or `start > end`.
    pub fn new(start: &str, end: &str) -> Result<Self, BuildError> {
        let parse = |text: &str| {
            text.trim()
                .parse::<IpAddr>()
                .map(|addr| addr.to_canonical())
                .map_err(|_| BuildError::InvalidAddress(text.to_owned()))
        };
        let (start, end) = (parse(start)?, parse(end)?);

        if start.is_ipv4() != end.is_ipv4() {
            return Err(BuildError::InvalidRange(format!(
                "{start} and {end} are of different address families"
            )));
        }
        if start > end {
            return Err(BuildError::InvalidRange(format!("{start} is after {end}")));
        }
        Ok(Self { start, end })
    }
}

impl Validate for InIpRange {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let addr = parse_ip(input)?;
        if addr.is_ipv4() != self.start.is_ipv4() {
            return Err(ValidationError::new(
                "ip_version_mismatch",
                "address family does not match the range",
            ));
        }
        if (self.start..=self.end).contains(&addr) {
            return Ok(());
        }
        Err(ValidationError::new(
            "ip_range",
            format!("address {addr} is not within {}-{}", self.start, self.end),
        )
        .with_param("start", self.start.to_string())
        .with_param("end", self.end.to_string()))
    }
}
