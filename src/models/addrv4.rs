//! IPv4 address and CIDR notation value type.
//!
//! Provides [`AddrV4`], an IPv4 address paired with a prefix length, along with
//! the netmask, network, broadcast and containment calculations.

use crate::error::{InvalidAddressError, InvalidByteError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Address used when none is given.
pub const DEFAULT_ADDRESS: u32 = 0;
/// Prefix length used when none is given.
pub const DEFAULT_PREFIX: u8 = 32;
/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;
/// Maximum value of a single octet.
pub const MAX_OCTET: u8 = 255;

/// Convert a CIDR prefix length to a netmask as u32.
///
/// Returns `None` when the length exceeds [`MAX_LENGTH`].
///
/// # Examples
/// ```
/// use addrv4::models::cidr_mask;
/// assert_eq!(cidr_mask(22), Some(0xFFFFFC00));
/// assert_eq!(cidr_mask(0), Some(0));
/// assert_eq!(cidr_mask(33), None);
/// ```
pub fn cidr_mask(len: u8) -> Option<u32> {
    if len > MAX_LENGTH {
        return None;
    }
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;

    let mask = (all_bits >> right_len) << right_len;

    Some(mask as u32)
}

/// The accepted representations of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrInput<'a> {
    /// No address; [`DEFAULT_ADDRESS`] is used.
    Absent,
    /// Dotted-decimal text with an optional `/prefix` suffix.
    Text(&'a str),
    /// An integer, valid in `0..=0xFFFFFFFF`.
    Integer(i128),
}

impl fmt::Display for AddrInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddrInput::Absent => write!(f, "{DEFAULT_ADDRESS}"),
            AddrInput::Text(text) => f.write_str(text),
            AddrInput::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl<'a> From<&'a str> for AddrInput<'a> {
    fn from(text: &'a str) -> Self {
        AddrInput::Text(text)
    }
}

impl<'a> From<&'a String> for AddrInput<'a> {
    fn from(text: &'a String) -> Self {
        AddrInput::Text(text.as_str())
    }
}

macro_rules! impl_integer_input {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AddrInput<'_> {
                fn from(n: $t) -> Self {
                    AddrInput::Integer(i128::from(n))
                }
            }
        )*
    };
}

impl_integer_input!(i32, u32, i64, u64);

impl<'a, T: Into<AddrInput<'a>>> From<Option<T>> for AddrInput<'a> {
    fn from(address: Option<T>) -> Self {
        address.map_or(AddrInput::Absent, Into::into)
    }
}

/// IPv4 address with a CIDR prefix length.
///
/// Equality, hashing and ordering only look at the octets and the prefix.
#[derive(Clone)]
pub struct AddrV4 {
    octets: [u8; 4],
    prefix: u8,
    cache: OnceLock<u32>,
}

impl AddrV4 {
    /// Create an [`AddrV4`] from text, an integer or nothing.
    ///
    /// An explicit `prefix` wins over a `/prefix` suffix in the text; without
    /// either the prefix is [`DEFAULT_PREFIX`].
    ///
    /// # Examples
    /// ```
    /// use addrv4::AddrV4;
    /// let addr = AddrV4::new("1.1.1.1/24", Some(22)).unwrap();
    /// assert_eq!(addr.to_string(), "1.1.1.1/22");
    /// ```
    pub fn new<'a>(
        address: impl Into<AddrInput<'a>>,
        prefix: Option<u8>,
    ) -> Result<AddrV4, InvalidAddressError> {
        let mut addr = AddrV4::default();
        addr.set(address, prefix)?;
        Ok(addr)
    }

    /// Create an [`AddrV4`] from its integer value.
    pub fn from_u32(value: u32, prefix: Option<u8>) -> Result<AddrV4, InvalidAddressError> {
        AddrV4::new(value, prefix)
    }

    fn from_parts(octets: [u8; 4], prefix: u8) -> AddrV4 {
        AddrV4 {
            octets,
            prefix,
            cache: OnceLock::new(),
        }
    }

    /// Replace this address with a new value.
    ///
    /// On failure the current value is kept.
    pub fn set<'a>(
        &mut self,
        address: impl Into<AddrInput<'a>>,
        prefix: Option<u8>,
    ) -> Result<&mut Self, InvalidAddressError> {
        let address = address.into();
        let (octets, prefix) = parse_input(address, prefix).map_err(|cause| {
            log::debug!("Rejected Addr {address}: {cause}");
            InvalidAddressError::new(address)
        })?;

        self.octets = octets;
        self.prefix = prefix;
        self.cache = OnceLock::new();
        Ok(self)
    }

    /// The four octets, most significant first.
    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// The prefix length (0-32).
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The address as a big-endian u32, computed once.
    pub fn to_int(&self) -> u32 {
        *self.cache.get_or_init(|| {
            let value = u32::from_be_bytes(self.octets);
            log::trace!("Computed integer {value} for {self}");
            value
        })
    }

    /// The mask of this prefix length, as a /32 address.
    pub fn netmask(&self) -> AddrV4 {
        // prefix is validated on construction
        let mask = cidr_mask(self.prefix).unwrap_or(u32::MAX);
        AddrV4::from_parts(mask.to_be_bytes(), MAX_LENGTH)
    }

    /// The address with all host bits cleared, as a /32 address.
    pub fn network(&self) -> AddrV4 {
        let network = self.to_int() & self.netmask().to_int();
        AddrV4::from_parts(network.to_be_bytes(), MAX_LENGTH)
    }

    /// The address with all host bits set, as a /32 address.
    pub fn broadcast(&self) -> AddrV4 {
        let broadcast = self.to_int() | !self.netmask().to_int();
        AddrV4::from_parts(broadcast.to_be_bytes(), MAX_LENGTH)
    }

    /// Check if `other` is a subnet (or host) nested within this subnet.
    ///
    /// A shorter prefix is never contained, even when the addresses overlap.
    pub fn contains(&self, other: &AddrV4) -> bool {
        other.prefix >= self.prefix
            && other.network().to_int() & self.netmask().to_int() == self.network().to_int()
    }
}

fn parse_input(
    address: AddrInput<'_>,
    prefix: Option<u8>,
) -> Result<([u8; 4], u8), InvalidByteError> {
    match address {
        AddrInput::Absent => parse_integer(i128::from(DEFAULT_ADDRESS), prefix),
        AddrInput::Text(text) => parse_text(text, prefix),
        AddrInput::Integer(n) => parse_integer(n, prefix),
    }
}

fn parse_text(text: &str, prefix: Option<u8>) -> Result<([u8; 4], u8), InvalidByteError> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() > 2 {
        return Err(InvalidByteError::Separators);
    }

    let prefix = match (prefix, parts.get(1)) {
        (Some(prefix), _) => check_prefix(prefix)?,
        (None, Some(suffix)) => parse_byte(suffix, MAX_LENGTH)?,
        (None, None) => DEFAULT_PREFIX,
    };

    let octets = parts[0]
        .split('.')
        .map(|n| parse_byte(n, MAX_OCTET))
        .collect::<Result<Vec<u8>, _>>()?;
    let octets: [u8; 4] = octets
        .try_into()
        .map_err(|octets: Vec<u8>| InvalidByteError::OctetCount {
            expected: 4,
            found: octets.len(),
        })?;

    Ok((octets, prefix))
}

fn parse_integer(n: i128, prefix: Option<u8>) -> Result<([u8; 4], u8), InvalidByteError> {
    let value = u32::try_from(n).map_err(|_| InvalidByteError::OutOfRange { value: n })?;
    let prefix = check_prefix(prefix.unwrap_or(DEFAULT_PREFIX))?;
    Ok((value.to_be_bytes(), prefix))
}

fn check_prefix(prefix: u8) -> Result<u8, InvalidByteError> {
    if prefix > MAX_LENGTH {
        return Err(InvalidByteError::Value {
            value: prefix.to_string(),
            max: MAX_LENGTH,
        });
    }
    Ok(prefix)
}

/// Parse a plain decimal number no larger than `max`.
fn parse_byte(n: &str, max: u8) -> Result<u8, InvalidByteError> {
    let invalid = || InvalidByteError::Value {
        value: n.to_string(),
        max,
    };

    // str::parse would accept a leading '+'
    if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u64 = n.parse().map_err(|_| invalid())?;
    u8::try_from(value)
        .ok()
        .filter(|value| *value <= max)
        .ok_or_else(invalid)
}

impl Default for AddrV4 {
    fn default() -> Self {
        AddrV4::from_parts(DEFAULT_ADDRESS.to_be_bytes(), DEFAULT_PREFIX)
    }
}

impl fmt::Debug for AddrV4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AddrV4")
            .field("octets", &self.octets)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl fmt::Display for AddrV4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.octets), self.prefix)
    }
}

impl PartialEq for AddrV4 {
    fn eq(&self, other: &AddrV4) -> bool {
        self.octets == other.octets && self.prefix == other.prefix
    }
}

impl Eq for AddrV4 {}

impl Hash for AddrV4 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.octets.hash(state);
        self.prefix.hash(state);
    }
}

impl PartialOrd for AddrV4 {
    fn partial_cmp(&self, other: &AddrV4) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AddrV4 {
    fn cmp(&self, other: &AddrV4) -> Ordering {
        (self.octets, self.prefix).cmp(&(other.octets, other.prefix))
    }
}

impl FromStr for AddrV4 {
    type Err = InvalidAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddrV4::new(s, None)
    }
}

impl TryFrom<&str> for AddrV4 {
    type Error = InvalidAddressError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        AddrV4::new(s, None)
    }
}

impl TryFrom<i64> for AddrV4 {
    type Error = InvalidAddressError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        AddrV4::new(n, None)
    }
}

impl From<u32> for AddrV4 {
    fn from(value: u32) -> Self {
        AddrV4::from_parts(value.to_be_bytes(), DEFAULT_PREFIX)
    }
}

impl From<Ipv4Addr> for AddrV4 {
    fn from(addr: Ipv4Addr) -> Self {
        AddrV4::from_parts(addr.octets(), DEFAULT_PREFIX)
    }
}

impl From<AddrV4> for Ipv4Addr {
    fn from(addr: AddrV4) -> Self {
        Ipv4Addr::from(addr.octets)
    }
}

impl Serialize for AddrV4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", Ipv4Addr::from(self.octets), self.prefix);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for AddrV4 {
    fn deserialize<D>(deserializer: D) -> Result<AddrV4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
