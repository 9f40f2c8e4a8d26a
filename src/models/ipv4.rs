//! IPv4 subnet model with classful metrics.
//!
//! Provides [`Ipv4Subnet`] for a canonical IPv4 prefix, along with the mask
//! helpers used to build and walk subnets.

use super::address::{parse_address, parse_prefix, reverse_dns, v4_mask, IPV4_BITS};
use super::range::AddressRange;
use crate::error::{Result, SubnetError};
use itertools::Itertools;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr};

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = IPV4_BITS;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_toolkit::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(SubnetError::InvalidPrefix(format!(
            "/{len} is longer than /{MAX_LENGTH}"
        )))
    } else {
        Ok(v4_mask(len))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Returns the network address of the subnet following `addr/cidr`.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr> {
    let network_bits = u32::from(cut_addr(addr, cidr)?);
    let subnet_size = 1u64 << (MAX_LENGTH - cidr);
    let next_subnet_bits = u64::from(network_bits) + subnet_size;
    u32::try_from(next_subnet_bits)
        .map(Ipv4Addr::from)
        .map_err(|_| SubnetError::Overflow)
}

/// Historic address class, taken from the leading bits of the first octet.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
pub enum Ipv4Class {
    A,
    B,
    C,
    D,
    E,
}

impl Ipv4Class {
    /// Class of `addr`:
    ///
    /// ```text
    /// Class A - 0xxxxxxx
    /// Class B - 10xxxxxx
    /// Class C - 110xxxxx
    /// Class D - 1110xxxx
    /// Class E - 1111xxxx
    /// ```
    ///
    pub fn of(addr: Ipv4Addr) -> Ipv4Class {
        let first = addr.octets()[0];
        if first >> 7 == 0b0 {
            Ipv4Class::A
        } else if first >> 6 == 0b10 {
            Ipv4Class::B
        } else if first >> 5 == 0b110 {
            Ipv4Class::C
        } else if first >> 4 == 0b1110 {
            Ipv4Class::D
        } else {
            Ipv4Class::E
        }
    }
}

impl fmt::Display for Ipv4Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = match self {
            Ipv4Class::A => "A",
            Ipv4Class::B => "B",
            Ipv4Class::C => "C",
            Ipv4Class::D => "D",
            Ipv4Class::E => "E",
        };
        write!(f, "{letter}")
    }
}

/// Canonical IPv4 prefix with an optional display name.
///
/// The name is carried for output only; equality, ordering and hashing use
/// the address and mask.
#[derive(Debug, Clone)]
pub struct Ipv4Subnet {
    addr: Ipv4Addr,
    mask: u8,
    name: Option<String>,
}

impl Ipv4Subnet {
    /// Create a subnet from an address text and prefix length.
    ///
    /// Host bits of the address are cleared.
    pub fn new(addr_text: &str, bits: u8) -> Result<Ipv4Subnet> {
        match parse_address(addr_text) {
            Ok(IpAddr::V4(addr)) => Ipv4Subnet::from_parts(addr, bits),
            Ok(IpAddr::V6(addr)) => Err(SubnetError::TooLarge(format!(
                "{addr} is IPv6, expected IPv4"
            ))),
            Err(e) => Err(SubnetError::InvalidPrefix(e.to_string())),
        }
    }

    /// Same as [`Ipv4Subnet::new`] with a display name attached.
    pub fn named(addr_text: &str, bits: u8, name: impl Into<String>) -> Result<Ipv4Subnet> {
        let mut subnet = Ipv4Subnet::new(addr_text, bits)?;
        subnet.name = Some(name.into());
        Ok(subnet)
    }

    /// Create a subnet from CIDR text (e.g., "10.0.0.0/24").
    pub fn from_cidr(text: &str) -> Result<Ipv4Subnet> {
        match parse_prefix(text) {
            Ok((IpAddr::V4(addr), bits)) => Ipv4Subnet::from_parts(addr, bits),
            Ok((IpAddr::V6(addr), _)) => Err(SubnetError::TooLarge(format!(
                "{addr} is IPv6, expected IPv4"
            ))),
            Err(SubnetError::Parse(text)) => Err(SubnetError::InvalidPrefix(text)),
            Err(e) => Err(e),
        }
    }

    pub fn from_parts(addr: Ipv4Addr, bits: u8) -> Result<Ipv4Subnet> {
        let addr = cut_addr(addr, bits)?;
        log::trace!("Ipv4Subnet::from_parts({addr}/{bits})");
        Ok(Ipv4Subnet {
            addr,
            mask: bits,
            name: None,
        })
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn bits(&self) -> u8 {
        self.mask
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn class(&self) -> Ipv4Class {
        Ipv4Class::of(self.addr)
    }

    /// Start of the octet holding the prefix boundary.
    ///
    /// An octet-aligned prefix is its own class block.
    pub fn start_class_bits(&self) -> u8 {
        (self.mask / 8) * 8
    }

    /// End of the octet holding the prefix boundary (8 for /0).
    pub fn max_class_bits(&self) -> u8 {
        if self.mask == 0 {
            8
        } else {
            (self.mask.div_ceil(8) * 8).min(MAX_LENGTH)
        }
    }

    /// Bits the mask takes inside the class octet.
    pub fn class_network_bits(&self) -> u8 {
        self.mask - self.start_class_bits()
    }

    /// Bits left for hosts inside the class octet.
    pub fn class_host_bits(&self) -> u8 {
        self.max_class_bits() - self.mask
    }

    /// How many subnets of this size fit in the class block.
    pub fn networks(&self) -> u64 {
        1u64 << self.class_network_bits()
    }

    pub fn hosts_per_network(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask)
    }

    /// Addresses in the whole class block.
    pub fn total_hosts(&self) -> u64 {
        self.hosts_per_network() * self.networks()
    }

    /// Hosts per network without the network and broadcast addresses.
    pub fn usable_hosts(&self) -> u64 {
        self.hosts_per_network().saturating_sub(2)
    }

    pub fn first(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !v4_mask(self.mask))
    }

    pub fn network(&self) -> Ipv4Addr {
        self.first()
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.last()
    }

    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(v4_mask(self.mask))
    }

    pub fn wildcard(&self) -> Ipv4Addr {
        Ipv4Addr::from(!v4_mask(self.mask))
    }

    pub fn range(&self) -> AddressRange<Ipv4Addr> {
        AddressRange {
            first: self.first(),
            last: self.last(),
        }
    }

    /// First and last host addresses; `None` when there are no usable hosts.
    pub fn usable_range(&self) -> Option<AddressRange<Ipv4Addr>> {
        if self.usable_hosts() == 0 {
            return None;
        }
        let first = Ipv4Addr::from(u32::from(self.first()) + 1);
        let last = Ipv4Addr::from(u32::from(self.last()) - 1);
        AddressRange::new(first, last).ok()
    }

    /// The octet-aligned block the subnet lives in.
    pub fn class_block(&self) -> AddressRange<Ipv4Addr> {
        let bits = self.start_class_bits();
        let first = u32::from(self.addr) & v4_mask(bits);
        AddressRange {
            first: Ipv4Addr::from(first),
            last: Ipv4Addr::from(first | !v4_mask(bits)),
        }
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.range().contains(ip)
    }

    /// Mask as four dot separated groups of eight binary digits.
    pub fn binary_mask(&self) -> String {
        v4_mask(self.mask)
            .to_be_bytes()
            .iter()
            .map(|b| format!("{b:08b}"))
            .join(".")
    }

    /// Base address as 32 binary digits.
    pub fn binary_id(&self) -> String {
        format!("{:032b}", u32::from(self.addr))
    }

    pub fn reverse_dns(&self) -> String {
        reverse_dns(&IpAddr::V4(self.addr))
    }
}

impl fmt::Display for Ipv4Subnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4Subnet {
    fn eq(&self, other: &Ipv4Subnet) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl Eq for Ipv4Subnet {}

impl Hash for Ipv4Subnet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
        self.mask.hash(state);
    }
}

impl Ord for Ipv4Subnet {
    fn cmp(&self, other: &Ipv4Subnet) -> Ordering {
        (self.addr, self.mask).cmp(&(other.addr, other.mask))
    }
}

impl PartialOrd for Ipv4Subnet {
    fn partial_cmp(&self, other: &Ipv4Subnet) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Ipv4Subnet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4Subnet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4Subnet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4Subnet::from_cidr(&s).map_err(|e| de::Error::custom(format!("{s}: {e}")))
    }
}
