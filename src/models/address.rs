//! Address primitives shared by the IPv4 and IPv6 subnet models.
//!
//! Parsing, canonical/expanded formatting, big-endian offset arithmetic,
//! reverse-DNS names and bit strings for [`IpAddr`] values.

use crate::error::{Result, SubnetError};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Width of an IPv4 address in bits.
pub const IPV4_BITS: u8 = 32;
/// Width of an IPv6 address in bits.
pub const IPV6_BITS: u8 = 128;

lazy_static! {
    static ref PREFIX_RE: Regex =
        Regex::new(r"^\s*([0-9A-Fa-f:.]+)/(\d{1,3})\s*$").expect("Invalid Regex?");
}

/// Fixed-width address values that can be treated as unsigned integers.
pub trait AddressBits: Copy + Ord {
    /// Width of the address in bits.
    const WIDTH: u8;
    fn to_bits(self) -> u128;
}

impl AddressBits for Ipv4Addr {
    const WIDTH: u8 = IPV4_BITS;
    fn to_bits(self) -> u128 {
        u32::from(self) as u128
    }
}

impl AddressBits for Ipv6Addr {
    const WIDTH: u8 = IPV6_BITS;
    fn to_bits(self) -> u128 {
        u128::from(self)
    }
}

/// Parse dotted-quad IPv4 or any RFC 4291 text form of IPv6.
///
/// Embedded dotted quads are accepted only for IPv4-mapped IPv6 addresses
/// (`::ffff:a.b.c.d`).
///
/// # Examples
/// ```
/// use subnet_toolkit::models::parse_address;
/// assert!(parse_address("192.168.1.0").is_ok());
/// assert!(parse_address("::ffff:1.2.3.4").is_ok());
/// assert!(parse_address("64:ff9b::1.2.3.4").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<IpAddr> {
    let text = text.trim();
    let addr: IpAddr = text
        .parse()
        .map_err(|_| SubnetError::Parse(text.to_string()))?;
    if let IpAddr::V6(v6) = addr {
        if text.contains('.') && v6.to_ipv4_mapped().is_none() {
            log::debug!("rejecting embedded IPv4 in non-mapped address {text}");
            return Err(SubnetError::Parse(text.to_string()));
        }
    }
    Ok(addr)
}

/// Parse `<address>/<bits>` and return the canonical (host bits zeroed) base.
pub fn parse_prefix(text: &str) -> Result<(IpAddr, u8)> {
    let caps = PREFIX_RE
        .captures(text)
        .ok_or_else(|| SubnetError::Parse(text.to_string()))?;
    let addr = parse_address(&caps[1])?;
    let bits: u8 = caps[2]
        .parse()
        .map_err(|_| SubnetError::InvalidPrefix(format!("/{} in {}", &caps[2], text.trim())))?;
    if bits > family_bits(&addr) {
        return Err(SubnetError::InvalidPrefix(format!(
            "/{bits} is longer than the {} bit address",
            family_bits(&addr)
        )));
    }
    Ok((mask_address(addr, bits), bits))
}

/// Number of bits in the address family of `addr`.
pub fn family_bits(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => IPV4_BITS,
        IpAddr::V6(_) => IPV6_BITS,
    }
}

/// Clear every bit after the first `bits`.
pub fn mask_address(addr: IpAddr, bits: u8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(u32::from(v4) & v4_mask(bits))),
        IpAddr::V6(v6) => IpAddr::V6(Ipv6Addr::from(u128::from(v6) & v6_mask(bits))),
    }
}

pub(crate) fn v4_mask(bits: u8) -> u32 {
    u32::MAX
        .checked_shl(u32::from(IPV4_BITS.saturating_sub(bits)))
        .unwrap_or(0)
}

pub(crate) fn v6_mask(bits: u8) -> u128 {
    u128::MAX
        .checked_shl(u32::from(IPV6_BITS.saturating_sub(bits)))
        .unwrap_or(0)
}

/// RFC 5952 text for IPv6, dotted quad for IPv4.
pub fn canonical(addr: &IpAddr) -> String {
    addr.to_string()
}

/// Eight colon separated groups of four hex digits.
///
/// # Examples
/// ```
/// use subnet_toolkit::models::expanded;
/// let addr = "2001:db8::1".parse().unwrap();
/// assert_eq!(expanded(&addr), "2001:0db8:0000:0000:0000:0000:0000:0001");
/// ```
pub fn expanded(addr: &Ipv6Addr) -> String {
    addr.segments().iter().map(|s| format!("{s:04x}")).join(":")
}

/// Network byte order bytes: 4 for IPv4, 16 for IPv6.
pub fn octets(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

/// Add `n` to an IPv4 address treated as a big-endian integer.
pub fn add_offset_v4(addr: Ipv4Addr, n: i128) -> Result<Ipv4Addr> {
    i128::from(u32::from(addr))
        .checked_add(n)
        .and_then(|value| u32::try_from(value).ok())
        .map(Ipv4Addr::from)
        .ok_or(SubnetError::Overflow)
}

/// Add `n` to an IPv6 address treated as a big-endian integer.
pub fn add_offset_v6(addr: Ipv6Addr, n: i128) -> Result<Ipv6Addr> {
    let value = u128::from(addr);
    let value = if n >= 0 {
        value.checked_add(n.unsigned_abs())
    } else {
        value.checked_sub(n.unsigned_abs())
    };
    value.map(Ipv6Addr::from).ok_or(SubnetError::Overflow)
}

/// Add `n` to `addr`, failing with [`SubnetError::Overflow`] outside the family range.
pub fn add_offset(addr: IpAddr, n: i128) -> Result<IpAddr> {
    match addr {
        IpAddr::V4(v4) => add_offset_v4(v4, n).map(IpAddr::V4),
        IpAddr::V6(v6) => add_offset_v6(v6, n).map(IpAddr::V6),
    }
}

/// `d.c.b.a.in-addr.arpa` or the nibble-reversed `.ip6.arpa` name.
pub fn reverse_dns(addr: &IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => format!(
            "{}.in-addr.arpa",
            v4.octets().iter().rev().map(|o| o.to_string()).join(".")
        ),
        IpAddr::V6(v6) => format!(
            "{}.ip6.arpa",
            format!("{:032x}", u128::from(*v6)).chars().rev().join(".")
        ),
    }
}

/// All bits of the address, most significant first.
pub fn bit_string(addr: &IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => format!("{:032b}", u32::from(*v4)),
        IpAddr::V6(v6) => format!("{:0128b}", u128::from(*v6)),
    }
}
