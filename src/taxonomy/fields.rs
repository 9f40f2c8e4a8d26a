//! Bit-field extraction from IPv6 addresses.

use super::kind::{classify, Ipv6Kind};
use crate::error::{Result, SubnetError};
use serde::Serialize;
use std::fmt;
use std::net::Ipv6Addr;

/// Widest field [`bit_range`] will extract.
pub const MAX_FIELD_BITS: u8 = 64;

const SOLICITED_NODE_BASE: u128 = 0xff02_0000_0000_0000_0000_0001_ff00_0000;
const SOLICITED_NODE_MASK: u128 = 0x00ff_ffff;

/// Raw value of bits `[start, end)`, most significant bit first.
///
/// The field is read from the eight bytes starting at byte `start / 8`,
/// zero-padded past the end of the address. Bits beyond that window are
/// dropped, so a field with `start % 8 + width > 64` comes back with zeros
/// in its low bits.
pub fn bit_value(addr: &Ipv6Addr, start: u8, end: u8) -> Result<u64> {
    if start >= end || end > 128 || end - start > MAX_FIELD_BITS {
        return Err(SubnetError::BitRange { start, end });
    }
    let width = u32::from(end - start);
    let octets = addr.octets();
    let tail = &octets[usize::from(start / 8)..];
    let len = tail.len().min(8);
    let mut window = [0u8; 8];
    window[..len].copy_from_slice(&tail[..len]);
    Ok((u64::from_be_bytes(window) << (start % 8)) >> (64 - width))
}

/// Bits `[start, end)` as hex nibbles grouped by four from the right.
///
/// A field ending at bit 48 is padded to ten nibbles.
///
/// # Examples
/// ```
/// use subnet_toolkit::taxonomy::bit_range;
/// let addr = "fd12:3456:789a::1".parse().unwrap();
/// assert_eq!(bit_range(&addr, 8, 48).unwrap(), "12:3456:789a");
/// ```
pub fn bit_range(addr: &Ipv6Addr, start: u8, end: u8) -> Result<String> {
    let value = bit_value(addr, start, end)?;
    let mut nibbles = usize::from((end - start).div_ceil(4));
    if end == 48 {
        nibbles = nibbles.max(10);
    }
    Ok(group_nibbles(&format!("{value:0nibbles$x}")))
}

fn group_nibbles(hex: &str) -> String {
    let digits: Vec<char> = hex.chars().collect();
    let head = digits.len() % 4;
    let mut groups = Vec::new();
    if head > 0 {
        groups.push(digits[..head].iter().collect::<String>());
    }
    groups.extend(digits[head..].chunks(4).map(|c| c.iter().collect::<String>()));
    groups.join(":")
}

/// Site identifier of a global unicast (bits 3-47) or unique-local / private
/// (bits 8-47) address.
///
/// The field starts right after the format prefix bits (`001` and the
/// `fc00::/7` + L bit). Deriving it as `[type prefix bits + 1, 48)` would skip
/// the top bit of the global routing prefix and start global unicast at bit 4.
pub fn global_id(addr: &Ipv6Addr) -> Option<String> {
    let start = match classify(addr) {
        Ipv6Kind::GlobalUnicast => 3,
        Ipv6Kind::UniqueLocal | Ipv6Kind::Private => 8,
        _ => return None,
    };
    bit_range(addr, start, 48).ok()
}

/// Scope nibble of a multicast address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MulticastScope {
    InterfaceLocal,
    LinkLocal,
    RealmLocal,
    AdminLocal,
    SiteLocal,
    OrganizationLocal,
    Global,
    Reserved(u8),
    Unassigned(u8),
}

impl MulticastScope {
    pub fn from_nibble(nibble: u8) -> MulticastScope {
        match nibble & 0x0f {
            0x1 => MulticastScope::InterfaceLocal,
            0x2 => MulticastScope::LinkLocal,
            0x3 => MulticastScope::RealmLocal,
            0x4 => MulticastScope::AdminLocal,
            0x5 => MulticastScope::SiteLocal,
            0x8 => MulticastScope::OrganizationLocal,
            0xe => MulticastScope::Global,
            n @ (0x0 | 0xf) => MulticastScope::Reserved(n),
            n => MulticastScope::Unassigned(n),
        }
    }

    pub fn nibble(self) -> u8 {
        match self {
            MulticastScope::InterfaceLocal => 0x1,
            MulticastScope::LinkLocal => 0x2,
            MulticastScope::RealmLocal => 0x3,
            MulticastScope::AdminLocal => 0x4,
            MulticastScope::SiteLocal => 0x5,
            MulticastScope::OrganizationLocal => 0x8,
            MulticastScope::Global => 0xe,
            MulticastScope::Reserved(n) | MulticastScope::Unassigned(n) => n,
        }
    }
}

impl fmt::Display for MulticastScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MulticastScope::InterfaceLocal => write!(f, "interface-local"),
            MulticastScope::LinkLocal => write!(f, "link-local"),
            MulticastScope::RealmLocal => write!(f, "realm-local"),
            MulticastScope::AdminLocal => write!(f, "admin-local"),
            MulticastScope::SiteLocal => write!(f, "site-local"),
            MulticastScope::OrganizationLocal => write!(f, "organization-local"),
            MulticastScope::Global => write!(f, "global"),
            MulticastScope::Reserved(n) => write!(f, "reserved ({n:x})"),
            MulticastScope::Unassigned(n) => write!(f, "unassigned ({n:x})"),
        }
    }
}

/// Flags nibble and scope of a multicast address.
pub fn multicast_flags_scope(addr: &Ipv6Addr) -> Option<(u8, MulticastScope)> {
    if !classify(addr).is_multicast() {
        return None;
    }
    let byte = addr.octets()[1];
    Some((byte >> 4, MulticastScope::from_nibble(byte)))
}

/// Bits `[32, 96)` of a multicast address.
pub fn multicast_network_prefix(addr: &Ipv6Addr) -> Option<String> {
    if !classify(addr).is_multicast() {
        return None;
    }
    bit_range(addr, 32, 96).ok()
}

/// Bits `[96, 128)` of a multicast address.
pub fn multicast_group_id(addr: &Ipv6Addr) -> Option<String> {
    if !classify(addr).is_multicast() {
        return None;
    }
    bit_range(addr, 96, 128).ok()
}

/// `ff02::1:ffXX:XXXX` carrying the low 24 bits of a unicast address.
pub fn solicited_node_multicast(addr: &Ipv6Addr) -> Result<Ipv6Addr> {
    let kind = classify(addr);
    if !kind.is_unicast() {
        return Err(SubnetError::NotUnicast(kind));
    }
    Ok(Ipv6Addr::from(
        SOLICITED_NODE_BASE | (u128::from(*addr) & SOLICITED_NODE_MASK),
    ))
}
