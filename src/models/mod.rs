//! Domain models for IPv4 and IPv6 subnets.
//!
//! This module contains the core data structures used throughout the toolkit:
//! - [`address`] - parsing, formatting and offset arithmetic for addresses
//! - [`AddressRange`] - inclusive `first-last` address range
//! - [`Ipv4Subnet`] - IPv4 prefix with classful metrics
//! - [`Ipv6Subnet`] - IPv6 prefix with hex slices

mod address;
mod ipv4;
mod ipv6;
mod range;

// Re-export public types
pub use address::{
    add_offset, add_offset_v4, add_offset_v6, bit_string, canonical, expanded, family_bits,
    mask_address, octets, parse_address, parse_prefix, reverse_dns, AddressBits, IPV4_BITS,
    IPV6_BITS,
};
pub(crate) use address::v6_mask;
pub use ipv4::{cut_addr, get_cidr_mask, ip_after_subnet, Ipv4Class, Ipv4Subnet, MAX_LENGTH};
pub use ipv6::Ipv6Subnet;
pub use range::AddressRange;
