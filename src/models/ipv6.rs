//! IPv6 subnet model.
//!
//! First and last addresses span the interface identifier (low 64 bits) of the
//! base regardless of the prefix length.

use super::address::{expanded, parse_address, parse_prefix, reverse_dns, v6_mask, IPV6_BITS};
use super::range::AddressRange;
use crate::error::{Result, SubnetError};
use crate::taxonomy::{classify, Ipv6Kind};
use itertools::Itertools;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv6Addr};

const IID_MASK: u128 = 0xffff_ffff_ffff_ffff;

/// Render a byte slice as colon separated hex, two bytes per group.
fn hex_groups(bytes: &[u8]) -> String {
    bytes
        .chunks(2)
        .map(|pair| pair.iter().map(|b| format!("{b:02x}")).collect::<String>())
        .join(":")
}

/// Canonical IPv6 prefix with an optional display name.
#[derive(Debug, Clone)]
pub struct Ipv6Subnet {
    addr: Ipv6Addr,
    mask: u8,
    name: Option<String>,
}

impl Ipv6Subnet {
    pub fn new(addr_text: &str, bits: u8) -> Result<Ipv6Subnet> {
        match parse_address(addr_text) {
            Ok(IpAddr::V6(addr)) => Ipv6Subnet::from_parts(addr, bits),
            Ok(IpAddr::V4(addr)) => Err(SubnetError::TooLarge(format!(
                "{addr} is IPv4, expected IPv6"
            ))),
            Err(e) => Err(SubnetError::InvalidPrefix(e.to_string())),
        }
    }

    pub fn named(addr_text: &str, bits: u8, name: impl Into<String>) -> Result<Ipv6Subnet> {
        let mut subnet = Ipv6Subnet::new(addr_text, bits)?;
        subnet.name = Some(name.into());
        Ok(subnet)
    }

    /// Create a subnet from CIDR text (e.g., "2001:db8::/32").
    pub fn from_cidr(text: &str) -> Result<Ipv6Subnet> {
        match parse_prefix(text) {
            Ok((IpAddr::V6(addr), bits)) => Ipv6Subnet::from_parts(addr, bits),
            Ok((IpAddr::V4(addr), _)) => Err(SubnetError::TooLarge(format!(
                "{addr} is IPv4, expected IPv6"
            ))),
            Err(SubnetError::Parse(text)) => Err(SubnetError::InvalidPrefix(text)),
            Err(e) => Err(e),
        }
    }

    pub fn from_parts(addr: Ipv6Addr, bits: u8) -> Result<Ipv6Subnet> {
        if bits > IPV6_BITS {
            return Err(SubnetError::InvalidPrefix(format!(
                "/{bits} is longer than /{IPV6_BITS}"
            )));
        }
        let addr = Ipv6Addr::from(u128::from(addr) & v6_mask(bits));
        log::trace!("Ipv6Subnet::from_parts({addr}/{bits})");
        Ok(Ipv6Subnet {
            addr,
            mask: bits,
            name: None,
        })
    }

    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    pub fn bits(&self) -> u8 {
        self.mask
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Base with the interface identifier cleared.
    pub fn first(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.addr) & !IID_MASK)
    }

    /// Base with the interface identifier set to all ones.
    pub fn last(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.addr) | IID_MASK)
    }

    pub fn range(&self) -> AddressRange<Ipv6Addr> {
        AddressRange {
            first: self.first(),
            last: self.last(),
        }
    }

    /// Bytes `[0, bits/8)` of the base.
    pub fn prefix_string(&self) -> String {
        hex_groups(&self.addr.octets()[..usize::from(self.mask / 8)])
    }

    /// Bytes `[6, 8)` of the base.
    pub fn subnet_string(&self) -> String {
        hex_groups(&self.addr.octets()[6..8])
    }

    /// Bytes `[bits/8, 16)` of the base.
    pub fn interface_string(&self) -> String {
        hex_groups(&self.addr.octets()[usize::from(self.mask / 8)..])
    }

    /// Bytes `[0, 6)` of the base.
    pub fn routing_prefix_string(&self) -> String {
        hex_groups(&self.addr.octets()[..6])
    }

    pub fn kind(&self) -> Ipv6Kind {
        classify(&self.addr)
    }

    pub fn expanded(&self) -> String {
        expanded(&self.addr)
    }

    pub fn reverse_dns(&self) -> String {
        reverse_dns(&IpAddr::V6(self.addr))
    }

    pub fn contains(&self, ip: Ipv6Addr) -> bool {
        u128::from(ip) & v6_mask(self.mask) == u128::from(self.addr)
    }
}

impl fmt::Display for Ipv6Subnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv6Subnet {
    fn eq(&self, other: &Ipv6Subnet) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl Eq for Ipv6Subnet {}

impl Hash for Ipv6Subnet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
        self.mask.hash(state);
    }
}

impl Ord for Ipv6Subnet {
    fn cmp(&self, other: &Ipv6Subnet) -> Ordering {
        (self.addr, self.mask).cmp(&(other.addr, other.mask))
    }
}

impl PartialOrd for Ipv6Subnet {
    fn partial_cmp(&self, other: &Ipv6Subnet) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Ipv6Subnet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6Subnet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv6Subnet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6Subnet::from_cidr(&s).map_err(|e| de::Error::custom(format!("{s}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_new() {
        let subnet = Ipv6Subnet::new("2001:db8:85a3::8a2e:370:7334", 48).unwrap();
        assert_eq!(subnet.to_string(), "2001:db8:85a3::/48");
        assert_eq!(subnet.kind(), Ipv6Kind::GlobalUnicast);
        assert!(matches!(
            Ipv6Subnet::new("10.0.0.0", 8),
            Err(SubnetError::TooLarge(_))
        ));
        assert!(matches!(
            Ipv6Subnet::new("2001:db8::", 129),
            Err(SubnetError::InvalidPrefix(_))
        ));
        assert!(matches!(
            Ipv6Subnet::new("2001:db8::g", 64),
            Err(SubnetError::InvalidPrefix(_))
        ));
        assert!(matches!(
            Ipv6Subnet::from_cidr("10.0.0.0/8"),
            Err(SubnetError::TooLarge(_))
        ));
    }

    #[test]
    fn test_first_last_span_interface_id() {
        let subnet = Ipv6Subnet::new("2001:db8:1:2::", 64).unwrap();
        assert_eq!(subnet.first(), "2001:db8:1:2::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(
            subnet.last(),
            "2001:db8:1:2:ffff:ffff:ffff:ffff".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(subnet.range().len(), Some(1u128 << 64));

        // The prefix length does not move the bounds.
        let wide = Ipv6Subnet::new("2001:db8:1:2::", 32).unwrap();
        assert_eq!(wide.first(), "2001:db8::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(
            wide.last(),
            "2001:db8::ffff:ffff:ffff:ffff".parse::<Ipv6Addr>().unwrap()
        );
        let host = Ipv6Subnet::new("2001:db8::1234", 128).unwrap();
        assert_eq!(host.first(), "2001:db8::".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_first_is_masked() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for _ in 0..32 {
            let addr = Ipv6Addr::from(rng.random::<u128>());
            for bits in 0..=IPV6_BITS {
                let subnet = Ipv6Subnet::new(&addr.to_string(), bits).unwrap();
                let first = u128::from(subnet.first());
                assert_eq!(first & !v6_mask(bits), 0, "{subnet}");
                assert_eq!(first & IID_MASK, 0, "{subnet}");
            }
        }
    }

    #[test]
    fn test_slices() {
        let subnet = Ipv6Subnet::new("2001:db8:85a3:1234:5678:9abc:def0:1", 56).unwrap();
        assert_eq!(subnet.to_string(), "2001:db8:85a3:1200::/56");
        assert_eq!(subnet.prefix_string(), "2001:0db8:85a3:12");
        assert_eq!(subnet.routing_prefix_string(), "2001:0db8:85a3");
        assert_eq!(subnet.subnet_string(), "1200");
        assert_eq!(subnet.interface_string(), "0000:0000:0000:0000:00");

        let subnet = Ipv6Subnet::new("fe80::1", 0).unwrap();
        assert_eq!(subnet.prefix_string(), "");
        assert_eq!(subnet.interface_string().len(), 39);
    }

    #[test]
    fn test_contains_and_name() {
        let subnet = Ipv6Subnet::named("2001:db8::", 32, "doc").unwrap();
        assert_eq!(subnet.name(), Some("doc"));
        assert_eq!(subnet, Ipv6Subnet::from_cidr("2001:db8::/32").unwrap());
        assert!(subnet.contains("2001:db8:ffff::1".parse().unwrap()));
        assert!(!subnet.contains("2001:db9::".parse().unwrap()));
    }

    #[test]
    fn test_reverse_dns_and_expanded() {
        let subnet = Ipv6Subnet::new("2001:db8::1", 128).unwrap();
        assert_eq!(
            subnet.reverse_dns(),
            "1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
        assert_eq!(subnet.expanded(), "2001:0db8:0000:0000:0000:0000:0000:0001");
    }

    #[test]
    fn test_serde() {
        let subnet = Ipv6Subnet::new("fd12:3456::", 48).unwrap();
        let json = serde_json::to_string(&subnet).unwrap();
        assert_eq!(json, "\"fd12:3456::/48\"");
        let back: Ipv6Subnet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, subnet);
    }
}
