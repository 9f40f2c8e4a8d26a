//! Inclusive address ranges.

use super::address::AddressBits;
use crate::error::{Result, SubnetError};
use serde::Serialize;
use std::fmt;

/// Inclusive range of same-family addresses, rendered as `first-last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AddressRange<A> {
    pub(crate) first: A,
    pub(crate) last: A,
}

impl<A: AddressBits> AddressRange<A> {
    /// Fails with [`SubnetError::InvalidRange`] when `first > last`.
    pub fn new(first: A, last: A) -> Result<Self> {
        if first > last {
            return Err(SubnetError::InvalidRange);
        }
        Ok(AddressRange { first, last })
    }

    pub fn first(&self) -> A {
        self.first
    }

    pub fn last(&self) -> A {
        self.last
    }

    pub fn contains(&self, addr: A) -> bool {
        self.first <= addr && addr <= self.last
    }

    /// Number of addresses, `None` only for the whole IPv6 space.
    pub fn len(&self) -> Option<u128> {
        (self.last.to_bits() - self.first.to_bits()).checked_add(1)
    }

    /// True when `next` starts right after this range ends.
    pub fn is_followed_by(&self, next: &AddressRange<A>) -> bool {
        self.last.to_bits().checked_add(1) == Some(next.first.to_bits())
    }
}

impl<A: fmt::Display> fmt::Display for AddressRange<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_range_new() {
        let range =
            AddressRange::new(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 255)).unwrap();
        assert_eq!(range.to_string(), "10.0.0.0-10.0.0.255");
        assert_eq!(range.len(), Some(256));
        assert!(range.contains(Ipv4Addr::new(10, 0, 0, 128)));
        assert!(!range.contains(Ipv4Addr::new(10, 0, 1, 0)));

        assert_eq!(
            AddressRange::new(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 0)),
            Err(SubnetError::InvalidRange)
        );
    }

    #[test]
    fn test_range_single_address() {
        let addr = Ipv4Addr::new(192, 0, 2, 1);
        let range = AddressRange::new(addr, addr).unwrap();
        assert_eq!(range.len(), Some(1));
        assert_eq!(range.to_string(), "192.0.2.1-192.0.2.1");
    }

    #[test]
    fn test_range_ipv6_len() {
        let all = AddressRange::new(Ipv6Addr::UNSPECIFIED, Ipv6Addr::from(u128::MAX)).unwrap();
        assert_eq!(all.len(), None);
        let iid = AddressRange::new(
            "2001:db8::".parse::<Ipv6Addr>().unwrap(),
            "2001:db8::ffff:ffff:ffff:ffff".parse::<Ipv6Addr>().unwrap(),
        )
        .unwrap();
        assert_eq!(iid.len(), Some(1u128 << 64));
    }

    #[test]
    fn test_range_followed_by() {
        let a =
            AddressRange::new(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 63)).unwrap();
        let b =
            AddressRange::new(Ipv4Addr::new(10, 0, 0, 64), Ipv4Addr::new(10, 0, 0, 127)).unwrap();
        assert!(a.is_followed_by(&b));
        assert!(!b.is_followed_by(&a));
    }
}
