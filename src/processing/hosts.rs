//! Lazy host enumeration for IPv4 subnets.

use crate::models::{AddressBits, AddressRange, Ipv4Subnet};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Largest number of addresses or subnets that will be collected into a `Vec`.
pub const HOST_LIST_CAP: u64 = 1 << 20;

/// Restartable iterator over consecutive IPv4 addresses.
#[derive(Debug, Clone)]
pub struct HostIter {
    next: u64,
    end: u64,
}

impl HostIter {
    fn new(first: Ipv4Addr, last: Ipv4Addr) -> HostIter {
        HostIter {
            next: u64::from(u32::from(first)),
            end: u64::from(u32::from(last)) + 1,
        }
    }

    fn empty() -> HostIter {
        HostIter { next: 0, end: 0 }
    }
}

impl Iterator for HostIter {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Ipv4Addr> {
        if self.next >= self.end {
            return None;
        }
        let addr = u32::try_from(self.next).ok().map(Ipv4Addr::from);
        self.next += 1;
        addr
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.end.saturating_sub(self.next)).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for HostIter {}

/// Addresses either listed or, above [`HOST_LIST_CAP`], given as bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostList<A> {
    Listed(Vec<A>),
    Range(AddressRange<A>),
}

impl<A: AddressBits> HostList<A> {
    pub fn len(&self) -> u128 {
        match self {
            HostList::Listed(hosts) => hosts.len() as u128,
            HostList::Range(range) => range.len().unwrap_or(u128::MAX),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, HostList::Listed(hosts) if hosts.is_empty())
    }
}

impl Ipv4Subnet {
    /// Every address from network to broadcast.
    pub fn ips(&self) -> HostIter {
        HostIter::new(self.first(), self.last())
    }

    /// Addresses without network and broadcast; empty for /31 and /32.
    pub fn usable_ips(&self) -> HostIter {
        match self.usable_range() {
            Some(range) => HostIter::new(range.first(), range.last()),
            None => HostIter::empty(),
        }
    }

    pub fn collect_hosts(&self) -> HostList<Ipv4Addr> {
        collect(self.ips(), self.range())
    }

    pub fn collect_usable_hosts(&self) -> HostList<Ipv4Addr> {
        match self.usable_range() {
            Some(range) => collect(self.usable_ips(), range),
            None => HostList::Listed(Vec::new()),
        }
    }
}

fn collect(hosts: HostIter, range: AddressRange<Ipv4Addr>) -> HostList<Ipv4Addr> {
    if range.len().unwrap_or(u128::MAX) > u128::from(HOST_LIST_CAP) {
        log::debug!("host list {range} above cap {HOST_LIST_CAP}, returning bounds");
        HostList::Range(range)
    } else {
        HostList::Listed(hosts.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ips_small_subnet() {
        let subnet = Ipv4Subnet::new("192.168.0.5", 30).unwrap();
        let all: Vec<_> = subnet.ips().map(|ip| ip.to_string()).collect();
        assert_eq!(
            all,
            vec!["192.168.0.4", "192.168.0.5", "192.168.0.6", "192.168.0.7"]
        );
        let usable: Vec<_> = subnet.usable_ips().map(|ip| ip.to_string()).collect();
        assert_eq!(usable, vec!["192.168.0.5", "192.168.0.6"]);
    }

    #[test]
    fn test_ips_is_restartable() {
        let subnet = Ipv4Subnet::new("10.0.0.0", 28).unwrap();
        let iter = subnet.ips();
        assert_eq!(iter.len(), 16);
        assert_eq!(iter.clone().count(), 16);
        assert_eq!(iter.last(), Some(Ipv4Addr::new(10, 0, 0, 15)));
    }

    #[test]
    fn test_ips_end_of_space() {
        let subnet = Ipv4Subnet::new("255.255.255.254", 31).unwrap();
        assert_eq!(subnet.ips().count(), 2);
        assert_eq!(subnet.usable_ips().count(), 0);
        let host = Ipv4Subnet::new("255.255.255.255", 32).unwrap();
        assert_eq!(host.ips().collect::<Vec<_>>(), vec![Ipv4Addr::BROADCAST]);
    }

    #[test]
    fn test_ips_whole_space_is_lazy() {
        let subnet = Ipv4Subnet::new("0.0.0.0", 0).unwrap();
        let mut iter = subnet.ips();
        assert_eq!(iter.next(), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(iter.next(), Some(Ipv4Addr::new(0, 0, 0, 1)));
        assert_eq!(iter.len() as u64, (1u64 << 32) - 2);
    }

    #[test]
    fn test_collect_hosts_cap() {
        let small = Ipv4Subnet::new("10.0.0.0", 24).unwrap();
        assert!(matches!(small.collect_hosts(), HostList::Listed(ref v) if v.len() == 256));
        assert_eq!(small.collect_usable_hosts().len(), 254);

        let at_cap = Ipv4Subnet::new("10.0.0.0", 12).unwrap();
        assert!(matches!(at_cap.collect_hosts(), HostList::Listed(_)));

        let large = Ipv4Subnet::new("10.0.0.0", 8).unwrap();
        match large.collect_hosts() {
            HostList::Range(range) => {
                assert_eq!(range.to_string(), "10.0.0.0-10.255.255.255");
            }
            HostList::Listed(_) => panic!("expected a range above the cap"),
        }
        assert_eq!(
            large.collect_usable_hosts(),
            HostList::Range(large.usable_range().unwrap())
        );

        let host = Ipv4Subnet::new("10.0.0.1", 32).unwrap();
        assert!(host.collect_usable_hosts().is_empty());
    }
}
