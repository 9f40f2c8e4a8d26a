//! Splitting an IPv4 subnet into equal child subnets.
//!
//! The children tile the parent's class block, walking up from its base with
//! [`ip_after_subnet`].

use super::hosts::HOST_LIST_CAP;
use crate::error::{Result, SubnetError};
use crate::models::{ip_after_subnet, AddressRange, Ipv4Subnet};
use std::net::Ipv4Addr;

/// Lazy walk over the children of a split, in increasing address order.
#[derive(Debug, Clone)]
pub struct Children {
    cursor: Result<Ipv4Addr>,
    child_bits: u8,
    remaining: u64,
}

impl Iterator for Children {
    type Item = Result<Ipv4Subnet>;

    fn next(&mut self) -> Option<Result<Ipv4Subnet>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = match &self.cursor {
            Ok(addr) => *addr,
            Err(e) => {
                self.remaining = 0;
                return Some(Err(e.clone()));
            }
        };
        self.cursor = ip_after_subnet(current, self.child_bits);
        Some(Ipv4Subnet::from_parts(current, self.child_bits))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Children {}

impl Ipv4Subnet {
    /// Number of `child` sized subnets in the class block.
    pub fn child_count(&self, child: &Ipv4Subnet) -> Result<u64> {
        if child.bits() < self.bits() {
            return Err(SubnetError::ChildTooLarge {
                parent: self.bits(),
                child: child.bits(),
            });
        }
        let ratio = 1u64 << (child.bits() - self.bits());
        Ok(self.networks() * ratio)
    }

    /// Iterate the children lazily. Only the bits of `child` are used.
    pub fn children(&self, child: &Ipv4Subnet) -> Result<Children> {
        let count = self.child_count(child)?;
        let base = self.class_block().first();
        log::info!(
            "#Start children() {self} into {count} x /{} from {base}",
            child.bits()
        );
        Ok(Children {
            cursor: Ok(base),
            child_bits: child.bits(),
            remaining: count,
        })
    }

    /// Children as subnets; fails with `TooMany` above [`HOST_LIST_CAP`].
    pub fn split(&self, child: &Ipv4Subnet) -> Result<Vec<Ipv4Subnet>> {
        let count = self.child_count(child)?;
        if count > HOST_LIST_CAP {
            return Err(SubnetError::TooMany {
                count: u128::from(count),
                cap: u128::from(HOST_LIST_CAP),
            });
        }
        self.children(child)?.collect()
    }

    /// Address ranges of [`Ipv4Subnet::split`].
    pub fn split_ranges(&self, child: &Ipv4Subnet) -> Result<Vec<AddressRange<Ipv4Addr>>> {
        Ok(self.split(child)?.iter().map(Ipv4Subnet::range).collect())
    }
}
