//! IPv4 and IPv6 subnet toolkit.
//!
//! Library behind the `subnet` binary:
//! - [`models`] - address primitives, [`Ipv4Subnet`] and [`Ipv6Subnet`]
//! - [`processing`] - host enumeration and splitting of IPv4 subnets
//! - [`taxonomy`] - IPv6 kinds, bit fields and random example addresses
//! - [`output`] - reports and terminal tables
//! - [`cli`] / [`config`] - argument parsing, logging set-up

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod taxonomy;

pub use error::{Result, SubnetError};
pub use models::{AddressRange, Ipv4Subnet, Ipv6Subnet};
pub use taxonomy::{classify, Ipv6Kind};
