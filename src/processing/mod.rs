//! Subnet processing logic.
//!
//! This module contains the enumeration and subdivision of IPv4 subnets:
//! - [`hosts`] - lazy host iteration and capped host lists
//! - [`divide`] - splitting a parent into child subnets over its class block

mod divide;
mod hosts;

// Re-export public types
pub use divide::Children;
pub use hosts::{HostIter, HostList, HOST_LIST_CAP};
