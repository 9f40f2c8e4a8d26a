//! Output formatting for subnet data.
//!
//! This module handles formatting and outputting subnet data:
//! - [`report`] - serializable subnet descriptions
//! - [`terminal`] - terminal tables with colors

mod report;
mod terminal;

pub use report::{DivideRow, Ipv4Report, Ipv6Report, MulticastReport};
pub use terminal::{format_field, write_lines, write_table};
