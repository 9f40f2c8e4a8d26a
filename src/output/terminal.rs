//! Terminal output utilities.
//!
//! Provides formatting helpers for the label/value tables and line lists
//! printed by the CLI.

use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};

/// Format a label as a left-aligned field followed by a colon.
///
/// # Arguments
/// * `value` - The label to format
/// * `width` - The minimum width of the field, colon included
///
/// # Returns
/// The padded label
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let labelled = format!("{}:", value.to_string());
    if labelled.len() >= width {
        labelled
    } else {
        format!("{labelled:<width$}")
    }
}

/// Write `rows` as an aligned two column table.
pub fn write_table<W: Write>(out: &mut W, rows: &[(&str, String)]) -> io::Result<()> {
    let width = rows.iter().map(|(label, _)| label.len() + 2).max().unwrap_or(0);
    for (label, value) in rows {
        writeln!(out, "{}{}", format_field(label, width).cyan(), value.bold())?;
    }
    Ok(())
}

/// Write one item per line.
pub fn write_lines<W, I>(out: &mut W, items: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    for item in items {
        writeln!(out, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("Mask", 10), "Mask:     ");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("Mask", 5), "Mask:");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("Broadcast", 5), "Broadcast:");
    }

    #[test]
    fn test_write_table_aligns_values() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_table(
            &mut out,
            &[("CIDR", "10.0.0.0/8".to_string()), ("Class", "A".to_string())],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "CIDR:  10.0.0.0/8\nClass: A\n"
        );
    }

    #[test]
    fn test_write_lines() {
        let mut out = Vec::new();
        write_lines(&mut out, [1, 2, 3]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n3\n");
    }
}
