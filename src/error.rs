//! Error type shared by the address, subnet and taxonomy modules.

use crate::taxonomy::Ipv6Kind;

/// Errors produced by the core. The CLI maps them to exit codes with
/// [`SubnetError::exit_code`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubnetError {
    /// Malformed address or prefix text.
    #[error("cannot parse '{0}' as an IP address or prefix")]
    Parse(String),
    /// Prefix bits out of range for the family, or an unusable prefix text.
    #[error("invalid prefix: {0}")]
    InvalidPrefix(String),
    /// Address family mismatch.
    #[error("address family mismatch: {0}")]
    TooLarge(String),
    /// Split requested into a shorter prefix than the parent.
    #[error("child prefix /{child} is shorter than parent prefix /{parent}")]
    ChildTooLarge { parent: u8, child: u8 },
    /// Arithmetic left the address space.
    #[error("address arithmetic overflowed the address space")]
    Overflow,
    /// Solicited-node multicast requested for a non-unicast source.
    #[error("{0} address has no solicited-node multicast address")]
    NotUnicast(Ipv6Kind),
    #[error("range start is above range end")]
    InvalidRange,
    #[error("bit range [{start}, {end}) is not a valid field of at most 64 bits")]
    BitRange { start: u8, end: u8 },
    /// Refused to materialise more than `cap` items.
    #[error("{count} items exceed the enumeration cap of {cap}")]
    TooMany { count: u128, cap: u128 },
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// Writing the report failed.
    #[error("output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for SubnetError {
    fn from(e: std::io::Error) -> Self {
        SubnetError::Output(e.to_string())
    }
}

impl From<serde_json::Error> for SubnetError {
    fn from(e: serde_json::Error) -> Self {
        SubnetError::Output(e.to_string())
    }
}

impl SubnetError {
    /// `1` for bad input, `2` for arithmetic failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            SubnetError::Overflow
            | SubnetError::ChildTooLarge { .. }
            | SubnetError::TooMany { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubnetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SubnetError::Parse("x".to_string()).exit_code(), 1);
        assert_eq!(SubnetError::InvalidPrefix("x".to_string()).exit_code(), 1);
        assert_eq!(SubnetError::TooLarge("x".to_string()).exit_code(), 1);
        assert_eq!(SubnetError::NotUnicast(Ipv6Kind::Multicast).exit_code(), 1);
        assert_eq!(SubnetError::Overflow.exit_code(), 2);
        assert_eq!(SubnetError::ChildTooLarge { parent: 24, child: 16 }.exit_code(), 2);
        assert_eq!(SubnetError::TooMany { count: 5, cap: 4 }.exit_code(), 2);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SubnetError::ChildTooLarge { parent: 24, child: 16 }.to_string(),
            "child prefix /16 is shorter than parent prefix /24"
        );
        assert_eq!(
            SubnetError::NotUnicast(Ipv6Kind::Multicast).to_string(),
            "multicast address has no solicited-node multicast address"
        );
    }
}
