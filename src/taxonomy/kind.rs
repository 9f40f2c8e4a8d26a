//! IPv6 address kinds and the prefixes that define them.

use crate::error::SubnetError;
use crate::models::v6_mask;
use serde::Serialize;
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// Closed set of IPv6 address kinds recognised by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Ipv6Kind {
    GlobalUnicast,
    UniqueLocal,
    LinkLocalUnicast,
    Loopback,
    Multicast,
    InterfaceLocalMulticast,
    LinkLocalMulticast,
    Private,
    Unspecified,
    #[value(skip)]
    Unknown,
}

impl Ipv6Kind {
    pub const ALL: [Ipv6Kind; 10] = [
        Ipv6Kind::GlobalUnicast,
        Ipv6Kind::UniqueLocal,
        Ipv6Kind::LinkLocalUnicast,
        Ipv6Kind::Loopback,
        Ipv6Kind::Multicast,
        Ipv6Kind::InterfaceLocalMulticast,
        Ipv6Kind::LinkLocalMulticast,
        Ipv6Kind::Private,
        Ipv6Kind::Unspecified,
        Ipv6Kind::Unknown,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Ipv6Kind::GlobalUnicast => "global-unicast",
            Ipv6Kind::UniqueLocal => "unique-local",
            Ipv6Kind::LinkLocalUnicast => "link-local-unicast",
            Ipv6Kind::Loopback => "loopback",
            Ipv6Kind::Multicast => "multicast",
            Ipv6Kind::InterfaceLocalMulticast => "interface-local-multicast",
            Ipv6Kind::LinkLocalMulticast => "link-local-multicast",
            Ipv6Kind::Private => "private",
            Ipv6Kind::Unspecified => "unspecified",
            Ipv6Kind::Unknown => "unknown",
        }
    }

    /// Kinds that own a solicited-node multicast address.
    pub const fn is_unicast(self) -> bool {
        matches!(
            self,
            Ipv6Kind::GlobalUnicast
                | Ipv6Kind::LinkLocalUnicast
                | Ipv6Kind::UniqueLocal
                | Ipv6Kind::Private
        )
    }

    pub const fn is_multicast(self) -> bool {
        matches!(
            self,
            Ipv6Kind::Multicast | Ipv6Kind::InterfaceLocalMulticast | Ipv6Kind::LinkLocalMulticast
        )
    }
}

impl fmt::Display for Ipv6Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ipv6Kind {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Ipv6Kind, SubnetError> {
        let wanted = s.trim().to_ascii_lowercase();
        Ipv6Kind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| SubnetError::Parse(s.to_string()))
    }
}

/// Prefix that defines a kind, e.g. `fe80::/10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypePrefix {
    pub addr: Ipv6Addr,
    pub bits: u8,
}

impl TypePrefix {
    const fn new(addr: Ipv6Addr, bits: u8) -> TypePrefix {
        TypePrefix { addr, bits }
    }

    pub fn contains(&self, addr: &Ipv6Addr) -> bool {
        u128::from(*addr) & v6_mask(self.bits) == u128::from(self.addr)
    }
}

impl fmt::Display for TypePrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.bits)
    }
}

/// Defining prefix of each kind.
pub const fn type_prefix(kind: Ipv6Kind) -> TypePrefix {
    match kind {
        Ipv6Kind::GlobalUnicast => TypePrefix::new(Ipv6Addr::new(0x2000, 0, 0, 0, 0, 0, 0, 0), 3),
        Ipv6Kind::UniqueLocal => TypePrefix::new(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 0), 8),
        Ipv6Kind::Private => TypePrefix::new(Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
        Ipv6Kind::LinkLocalUnicast => {
            TypePrefix::new(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10)
        }
        Ipv6Kind::Loopback => TypePrefix::new(Ipv6Addr::LOCALHOST, 128),
        Ipv6Kind::Multicast => TypePrefix::new(Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8),
        Ipv6Kind::InterfaceLocalMulticast => {
            TypePrefix::new(Ipv6Addr::new(0xff01, 0, 0, 0, 0, 0, 0, 0), 16)
        }
        Ipv6Kind::LinkLocalMulticast => {
            TypePrefix::new(Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0), 16)
        }
        Ipv6Kind::Unspecified => TypePrefix::new(Ipv6Addr::UNSPECIFIED, 128),
        Ipv6Kind::Unknown => TypePrefix::new(Ipv6Addr::UNSPECIFIED, 0),
    }
}

/// Classify an address. The first matching rule wins; the multicast scope
/// nibble is checked before the flag bits, so `ff11::1` is interface-local.
///
/// `fc00::/7` is split on the L bit instead of being one rule: `fd00::/8` is
/// [`Ipv6Kind::UniqueLocal`] and `fc00::/8` is [`Ipv6Kind::Private`].
pub fn classify(addr: &Ipv6Addr) -> Ipv6Kind {
    let octets = addr.octets();
    let in_prefix = |kind| type_prefix(kind).contains(addr);

    if in_prefix(Ipv6Kind::Multicast) {
        match octets[1] & 0x0f {
            0x1 => return Ipv6Kind::InterfaceLocalMulticast,
            0x2 => return Ipv6Kind::LinkLocalMulticast,
            _ => {}
        }
    }
    let kind = if in_prefix(Ipv6Kind::LinkLocalUnicast) {
        Ipv6Kind::LinkLocalUnicast
    } else if in_prefix(Ipv6Kind::Loopback) {
        Ipv6Kind::Loopback
    } else if in_prefix(Ipv6Kind::UniqueLocal) {
        Ipv6Kind::UniqueLocal
    } else if in_prefix(Ipv6Kind::Private) {
        Ipv6Kind::Private
    } else if in_prefix(Ipv6Kind::GlobalUnicast) {
        Ipv6Kind::GlobalUnicast
    } else if in_prefix(Ipv6Kind::Multicast) {
        Ipv6Kind::Multicast
    } else if in_prefix(Ipv6Kind::Unspecified) {
        Ipv6Kind::Unspecified
    } else {
        Ipv6Kind::Unknown
    };
    log::trace!("classify({addr}) -> {kind}");
    kind
}
