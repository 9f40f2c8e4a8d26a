//! EUI-64 interface identifiers and random example addresses.
//!
//! Every generator takes the random source as an argument; callers normally
//! pass `&mut rand::rng()`, tests pass a seeded `StdRng`.

use super::kind::{type_prefix, Ipv6Kind};
use rand::Rng;
use std::net::Ipv6Addr;

const UNIVERSAL_LOCAL_BIT: u8 = 0x02;
const INDIVIDUAL_GROUP_BIT: u8 = 0x01;

/// Documentation marker placed in bytes 2-5 of random global addresses.
const GLOBAL_MARKER: [u8; 4] = [0x0d, 0xb8, 0xca, 0xfe];
const MULTICAST_FLAGS: [u8; 3] = [0x1, 0x2, 0x3];
const MULTICAST_SCOPES: [u8; 6] = [0x3, 0x4, 0x5, 0x8, 0xe, 0xf];

fn eui64_layout(mac: [u8; 6]) -> [u8; 8] {
    [mac[0], mac[1], mac[2], 0xff, 0xfe, mac[3], mac[4], mac[5]]
}

/// Modified EUI-64 interface identifier for a MAC address.
///
/// The universal/local bit is inverted and the individual/group bit cleared.
///
/// # Examples
/// ```
/// use subnet_toolkit::taxonomy::eui64_from_mac;
/// let iid = eui64_from_mac([0x00, 0x1b, 0x44, 0x11, 0x3a, 0xb7]);
/// assert_eq!(iid, [0x02, 0x1b, 0x44, 0xff, 0xfe, 0x11, 0x3a, 0xb7]);
/// ```
pub fn eui64_from_mac(mac: [u8; 6]) -> [u8; 8] {
    let mut iid = eui64_layout(mac);
    iid[0] = (iid[0] ^ UNIVERSAL_LOCAL_BIT) & !INDIVIDUAL_GROUP_BIT;
    iid
}

/// Recover the MAC from an EUI-64 identifier, `None` without the `ff:fe` filler.
pub fn mac_from_eui64(iid: [u8; 8]) -> Option<[u8; 6]> {
    if iid[3] != 0xff || iid[4] != 0xfe {
        return None;
    }
    Some([
        iid[0] ^ UNIVERSAL_LOCAL_BIT,
        iid[1],
        iid[2],
        iid[5],
        iid[6],
        iid[7],
    ])
}

/// Interface identifier from a random, locally administered unicast MAC.
pub fn random_interface_id<R: Rng + ?Sized>(rng: &mut R) -> [u8; 8] {
    let mac: [u8; 6] = rng.random();
    let mut iid = eui64_layout(mac);
    iid[0] = (iid[0] | UNIVERSAL_LOCAL_BIT) & !INDIVIDUAL_GROUP_BIT;
    iid
}

fn with_interface_id<R: Rng + ?Sized>(mut bytes: [u8; 16], rng: &mut R) -> Ipv6Addr {
    bytes[8..].copy_from_slice(&random_interface_id(rng));
    Ipv6Addr::from(bytes)
}

/// Address in `2000::/3` carrying the `0db8:cafe` marker in bytes 2-5.
pub fn random_global_unicast<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    let mut bytes = [0u8; 16];
    bytes[0] = rng.random_range(0x20..=0x3f);
    bytes[1] = rng.random();
    bytes[2..6].copy_from_slice(&GLOBAL_MARKER);
    rng.fill(&mut bytes[6..8]);
    with_interface_id(bytes, rng)
}

pub fn random_link_local_unicast<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    let mut bytes = [0u8; 16];
    bytes[0] = 0xfe;
    bytes[1] = 0x80;
    with_interface_id(bytes, rng)
}

/// Unique-local address in `fd00::/8`.
pub fn random_private<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    let mut bytes = [0u8; 16];
    bytes[0] = 0xfd;
    rng.fill(&mut bytes[1..8]);
    with_interface_id(bytes, rng)
}

fn multicast_with_scope<R: Rng + ?Sized>(scope: u8, rng: &mut R) -> Ipv6Addr {
    let mut bytes = [0u8; 16];
    bytes[0] = 0xff;
    let flags = MULTICAST_FLAGS[rng.random_range(0..MULTICAST_FLAGS.len())];
    bytes[1] = (flags << 4) | scope;
    rng.fill(&mut bytes[4..]);
    Ipv6Addr::from(bytes)
}

/// Multicast address with a realm, admin, site, organization or global scope.
pub fn random_multicast<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    let scope = MULTICAST_SCOPES[rng.random_range(0..MULTICAST_SCOPES.len())];
    multicast_with_scope(scope, rng)
}

pub fn random_interface_local_multicast<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    multicast_with_scope(0x1, rng)
}

pub fn random_link_local_multicast<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    multicast_with_scope(0x2, rng)
}

/// Example address of `kind`; `None` for [`Ipv6Kind::Unknown`].
pub fn random_of_kind<R: Rng + ?Sized>(kind: Ipv6Kind, rng: &mut R) -> Option<Ipv6Addr> {
    let addr = match kind {
        Ipv6Kind::GlobalUnicast => random_global_unicast(rng),
        Ipv6Kind::UniqueLocal => random_private(rng),
        Ipv6Kind::Private => {
            // fc00::/8, L bit clear
            let mut bytes = random_private(rng).octets();
            bytes[0] = 0xfc;
            Ipv6Addr::from(bytes)
        }
        Ipv6Kind::LinkLocalUnicast => random_link_local_unicast(rng),
        Ipv6Kind::Multicast => random_multicast(rng),
        Ipv6Kind::InterfaceLocalMulticast => random_interface_local_multicast(rng),
        Ipv6Kind::LinkLocalMulticast => random_link_local_multicast(rng),
        Ipv6Kind::Loopback | Ipv6Kind::Unspecified => type_prefix(kind).addr,
        Ipv6Kind::Unknown => return None,
    };
    log::debug!("random_of_kind({kind}) -> {addr}");
    Some(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::classify;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_eui64_from_mac() {
        assert_eq!(
            eui64_from_mac([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]),
            [0x00, 0x00, 0x5e, 0xff, 0xfe, 0x10, 0x00, 0x01]
        );
        // group bit is cleared
        assert_eq!(eui64_from_mac([0x01, 0, 0, 0, 0, 0])[0], 0x02);
    }

    #[test]
    fn test_mac_from_eui64() {
        let mac = [0x00, 0x1b, 0x44, 0x11, 0x3a, 0xb7];
        assert_eq!(mac_from_eui64(eui64_from_mac(mac)), Some(mac));
        assert_eq!(mac_from_eui64([0, 0, 0, 0, 0, 0, 0, 1]), None);
    }

    #[test]
    fn test_random_interface_id_bits() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let iid = random_interface_id(&mut rng);
            assert_eq!(iid[0] & UNIVERSAL_LOCAL_BIT, UNIVERSAL_LOCAL_BIT);
            assert_eq!(iid[0] & INDIVIDUAL_GROUP_BIT, 0);
            assert_eq!(&iid[3..5], &[0xff, 0xfe]);
        }
    }

    #[test]
    fn test_generators_produce_their_kind() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            assert_eq!(classify(&random_global_unicast(&mut rng)), Ipv6Kind::GlobalUnicast);
            assert_eq!(
                classify(&random_link_local_unicast(&mut rng)),
                Ipv6Kind::LinkLocalUnicast
            );
            assert_eq!(classify(&random_private(&mut rng)), Ipv6Kind::UniqueLocal);
            assert_eq!(classify(&random_multicast(&mut rng)), Ipv6Kind::Multicast);
            assert_eq!(
                classify(&random_interface_local_multicast(&mut rng)),
                Ipv6Kind::InterfaceLocalMulticast
            );
            assert_eq!(
                classify(&random_link_local_multicast(&mut rng)),
                Ipv6Kind::LinkLocalMulticast
            );
        }
    }

    #[test]
    fn test_random_of_kind_round_trips() {
        let mut rng = StdRng::seed_from_u64(77);
        for kind in Ipv6Kind::ALL {
            match random_of_kind(kind, &mut rng) {
                Some(addr) => assert_eq!(classify(&addr), kind, "{addr}"),
                None => assert_eq!(kind, Ipv6Kind::Unknown),
            }
        }
    }

    #[test]
    fn test_fixed_bits() {
        let mut rng = StdRng::seed_from_u64(8);
        let global = random_global_unicast(&mut rng).octets();
        assert_eq!(&global[2..6], &GLOBAL_MARKER);
        assert!((0x20..=0x3f).contains(&global[0]));

        let link = random_link_local_unicast(&mut rng).octets();
        assert_eq!(&link[..8], &[0xfe, 0x80, 0, 0, 0, 0, 0, 0]);

        let multicast = random_multicast(&mut rng).octets();
        assert_eq!(multicast[0], 0xff);
        assert!(MULTICAST_FLAGS.contains(&(multicast[1] >> 4)));
        assert!(MULTICAST_SCOPES.contains(&(multicast[1] & 0x0f)));
        assert_eq!(&multicast[2..4], &[0, 0]);
    }

    #[test]
    fn test_works_with_thread_rng() {
        let addr = random_of_kind(Ipv6Kind::GlobalUnicast, &mut rand::rng()).unwrap();
        assert_eq!(classify(&addr), Ipv6Kind::GlobalUnicast);
    }
}
