//! IPv6 address taxonomy and synthesis.
//!
//! - [`kind`] - classification into [`Ipv6Kind`] and the defining prefixes
//! - [`fields`] - bit-range extraction, global ID, multicast fields, solicited-node
//! - [`synth`] - EUI-64 identifiers and random example addresses

mod fields;
mod kind;
mod synth;

pub use fields::{
    bit_range, bit_value, global_id, multicast_flags_scope, multicast_group_id,
    multicast_network_prefix, solicited_node_multicast, MulticastScope, MAX_FIELD_BITS,
};
pub use kind::{classify, type_prefix, Ipv6Kind, TypePrefix};
pub use synth::{
    eui64_from_mac, mac_from_eui64, random_global_unicast, random_interface_id,
    random_interface_local_multicast, random_link_local_multicast, random_link_local_unicast,
    random_multicast, random_of_kind, random_private,
};
