//! Serializable descriptions of subnets.
//!
//! Reports are built once from the typed models and then either printed as a
//! label/value table or serialized to JSON.

use crate::models::{expanded, reverse_dns, AddressRange, Ipv4Class, Ipv4Subnet, Ipv6Subnet};
use crate::taxonomy::{
    bit_range, classify, global_id, mac_from_eui64, multicast_flags_scope, multicast_group_id,
    multicast_network_prefix, solicited_node_multicast, type_prefix, Ipv6Kind, MulticastScope,
};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Attributes of an IPv4 subnet as shown by `describe`.
#[derive(Debug, Clone, Serialize)]
pub struct Ipv4Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Address as given, before masking.
    pub address: Ipv4Addr,
    pub cidr: Ipv4Subnet,
    pub class: Ipv4Class,
    pub mask: Ipv4Addr,
    pub binary_mask: String,
    pub wildcard: Ipv4Addr,
    pub binary_id: String,
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    /// Subnets of this size in the class block.
    pub networks: u64,
    pub hosts_per_network: u64,
    pub total_hosts: u64,
    pub usable_range: Option<AddressRange<Ipv4Addr>>,
    pub usable_hosts: u64,
    pub reverse_dns: String,
}

impl Ipv4Report {
    pub fn new(address: Ipv4Addr, subnet: &Ipv4Subnet) -> Ipv4Report {
        Ipv4Report {
            name: subnet.name().map(str::to_string),
            address,
            cidr: subnet.clone(),
            class: subnet.class(),
            mask: subnet.mask(),
            binary_mask: subnet.binary_mask(),
            wildcard: subnet.wildcard(),
            binary_id: subnet.binary_id(),
            first: subnet.first(),
            last: subnet.last(),
            broadcast: subnet.broadcast(),
            networks: subnet.networks(),
            hosts_per_network: subnet.hosts_per_network(),
            total_hosts: subnet.total_hosts(),
            usable_range: subnet.usable_range(),
            usable_hosts: subnet.usable_hosts(),
            reverse_dns: reverse_dns(&IpAddr::V4(address)),
        }
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some(name) = &self.name {
            rows.push(("Name", name.clone()));
        }
        rows.extend([
            ("Address", self.address.to_string()),
            ("CIDR", self.cidr.to_string()),
            ("Class", self.class.to_string()),
            ("Mask", self.mask.to_string()),
            ("Binary mask", self.binary_mask.clone()),
            ("Wildcard", self.wildcard.to_string()),
            ("Binary ID", self.binary_id.clone()),
            ("First", self.first.to_string()),
            ("Last", self.last.to_string()),
            ("Broadcast", self.broadcast.to_string()),
            ("Networks", self.networks.to_string()),
            ("Hosts per network", self.hosts_per_network.to_string()),
            ("Total hosts", self.total_hosts.to_string()),
            (
                "Usable range",
                self.usable_range
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            ("Usable hosts", self.usable_hosts.to_string()),
            ("Reverse DNS", self.reverse_dns.clone()),
        ]);
        rows
    }
}

/// Attributes of an IPv6 subnet and the address it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct Ipv6Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: Ipv6Addr,
    pub expanded: String,
    pub cidr: Ipv6Subnet,
    pub kind: Ipv6Kind,
    pub type_prefix: String,
    pub first: Ipv6Addr,
    pub last: Ipv6Addr,
    pub prefix: String,
    pub routing_prefix: String,
    pub subnet_id: String,
    pub interface: String,
    /// Low 64 bits of the address.
    pub interface_id: String,
    /// MAC recovered from an EUI-64 interface identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eui48: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicited_node: Option<Ipv6Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multicast: Option<MulticastReport>,
    pub reverse_dns: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MulticastReport {
    pub flags: u8,
    pub scope: MulticastScope,
    pub network_prefix: String,
    pub group_id: String,
}

impl Ipv6Report {
    pub fn new(address: Ipv6Addr, subnet: &Ipv6Subnet) -> Ipv6Report {
        let kind = classify(&address);
        let mut iid = [0u8; 8];
        iid.copy_from_slice(&address.octets()[8..]);
        let multicast = multicast_flags_scope(&address).and_then(|(flags, scope)| {
            Some(MulticastReport {
                flags,
                scope,
                network_prefix: multicast_network_prefix(&address)?,
                group_id: multicast_group_id(&address)?,
            })
        });
        Ipv6Report {
            name: subnet.name().map(str::to_string),
            address,
            expanded: expanded(&address),
            cidr: subnet.clone(),
            kind,
            type_prefix: type_prefix(kind).to_string(),
            first: subnet.first(),
            last: subnet.last(),
            prefix: subnet.prefix_string(),
            routing_prefix: subnet.routing_prefix_string(),
            subnet_id: subnet.subnet_string(),
            interface: subnet.interface_string(),
            interface_id: bit_range(&address, 64, 128).unwrap_or_default(),
            eui48: mac_from_eui64(iid).map(|mac| mac.iter().map(|b| format!("{b:02x}")).join(":")),
            global_id: global_id(&address),
            solicited_node: solicited_node_multicast(&address).ok(),
            multicast,
            reverse_dns: reverse_dns(&IpAddr::V6(address)),
        }
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some(name) = &self.name {
            rows.push(("Name", name.clone()));
        }
        rows.extend([
            ("Address", self.address.to_string()),
            ("Expanded", self.expanded.clone()),
            ("CIDR", self.cidr.to_string()),
            ("Kind", self.kind.to_string()),
            ("Type prefix", self.type_prefix.clone()),
            ("First", self.first.to_string()),
            ("Last", self.last.to_string()),
            ("Prefix", self.prefix.clone()),
            ("Routing prefix", self.routing_prefix.clone()),
            ("Subnet ID", self.subnet_id.clone()),
            ("Interface", self.interface.clone()),
            ("Interface ID", self.interface_id.clone()),
        ]);
        if let Some(mac) = &self.eui48 {
            rows.push(("EUI-48", mac.clone()));
        }
        if let Some(id) = &self.global_id {
            rows.push(("Global ID", id.clone()));
        }
        if let Some(node) = self.solicited_node {
            rows.push(("Solicited-node", node.to_string()));
        }
        if let Some(m) = &self.multicast {
            rows.extend([
                ("Multicast flags", format!("{:x}", m.flags)),
                ("Multicast scope", m.scope.to_string()),
                ("Multicast prefix", m.network_prefix.clone()),
                ("Group ID", m.group_id.clone()),
            ]);
        }
        rows.push(("Reverse DNS", self.reverse_dns.clone()));
        rows
    }
}

/// One child of a `divide`.
#[derive(Debug, Clone, Serialize)]
pub struct DivideRow {
    pub cidr: Ipv4Subnet,
    pub range: AddressRange<Ipv4Addr>,
    pub usable: u64,
}

impl DivideRow {
    pub fn new(subnet: Ipv4Subnet) -> DivideRow {
        DivideRow {
            range: subnet.range(),
            usable: subnet.usable_hosts(),
            cidr: subnet,
        }
    }
}

impl fmt::Display for DivideRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.cidr, self.range, self.usable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(rows: &'a [(&'static str, String)], label: &str) -> Option<&'a str> {
        rows.iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_ipv4_report() {
        let subnet = Ipv4Subnet::new("200.200.200.200", 28).unwrap();
        let report = Ipv4Report::new(Ipv4Addr::new(200, 200, 200, 200), &subnet);
        let rows = report.rows();
        assert_eq!(lookup(&rows, "CIDR"), Some("200.200.200.192/28"));
        assert_eq!(lookup(&rows, "Class"), Some("C"));
        assert_eq!(lookup(&rows, "Hosts per network"), Some("16"));
        assert_eq!(lookup(&rows, "Usable hosts"), Some("14"));
        assert_eq!(lookup(&rows, "Mask"), Some("255.255.255.240"));
        assert_eq!(lookup(&rows, "Broadcast"), Some("200.200.200.207"));
        assert_eq!(
            lookup(&rows, "Usable range"),
            Some("200.200.200.193-200.200.200.206")
        );
        assert_eq!(lookup(&rows, "Name"), None);
    }

    #[test]
    fn test_ipv4_report_json() {
        let subnet = Ipv4Subnet::named("10.0.0.1", 32, "gw").unwrap();
        let report = Ipv4Report::new(Ipv4Addr::new(10, 0, 0, 1), &subnet);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "gw");
        assert_eq!(json["cidr"], "10.0.0.1/32");
        assert_eq!(json["class"], "A");
        assert!(json["usable_range"].is_null());
        assert_eq!(json["reverse_dns"], "1.0.0.10.in-addr.arpa");
    }

    #[test]
    fn test_ipv6_report_unicast() {
        let address: Ipv6Addr = "fe80::21b:44ff:fe11:3ab7".parse().unwrap();
        let subnet = Ipv6Subnet::new(&address.to_string(), 64).unwrap();
        let report = Ipv6Report::new(address, &subnet);
        assert_eq!(report.kind, Ipv6Kind::LinkLocalUnicast);
        assert_eq!(report.type_prefix, "fe80::/10");
        assert_eq!(report.eui48.as_deref(), Some("00:1b:44:11:3a:b7"));
        assert_eq!(report.interface_id, "021b:44ff:fe11:3ab7");
        assert_eq!(report.solicited_node, Some("ff02::1:ff11:3ab7".parse().unwrap()));
        assert!(report.multicast.is_none());
        assert_eq!(report.global_id, None);
        let rows = report.rows();
        assert_eq!(lookup(&rows, "Multicast scope"), None);
        assert_eq!(lookup(&rows, "CIDR"), Some("fe80::/64"));
    }

    #[test]
    fn test_ipv6_report_multicast() {
        let address: Ipv6Addr = "ff3e::1234:5678:abcd:1".parse().unwrap();
        let subnet = Ipv6Subnet::new(&address.to_string(), 128).unwrap();
        let report = Ipv6Report::new(address, &subnet);
        let multicast = report.multicast.clone().unwrap();
        assert_eq!(multicast.flags, 3);
        assert_eq!(multicast.scope, MulticastScope::Global);
        assert_eq!(report.solicited_node, None);
        let rows = report.rows();
        assert_eq!(lookup(&rows, "Group ID"), Some("abcd:0001"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "multicast");
        assert_eq!(json["multicast"]["scope"], "global");
    }

    #[test]
    fn test_divide_row() {
        let row = DivideRow::new(Ipv4Subnet::new("192.168.0.64", 26).unwrap());
        assert_eq!(row.range.to_string(), "192.168.0.64-192.168.0.127");
        assert_eq!(row.usable, 62);
        assert_eq!(row.to_string(), "192.168.0.64/26 192.168.0.64-192.168.0.127 62");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["cidr"], "192.168.0.64/26");
        assert_eq!(json["range"]["first"], "192.168.0.64");
    }
}
