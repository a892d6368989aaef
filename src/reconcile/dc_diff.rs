use std::collections::BTreeMap;

use crate::inventory::Snapshot;
use crate::models::*;

pub type DcPresenceMap = BTreeMap<VlanId, DcPresence>;

/// Which DCs carry each VLAN in a switch VLAN table
pub fn switch_dc_presence(snapshot: &Snapshot, topology: &Topology) -> DcPresenceMap {
    let mut out = DcPresenceMap::new();
    for (host, entries) in &snapshot.vlan_tables {
        let Some(dc) = topology.datacenter_of(host) else {
            continue;
        };
        for entry in entries {
            let record = out.entry(entry.id).or_default();
            record.present_in.insert(dc.name.clone());
            record.devices.insert(host.clone(), String::new());
        }
    }
    out
}

/// Which DCs have a firewall subinterface tagged with each VLAN
pub fn firewall_dc_presence(snapshot: &Snapshot, topology: &Topology) -> DcPresenceMap {
    let mut out = DcPresenceMap::new();
    for (host, subs) in &snapshot.firewall_tables {
        let Some(dc) = topology.datacenter_of(host) else {
            continue;
        };
        for sub in subs {
            let record = out.entry(sub.vlan).or_default();
            record.present_in.insert(dc.name.clone());
            record.devices.insert(host.clone(), sub.name.clone());
            record.fw_zone = Some(sub.zone.clone());
            record.fw_fwd = Some(sub.fwd.clone());
        }
    }
    out
}

impl DcPresence {
    /// DCs of the topology that do not carry the VLAN
    pub fn missing_from<'a>(&self, topology: &'a Topology) -> Vec<&'a str> {
        topology
            .datacenters
            .iter()
            .filter(|dc| !self.present_in.contains(&dc.name))
            .map(|dc| dc.name.as_str())
            .collect()
    }
}
