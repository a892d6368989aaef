use std::collections::BTreeSet;

use crate::inventory::Snapshot;
use crate::models::*;

/// De-duplicated, numerically sorted VLAN list of every core and TOR switch
/// in a known site.
pub fn host_vlans(snapshot: &Snapshot, topology: &Topology) -> Vec<HostVlans> {
    snapshot
        .vlan_tables
        .iter()
        .filter(|(host, _)| {
            topology.in_any_site(host) && (topology.is_core(host) || topology.is_tor(host))
        })
        .map(|(host, entries)| HostVlans {
            hostname: host.clone(),
            vlans: entries
                .iter()
                .map(|e| e.id)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        })
        .collect()
}
