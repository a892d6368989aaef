use std::collections::{BTreeMap, BTreeSet};

use crate::inventory::Snapshot;
use crate::models::*;

/// Compare every switch group of every DC against its majority: the VLANs
/// carried by more than half of the group's hosts. Hosts without a dump
/// count as carrying nothing.
pub fn compare_regions(snapshot: &Snapshot, topology: &Topology) -> Vec<RegionComparisonRow> {
    let mut rows = Vec::new();

    for dc in &topology.datacenters {
        for group in &dc.groups {
            let region = format!("{}_{}", dc.name, group.role.label());
            let sets: Vec<(&str, BTreeSet<VlanId>)> = group
                .hosts
                .iter()
                .map(|h| (h.as_str(), snapshot.vlan_ids(h)))
                .collect();

            let mut counts: BTreeMap<VlanId, usize> = BTreeMap::new();
            for id in sets.iter().flat_map(|(_, ids)| ids.iter()) {
                *counts.entry(*id).or_default() += 1;
            }
            let threshold = group.hosts.len() / 2;
            let majority: BTreeSet<VlanId> = counts
                .into_iter()
                .filter(|(_, n)| *n > threshold)
                .map(|(id, _)| id)
                .collect();
            tracing::debug!("{} majority VLANs: {}", region, join_vlans(&majority));

            for (host, ids) in sets {
                rows.push(RegionComparisonRow {
                    region: region.clone(),
                    switch: host.to_string(),
                    vlans: ids.iter().copied().collect(),
                    missing_vlans: majority.difference(&ids).copied().collect(),
                    extra_vlans: ids.difference(&majority).copied().collect(),
                });
            }
        }
    }
    rows
}
