use std::collections::BTreeMap;

use crate::inventory::Snapshot;
use crate::models::*;

/// Per-VLAN view of every switch and firewall that mentions the VLAN
#[derive(Debug, Clone, Default)]
pub struct PresenceMatrix {
    pub vlans: BTreeMap<VlanId, VlanPresence>,
}

impl PresenceMatrix {
    /// Merge the three dump kinds into one matrix.
    ///
    /// VLAN tables count for switches in a known site, SVI tables only for
    /// core switches in a known site, firewall tables only for firewalls in
    /// a known firewall site.
    pub fn build(snapshot: &Snapshot, topology: &Topology) -> Self {
        let mut vlans: BTreeMap<VlanId, VlanPresence> = BTreeMap::new();

        for (host, entries) in &snapshot.vlan_tables {
            if !topology.in_any_site(host) {
                tracing::debug!("Skipping VLAN table of {} (unknown site)", host);
                continue;
            }
            for entry in entries {
                vlans
                    .entry(entry.id)
                    .or_default()
                    .devices
                    .entry(host.clone())
                    .or_default()
                    .has_vlan = true;
            }
        }

        for (host, svis) in &snapshot.svi_tables {
            if !topology.is_core(host) || !topology.in_any_site(host) {
                continue;
            }
            for svi in svis {
                let record = vlans.entry(svi.vlan).or_default();
                if record.zone.is_empty() {
                    if let Some(zone) = topology.zone_for_vrf(&svi.vrf) {
                        record.zone = zone.name.clone();
                    }
                }
                record.devices.entry(host.clone()).or_default().svi = Some(SviInfo::from(svi));
            }
        }

        for (host, subs) in &snapshot.firewall_tables {
            if !topology.is_firewall(host) || !topology.in_any_firewall_site(host) {
                continue;
            }
            for sub in subs {
                vlans
                    .entry(sub.vlan)
                    .or_default()
                    .devices
                    .entry(host.clone())
                    .or_default()
                    .fw = Some(FwInfo::from(sub));
            }
        }

        tracing::info!("Presence matrix covers {} VLANs", vlans.len());
        Self { vlans }
    }

    /// True only when every core switch of the DC has an entry for the VLAN.
    /// A DC without core switches is never complete.
    pub fn dc_complete(presence: &VlanPresence, dc: &Datacenter) -> bool {
        let cores = dc.hosts(SwitchRole::Core);
        !cores.is_empty() && cores.iter().all(|core| presence.devices.contains_key(*core))
    }
}
