use std::collections::{BTreeMap, BTreeSet};

use crate::inventory::Snapshot;
use crate::models::*;

/// Zone SVIs per hostname
pub type ZoneVrfData = BTreeMap<String, Vec<ZoneVrfEntry>>;

/// Result of comparing one zone
#[derive(Debug, Clone)]
pub struct ZoneReport {
    pub zone: String,
    pub vrf_data: ZoneVrfData,
    pub rows: Vec<ZoneComparisonRow>,
}

/// SVIs whose VRF belongs to the zone, grouped by host. Hosts without a
/// matching SVI are left out.
pub fn zone_vrf_data(snapshot: &Snapshot, zone: &ZoneDef) -> ZoneVrfData {
    snapshot
        .svi_tables
        .iter()
        .filter_map(|(host, svis)| {
            let entries: Vec<ZoneVrfEntry> = svis
                .iter()
                .filter(|svi| zone.matches(&svi.vrf))
                .map(|svi| ZoneVrfEntry {
                    vrf_name: svi.vrf.clone(),
                    interface: svi.interface.clone(),
                    vlan_id: svi.vlan,
                })
                .collect();
            (!entries.is_empty()).then(|| (host.clone(), entries))
        })
        .collect()
}

/// Compare every zone of the topology. Zones with no VRF data are skipped.
///
/// Within a DC the core switches define the baseline: the zone's VLANs (an
/// SVI in a zone VRF on a core) that are also in a core's VLAN table. Every
/// core and TOR switch is reported with the baseline VLANs it has and the
/// ones it lacks. A final pass compares all cores against the union of
/// every DC's baseline.
pub fn compare_zones(snapshot: &Snapshot, topology: &Topology) -> Vec<ZoneReport> {
    let vlan_sets = site_vlan_sets(snapshot, topology);
    let mut reports = Vec::new();

    for zone in &topology.zones {
        let vrf_data = zone_vrf_data(snapshot, zone);
        if vrf_data.is_empty() {
            tracing::info!("No VRF data found for zone {}", zone.name);
            continue;
        }
        tracing::info!("Zone {}: {} switches with zone VRFs", zone.name, vrf_data.len());

        let rows = compare_zone(&zone.name, &vrf_data, &vlan_sets, topology);
        reports.push(ZoneReport {
            zone: zone.name.clone(),
            vrf_data,
            rows,
        });
    }
    reports
}

/// VLAN tables of switches in a known site, as sets
fn site_vlan_sets(snapshot: &Snapshot, topology: &Topology) -> BTreeMap<String, BTreeSet<VlanId>> {
    snapshot
        .vlan_tables
        .keys()
        .filter(|host| topology.in_any_site(host))
        .map(|host| (host.clone(), snapshot.vlan_ids(host)))
        .collect()
}

pub fn compare_zone(
    zone: &str,
    vrf_data: &ZoneVrfData,
    vlan_sets: &BTreeMap<String, BTreeSet<VlanId>>,
    topology: &Topology,
) -> Vec<ZoneComparisonRow> {
    let empty = BTreeSet::new();
    let mut rows = Vec::new();

    let mut all_cores: BTreeMap<String, BTreeSet<VlanId>> = BTreeMap::new();
    let mut all_baseline: BTreeSet<VlanId> = BTreeSet::new();

    for dc in &topology.datacenters {
        let cores = dc.hosts(SwitchRole::Core);

        let zone_vlans_in_cor: BTreeSet<VlanId> = cores
            .iter()
            .filter_map(|core| vrf_data.get(*core))
            .flatten()
            .map(|entry| entry.vlan_id)
            .collect();
        tracing::debug!(
            "{} {} VLANs on {} cores (from VRF data): {}",
            zone,
            dc.name,
            dc.name,
            join_vlans(&zone_vlans_in_cor)
        );

        let mut baseline = BTreeSet::new();
        let core_has: Vec<(&str, BTreeSet<VlanId>)> = cores
            .iter()
            .map(|core| {
                let has: BTreeSet<VlanId> = vlan_sets
                    .get(*core)
                    .unwrap_or(&empty)
                    .intersection(&zone_vlans_in_cor)
                    .copied()
                    .collect();
                baseline.extend(has.iter().copied());
                (*core, has)
            })
            .collect();

        for (core, has) in &core_has {
            rows.push(row(zone, &dc.name, switch_type::COR_WITHIN_DC, core, has, &baseline));
        }

        for (role, label) in [
            (SwitchRole::TorPrd, switch_type::TOR_PRD),
            (SwitchRole::TorMgt, switch_type::TOR_MGT),
        ] {
            for tor in dc.hosts(role) {
                let ids = vlan_sets.get(tor).unwrap_or(&empty);
                let has: BTreeSet<VlanId> = ids.intersection(&baseline).copied().collect();
                rows.push(row(zone, &dc.name, label, tor, &has, &baseline));
            }
        }

        all_baseline.extend(baseline.iter().copied());
        all_cores.extend(core_has.into_iter().map(|(core, has)| (core.to_string(), has)));
    }

    if !all_cores.is_empty() && !all_baseline.is_empty() {
        let label = topology.cross_dc_label();
        for (core, has) in &all_cores {
            let dc = topology
                .datacenter_of(core)
                .map(|d| d.name.as_str())
                .unwrap_or("UNKNOWN");
            rows.push(row(zone, dc, &label, core, has, &all_baseline));
        }
    }

    rows
}

fn row(
    zone: &str,
    dc: &str,
    switch_type: &str,
    switch: &str,
    has: &BTreeSet<VlanId>,
    baseline: &BTreeSet<VlanId>,
) -> ZoneComparisonRow {
    let missing: Vec<VlanId> = baseline.difference(has).copied().collect();
    tracing::debug!(
        "{} [{}]: has {} / missing {}",
        switch,
        switch_type,
        join_vlans(has),
        join_vlans(&missing)
    );
    ZoneComparisonRow {
        zone: zone.to_string(),
        dc: dc.to_string(),
        switch_type: switch_type.to_string(),
        switch: switch.to_string(),
        has_vlans: has.iter().copied().collect(),
        missing_vlans: missing,
    }
}

/// Sort rows by Zone, DC, Switch_Type, then Switch
pub fn sort_rows(rows: &mut [ZoneComparisonRow]) {
    rows.sort_by(|a, b| {
        (&a.zone, &a.dc, &a.switch_type, &a.switch).cmp(&(&b.zone, &b.dc, &b.switch_type, &b.switch))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fixtures::*;

    const DC1_COR1: &str = "TU-VIC-DC1-L0-SW-COR-PRD-01";
    const DC1_COR2: &str = "TU-VIC-DC1-L0-SW-COR-PRD-02";
    const DC2_COR1: &str = "TU-NSW-DC2-L0-SW-COR-PRD-01";
    const DC2_COR2: &str = "TU-NSW-DC2-L0-SW-COR-PRD-02";
    const DC1_TOR_PRD1: &str = "TU-VIC-DC1-L0-SW-TOR-PRD-01";
    const DC1_TOR_MGT1: &str = "TU-VIC-DC1-L0-SW-TOR-MGT-01";

    fn ids(v: &[u16]) -> Vec<VlanId> {
        v.iter().map(|n| VlanId::new(*n).unwrap()).collect()
    }

    fn find<'a>(rows: &'a [ZoneComparisonRow], switch_type: &str, switch: &str) -> &'a ZoneComparisonRow {
        rows.iter()
            .find(|r| r.switch_type == switch_type && r.switch == switch)
            .unwrap_or_else(|| panic!("no row for {} {}", switch_type, switch))
    }

    fn reports(setup: impl FnOnce(&std::path::Path)) -> Vec<ZoneReport> {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        let topo = Topology::builtin();
        let snap = Snapshot::load(&config_for(dir.path(), dir.path()), &topo).unwrap();
        compare_zones(&snap, &topo)
    }

    #[test]
    fn test_core_baseline_within_dc() {
        let reports = reports(|root| {
            // 10 and 20 are EA SVIs on COR-01, 30 only on COR-02
            write_svis(root, DC1_COR1, &[(10, "EA-BMS", "10.0.10.1"), (20, "EA-HVAC", "10.0.20.1")]);
            write_svis(root, DC1_COR2, &[(30, "EA-BMS", "10.0.30.1")]);
            write_vlans(root, DC1_COR1, &[10, 20, 30, 99]);
            write_vlans(root, DC1_COR2, &[10, 30]);
        });

        assert_eq!(reports.len(), 1);
        let ea = &reports[0];
        assert_eq!(ea.zone, "EA");

        let c1 = find(&ea.rows, switch_type::COR_WITHIN_DC, DC1_COR1);
        assert_eq!(c1.has_vlans, ids(&[10, 20, 30]));
        assert!(c1.missing_vlans.is_empty());

        let c2 = find(&ea.rows, switch_type::COR_WITHIN_DC, DC1_COR2);
        assert_eq!(c2.has_vlans, ids(&[10, 30]));
        assert_eq!(c2.missing_vlans, ids(&[20]));
    }

    #[test]
    fn test_tor_compared_to_dc_baseline() {
        let reports = reports(|root| {
            write_svis(root, DC1_COR1, &[(10, "MSS", "10.0.10.1"), (20, "MSS", "10.0.20.1")]);
            write_vlans(root, DC1_COR1, &[10, 20]);
            write_vlans(root, DC1_TOR_PRD1, &[10, 500]);
        });
        let mss = reports.iter().find(|r| r.zone == "MSS").unwrap();

        let tor = find(&mss.rows, switch_type::TOR_PRD, DC1_TOR_PRD1);
        assert_eq!(tor.dc, "DC1");
        assert_eq!(tor.has_vlans, ids(&[10]));
        assert_eq!(tor.missing_vlans, ids(&[20]));

        // a TOR without any dump misses the whole baseline
        let mgt = find(&mss.rows, switch_type::TOR_MGT, DC1_TOR_MGT1);
        assert!(mgt.has_vlans.is_empty());
        assert_eq!(mgt.missing_vlans, ids(&[10, 20]));
    }

    #[test]
    fn test_cross_dc_union() {
        let reports = reports(|root| {
            write_svis(root, DC1_COR1, &[(10, "ITS", "10.0.10.1")]);
            write_svis(root, DC2_COR1, &[(40, "ITS", "10.4.0.1")]);
            write_vlans(root, DC1_COR1, &[10]);
            write_vlans(root, DC1_COR2, &[10]);
            write_vlans(root, DC2_COR1, &[40]);
            write_vlans(root, DC2_COR2, &[40, 10]);
        });
        let its = reports.iter().find(|r| r.zone == "ITS").unwrap();

        let xdc: Vec<&ZoneComparisonRow> =
            its.rows.iter().filter(|r| r.switch_type == "DC1_vs_DC2").collect();
        assert_eq!(xdc.len(), 4);

        let d1 = find(&its.rows, "DC1_vs_DC2", DC1_COR1);
        assert_eq!(d1.dc, "DC1");
        assert_eq!(d1.missing_vlans, ids(&[40]));

        // DC2 COR-02 has VLAN 10 but 10 is not a DC2 zone VLAN, so within
        // DC2 it only has 40; across DCs it still lacks 10
        let d2 = find(&its.rows, switch_type::COR_WITHIN_DC, DC2_COR2);
        assert_eq!(d2.has_vlans, ids(&[40]));
        let d2x = find(&its.rows, "DC1_vs_DC2", DC2_COR2);
        assert_eq!(d2x.dc, "DC2");
        assert_eq!(d2x.missing_vlans, ids(&[10]));
    }

    #[test]
    fn test_zone_without_vrf_data_skipped() {
        let reports = reports(|root| {
            write_svis(root, DC1_COR1, &[(10, "default", "10.0.10.1")]);
            write_vlans(root, DC1_COR1, &[10]);
        });
        assert!(reports.is_empty());
    }

    #[test]
    fn test_no_cross_dc_rows_without_baseline() {
        // zone SVI exists but no core carries the VLAN in its VLAN table
        let reports = reports(|root| {
            write_svis(root, DC1_COR1, &[(10, "CORPORATE", "10.0.10.1")]);
        });
        let corp = &reports[0];
        assert!(corp.rows.iter().all(|r| r.switch_type != "DC1_vs_DC2"));
        assert!(corp.rows.iter().all(|r| r.has_vlans.is_empty() && r.missing_vlans.is_empty()));
    }

    #[test]
    fn test_sort_rows() {
        let reports = reports(|root| {
            write_svis(root, DC2_COR1, &[(10, "EA-BMS", "10.0.10.1")]);
            write_svis(root, DC1_COR1, &[(20, "EA-BMS", "10.0.20.1")]);
            write_vlans(root, DC1_COR1, &[20]);
            write_vlans(root, DC2_COR1, &[10]);
        });
        let mut rows = reports[0].rows.clone();
        sort_rows(&mut rows);
        assert_eq!(rows[0].dc, "DC1");
        let keys: Vec<_> = rows.iter().map(|r| (&r.zone, &r.dc, &r.switch_type, &r.switch)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
