use crate::models::*;

const DC1_SITE: &str = "TU-VIC-DC1";
const DC2_SITE: &str = "TU-NSW-DC2";

fn switches(site: &str, kind: &str, numbers: &[u8]) -> Vec<String> {
    numbers
        .iter()
        .map(|n| format!("{}-L0-SW-{}-{:02}", site, kind, n))
        .collect()
}

fn group(role: SwitchRole, hosts: Vec<String>) -> SwitchGroup {
    SwitchGroup { role, hosts }
}

fn zone(name: &str, patterns: &[&str]) -> ZoneDef {
    ZoneDef {
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

/// The two production data centers as they are racked today
pub fn get_default_topology() -> Topology {
    Topology {
        datacenters: vec![
            Datacenter {
                name: "DC1".to_string(),
                site_tag: DC1_SITE.to_string(),
                firewall_tag: "MIT".to_string(),
                groups: vec![
                    group(SwitchRole::Core, switches(DC1_SITE, "COR-PRD", &[1, 2])),
                    group(SwitchRole::TorMgt, switches(DC1_SITE, "TOR-MGT", &[1, 2, 3, 4, 5])),
                    group(
                        SwitchRole::TorPrd,
                        switches(DC1_SITE, "TOR-PRD", &[1, 2, 3, 4, 5, 6, 7]),
                    ),
                ],
                firewalls: vec!["TUVIC-MIT-PA-DCFW1".to_string()],
            },
            Datacenter {
                name: "DC2".to_string(),
                site_tag: DC2_SITE.to_string(),
                firewall_tag: "BKH".to_string(),
                groups: vec![
                    group(SwitchRole::Core, switches(DC2_SITE, "COR-PRD", &[1, 2])),
                    group(SwitchRole::Access, switches(DC2_SITE, "ACC-PRD", &[1, 2, 3, 4, 5, 6])),
                    group(SwitchRole::Oob, switches(DC2_SITE, "OOB-PRD", &[1, 2])),
                    group(
                        SwitchRole::TorMgt,
                        switches(DC2_SITE, "TOR-MGT", &[1, 2, 3, 4, 5, 6, 7, 8, 9]),
                    ),
                    // PRD-08 was never racked
                    group(
                        SwitchRole::TorPrd,
                        switches(DC2_SITE, "TOR-PRD", &[1, 2, 3, 4, 5, 6, 7, 9, 10]),
                    ),
                ],
                firewalls: vec!["TUNSW-BKH-PA-DCFW1".to_string()],
            },
        ],
        zones: vec![
            zone("EA", &["EA-BMS", "EA-"]),
            zone("MSS", &["MSS"]),
            zone("ITS", &["ITS"]),
            zone("CORPORATE", &["corporate"]),
        ],
        core_marker: "COR".to_string(),
        tor_marker: "TOR".to_string(),
        firewall_marker: "DCFW".to_string(),
    }
}
