use serde::{Deserialize, Serialize};

/// Role of a switch within a data center
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchRole {
    Core,
    TorPrd,
    TorMgt,
    Access,
    Oob,
}

impl SwitchRole {
    /// Suffix of the region name of a switch group, e.g. "DC1_TOR_PRD"
    pub fn label(self) -> &'static str {
        match self {
            SwitchRole::Core => "Core",
            SwitchRole::TorPrd => "TOR_PRD",
            SwitchRole::TorMgt => "TOR_MGT",
            SwitchRole::Access => "ACC",
            SwitchRole::Oob => "OOB",
        }
    }
}

/// Canonical Switch_Type values in zone comparison rows
pub mod switch_type {
    pub const COR_WITHIN_DC: &str = "COR_within_DC";
    pub const TOR_PRD: &str = "TOR_PRD";
    pub const TOR_MGT: &str = "TOR_MGT";
}

/// Topology is the hand-maintained inventory of data centers, their switch
/// groups and firewalls, and the zone table used to classify VRFs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub datacenters: Vec<Datacenter>,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default = "default_core_marker")]
    pub core_marker: String,
    #[serde(default = "default_tor_marker")]
    pub tor_marker: String,
    #[serde(default = "default_firewall_marker")]
    pub firewall_marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datacenter {
    /// Short name used in report columns, e.g. "DC1"
    pub name: String,
    /// Hostname substring identifying switches in this DC, e.g. "TU-VIC-DC1"
    pub site_tag: String,
    /// Hostname substring identifying this DC's firewalls, e.g. "MIT"
    #[serde(default)]
    pub firewall_tag: String,
    #[serde(default)]
    pub groups: Vec<SwitchGroup>,
    #[serde(default)]
    pub firewalls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchGroup {
    pub role: SwitchRole,
    pub hosts: Vec<String>,
}

/// A logical zone and the VRF name substrings that belong to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDef {
    pub name: String,
    pub patterns: Vec<String>,
}

fn default_core_marker() -> String {
    "COR".to_string()
}

fn default_tor_marker() -> String {
    "TOR".to_string()
}

fn default_firewall_marker() -> String {
    "DCFW".to_string()
}
