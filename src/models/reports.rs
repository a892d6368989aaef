use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::inputs::{FirewallSubinterface, SviRecord};
use super::vlan::VlanId;

/// SVI details shown in `<host>_svi_info` cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SviInfo {
    pub interface: String,
    pub vrf: String,
    pub ip: String,
}

impl SviInfo {
    pub fn render(&self) -> String {
        format!("interface={}; vrf={}; ip={}", self.interface, self.vrf, self.ip)
    }
}

impl From<&SviRecord> for SviInfo {
    fn from(svi: &SviRecord) -> Self {
        Self {
            interface: svi.interface.clone(),
            vrf: svi.vrf.clone(),
            ip: svi.ip.clone(),
        }
    }
}

/// Firewall subinterface details shown in `<host>_fw_info` cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FwInfo {
    pub interface: String,
    pub zone: String,
    pub fwd: String,
    pub ip: String,
}

impl FwInfo {
    pub fn render(&self) -> String {
        format!(
            "interface={}; zone={}; fwd={}; ip={}",
            self.interface, self.zone, self.fwd, self.ip
        )
    }
}

impl From<&FirewallSubinterface> for FwInfo {
    fn from(sub: &FirewallSubinterface) -> Self {
        Self {
            interface: sub.name.clone(),
            zone: sub.zone.clone(),
            fwd: sub.fwd.clone(),
            ip: sub.ip.clone(),
        }
    }
}

/// What one device knows about one VLAN
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DevicePresence {
    pub has_vlan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svi: Option<SviInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw: Option<FwInfo>,
}

/// Per-VLAN record of the presence matrix
#[derive(Debug, Clone, Default, Serialize)]
pub struct VlanPresence {
    /// Zone of the first core SVI whose VRF maps to a zone; empty if none
    pub zone: String,
    pub devices: BTreeMap<String, DevicePresence>,
}

/// One row of the zone comparison: what a switch has and lacks against
/// the zone baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneComparisonRow {
    #[serde(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "DC")]
    pub dc: String,
    #[serde(rename = "Switch_Type")]
    pub switch_type: String,
    #[serde(rename = "Switch")]
    pub switch: String,
    #[serde(rename = "Has_VLANs")]
    pub has_vlans: Vec<VlanId>,
    #[serde(rename = "Missing_VLANs")]
    pub missing_vlans: Vec<VlanId>,
}

/// An SVI whose VRF belongs to the zone being compared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneVrfEntry {
    #[serde(rename = "VRF_NAME")]
    pub vrf_name: String,
    #[serde(rename = "INTERFACE")]
    pub interface: String,
    #[serde(rename = "VLAN_ID")]
    pub vlan_id: VlanId,
}

/// Which data centers carry a VLAN, and on which devices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DcPresence {
    pub present_in: BTreeSet<String>,
    /// hostname -> detail (interface name for firewalls, empty for switches)
    pub devices: BTreeMap<String, String>,
    /// Firewall zone/forwarding of the last subinterface seen for the VLAN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_fwd: Option<String>,
}

/// A switch measured against the VLANs most of its group carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionComparisonRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Switch")]
    pub switch: String,
    #[serde(rename = "VLANs")]
    pub vlans: Vec<VlanId>,
    #[serde(rename = "Missing_VLANs")]
    pub missing_vlans: Vec<VlanId>,
    #[serde(rename = "Extra_VLANs")]
    pub extra_vlans: Vec<VlanId>,
}

/// VLANs configured on a single switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostVlans {
    pub hostname: String,
    pub vlans: Vec<VlanId>,
}
