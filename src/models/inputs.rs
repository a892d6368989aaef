use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::vlan::{InvalidVlanId, VlanId};

/// A VLAN tag as it appears in a dump: some collectors emit numbers,
/// others strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawVlanId {
    Number(i64),
    Text(String),
}

impl RawVlanId {
    pub fn parse(&self) -> Result<VlanId, InvalidVlanId> {
        match self {
            RawVlanId::Number(n) => VlanId::try_from(*n),
            RawVlanId::Text(s) => s.parse(),
        }
    }

    /// Firewalls report untagged interfaces with tag 0
    pub fn is_untagged(&self) -> bool {
        match self {
            RawVlanId::Number(n) => *n == 0,
            RawVlanId::Text(s) => s.trim().is_empty() || s.trim() == "0",
        }
    }
}

// --- show_vlan.json ---

#[derive(Debug, Clone, Deserialize)]
pub struct ShowVlanEntry {
    #[serde(rename = "VLAN_ID")]
    pub vlan_id: RawVlanId,
    #[serde(rename = "VLAN_NAME", default)]
    pub vlan_name: String,
}

// --- show_ip_interface_brief_vrf_all.json ---

#[derive(Debug, Clone, Deserialize)]
pub struct ShowIpInterfaceEntry {
    #[serde(rename = "INTERFACE")]
    pub interface: String,
    #[serde(rename = "VRF", default)]
    pub vrf: Option<String>,
    #[serde(rename = "IP_ADDRESS", default)]
    pub ip_address: Option<String>,
}

// --- show_interface_all.json (firewall API response) ---

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallInterfaceDump {
    pub response: FirewallResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallResponse {
    pub result: FirewallResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallResult {
    pub ifnet: FirewallIfnet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallIfnet {
    #[serde(default, deserialize_with = "one_or_many")]
    pub entry: Vec<FirewallInterface>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallInterface {
    pub name: String,
    #[serde(default)]
    pub tag: Option<RawVlanId>,
    /// None when the key is absent, Some(None) when it is null
    #[serde(default, deserialize_with = "present")]
    pub zone: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub fwd: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub ip: Option<Option<String>>,
}

impl FirewallInterface {
    /// The VLAN tag of a subinterface; None for untagged interfaces
    pub fn vlan_tag(&self) -> Option<&RawVlanId> {
        self.tag.as_ref().filter(|t| !t.is_untagged())
    }
}

/// Keeps an explicit null apart from a missing key
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// The firewall API collapses a one-element list into a bare object and
/// an empty list into null.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

// --- Normalized records ---

/// Why a single record of an otherwise readable dump was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    InvalidVlan(InvalidVlanId),
    MissingField { record: String, field: &'static str },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::InvalidVlan(e) => write!(f, "{}", e),
            RecordError::MissingField { record, field } => {
                write!(f, "{} has no {} field", record, field)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl From<InvalidVlanId> for RecordError {
    fn from(e: InvalidVlanId) -> Self {
        RecordError::InvalidVlan(e)
    }
}

fn required<T: Clone>(value: &Option<T>, record: &str, field: &'static str) -> Result<T, RecordError> {
    value.clone().ok_or_else(|| RecordError::MissingField {
        record: record.to_string(),
        field,
    })
}

/// A VLAN configured on a switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanEntry {
    pub id: VlanId,
    pub name: String,
}

impl TryFrom<&ShowVlanEntry> for VlanEntry {
    type Error = InvalidVlanId;

    fn try_from(entry: &ShowVlanEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.vlan_id.parse()?,
            name: entry.vlan_name.clone(),
        })
    }
}

/// A routed VLAN interface (SVI) on a core switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SviRecord {
    pub vlan: VlanId,
    pub interface: String,
    pub vrf: String,
    pub ip: String,
}

impl SviRecord {
    /// Ok(None) when the interface is not a `Vlan<N>` SVI. An SVI must
    /// carry both VRF and IP_ADDRESS.
    pub fn from_entry(entry: &ShowIpInterfaceEntry) -> Result<Option<Self>, RecordError> {
        let Some(vlan) = VlanId::from_svi_interface(&entry.interface) else {
            return Ok(None);
        };
        Ok(Some(Self {
            vlan,
            interface: entry.interface.clone(),
            vrf: required(&entry.vrf, &entry.interface, "VRF")?,
            ip: required(&entry.ip_address, &entry.interface, "IP_ADDRESS")?,
        }))
    }
}

/// A tagged firewall subinterface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirewallSubinterface {
    pub vlan: VlanId,
    pub name: String,
    pub zone: String,
    pub fwd: String,
    pub ip: String,
}

impl FirewallSubinterface {
    /// Ok(None) for untagged interfaces. A tagged subinterface must carry
    /// zone, fwd and ip keys; a null value reads as empty.
    pub fn from_interface(iface: &FirewallInterface) -> Result<Option<Self>, RecordError> {
        let Some(tag) = iface.vlan_tag() else {
            return Ok(None);
        };
        let field = |value: &Option<Option<String>>, name| {
            required(value, &iface.name, name).map(Option::unwrap_or_default)
        };
        Ok(Some(Self {
            vlan: tag.parse()?,
            name: iface.name.clone(),
            zone: field(&iface.zone, "zone")?,
            fwd: field(&iface.fwd, "fwd")?,
            ip: field(&iface.ip, "ip")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_vlan_mixed_id_types() {
        let raw = r#"[
            {"VLAN_ID": 10, "VLAN_NAME": "users"},
            {"VLAN_ID": "20", "VLAN_NAME": "servers"},
            {"VLAN_ID": "30"}
        ]"#;
        let entries: Vec<ShowVlanEntry> = serde_json::from_str(raw).unwrap();
        let ids: Vec<u16> = entries
            .iter()
            .map(|e| VlanEntry::try_from(e).unwrap().id.get())
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert_eq!(entries[2].vlan_name, "");
    }

    #[test]
    fn test_show_vlan_bad_id() {
        let raw = r#"[{"VLAN_ID": "default", "VLAN_NAME": "x"}]"#;
        let entries: Vec<ShowVlanEntry> = serde_json::from_str(raw).unwrap();
        assert!(VlanEntry::try_from(&entries[0]).is_err());
    }

    #[test]
    fn test_svi_record_only_for_vlan_interfaces() {
        let raw = r#"[
            {"INTERFACE": "Vlan110", "VRF": "EA-BMS", "IP_ADDRESS": "10.1.10.1"},
            {"INTERFACE": "loopback0", "VRF": "default", "IP_ADDRESS": "10.255.0.1"}
        ]"#;
        let entries: Vec<ShowIpInterfaceEntry> = serde_json::from_str(raw).unwrap();
        let svis: Vec<SviRecord> = entries
            .iter()
            .filter_map(|e| SviRecord::from_entry(e).unwrap())
            .collect();
        assert_eq!(svis.len(), 1);
        assert_eq!(svis[0].vlan.get(), 110);
        assert_eq!(svis[0].vrf, "EA-BMS");
    }

    #[test]
    fn test_firewall_dump_list() {
        let raw = r#"{"response": {"result": {"ifnet": {"entry": [
            {"name": "ae1", "tag": "0", "zone": null, "fwd": "N/A", "ip": "N/A"},
            {"name": "ae1.110", "tag": "110", "zone": "ea-bms", "fwd": "vr:default", "ip": "10.1.10.2/24"},
            {"name": "ethernet1/1", "zone": "untrust", "fwd": "vr:default", "ip": "192.0.2.1/30"}
        ]}}}}"#;
        let dump: FirewallInterfaceDump = serde_json::from_str(raw).unwrap();
        let subs: Vec<FirewallSubinterface> = dump
            .response
            .result
            .ifnet
            .entry
            .iter()
            .filter_map(|i| FirewallSubinterface::from_interface(i).unwrap())
            .collect();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].vlan.get(), 110);
        assert_eq!(subs[0].name, "ae1.110");
        assert_eq!(subs[0].zone, "ea-bms");
    }

    #[test]
    fn test_firewall_dump_single_entry_and_null() {
        let single = r#"{"response": {"result": {"ifnet": {"entry":
            {"name": "ae2.200", "tag": 200, "zone": "mss", "fwd": "vr:default", "ip": "10.2.0.1/24"}
        }}}}"#;
        let dump: FirewallInterfaceDump = serde_json::from_str(single).unwrap();
        assert_eq!(dump.response.result.ifnet.entry.len(), 1);

        let empty = r#"{"response": {"result": {"ifnet": {"entry": null}}}}"#;
        let dump: FirewallInterfaceDump = serde_json::from_str(empty).unwrap();
        assert!(dump.response.result.ifnet.entry.is_empty());
    }

    #[test]
    fn test_svi_missing_vrf_rejected() {
        let raw = r#"[
            {"INTERFACE": "Vlan110", "IP_ADDRESS": "10.1.10.1"},
            {"INTERFACE": "mgmt0", "IP_ADDRESS": "192.0.2.10"}
        ]"#;
        let entries: Vec<ShowIpInterfaceEntry> = serde_json::from_str(raw).unwrap();
        let err = SviRecord::from_entry(&entries[0]).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                record: "Vlan110".to_string(),
                field: "VRF"
            }
        );
        assert_eq!(err.to_string(), "Vlan110 has no VRF field");
        // non-SVI interfaces are not held to the SVI shape
        assert_eq!(SviRecord::from_entry(&entries[1]), Ok(None));
    }

    #[test]
    fn test_tagged_subinterface_requires_zone_key() {
        let raw = r#"{"response": {"result": {"ifnet": {"entry": [
            {"name": "ae1.120", "tag": "120", "fwd": "vr:default", "ip": "10.1.20.2/24"},
            {"name": "ae1.130", "tag": "130", "zone": null, "fwd": "vr:default", "ip": "N/A"},
            {"name": "ae1", "tag": "0"}
        ]}}}}"#;
        let dump: FirewallInterfaceDump = serde_json::from_str(raw).unwrap();
        let entries = &dump.response.result.ifnet.entry;

        let err = FirewallSubinterface::from_interface(&entries[0]).unwrap_err();
        assert!(matches!(err, RecordError::MissingField { field: "zone", .. }));

        let null_zone = FirewallSubinterface::from_interface(&entries[1]).unwrap().unwrap();
        assert_eq!(null_zone.zone, "");
        assert_eq!(FirewallSubinterface::from_interface(&entries[2]), Ok(None));
    }

    #[test]
    fn test_firewall_dump_missing_keys_is_error() {
        let raw = r#"{"response": {"status": "error"}}"#;
        assert!(serde_json::from_str::<FirewallInterfaceDump>(raw).is_err());
    }
}
