use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Lowest VLAN id a switch will carry (0 is the untagged marker)
pub const MIN_VLAN_ID: u16 = 1;
/// Highest usable VLAN id (4095 is reserved)
pub const MAX_VLAN_ID: u16 = 4094;

/// VlanId is an 802.1Q tag. Ordering is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    pub fn new(id: u16) -> Option<Self> {
        (MIN_VLAN_ID..=MAX_VLAN_ID).contains(&id).then_some(Self(id))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Extract the VLAN id from an SVI interface name such as `Vlan120`.
    /// Returns None for loopbacks, physical ports and anything else.
    pub fn from_svi_interface(interface: &str) -> Option<Self> {
        static SVI_RE: OnceLock<Option<regex_lite::Regex>> = OnceLock::new();
        let re = SVI_RE
            .get_or_init(|| regex_lite::Regex::new(r"^Vlan(\d+)$").ok())
            .as_ref()?;
        let caps = re.captures(interface.trim())?;
        caps.get(1)?.as_str().parse().ok()
    }
}

impl FromStr for VlanId {
    type Err = InvalidVlanId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u16>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidVlanId(trimmed.to_string()))
    }
}

impl TryFrom<u16> for VlanId {
    type Error = InvalidVlanId;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        Self::new(id).ok_or_else(|| InvalidVlanId(id.to_string()))
    }
}

impl TryFrom<i64> for VlanId {
    type Error = InvalidVlanId;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u16::try_from(id)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidVlanId(id.to_string()))
    }
}

impl From<VlanId> for u16 {
    fn from(id: VlanId) -> Self {
        id.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error for a VLAN tag that is not a number in 1..=4094
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVlanId(pub String);

impl fmt::Display for InvalidVlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid VLAN id: {:?}", self.0)
    }
}

impl std::error::Error for InvalidVlanId {}

/// Render VLAN ids as a comma separated list, e.g. "10, 20, 300".
/// Callers pass ids already in the order they want printed.
pub fn join_vlans<'a>(ids: impl IntoIterator<Item = &'a VlanId>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_parse_vlan_id() {
        assert_eq!("10".parse::<VlanId>().unwrap().get(), 10);
        assert_eq!(" 4094 ".parse::<VlanId>().unwrap().get(), 4094);
        assert!("0".parse::<VlanId>().is_err());
        assert!("4095".parse::<VlanId>().is_err());
        assert!("ten".parse::<VlanId>().is_err());
        assert!("".parse::<VlanId>().is_err());
    }

    #[test]
    fn test_try_from_i64() {
        assert_eq!(VlanId::try_from(200i64).unwrap().get(), 200);
        assert!(VlanId::try_from(-1i64).is_err());
        assert!(VlanId::try_from(70000i64).is_err());
    }

    #[test]
    fn test_from_svi_interface() {
        assert_eq!(VlanId::from_svi_interface("Vlan120").map(VlanId::get), Some(120));
        assert_eq!(VlanId::from_svi_interface("Vlan1"), VlanId::new(1));
        assert_eq!(VlanId::from_svi_interface("loopback0"), None);
        assert_eq!(VlanId::from_svi_interface("Ethernet1/1"), None);
        assert_eq!(VlanId::from_svi_interface("Vlan"), None);
        assert_eq!(VlanId::from_svi_interface("Vlan5000"), None);
    }

    #[test]
    fn test_numeric_ordering() {
        let ids: BTreeSet<VlanId> = ["100", "9", "20"].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(join_vlans(&ids), "9, 20, 100");
    }

    #[test]
    fn test_serde_as_number() {
        let id: VlanId = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert!(serde_json::from_str::<VlanId>("0").is_err());
    }
}
