pub mod seeds;

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::models::*;
use crate::utils::is_valid_hostname;

pub use seeds::get_default_topology;

impl Topology {
    /// Built-in topology used when no topology file is configured
    pub fn builtin() -> Self {
        get_default_topology()
    }

    /// Load a topology from a JSON file with the same shape as the built-in one
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read topology file {}", path.display()))?;
        let topology: Topology = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse topology file {}", path.display()))?;
        topology
            .validate()
            .with_context(|| format!("Invalid topology in {}", path.display()))?;
        Ok(topology)
    }

    pub fn validate(&self) -> Result<()> {
        if self.datacenters.is_empty() {
            bail!("topology defines no datacenters");
        }
        for marker in [&self.core_marker, &self.tor_marker, &self.firewall_marker] {
            if marker.is_empty() {
                bail!("hostname markers must not be empty");
            }
        }

        let mut names = HashSet::new();
        for dc in &self.datacenters {
            if dc.name.is_empty() || dc.site_tag.is_empty() {
                bail!("datacenter entries need a name and a site_tag");
            }
            if !names.insert(dc.name.as_str()) {
                bail!("duplicate datacenter name: {}", dc.name);
            }
            let hosts = dc
                .groups
                .iter()
                .flat_map(|g| g.hosts.iter())
                .chain(dc.firewalls.iter());
            for host in hosts {
                if !is_valid_hostname(host) {
                    bail!("invalid hostname in {}: {:?}", dc.name, host);
                }
            }
        }

        for zone in &self.zones {
            if zone.name.is_empty() || zone.patterns.iter().all(|p| p.is_empty()) {
                bail!("zone entries need a name and at least one pattern");
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn datacenter(&self, name: &str) -> Option<&Datacenter> {
        self.datacenters.iter().find(|dc| dc.name == name)
    }

    /// Data center of a hostname: by site tag for switches, by firewall tag
    /// for firewalls.
    pub fn datacenter_of(&self, hostname: &str) -> Option<&Datacenter> {
        if let Some(dc) = self.datacenters.iter().find(|dc| hostname.contains(&dc.site_tag)) {
            return Some(dc);
        }
        if self.is_firewall(hostname) {
            return self
                .datacenters
                .iter()
                .find(|dc| !dc.firewall_tag.is_empty() && hostname.contains(&dc.firewall_tag));
        }
        None
    }

    pub fn in_any_site(&self, hostname: &str) -> bool {
        self.datacenters.iter().any(|dc| hostname.contains(&dc.site_tag))
    }

    pub fn in_any_firewall_site(&self, hostname: &str) -> bool {
        self.datacenters
            .iter()
            .any(|dc| !dc.firewall_tag.is_empty() && hostname.contains(&dc.firewall_tag))
    }

    pub fn is_core(&self, hostname: &str) -> bool {
        hostname.contains(&self.core_marker)
    }

    pub fn is_tor(&self, hostname: &str) -> bool {
        hostname.contains(&self.tor_marker)
    }

    pub fn is_firewall(&self, hostname: &str) -> bool {
        hostname.contains(&self.firewall_marker)
    }

    /// First zone (in table order) with a pattern contained in the VRF name
    pub fn zone_for_vrf(&self, vrf: &str) -> Option<&ZoneDef> {
        self.zones.iter().find(|z| z.matches(vrf))
    }

    /// "DC1_vs_DC2" for the built-in topology
    pub fn cross_dc_label(&self) -> String {
        self.datacenters
            .iter()
            .map(|dc| dc.name.as_str())
            .collect::<Vec<_>>()
            .join("_vs_")
    }

    /// Preferred report column order: zone and DC flags, core switches with
    /// their SVI details, firewalls, then every other switch DC by DC.
    pub fn column_order(&self) -> Vec<String> {
        let mut columns = vec!["Zone".to_string()];
        columns.extend(self.datacenters.iter().map(|dc| dc.name.clone()));

        for dc in &self.datacenters {
            for core in dc.hosts(SwitchRole::Core) {
                columns.push(core.to_string());
                columns.push(svi_column(core));
            }
        }
        for dc in &self.datacenters {
            columns.extend(dc.firewalls.iter().map(|fw| fw_column(fw)));
        }
        for dc in &self.datacenters {
            for group in dc.groups.iter().filter(|g| g.role != SwitchRole::Core) {
                columns.extend(group.hosts.iter().cloned());
            }
        }
        columns
    }
}

impl Datacenter {
    /// Hosts of every group with the given role, in table order
    pub fn hosts(&self, role: SwitchRole) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| g.role == role)
            .flat_map(|g| g.hosts.iter().map(String::as_str))
            .collect()
    }
}

impl ZoneDef {
    /// Case-insensitive substring match of any pattern against a VRF name
    pub fn matches(&self, vrf: &str) -> bool {
        if vrf.is_empty() {
            return false;
        }
        let vrf = vrf.to_uppercase();
        self.patterns
            .iter()
            .filter(|p| !p.is_empty())
            .any(|p| vrf.contains(&p.to_uppercase()))
    }
}

pub fn svi_column(host: &str) -> String {
    format!("{}_svi_info", host)
}

pub fn fw_column(host: &str) -> String {
    format!("{}_fw_info", host)
}
