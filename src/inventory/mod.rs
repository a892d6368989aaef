pub mod discovery;
pub mod parse;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::models::*;

pub use discovery::{find_dumps, DumpFile};
pub use parse::{read_json, InputError};

/// Counters for what the collect stage read and what it dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub files_read: usize,
    pub files_skipped: usize,
    pub records_skipped: usize,
}

/// Everything read from one configs directory, keyed by hostname
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub vlan_tables: BTreeMap<String, Vec<VlanEntry>>,
    pub svi_tables: BTreeMap<String, Vec<SviRecord>>,
    pub firewall_tables: BTreeMap<String, Vec<FirewallSubinterface>>,
    pub stats: LoadStats,
}

impl Snapshot {
    /// Read every dump under the configured directory.
    ///
    /// Firewall dumps are only decoded for hostnames carrying the topology's
    /// firewall marker; other devices may ship a differently shaped
    /// `show_interface_all.json`.
    pub fn load(config: &Config, topology: &Topology) -> Result<Self> {
        let mut snapshot = Snapshot::default();
        let root = &config.configs_dir;

        for file in find_dumps(root, &config.vlan_file, config.hostname_depth) {
            let Some(entries) = snapshot.read::<Vec<ShowVlanEntry>>(&file, config.strict)? else {
                continue;
            };
            let mut table = Vec::with_capacity(entries.len());
            for entry in &entries {
                match VlanEntry::try_from(entry) {
                    Ok(v) => table.push(v),
                    Err(e) => snapshot.reject_record(&file, e, config.strict)?,
                }
            }
            snapshot
                .vlan_tables
                .entry(file.hostname)
                .or_default()
                .extend(table);
        }

        for file in find_dumps(root, &config.svi_file, config.hostname_depth) {
            let Some(entries) =
                snapshot.read::<Vec<ShowIpInterfaceEntry>>(&file, config.strict)?
            else {
                continue;
            };
            let mut svis = Vec::new();
            for entry in &entries {
                match SviRecord::from_entry(entry) {
                    Ok(Some(svi)) => svis.push(svi),
                    Ok(None) => {}
                    Err(e) => snapshot.reject_record(&file, e, config.strict)?,
                }
            }
            snapshot
                .svi_tables
                .entry(file.hostname)
                .or_default()
                .extend(svis);
        }

        for file in find_dumps(root, &config.firewall_file, config.hostname_depth) {
            if !topology.is_firewall(&file.hostname) {
                tracing::debug!("Ignoring {} (not a firewall)", file.path.display());
                continue;
            }
            let Some(dump) = snapshot.read::<FirewallInterfaceDump>(&file, config.strict)? else {
                continue;
            };
            let mut table = Vec::new();
            for iface in &dump.response.result.ifnet.entry {
                match FirewallSubinterface::from_interface(iface) {
                    Ok(Some(sub)) => table.push(sub),
                    Ok(None) => {}
                    Err(e) => snapshot.reject_record(&file, e, config.strict)?,
                }
            }
            snapshot
                .firewall_tables
                .entry(file.hostname)
                .or_default()
                .extend(table);
        }

        tracing::info!(
            "Read {} dumps from {} ({} skipped, {} records dropped)",
            snapshot.stats.files_read,
            root.display(),
            snapshot.stats.files_skipped,
            snapshot.stats.records_skipped
        );
        Ok(snapshot)
    }

    /// Decode a dump. Ok(None) means the file was skipped (non-strict mode).
    fn read<T: DeserializeOwned>(&mut self, file: &DumpFile, strict: bool) -> Result<Option<T>> {
        tracing::info!("Reading {}", file.path.display());
        match read_json::<T>(&file.path) {
            Ok(value) => {
                self.stats.files_read += 1;
                Ok(Some(value))
            }
            Err(e) if strict => Err(e.into()),
            Err(e) => {
                self.stats.files_skipped += 1;
                tracing::warn!("Skipping malformed dump {}", e);
                Ok(None)
            }
        }
    }

    fn reject_record(
        &mut self,
        file: &DumpFile,
        reason: impl Into<RecordError>,
        strict: bool,
    ) -> Result<()> {
        let reason = reason.into();
        if strict {
            return Err(InputError::new(&file.path, reason).into());
        }
        self.stats.records_skipped += 1;
        tracing::warn!("{}: skipping record: {}", file.path.display(), reason);
        Ok(())
    }

    /// VLAN ids configured on a host, empty when the host has no table
    pub fn vlan_ids(&self, hostname: &str) -> BTreeSet<VlanId> {
        self.vlan_tables
            .get(hostname)
            .map(|t| t.iter().map(|v| v.id).collect())
            .unwrap_or_default()
    }
}

/// Helpers that lay out a configs directory the way the collectors do:
/// `<root>/<hostname>/<file>.json`.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::config::Config;
    use crate::report::OutputFormat;

    pub fn config_for(root: &Path, output: &Path) -> Config {
        Config {
            configs_dir: root.to_path_buf(),
            output_dir: output.to_path_buf(),
            topology_path: None,
            formats: vec![OutputFormat::Csv, OutputFormat::Xlsx, OutputFormat::Json],
            hostname_depth: 0,
            strict: false,
            vlan_file: "show_vlan.json".to_string(),
            svi_file: "show_ip_interface_brief_vrf_all.json".to_string(),
            firewall_file: "show_interface_all.json".to_string(),
        }
    }

    fn write(root: &Path, host: &str, file: &str, body: &str) -> PathBuf {
        let dir = root.join(host);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, body).unwrap();
        path
    }

    pub fn write_vlans(root: &Path, host: &str, ids: &[u16]) -> PathBuf {
        let entries: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"VLAN_ID": "{}", "VLAN_NAME": "VLAN{:04}"}}"#, id, id))
            .collect();
        write(root, host, "show_vlan.json", &format!("[{}]", entries.join(",")))
    }

    /// `svis` is (vlan, vrf, ip)
    pub fn write_svis(root: &Path, host: &str, svis: &[(u16, &str, &str)]) -> PathBuf {
        let entries: Vec<String> = svis
            .iter()
            .map(|(id, vrf, ip)| {
                format!(
                    r#"{{"INTERFACE": "Vlan{}", "VRF": "{}", "IP_ADDRESS": "{}"}}"#,
                    id, vrf, ip
                )
            })
            .chain(std::iter::once(
                r#"{"INTERFACE": "loopback0", "VRF": "default", "IP_ADDRESS": "10.255.255.1"}"#
                    .to_string(),
            ))
            .collect();
        write(
            root,
            host,
            "show_ip_interface_brief_vrf_all.json",
            &format!("[{}]", entries.join(",")),
        )
    }

    /// `subs` is (tag, zone)
    pub fn write_firewall(root: &Path, host: &str, subs: &[(u16, &str)]) -> PathBuf {
        let entries: Vec<String> = subs
            .iter()
            .map(|(tag, zone)| {
                format!(
                    r#"{{"name": "ae1.{}", "tag": "{}", "zone": "{}", "fwd": "vr:default", "ip": "10.9.{}.1/24"}}"#,
                    tag, tag, zone, tag % 256
                )
            })
            .chain(std::iter::once(
                r#"{"name": "ae1", "tag": "0", "zone": null, "fwd": "N/A", "ip": "N/A"}"#
                    .to_string(),
            ))
            .collect();
        write(
            root,
            host,
            "show_interface_all.json",
            &format!(
                r#"{{"response": {{"status": "success", "result": {{"ifnet": {{"entry": [{}]}}}}}}}}"#,
                entries.join(",")
            ),
        )
    }

    pub fn write_raw(root: &Path, host: &str, file: &str, body: &str) -> PathBuf {
        write(root, host, file, body)
    }
}
