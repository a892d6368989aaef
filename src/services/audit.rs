use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::inventory::{LoadStats, Snapshot};
use crate::models::Topology;
use crate::reconcile::{self, PresenceMatrix};
use crate::report::{self, tables, OutputFormat, Table};
use crate::utils::zone_file_stem;

/// Report families the auditor can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Matrix,
    Zones,
    DcDiff,
    Inventory,
    Regions,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Matrix,
        ReportKind::Zones,
        ReportKind::DcDiff,
        ReportKind::Inventory,
        ReportKind::Regions,
    ];
}

/// Written as run_summary.json next to the reports
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub configs_dir: PathBuf,
    pub topology: String,
    pub reports: Vec<ReportKind>,
    pub stats: LoadStats,
    pub outputs: Vec<PathBuf>,
}

/// Auditor ties the collect, reconcile and emit stages together for one
/// configs directory.
pub struct Auditor {
    config: Config,
    topology: Topology,
    snapshot: Snapshot,
}

impl Auditor {
    /// Load the topology and read every dump
    pub fn new(config: Config) -> Result<Self> {
        let topology = match &config.topology_path {
            Some(path) => {
                tracing::info!("Topology: {}", path.display());
                Topology::from_file(path)?
            }
            None => {
                tracing::info!("Topology: built-in");
                Topology::builtin()
            }
        };
        let snapshot = Snapshot::load(&config, &topology)?;
        Ok(Self {
            config,
            topology,
            snapshot,
        })
    }

    /// Produce the requested reports and return what was written
    pub fn run(&self, kinds: &[ReportKind]) -> Result<RunSummary> {
        let out = &self.config.output_dir;
        std::fs::create_dir_all(out)
            .with_context(|| format!("Failed to create output directory {}", out.display()))?;

        let mut outputs = Vec::new();
        for kind in kinds {
            tracing::info!("Building {:?} report", kind);
            let written = match kind {
                ReportKind::Matrix => self.write_matrix()?,
                ReportKind::Zones => self.write_zones()?,
                ReportKind::DcDiff => self.write_dc_diff()?,
                ReportKind::Inventory => self.write_inventory()?,
                ReportKind::Regions => self.write_regions()?,
            };
            outputs.extend(written);
        }

        let mut summary = RunSummary {
            generated_at: Utc::now(),
            configs_dir: self.config.configs_dir.clone(),
            topology: self
                .config
                .topology_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
            reports: kinds.to_vec(),
            stats: self.snapshot.stats.clone(),
            outputs,
        };
        if self.config.wants(OutputFormat::Json) {
            let path = out.join("run_summary.json");
            summary.outputs.push(path.clone());
            report::write_json(&summary, &path)?;
        }
        Ok(summary)
    }

    fn write_table(&self, table: &Table, stem: &str, sheet: &str) -> Result<Vec<PathBuf>> {
        report::write_table(table, &self.config.output_dir, stem, &self.config.formats, sheet)
    }

    fn write_matrix(&self) -> Result<Vec<PathBuf>> {
        let matrix = PresenceMatrix::build(&self.snapshot, &self.topology);
        let mut written = self.write_table(
            &tables::presence_by_vlan(&matrix, &self.topology),
            "results_columns_orientation",
            "VLANs",
        )?;
        written.extend(self.write_table(
            &tables::presence_by_device(&matrix, &self.topology),
            "results_index_orientation",
            "Devices",
        )?);
        Ok(written)
    }

    fn write_zones(&self) -> Result<Vec<PathBuf>> {
        let out = &self.config.output_dir;
        let json = self.config.wants(OutputFormat::Json);
        let reports = reconcile::compare_zones(&self.snapshot, &self.topology);
        let mut written = Vec::new();

        let mut zone_tables = Vec::with_capacity(reports.len());
        let mut transposed = Vec::with_capacity(reports.len());
        for zone in &reports {
            let stem = zone_file_stem(&zone.zone);
            if json {
                written.push(report::write_json(
                    &zone.vrf_data,
                    &out.join(format!("{}_vrf_data.json", stem)),
                )?);
            }
            let mut rows = zone.rows.clone();
            reconcile::sort_rows(&mut rows);
            if json {
                written.push(report::write_json(
                    &rows,
                    &out.join(format!("{}_vlan_comparison.json", stem)),
                )?);
            }
            transposed.push((zone.zone.as_str(), tables::zone_comparison_transposed(&rows)));
            let table = tables::zone_comparison(&rows);
            written.extend(self.write_table(
                &table,
                &format!("{}_vlan_comparison", stem),
                &zone.zone,
            )?);
            tracing::info!(
                "Zone {}: {} switches compared, {} missing at least one VLAN",
                zone.zone,
                rows.len(),
                rows.iter().filter(|r| !r.missing_vlans.is_empty()).count()
            );
            zone_tables.push((zone.zone.as_str(), table));
        }

        let mut all_rows: Vec<_> = reports.iter().flat_map(|z| z.rows.iter().cloned()).collect();
        reconcile::sort_rows(&mut all_rows);
        written.extend(self.write_table(
            &tables::zone_comparison(&all_rows),
            "all_zones_vlan_comparison",
            "All Zones",
        )?);
        if json {
            written.push(report::write_json(
                &all_rows,
                &out.join("all_zones_vlan_comparison.json"),
            )?);
        }

        if self.config.wants(OutputFormat::Xlsx) && !zone_tables.is_empty() {
            let path = out.join("vlan_summary_by_zone.xlsx");
            let sheets: Vec<(&str, &Table)> = zone_tables.iter().map(|(z, t)| (*z, t)).collect();
            report::write_workbook(&path, &sheets)?;
            tracing::info!("Excel file saved to {}", path.display());
            written.push(path);

            let path = out.join("zone_vlan_comparison_formatted.xlsx");
            let sheets: Vec<(&str, &Table)> = transposed.iter().map(|(z, t)| (*z, t)).collect();
            report::write_workbook(&path, &sheets)?;
            tracing::info!("Formatted zone comparison saved to {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn write_dc_diff(&self) -> Result<Vec<PathBuf>> {
        let switches = reconcile::switch_dc_presence(&self.snapshot, &self.topology);
        let firewalls = reconcile::firewall_dc_presence(&self.snapshot, &self.topology);
        let mut written = self.write_table(
            &tables::dc_presence(&switches, &self.topology, false),
            "switches_dc_diff",
            "Switches",
        )?;
        written.extend(self.write_table(
            &tables::dc_presence(&firewalls, &self.topology, true),
            "firewalls_dc_diff",
            "Firewalls",
        )?);
        Ok(written)
    }

    fn write_inventory(&self) -> Result<Vec<PathBuf>> {
        let hosts = reconcile::host_vlans(&self.snapshot, &self.topology);
        for host in &hosts {
            tracing::debug!("{}: {}", host.hostname, crate::models::join_vlans(&host.vlans));
        }
        self.write_table(&tables::host_vlans(&hosts), "host_vlans", "Host VLANs")
    }

    fn write_regions(&self) -> Result<Vec<PathBuf>> {
        let rows = reconcile::compare_regions(&self.snapshot, &self.topology);
        let drifting = rows
            .iter()
            .filter(|r| !r.missing_vlans.is_empty() || !r.extra_vlans.is_empty())
            .count();
        tracing::info!("{} of {} switches differ from their region majority", drifting, rows.len());
        self.write_table(&tables::region_comparison(&rows), "vlan_region_comparison", "Regions")
    }
}
