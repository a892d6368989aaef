use std::collections::{BTreeMap, BTreeSet};

use super::{Cell, Table};
use crate::models::*;
use crate::reconcile::{DcPresenceMap, PresenceMatrix};
use crate::topology::{fw_column, svi_column};

pub const ZONE_COMPARISON_HEADERS: [&str; 6] =
    ["Zone", "DC", "Switch_Type", "Switch", "Has_VLANs", "Missing_VLANs"];

/// Cells of one VLAN keyed by column name, plus the columns in report order
struct PresenceGrid {
    columns: Vec<String>,
    rows: Vec<(VlanId, BTreeMap<String, Cell>)>,
}

fn presence_grid(matrix: &PresenceMatrix, topology: &Topology) -> PresenceGrid {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(matrix.vlans.len());

    for (vlan, presence) in &matrix.vlans {
        let mut cells = BTreeMap::new();
        if !presence.zone.is_empty() {
            cells.insert("Zone".to_string(), Cell::text(presence.zone.as_str()));
        }
        for dc in &topology.datacenters {
            if PresenceMatrix::dc_complete(presence, dc) {
                cells.insert(dc.name.clone(), Cell::Bool(true));
            }
        }
        for (host, device) in &presence.devices {
            if device.has_vlan {
                cells.insert(host.clone(), Cell::Bool(true));
            }
            if let Some(svi) = &device.svi {
                cells.insert(svi_column(host), Cell::Text(svi.render()));
            }
            if let Some(fw) = &device.fw {
                cells.insert(fw_column(host), Cell::Text(fw.render()));
            }
        }
        used.extend(cells.keys().cloned());
        rows.push((*vlan, cells));
    }

    // Zone and DC flags are always reported; device columns only when used
    let fixed: BTreeSet<String> = std::iter::once("Zone".to_string())
        .chain(topology.datacenters.iter().map(|dc| dc.name.clone()))
        .collect();
    let ordered = topology.column_order();
    let mut columns: Vec<String> = ordered
        .iter()
        .filter(|c| fixed.contains(*c) || used.contains(*c))
        .cloned()
        .collect();
    let known: BTreeSet<&String> = ordered.iter().collect();
    columns.extend(used.iter().filter(|c| !known.contains(c)).cloned());

    PresenceGrid { columns, rows }
}

/// VLANs as rows, devices as columns
pub fn presence_by_vlan(matrix: &PresenceMatrix, topology: &Topology) -> Table {
    let grid = presence_grid(matrix, topology);
    let mut table = Table::new(std::iter::once("VLAN".to_string()).chain(grid.columns.clone()));
    for (vlan, mut cells) in grid.rows {
        let mut row = vec![Cell::Int(i64::from(vlan.get()))];
        row.extend(grid.columns.iter().map(|c| cells.remove(c).unwrap_or_default()));
        table.push_row(row);
    }
    table
}

/// Devices (and the Zone/DC flag rows) as rows, VLANs as columns
pub fn presence_by_device(matrix: &PresenceMatrix, topology: &Topology) -> Table {
    let grid = presence_grid(matrix, topology);
    let mut table = Table::new(
        std::iter::once("Device".to_string()).chain(grid.rows.iter().map(|(v, _)| v.to_string())),
    );
    for column in &grid.columns {
        let mut row = vec![Cell::text(column.as_str())];
        row.extend(
            grid.rows
                .iter()
                .map(|(_, cells)| cells.get(column).cloned().unwrap_or_default()),
        );
        table.push_row(row);
    }
    table
}

pub fn zone_comparison(rows: &[ZoneComparisonRow]) -> Table {
    let mut table = Table::new(ZONE_COMPARISON_HEADERS);
    for r in rows {
        table.push_row(vec![
            Cell::text(r.zone.as_str()),
            Cell::text(r.dc.as_str()),
            Cell::text(r.switch_type.as_str()),
            Cell::text(r.switch.as_str()),
            Cell::Text(join_vlans(&r.has_vlans)),
            Cell::Text(join_vlans(&r.missing_vlans)),
        ]);
    }
    table
}

/// One column per switch, in first-appearance order, with Has_VLANs and
/// Missing_VLANs as rows. A switch listed twice keeps its last row, so a
/// core shows its cross-DC comparison.
pub fn zone_comparison_transposed(rows: &[ZoneComparisonRow]) -> Table {
    let mut switches: Vec<&str> = Vec::new();
    let mut cells: BTreeMap<&str, &ZoneComparisonRow> = BTreeMap::new();
    for r in rows {
        if cells.insert(r.switch.as_str(), r).is_none() {
            switches.push(r.switch.as_str());
        }
    }

    let mut table = Table::new(std::iter::once("").chain(switches.iter().copied()));
    let mut has = vec![Cell::text("Has_VLANs")];
    let mut missing = vec![Cell::text("Missing_VLANs")];
    for s in &switches {
        let r = cells[s];
        has.push(Cell::Text(join_vlans(&r.has_vlans)));
        missing.push(Cell::Text(join_vlans(&r.missing_vlans)));
    }
    table.push_row(has);
    table.push_row(missing);
    table
}

pub fn region_comparison(rows: &[RegionComparisonRow]) -> Table {
    let mut table = Table::new(["Region", "Switch", "VLANs", "Missing_VLANs", "Extra_VLANs"]);
    for r in rows {
        table.push_row(vec![
            Cell::text(r.region.as_str()),
            Cell::text(r.switch.as_str()),
            Cell::Text(join_vlans(&r.vlans)),
            Cell::Text(join_vlans(&r.missing_vlans)),
            Cell::Text(join_vlans(&r.extra_vlans)),
        ]);
    }
    table
}

/// Per-VLAN DC presence. Switch devices are flagged, firewall devices show
/// the subinterface name; firewall tables also carry zone and forwarding.
pub fn dc_presence(map: &DcPresenceMap, topology: &Topology, firewalls: bool) -> Table {
    let hosts: BTreeSet<&String> = map.values().flat_map(|p| p.devices.keys()).collect();

    let mut headers = vec!["VLAN".to_string()];
    headers.extend(topology.datacenters.iter().map(|dc| dc.name.clone()));
    headers.extend(hosts.iter().map(|h| h.to_string()));
    if firewalls {
        headers.push("zone".to_string());
        headers.push("fwd".to_string());
    }
    headers.push("Missing_From".to_string());

    let mut table = Table::new(headers);
    for (vlan, presence) in map {
        let mut row = vec![Cell::Int(i64::from(vlan.get()))];
        row.extend(topology.datacenters.iter().map(|dc| {
            if presence.present_in.contains(&dc.name) {
                Cell::Bool(true)
            } else {
                Cell::Empty
            }
        }));
        row.extend(hosts.iter().map(|h| match presence.devices.get(*h) {
            Some(detail) if detail.is_empty() => Cell::Bool(true),
            Some(detail) => Cell::text(detail.as_str()),
            None => Cell::Empty,
        }));
        if firewalls {
            row.push(presence.fw_zone.clone().map(Cell::Text).unwrap_or_default());
            row.push(presence.fw_fwd.clone().map(Cell::Text).unwrap_or_default());
        }
        row.push(Cell::Text(presence.missing_from(topology).join(", ")));
        table.push_row(row);
    }
    table
}

pub fn host_vlans(hosts: &[HostVlans]) -> Table {
    let mut table = Table::new(["Hostname", "VLANs"]);
    for host in hosts {
        table.push_row(vec![
            Cell::text(host.hostname.as_str()),
            Cell::Text(join_vlans(&host.vlans)),
        ]);
    }
    table
}
