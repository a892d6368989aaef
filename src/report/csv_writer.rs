use anyhow::{Context, Result};
use std::path::Path;

use super::Table;

pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer
        .write_record(&table.headers)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Cell;

    #[test]
    fn test_write_csv_quotes_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut table = Table::new(["VLAN", "DC1", "VLANs"]);
        table.push_row(vec![Cell::Int(10), Cell::Bool(true), Cell::text("10, 20")]);
        table.push_row(vec![Cell::Int(20)]);
        write_csv(&table, &path).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines, vec!["VLAN,DC1,VLANs", "10,True,\"10, 20\"", "20,,"]);
    }
}
