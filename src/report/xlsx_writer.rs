use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;
use std::path::Path;

use super::{Cell, Table};
use crate::utils::{safe_sheet_name, MAX_SHEET_NAME_LEN};

/// Write one workbook with a sheet per table. The header row is bold and
/// frozen; columns are autofitted.
pub fn write_workbook(path: &Path, sheets: &[(&str, &Table)]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for (name, table) in unique_sheet_names(sheets.iter().map(|(n, _)| *n))
        .into_iter()
        .zip(sheets.iter().map(|(_, t)| *t))
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;
        write_sheet(worksheet, table, &header)
            .with_context(|| format!("Failed to write sheet {} of {}", name, path.display()))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, table: &Table, header: &Format) -> Result<(), XlsxError> {
    for (col, title) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title.as_str(), header)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Bool(b) => {
                    worksheet.write_boolean(r, col, *b)?;
                }
                Cell::Int(n) => {
                    worksheet.write_number(r, col, *n as f64)?;
                }
                Cell::Text(s) => {
                    worksheet.write_string(r, col, s.as_str())?;
                }
            }
        }
    }
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}

/// Sanitized sheet names, de-duplicated case-insensitively with a numeric
/// suffix the way Excel requires.
fn unique_sheet_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let base = safe_sheet_name(name);
        let mut candidate = base.clone();
        let mut n = 2;
        while !seen.insert(candidate.to_lowercase()) {
            let suffix = format!("_{}", n);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.len());
            candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
            n += 1;
        }
        out.push(candidate);
    }
    out
}
