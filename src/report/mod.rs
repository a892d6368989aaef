mod csv_writer;
pub mod tables;
mod xlsx_writer;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use xlsx_writer::write_workbook;

/// Output formats a report can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected csv, xlsx or json)", other)),
        }
    }
}

/// A single report cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Rectangular table with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padded with empty cells (or truncated) to the header width
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Empty);
        self.rows.push(row);
    }

    #[cfg(test)]
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell by row index and header name
    #[cfg(test)]
    pub fn get(&self, row: usize, header: &str) -> Option<&Cell> {
        let col = self.column(header)?;
        self.rows.get(row)?.get(col)
    }
}

/// Write a table as `<dir>/<stem>.csv` and/or `<dir>/<stem>.xlsx`.
/// JSON is not a table format and is ignored here.
pub fn write_table(
    table: &Table,
    dir: &Path,
    stem: &str,
    formats: &[OutputFormat],
    sheet: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for format in formats {
        let path = dir.join(format!("{}.{}", stem, format.extension()));
        match format {
            OutputFormat::Csv => csv_writer::write_csv(table, &path)?,
            OutputFormat::Xlsx => write_workbook(&path, &[(sheet, table)])?,
            OutputFormat::Json => continue,
        }
        tracing::info!("Results saved to {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Pretty-printed JSON artifact
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<PathBuf> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Results saved to {}", path.display());
    Ok(path.to_path_buf())
}
