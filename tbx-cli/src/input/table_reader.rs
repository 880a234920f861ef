//! Replacement table loading from spreadsheets and CSV files

use crate::error::CliError;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tbx_core::{ReplacementTable, TableColumns};

/// File extensions accepted as replacement tables
pub const TABLE_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "ods", "csv"];

/// Header row followed by data rows, all cells as text
pub type TableRows = (Vec<String>, Vec<Vec<String>>);

/// Whether the path has a replacement table extension
pub fn is_table(path: &Path) -> bool {
    extension(path).is_some_and(|ext| TABLE_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Read the first worksheet (or the CSV file) as text rows
pub fn read_rows(path: &Path) -> Result<TableRows> {
    match extension(path).as_deref() {
        Some("csv") => read_csv(path),
        Some("xlsx" | "xls" | "ods") => read_workbook(path),
        _ => Err(CliError::TableError(format!(
            "unsupported table format: {}",
            path.display()
        ))
        .into()),
    }
}

fn read_csv(path: &Path) -> Result<TableRows> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open table: {}", path.display()))?;

    let header = reader
        .headers()
        .with_context(|| format!("Failed to read table header: {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()
        .with_context(|| format!("Failed to read table rows: {}", path.display()))?;

    Ok((header, rows))
}

fn read_workbook(path: &Path) -> Result<TableRows> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CliError::TableError(format!("{} has no worksheets", path.display())))?
        .with_context(|| format!("Failed to read worksheet: {}", path.display()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let header = rows.next().unwrap_or_default();

    Ok((header, rows.collect()))
}

/// Cell text; whole numbers lose their fractional part (`12.0` → `12`).
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Load a replacement table using the configured columns
pub fn load_table(path: &Path, columns: &TableColumns) -> Result<ReplacementTable> {
    let (header, rows) = read_rows(path)?;
    let table = columns
        .build(&header, rows)
        .map_err(|e| CliError::TableError(format!("{}: {e}", path.display())))?;

    log::info!(
        "loaded {} replacement rules from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}
