//! Record export: full read, decode, and write to CSV or XLSX at a
//! collision-free path next to the source table.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::{info, warn};
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use serde::Serialize;

use crate::errors::{DbfKitError, DbfKitResult};
use crate::models::catalog::list_tables;
use crate::models::naming::unique_path;
use crate::models::table::{ReadConfig, TableData, read_table};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    /// CSV (comma-separated, header row)
    Csv,
    /// XLSX (one sheet, header row, no styling)
    Xlsx,
}

impl ExportFormat {
    /// Get the canonical file extension for this format
    pub fn default_extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Configuration for exporting a table
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Maximum number of records to export (None for all)
    pub max_records: Option<usize>,
}

/// Result of one export operation
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// Path the file was written to
    pub output_path: PathBuf,
    /// Format used for export
    pub format: ExportFormat,
    /// Number of data rows written
    pub records_exported: usize,
    /// Number of columns written
    pub fields_exported: usize,
    /// Output size in bytes, when the metadata read succeeds
    pub file_size_bytes: Option<u64>,
}

/// Export one table, fully loaded and decoded, to a unique output path
/// derived from the source file's stem.
///
/// The table is read once in full before anything is written; existing
/// files are never overwritten because the path always comes from
/// [`unique_path`].
pub fn export_table<P: AsRef<Path>>(
    path: P,
    format: ExportFormat,
    config: &ExportConfig,
) -> DbfKitResult<ExportResult> {
    let path = path.as_ref();
    let read_config = ReadConfig {
        max_records: config.max_records,
    };
    let data = read_table(path, &read_config)?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    let output_path = unique_path(dir, stem, format.default_extension());

    match format {
        ExportFormat::Csv => write_csv(&data, &output_path)?,
        ExportFormat::Xlsx => write_xlsx(&data, &output_path)?,
    }

    let file_size_bytes = std::fs::metadata(&output_path).ok().map(|m| m.len());
    info!(
        "exported {} records from {} to {}",
        data.rows.len(),
        path.display(),
        output_path.display()
    );

    Ok(ExportResult {
        output_path,
        format,
        records_exported: data.rows.len(),
        fields_exported: data.field_names.len(),
        file_size_bytes,
    })
}

/// Export every table in a directory, continuing past failures.
///
/// Each table gets its own outcome; a failed export is reported and
/// leaves the other tables untouched.
pub fn export_directory<P: AsRef<Path>>(
    dir: P,
    format: ExportFormat,
    config: &ExportConfig,
) -> DbfKitResult<Vec<(String, DbfKitResult<ExportResult>)>> {
    let dir = dir.as_ref();
    let tables = list_tables(dir)?;
    if tables.is_empty() {
        return Err(DbfKitError::NoTables(dir.to_path_buf()));
    }

    let mut results = Vec::with_capacity(tables.len());
    for table in tables {
        let name = table
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outcome = export_table(&table, format, config);
        if let Err(e) = &outcome {
            warn!("export failed for {}: {e}", table.display());
        }
        results.push((name, outcome));
    }
    Ok(results)
}

fn write_csv(data: &TableData, output_path: &Path) -> DbfKitResult<()> {
    let mut df = data.to_dataframe()?;
    let mut file = File::create(output_path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

fn write_xlsx(data: &TableData, output_path: &Path) -> DbfKitResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in data.field_names.iter().enumerate() {
        worksheet.write_string(0, col as u16, name.as_str())?;
    }
    for (row, values) in data.rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, value.as_str())?;
        }
    }

    workbook.save(output_path)?;
    Ok(())
}
