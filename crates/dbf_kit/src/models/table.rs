//! Full-table reading with every value coerced to decoded text.
//!
//! The `dbase` crate is the DBF collaborator: it owns the header and
//! record layout, this module owns the text coercion through the
//! Mazovia codec and the DataFrame assembly.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dbase::{FieldValue, Reader};
use log::debug;
use polars::prelude::*;

use crate::errors::DbfKitResult;
use crate::models::mazovia;

/// Configuration for reading a table
#[derive(Debug, Clone, Default)]
pub struct ReadConfig {
    /// Maximum number of records to read (None for all)
    pub max_records: Option<usize>,
}

/// One fully loaded table: header field order preserved, every value
/// already decoded to text.
#[derive(Debug, Clone)]
pub struct TableData {
    pub path: PathBuf,
    pub field_names: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a table in full, sequentially, on the calling thread.
///
/// Each call opens its own reader and consumes it; no handle is cached
/// across operations.
pub fn read_table<P: AsRef<Path>>(path: P, config: &ReadConfig) -> DbfKitResult<TableData> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;
    let field_names: Vec<String> = reader
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();

    let max_records = config.max_records.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    for record_result in reader.iter_records() {
        if rows.len() >= max_records {
            break;
        }
        let record = record_result?;
        let row: Vec<String> = field_names
            .iter()
            .map(|name| record.get(name).map(field_value_to_text).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    debug!(
        "read {} records x {} fields from {}",
        rows.len(),
        field_names.len(),
        path.display()
    );

    Ok(TableData {
        path: path.to_path_buf(),
        field_names,
        rows,
    })
}

/// Coerce one DBF value to display/export text.
///
/// Character and memo fields go through the Mazovia codec; null values
/// of any type render as the empty string.
pub fn field_value_to_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Character(Some(s)) => mazovia::decode_str(s.trim()),
        FieldValue::Character(None) => String::new(),
        FieldValue::Memo(s) => mazovia::decode_str(s),
        FieldValue::Numeric(Some(n)) => n.to_string(),
        FieldValue::Numeric(None) => String::new(),
        FieldValue::Float(Some(n)) => n.to_string(),
        FieldValue::Float(None) => String::new(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Double(n) => n.to_string(),
        FieldValue::Currency(n) => n.to_string(),
        FieldValue::Logical(Some(b)) => b.to_string(),
        FieldValue::Logical(None) => String::new(),
        FieldValue::Date(Some(date)) => format_date(date),
        FieldValue::Date(None) => String::new(),
        FieldValue::DateTime(dt) => {
            let time = dt.time();
            format!(
                "{} {:02}:{:02}:{:02}",
                format_date(&dt.date()),
                time.hours(),
                time.minutes(),
                time.seconds()
            )
        }
    }
}

fn format_date(date: &dbase::Date) -> String {
    NaiveDate::from_ymd_opt(date.year() as i32, date.month(), date.day())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl TableData {
    /// Assemble a string-column DataFrame, columns in field order.
    pub fn to_dataframe(&self) -> DbfKitResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.field_names.len());
        for (idx, name) in self.field_names.iter().enumerate() {
            let values: Vec<AnyValue> = self
                .rows
                .iter()
                .map(|row| AnyValue::StringOwned(row[idx].clone().into()))
                .collect();
            let series = Series::from_any_values(PlSmallStr::from(name.as_str()), &values, true)?;
            columns.push(series.into());
        }
        Ok(DataFrame::new(columns)?)
    }
}
