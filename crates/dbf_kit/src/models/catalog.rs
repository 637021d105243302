//! Directory catalog: list the tables, summarize each one, and keep a
//! corrupt file from taking the rest of the listing down with it.

use std::fs;
use std::path::{Path, PathBuf};

use dbase::Reader;
use log::warn;
use serde::Serialize;

use crate::errors::{DbfKitError, DbfKitResult};
use crate::models::table::field_value_to_text;

/// Number of records shown in a table preview
pub const PREVIEW_RECORDS: usize = 2;

/// Short human-readable summary of one table file
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub size_bytes: u64,
    pub field_names: Vec<String>,
    /// First records rendered as "FIELD: value" pairs, decoded
    pub preview: Vec<String>,
}

/// One catalog line: either a summary or the error that replaced it
#[derive(Debug)]
pub struct CatalogEntry {
    pub file_name: String,
    pub outcome: Result<TableSummary, DbfKitError>,
}

/// List `.dbf` files in a directory, case-insensitive on the
/// extension, sorted lexicographically by file name.
pub fn list_tables<P: AsRef<Path>>(dir: P) -> DbfKitResult<Vec<PathBuf>> {
    let mut tables = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if is_table_file(&path) {
            tables.push(path);
        }
    }
    tables.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(tables)
}

/// Whether a path looks like a table file this crate handles.
pub fn is_table_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dbf"))
}

/// Summarize one table: size, field names, first records decoded.
pub fn summarize<P: AsRef<Path>>(path: P) -> DbfKitResult<TableSummary> {
    let path = path.as_ref();
    let name = file_name_of(path);
    let size_bytes = fs::metadata(path)?.len();

    let mut reader = Reader::from_path(path)?;
    let field_names: Vec<String> = reader
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();

    let mut preview = Vec::with_capacity(PREVIEW_RECORDS);
    for record_result in reader.iter_records() {
        if preview.len() >= PREVIEW_RECORDS {
            break;
        }
        let record = record_result?;
        let rendered: Vec<String> = field_names
            .iter()
            .map(|field| {
                let value = record.get(field).map(field_value_to_text).unwrap_or_default();
                format!("{field}: {value}")
            })
            .collect();
        preview.push(rendered.join(", "));
    }

    Ok(TableSummary {
        name,
        size_bytes,
        field_names,
        preview,
    })
}

/// Summarize every table in a directory with per-file error isolation:
/// one corrupt file becomes one error entry, the rest still summarize.
pub fn build_catalog<P: AsRef<Path>>(dir: P) -> DbfKitResult<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    for path in list_tables(dir)? {
        let file_name = file_name_of(&path);
        let outcome = summarize(&path);
        if let Err(e) = &outcome {
            warn!("failed to summarize {}: {e}", path.display());
        }
        entries.push(CatalogEntry { file_name, outcome });
    }
    Ok(entries)
}

/// Render the catalog pane: summary blocks for readable tables, inline
/// error lines for the rest.
pub fn render_catalog(entries: &[CatalogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match &entry.outcome {
            Ok(summary) => {
                out.push_str(&format!(
                    "{} (Size: {} bytes)\n",
                    summary.name, summary.size_bytes
                ));
                out.push_str(&format!("Fields: {}\n", summary.field_names.join(", ")));
                for record in &summary.preview {
                    out.push_str(&format!("Record: {record}\n"));
                }
                out.push_str(&"-".repeat(40));
                out.push('\n');
            }
            Err(e) => {
                out.push_str(&format!("Error reading {}: {e}\n", entry.file_name));
            }
        }
    }
    out
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbase::{FieldValue, Record, TableWriterBuilder};

    fn write_sample_table(path: &Path) {
        let mut writer = TableWriterBuilder::new()
            .add_character_field("NAME".try_into().unwrap(), 20)
            .add_character_field("CITY".try_into().unwrap(), 20)
            .build_with_file_dest(path)
            .unwrap();

        let mut record = Record::default();
        record.insert(
            "NAME".to_string(),
            FieldValue::Character(Some("Anna".to_string())),
        );
        record.insert(
            "CITY".to_string(),
            FieldValue::Character(Some("Torun".to_string())),
        );
        writer.write_records(&[record]).unwrap();
    }

    #[test]
    fn test_list_tables_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_table(&dir.path().join("b.dbf"));
        write_sample_table(&dir.path().join("A.DBF"));
        fs::write(dir.path().join("notes.txt"), "not a table").unwrap();

        let tables = list_tables(dir.path()).unwrap();
        let names: Vec<String> = tables
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.DBF", "b.dbf"]);
    }

    #[test]
    fn test_list_tables_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_tables(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_summarize_reports_fields_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.dbf");
        write_sample_table(&path);

        let summary = summarize(&path).unwrap();
        assert_eq!(summary.name, "people.dbf");
        assert!(summary.size_bytes > 0);
        assert_eq!(summary.field_names, vec!["NAME", "CITY"]);
        assert_eq!(summary.preview.len(), 1);
        assert!(summary.preview[0].contains("NAME: Anna"));
        assert!(summary.preview[0].contains("CITY: Torun"));
    }

    #[test]
    fn test_catalog_continues_past_corrupt_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.dbf"), b"garbage").unwrap();
        write_sample_table(&dir.path().join("valid.dbf"));

        let entries = build_catalog(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].outcome.is_err());
        assert!(entries[1].outcome.is_ok());

        let pane = render_catalog(&entries);
        assert!(pane.contains("Error reading broken.dbf"));
        assert!(pane.contains("valid.dbf (Size:"));
        assert!(pane.contains("Fields: NAME, CITY"));
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let summary = TableSummary {
            name: "people.dbf".to_string(),
            size_bytes: 321,
            field_names: vec!["NAME".to_string()],
            preview: vec!["NAME: Anna".to_string()],
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"name\":\"people.dbf\""));
        assert!(json.contains("\"size_bytes\":321"));
    }
}
