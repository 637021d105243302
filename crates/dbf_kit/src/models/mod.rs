pub mod catalog;
pub mod export;
pub mod mazovia;
pub mod naming;
pub mod table;

pub use catalog::{
    CatalogEntry, TableSummary, build_catalog, is_table_file, list_tables, render_catalog,
    summarize,
};
pub use export::{
    ExportConfig, ExportFormat, ExportResult, export_directory, export_table,
};
pub use naming::unique_path;
pub use table::{ReadConfig, TableData, field_value_to_text, read_table};
