use std::path::PathBuf;

use thiserror::Error;

/// Centralized error type for the dbf_kit crate
#[derive(Error, Debug)]
pub enum DbfKitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dBase error: {0}")]
    Dbase(#[from] dbase::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("no .dbf tables found in {}", .0.display())]
    NoTables(PathBuf),
}

/// Alias for fallible operations in the dbf_kit crate
pub type DbfKitResult<T> = Result<T, DbfKitError>;
