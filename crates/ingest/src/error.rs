use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read workbook '{}': {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook '{}' has no worksheet", .0.display())]
    NoWorksheet(PathBuf),

    #[error("Unsupported file format '{0}': expected .csv, .txt or a spreadsheet (.xlsx, .xlsm, .xls, .ods)")]
    UnsupportedFormat(String),

    #[error("Input has no header row")]
    MissingHeader,

    #[error(transparent)]
    Table(#[from] core_types::CoreError),
}
