//! Loads 52-week high/low exports from delimited text files and spreadsheets
//! into the core `Table`. This crate is the only part of the workspace that
//! touches files; the classifier itself works on the in-memory table.

pub mod error;
pub mod loader;
pub mod workbook;

use std::path::Path;

pub use error::IngestError;
pub use loader::{CsvLoader, LoadReport, Loaded};
pub use workbook::{WORKBOOK_EXTENSIONS, WorkbookLoader};

/// Loads `path` with the loader its extension calls for.
///
/// Spreadsheets go through [`WorkbookLoader`]; everything else through
/// [`CsvLoader`], which rejects extensions other than `.csv` and `.txt`.
pub fn load(path: impl AsRef<Path>) -> Result<Loaded, IngestError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) => WorkbookLoader::new().load(path),
        _ => CsvLoader::new().load(path),
    }
}
