use crate::error::IngestError;
use crate::loader::{LoadReport, Loaded};
use calamine::{Data, Reader, open_workbook_auto};
use core_types::{Table, Value};
use std::path::Path;

/// Spreadsheet formats read through `calamine`.
pub const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Reads the first worksheet of a spreadsheet into a [`Table`].
///
/// The first row is the header. Cells become trimmed text, as with the CSV
/// loader, so cleaning stays with the classifier; empty cells are absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookLoader;

impl WorkbookLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Loaded, IngestError> {
        let path = path.as_ref();
        let workbook_error = |source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| IngestError::NoWorksheet(path.to_path_buf()))?
            .map_err(workbook_error)?;
        tracing::debug!(path = %path.display(), size = ?range.get_size(), "Reading first worksheet");

        let mut rows = range.rows();
        let columns: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .unwrap_or_default();
        if columns.iter().all(|name| name.is_empty()) {
            return Err(IngestError::MissingHeader);
        }

        let rows: Vec<Vec<Value>> = rows.map(|row| row.iter().map(cell_value).collect()).collect();
        let report = LoadReport {
            rows_loaded: rows.len(),
            skipped_lines: Vec::new(),
        };

        Ok(Loaded {
            table: Table::new(columns, rows)?,
            report,
        })
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Absent,
        Data::String(text) => Value::from(text.trim()),
        other => Value::from(other.to_string().trim()),
    }
}
