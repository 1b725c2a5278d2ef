use crate::error::IngestError;
use core_types::{Table, Value};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const SUPPORTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// A loaded table plus what was dropped on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub table: Table,
    pub report: LoadReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_loaded: usize,
    /// 1-based line numbers of rows skipped for having more fields than the header.
    pub skipped_lines: Vec<u64>,
}

/// Reads a delimited text export into a [`Table`].
///
/// Every cell is kept as trimmed text; cleaning and numeric coercion are left to
/// the classifier. Rows with more fields than the header are skipped; shorter
/// rows are padded with absent cells.
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Loaded, IngestError> {
        let path = path.as_ref();
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            let extension = extension.to_ascii_lowercase();
            if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
                return Err(IngestError::UnsupportedFormat(extension));
            }
        }

        let file = File::open(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Reading CSV");
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Loaded, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').to_string())
            .collect();
        if columns.iter().all(|name| name.is_empty()) {
            return Err(IngestError::MissingHeader);
        }

        let width = columns.len();
        let mut rows = Vec::new();
        let mut report = LoadReport::default();
        for result in reader.records() {
            let record = result?;
            if record.len() > width {
                let line = record.position().map_or(0, |p| p.line());
                tracing::debug!(line, fields = record.len(), expected = width, "Skipping over-long line");
                report.skipped_lines.push(line);
                continue;
            }
            // Short rows keep what they have; the missing trailing cells are absent.
            let mut row: Vec<Value> = record.iter().map(Value::from).collect();
            row.resize(width, Value::Absent);
            rows.push(row);
        }

        if !report.skipped_lines.is_empty() {
            tracing::warn!(
                skipped = report.skipped_lines.len(),
                "Skipped lines with more fields than the header"
            );
        }
        report.rows_loaded = rows.len();

        Ok(Loaded {
            table: Table::new(columns, rows)?,
            report,
        })
    }
}
