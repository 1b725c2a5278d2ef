use thiserror::Error;

/// One or more required columns are not present in the input table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required column(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
