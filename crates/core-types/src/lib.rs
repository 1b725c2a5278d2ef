//! Shared data model for the high/low classifier: cell values, the in-memory
//! input table, derived records and the enums naming result sets and rule options.
//!
//! This is the bottom layer of the workspace. It has no knowledge of files,
//! configuration or logging.

pub mod enums;
pub mod error;
pub mod structs;
pub mod table;
pub mod value;

// Re-export the core types to provide a clean public API.
pub use enums::{BreakoutBasis, ResultSet};
pub use error::CoreError;
pub use structs::DerivedRecord;
pub use table::{Record, Table};
pub use value::{Value, parse_decimal, percent_change};
