use crate::error::ConfigError;
use core_types::BreakoutBasis;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for one classification run: which columns to read, how to
/// clean them and where the classification thresholds sit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub columns: ColumnMapping,
    pub thresholds: Thresholds,
    pub cleaning: Cleaning,
}

/// Maps the semantic fields onto the column names of the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub symbol: Option<String>,
    /// 52-week high. Required.
    pub high: String,
    /// 52-week low. Required.
    pub low: String,
    /// Latest trade price. Enables the near-lows rule when set.
    pub current_price: Option<String>,
    /// Grouping key for sector statistics.
    pub sector: Option<String>,
}

/// Classification thresholds, all expressed in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Maximum distance below the high for a breakout candidate.
    pub breakout_threshold: Decimal,
    /// Minimum annual range for a breakout candidate.
    pub range_threshold: Decimal,
    /// Maximum annual range for a range-bound stock.
    pub bound_threshold: Decimal,
    /// Maximum distance above the low for a near-low stock.
    pub near_low_threshold: Decimal,
    /// Rows trading more than this far below their high are counted in the summary.
    pub far_below_high_threshold: Decimal,
    pub breakout_basis: BreakoutBasis,
}

/// Data-cleaning settings applied before any arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cleaning {
    /// Cell texts (after trimming) that mean "no value".
    pub missing_tokens: Vec<String>,
}

// --- Default Implementations ---
// These let a user omit any section (or the whole file) and still get the
// column names and thresholds of the standard 52-week high/low export.

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            symbol: Some("SYMBOL".to_string()),
            high: "Adjusted_52_Week_High".to_string(),
            low: "Adjusted_52_Week_Low".to_string(),
            current_price: None,
            sector: Some("SECTOR".to_string()),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            breakout_threshold: Decimal::from(5),
            range_threshold: Decimal::from(20),
            bound_threshold: Decimal::from(15),
            near_low_threshold: Decimal::from(5),
            far_below_high_threshold: Decimal::from(50),
            breakout_basis: BreakoutBasis::default(),
        }
    }
}

impl Default for Cleaning {
    fn default() -> Self {
        Self {
            missing_tokens: ["-", "NA", "N/A", ""].map(String::from).to_vec(),
        }
    }
}

impl ColumnMapping {
    /// Mapping with the two required columns set and every optional column unset.
    pub fn new(high: impl Into<String>, low: impl Into<String>) -> Self {
        Self {
            symbol: None,
            high: high.into(),
            low: low.into(),
            current_price: None,
            sector: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_current_price(mut self, current_price: impl Into<String>) -> Self {
        self.current_price = Some(current_price.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }
}

impl AnalysisConfig {
    pub fn new(columns: ColumnMapping, thresholds: Thresholds) -> Self {
        Self {
            columns,
            thresholds,
            cleaning: Cleaning::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let columns = &self.columns;
        if columns.high.trim().is_empty() || columns.low.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "the high and low column names must not be empty".to_string(),
            ));
        }
        if columns.high == columns.low {
            return Err(ConfigError::ValidationError(format!(
                "the high and low columns must differ (both are '{}')",
                columns.high
            )));
        }

        let t = &self.thresholds;
        let named = [
            ("breakout_threshold", t.breakout_threshold),
            ("range_threshold", t.range_threshold),
            ("bound_threshold", t.bound_threshold),
            ("near_low_threshold", t.near_low_threshold),
            ("far_below_high_threshold", t.far_below_high_threshold),
        ];
        if let Some((name, value)) = named.iter().find(|(_, value)| *value < Decimal::ZERO) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must not be negative (got {value})"
            )));
        }

        Ok(())
    }
}
