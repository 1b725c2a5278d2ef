//! # High/Low Classifier
//!
//! Turns a snapshot table of 52-week high/low records into breakout candidates,
//! range-bound stocks, near-low stocks, per-sector statistics and a summary.
//!
//! ## Architectural Principles
//!
//! - **Pure function:** `Analyzer::run` borrows the input table, performs no I/O and
//!   keeps no state between calls. Calls on a shared table may run concurrently.
//! - **Absent, not zero:** missing tokens, unparsable numbers and undefined ratios
//!   become absent values that no threshold ever selects. Only a missing high or
//!   low column is an error (`SchemaError`), raised before any row is touched.
//! - **Independent rules:** every classification is a `ClassificationRule` over the
//!   same derived table, so the annual-range rules and the current-price rule are
//!   selected by which columns are present, not by a mode switch.
//!
//! ## Public API
//!
//! - `Analyzer`: runs a full classification from an `AnalysisConfig`.
//! - `classify`: the same with default thresholds and explicit column names.
//! - `ResultBundle`: the named result sets of one run.
//! - `Breakout`, `RangeBound`, `NearLows`: the rules themselves.

use crate::derive::ResolvedColumns;
use analytics::AnalyticsEngine;
use configuration::{AnalysisConfig, ColumnMapping, Thresholds};
use core_types::{DerivedRecord, Table};

pub mod bundle;
pub mod derive;
pub mod error;
pub mod rules;

pub use bundle::ResultBundle;
pub use error::{AnalyzerError, SchemaError};
pub use rules::{Breakout, ClassificationRule, NearLows, RangeBound};

/// The main classification engine.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    analytics: AnalyticsEngine,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            analytics: AnalyticsEngine::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Cleans the table and computes every derived field, one record per input row.
    pub fn derive(&self, table: &Table) -> Result<Vec<DerivedRecord>, AnalyzerError> {
        let columns = ResolvedColumns::resolve(table, &self.config.columns)?;
        Ok(derive::derive_all(
            table,
            &columns,
            &self.config.cleaning.missing_tokens,
        ))
    }

    /// Validates, cleans, derives, classifies and aggregates the table.
    #[tracing::instrument(name = "classify", skip_all, fields(rows = table.len()))]
    pub fn run(&self, table: &Table) -> Result<ResultBundle, AnalyzerError> {
        // 1. Validate the schema before touching any row
        let columns = ResolvedColumns::resolve(table, &self.config.columns)?;

        // 2. Clean and derive
        let all_data = derive::derive_all(table, &columns, &self.config.cleaning.missing_tokens);

        // 3. Classify
        let thresholds = &self.config.thresholds;
        let breakout = Breakout::from_thresholds(thresholds).apply(&all_data);
        let range_bound = RangeBound::from_thresholds(thresholds).apply(&all_data);
        let near_lows = if columns.current_price.is_some() {
            NearLows::from_thresholds(thresholds).apply(&all_data)
        } else {
            tracing::debug!("No current price column; skipping near-lows");
            Vec::new()
        };

        // 4. Aggregate
        let sector_stats = if columns.sector.is_some() {
            self.analytics.sector_stats(&all_data)
        } else {
            Vec::new()
        };
        let summary = self.analytics.summary(
            &all_data,
            near_lows.len(),
            thresholds.far_below_high_threshold,
        );

        tracing::info!(
            breakout = breakout.len(),
            range_bound = range_bound.len(),
            near_lows = near_lows.len(),
            sectors = sector_stats.len(),
            valid_rows = summary.valid_rows,
            "Classification complete"
        );

        Ok(ResultBundle {
            columns: table.columns().to_vec(),
            breakout,
            range_bound,
            near_lows,
            sector_stats,
            summary,
            all_data,
        })
    }
}

/// Classifies `table` with the default thresholds and cleaning tokens.
///
/// Only `high_field` and `low_field` are required; the optional fields enable the
/// near-lows rule and sector statistics respectively.
pub fn classify(
    table: &Table,
    high_field: &str,
    low_field: &str,
    current_price_field: Option<&str>,
    sector_field: Option<&str>,
) -> Result<ResultBundle, AnalyzerError> {
    let mut columns = ColumnMapping::new(high_field, low_field);
    columns.current_price = current_price_field.map(str::to_string);
    columns.sector = sector_field.map(str::to_string);

    Analyzer::new(AnalysisConfig::new(columns, Thresholds::default())).run(table)
}
