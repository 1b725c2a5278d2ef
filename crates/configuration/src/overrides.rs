//! Per-invocation overrides for the column mapping and thresholds. With the
//! `clap` feature enabled these derive `clap::Args` and can be flattened into a
//! command definition.

use crate::analysis_config::AnalysisConfig;
use core_types::BreakoutBasis;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ColumnOverrides {
    /// Column holding the stock symbol.
    #[cfg_attr(feature = "clap", arg(long = "symbol-col"))]
    pub symbol: Option<String>,

    /// Column holding the 52-week high.
    #[cfg_attr(feature = "clap", arg(long = "high-col"))]
    pub high: Option<String>,

    /// Column holding the 52-week low.
    #[cfg_attr(feature = "clap", arg(long = "low-col"))]
    pub low: Option<String>,

    /// Column holding the current price (enables the near-lows view).
    #[cfg_attr(feature = "clap", arg(long = "price-col"))]
    pub current_price: Option<String>,

    /// Column holding the sector (enables sector statistics).
    #[cfg_attr(feature = "clap", arg(long = "sector-col"))]
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ThresholdOverrides {
    /// Maximum % distance below the 52-week high for a breakout candidate.
    #[cfg_attr(feature = "clap", arg(long))]
    pub breakout_threshold: Option<Decimal>,

    /// Minimum % annual range for a breakout candidate.
    #[cfg_attr(feature = "clap", arg(long))]
    pub range_threshold: Option<Decimal>,

    /// Maximum % annual range for a range-bound stock.
    #[cfg_attr(feature = "clap", arg(long))]
    pub bound_threshold: Option<Decimal>,

    /// Maximum % above the 52-week low for a near-low stock.
    #[cfg_attr(feature = "clap", arg(long))]
    pub near_low_threshold: Option<Decimal>,

    /// % below the high past which a stock counts as far below it in the summary.
    #[cfg_attr(feature = "clap", arg(long))]
    pub far_below_high_threshold: Option<Decimal>,

    /// Measure the breakout distance from the 52-week low ("low") or the current price ("current-price").
    #[cfg_attr(feature = "clap", arg(long))]
    pub breakout_basis: Option<BreakoutBasis>,
}

impl AnalysisConfig {
    /// Applies any overrides that were given, leaving the rest untouched.
    pub fn apply_overrides(&mut self, columns: &ColumnOverrides, thresholds: &ThresholdOverrides) {
        let mapping = &mut self.columns;
        if let Some(symbol) = &columns.symbol {
            mapping.symbol = Some(symbol.clone());
        }
        if let Some(high) = &columns.high {
            mapping.high = high.clone();
        }
        if let Some(low) = &columns.low {
            mapping.low = low.clone();
        }
        if let Some(current_price) = &columns.current_price {
            mapping.current_price = Some(current_price.clone());
        }
        if let Some(sector) = &columns.sector {
            mapping.sector = Some(sector.clone());
        }

        let t = &mut self.thresholds;
        t.breakout_threshold = thresholds.breakout_threshold.unwrap_or(t.breakout_threshold);
        t.range_threshold = thresholds.range_threshold.unwrap_or(t.range_threshold);
        t.bound_threshold = thresholds.bound_threshold.unwrap_or(t.bound_threshold);
        t.near_low_threshold = thresholds.near_low_threshold.unwrap_or(t.near_low_threshold);
        t.far_below_high_threshold = thresholds
            .far_below_high_threshold
            .unwrap_or(t.far_below_high_threshold);
        t.breakout_basis = thresholds.breakout_basis.unwrap_or(t.breakout_basis);

        tracing::debug!(columns = ?self.columns, thresholds = ?self.thresholds, "Applied overrides");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn only_given_overrides_are_applied() {
        let mut config = AnalysisConfig::default();
        config.apply_overrides(
            &ColumnOverrides {
                current_price: Some("LTP".to_string()),
                ..Default::default()
            },
            &ThresholdOverrides {
                bound_threshold: Some(dec!(10)),
                breakout_basis: Some(BreakoutBasis::CurrentPrice),
                ..Default::default()
            },
        );

        let mut expected = AnalysisConfig::default();
        expected.columns.current_price = Some("LTP".to_string());
        expected.thresholds.bound_threshold = dec!(10);
        expected.thresholds.breakout_basis = BreakoutBasis::CurrentPrice;
        assert_eq!(config, expected);
    }
}
