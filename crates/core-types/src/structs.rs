use crate::table::Record;
use rust_decimal::Decimal;
use serde::Serialize;

/// A cleaned input row together with the metrics derived from it.
///
/// Every derived field is a pure function of this row's own inputs; `None`
/// means the field is absent (missing input, zero denominator or overflow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedRecord {
    /// Position of the row in the input table.
    pub row: usize,
    /// The input row after missing-token cleaning and numeric coercion.
    pub record: Record,
    pub symbol: Option<String>,
    pub sector: Option<String>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub current_price: Option<Decimal>,

    /// `(high - low) / low * 100`
    pub price_range_pct: Option<Decimal>,
    /// `(high - low) / high * 100`, the low standing in for the current price.
    pub distance_to_high_pct: Option<Decimal>,
    /// `(current - low) / low * 100`
    pub current_vs_low_pct: Option<Decimal>,
    /// `(current - high) / high * 100`, negative below the high.
    pub current_vs_high_pct: Option<Decimal>,
}

impl DerivedRecord {
    /// Percentage the current price sits below the high, `(high - current) / high * 100`.
    pub fn current_distance_to_high_pct(&self) -> Option<Decimal> {
        self.current_vs_high_pct.map(|pct| -pct)
    }
}
