use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mean price level and mean volatility of the stocks sharing one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorStats {
    pub sector: String,
    pub stock_count: usize,
    /// Mean 52-week high over the sector's rows that have one.
    pub avg_high: Option<Decimal>,
    /// Mean `price_range_pct` over the sector's rows that have one.
    pub avg_volatility: Option<Decimal>,
}

/// Headline figures for a whole classification run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_rows: usize,
    /// Rows with a defined `price_range_pct`.
    pub valid_rows: usize,
    pub near_low_count: usize,
    pub mean_price_range_pct: Option<Decimal>, // None when no row has a range
    pub median_current_vs_low_pct: Option<Decimal>, // None without current prices
    /// Rows whose current price sits more than the configured percentage below the high.
    pub far_below_high_count: usize,
}
