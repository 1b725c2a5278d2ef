use crate::report::{SectorStats, Summary};
use core_types::DerivedRecord;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A stateless calculator for the aggregate views over a derived table.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups rows by sector and averages their high and volatility.
    ///
    /// Rows without a sector are skipped. The result is ordered by mean
    /// volatility, highest first; sectors without any volatility value go last
    /// and ties keep ascending sector-name order. An input with no sector values
    /// at all yields an empty table.
    pub fn sector_stats(&self, records: &[DerivedRecord]) -> Vec<SectorStats> {
        let mut groups: BTreeMap<&str, Vec<&DerivedRecord>> = BTreeMap::new();
        for record in records {
            if let Some(sector) = record.sector.as_deref() {
                groups.entry(sector).or_default().push(record);
            }
        }

        let mut stats: Vec<SectorStats> = groups
            .into_iter()
            .map(|(sector, rows)| SectorStats {
                sector: sector.to_string(),
                stock_count: rows.len(),
                avg_high: mean(rows.iter().filter_map(|r| r.high)),
                avg_volatility: mean(rows.iter().filter_map(|r| r.price_range_pct)),
            })
            .collect();

        stats.sort_by(|a, b| match (a.avg_volatility, b.avg_volatility) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        tracing::debug!(sectors = stats.len(), "Computed sector statistics");
        stats
    }

    /// Computes the run summary.
    ///
    /// # Arguments
    ///
    /// * `records` - Every derived row of the run.
    /// * `near_low_count` - Size of the near-lows result set.
    /// * `far_below_high_pct` - Rows with `current_vs_high_pct` strictly below the
    ///   negated value are counted as far below their high.
    pub fn summary(
        &self,
        records: &[DerivedRecord],
        near_low_count: usize,
        far_below_high_pct: Decimal,
    ) -> Summary {
        let ranges: Vec<Decimal> = records.iter().filter_map(|r| r.price_range_pct).collect();
        let from_lows: Vec<Decimal> = records.iter().filter_map(|r| r.current_vs_low_pct).collect();
        let cutoff = -far_below_high_pct;

        Summary {
            total_rows: records.len(),
            valid_rows: ranges.len(),
            near_low_count,
            mean_price_range_pct: mean(ranges.iter().copied()),
            median_current_vs_low_pct: median(from_lows),
            far_below_high_count: records
                .iter()
                .filter(|r| r.current_vs_high_pct.is_some_and(|pct| pct < cutoff))
                .count(),
        }
    }
}

/// Arithmetic mean; `None` for an empty input or on overflow.
pub fn mean<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .try_fold((Decimal::ZERO, 0usize), |(sum, count), value| {
            Some((sum.checked_add(value)?, count + 1))
        })?;
    if count == 0 {
        return None;
    }
    sum.checked_div(Decimal::from(count))
}

/// Median; the mean of the two middle values for an even count.
pub fn median(mut values: Vec<Decimal>) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values.sort();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        mean([values[mid - 1], values[mid]])
    }
}
