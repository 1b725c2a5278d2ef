use configuration::Thresholds;
use core_types::{BreakoutBasis, DerivedRecord, ResultSet};
use rust_decimal::Decimal;

/// A threshold filter over derived records that also defines the result order.
///
/// Rules only read derived fields, so several rules can run over the same derived
/// table independently of one another.
pub trait ClassificationRule {
    /// The result set this rule fills.
    fn result_set(&self) -> ResultSet;

    /// Returns the record's ascending sort key when the record is selected.
    ///
    /// Any absent input to the predicate means "not selected".
    fn select(&self, record: &DerivedRecord) -> Option<Decimal>;

    /// Selected records, ascending by sort key. Ties keep input order.
    fn apply(&self, records: &[DerivedRecord]) -> Vec<DerivedRecord> {
        let mut selected: Vec<(Decimal, &DerivedRecord)> = records
            .iter()
            .filter_map(|record| self.select(record).map(|key| (key, record)))
            .collect();
        // `sort_by` is stable.
        selected.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::debug!(
            rule = %self.result_set(),
            selected = selected.len(),
            of = records.len(),
            "Applied classification rule"
        );
        selected.into_iter().map(|(_, record)| record.clone()).collect()
    }
}

/// Near the 52-week high after a wide annual range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakout {
    pub max_distance_pct: Decimal,
    pub min_range_pct: Decimal,
    pub basis: BreakoutBasis,
}

impl Breakout {
    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            max_distance_pct: thresholds.breakout_threshold,
            min_range_pct: thresholds.range_threshold,
            basis: thresholds.breakout_basis,
        }
    }

    fn distance(&self, record: &DerivedRecord) -> Option<Decimal> {
        match self.basis {
            BreakoutBasis::Low => record.distance_to_high_pct,
            BreakoutBasis::CurrentPrice => record.current_distance_to_high_pct(),
        }
    }
}

impl ClassificationRule for Breakout {
    fn result_set(&self) -> ResultSet {
        ResultSet::Breakout
    }

    fn select(&self, record: &DerivedRecord) -> Option<Decimal> {
        let distance = self.distance(record)?;
        let range = record.price_range_pct?;
        (distance <= self.max_distance_pct && range >= self.min_range_pct).then_some(distance)
    }
}

/// Narrow annual range, most stable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBound {
    pub max_range_pct: Decimal,
}

impl RangeBound {
    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            max_range_pct: thresholds.bound_threshold,
        }
    }
}

impl ClassificationRule for RangeBound {
    fn result_set(&self) -> ResultSet {
        ResultSet::RangeBound
    }

    fn select(&self, record: &DerivedRecord) -> Option<Decimal> {
        let range = record.price_range_pct?;
        (range <= self.max_range_pct).then_some(range)
    }
}

/// Current price close to the 52-week low. Selects nothing without current prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearLows {
    pub max_above_low_pct: Decimal,
}

impl NearLows {
    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            max_above_low_pct: thresholds.near_low_threshold,
        }
    }
}

impl ClassificationRule for NearLows {
    fn result_set(&self) -> ResultSet {
        ResultSet::NearLows
    }

    fn select(&self, record: &DerivedRecord) -> Option<Decimal> {
        let above_low = record.current_vs_low_pct?;
        (above_low <= self.max_above_low_pct).then_some(above_low)
    }
}
