use analytics::{SectorStats, Summary};
use core_types::{DerivedRecord, ResultSet};
use serde::Serialize;

/// Everything one classification run produces.
///
/// Each record-valued set is a subsequence of `all_data`. The bundle is built
/// once and only exposes read access. It serializes to exactly one key per
/// result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultBundle {
    #[serde(skip)]
    pub(crate) columns: Vec<String>,
    pub(crate) breakout: Vec<DerivedRecord>,
    pub(crate) range_bound: Vec<DerivedRecord>,
    pub(crate) near_lows: Vec<DerivedRecord>,
    pub(crate) sector_stats: Vec<SectorStats>,
    pub(crate) summary: Summary,
    pub(crate) all_data: Vec<DerivedRecord>,
}

impl ResultBundle {
    /// Column names of the input table, in the order of each record's values.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn breakout(&self) -> &[DerivedRecord] {
        &self.breakout
    }

    pub fn range_bound(&self) -> &[DerivedRecord] {
        &self.range_bound
    }

    pub fn near_lows(&self) -> &[DerivedRecord] {
        &self.near_lows
    }

    pub fn sector_stats(&self) -> &[SectorStats] {
        &self.sector_stats
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn all_data(&self) -> &[DerivedRecord] {
        &self.all_data
    }

    /// Looks up a record-valued result set by name. `SectorStats` and `Summary`
    /// are not record tables and return `None`.
    pub fn records(&self, set: ResultSet) -> Option<&[DerivedRecord]> {
        match set {
            ResultSet::Breakout => Some(&self.breakout),
            ResultSet::RangeBound => Some(&self.range_bound),
            ResultSet::NearLows => Some(&self.near_lows),
            ResultSet::AllData => Some(&self.all_data),
            ResultSet::SectorStats | ResultSet::Summary => None,
        }
    }
}
