use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The named result sets a classification run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSet {
    Breakout,
    RangeBound,
    NearLows,
    SectorStats,
    Summary,
    AllData,
}

impl ResultSet {
    pub const ALL: [ResultSet; 6] = [
        ResultSet::Breakout,
        ResultSet::RangeBound,
        ResultSet::NearLows,
        ResultSet::SectorStats,
        ResultSet::Summary,
        ResultSet::AllData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSet::Breakout => "breakout",
            ResultSet::RangeBound => "range_bound",
            ResultSet::NearLows => "near_lows",
            ResultSet::SectorStats => "sector_stats",
            ResultSet::Summary => "summary",
            ResultSet::AllData => "all_data",
        }
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultSet::ALL
            .into_iter()
            .find(|set| set.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "result set",
                value: s.to_string(),
            })
    }
}

/// Which reference point the breakout rule measures the distance to the high from.
///
/// `Low` reads `distance_to_high_pct` (the 52-week low stands in for the price),
/// `CurrentPrice` reads the gap between the latest trade price and the high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakoutBasis {
    #[default]
    Low,
    CurrentPrice,
}

impl BreakoutBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakoutBasis::Low => "low",
            BreakoutBasis::CurrentPrice => "current_price",
        }
    }
}

impl fmt::Display for BreakoutBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakoutBasis {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "low" => Ok(BreakoutBasis::Low),
            "current_price" | "current" => Ok(BreakoutBasis::CurrentPrice),
            _ => Err(CoreError::UnknownVariant {
                kind: "breakout basis",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_set_names_round_trip_through_from_str() {
        for set in ResultSet::ALL {
            assert_eq!(set.as_str().parse::<ResultSet>(), Ok(set));
        }
        assert!("breakouts".parse::<ResultSet>().is_err());
    }

    #[test]
    fn breakout_basis_accepts_cli_spellings() {
        assert_eq!("low".parse::<BreakoutBasis>(), Ok(BreakoutBasis::Low));
        assert_eq!("current-price".parse::<BreakoutBasis>(), Ok(BreakoutBasis::CurrentPrice));
        assert_eq!("Current_Price".parse::<BreakoutBasis>(), Ok(BreakoutBasis::CurrentPrice));
        assert!("close".parse::<BreakoutBasis>().is_err());
    }
}
