use crate::error::SchemaError;
use configuration::ColumnMapping;
use core_types::{DerivedRecord, Record, Table, Value, percent_change};
use rust_decimal::Decimal;

/// Column positions of the semantic fields within one particular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub symbol: Option<usize>,
    pub high: usize,
    pub low: usize,
    pub current_price: Option<usize>,
    pub sector: Option<usize>,
}

impl ResolvedColumns {
    /// Resolves the mapping against the table header.
    ///
    /// Missing high/low columns are a `SchemaError` listing each of them. An
    /// optional column that is named but not found is treated as unset.
    pub fn resolve(table: &Table, mapping: &ColumnMapping) -> Result<Self, SchemaError> {
        let high = table.column_index(&mapping.high);
        let low = table.column_index(&mapping.low);
        let (Some(high), Some(low)) = (high, low) else {
            let mut missing = Vec::new();
            if high.is_none() {
                missing.push(mapping.high.clone());
            }
            if low.is_none() && !missing.contains(&mapping.low) {
                missing.push(mapping.low.clone());
            }
            return Err(SchemaError { missing });
        };

        let optional = |role: &str, name: &Option<String>| {
            let name = name.as_deref()?;
            let index = table.column_index(name);
            if index.is_none() {
                tracing::warn!(column = name, role, "Optional column not found; ignoring it");
            }
            index
        };

        Ok(Self {
            symbol: optional("symbol", &mapping.symbol),
            high,
            low,
            current_price: optional("current price", &mapping.current_price),
            sector: optional("sector", &mapping.sector),
        })
    }

    fn is_numeric(&self, index: usize) -> bool {
        index == self.high || index == self.low || self.current_price == Some(index)
    }
}

/// Cleans one input row and computes its derived metrics.
///
/// Missing-value tokens become `Absent` in every column, then the high, low and
/// current-price columns are coerced to numbers.
pub fn derive_record<S: AsRef<str>>(
    row: usize,
    record: &Record,
    columns: &ResolvedColumns,
    missing_tokens: &[S],
) -> DerivedRecord {
    let cleaned = record.map_values(|index, value| {
        let value = value.normalize(missing_tokens);
        if columns.is_numeric(index) {
            value.coerce_numeric()
        } else {
            value
        }
    });

    let number = |index: Option<usize>| index.and_then(|i| cleaned.get(i)).and_then(Value::to_decimal);
    let label = |index: Option<usize>| index.and_then(|i| cleaned.get(i)).and_then(Value::as_label);

    let high = number(Some(columns.high));
    let low = number(Some(columns.low));
    let current_price = number(columns.current_price);

    DerivedRecord {
        row,
        symbol: label(columns.symbol),
        sector: label(columns.sector),
        high,
        low,
        current_price,
        price_range_pct: pct(high, low, low),
        distance_to_high_pct: pct(high, low, high),
        current_vs_low_pct: pct(current_price, low, low),
        current_vs_high_pct: pct(current_price, high, high),
        record: cleaned,
    }
}

/// Cleans and derives every row of the table, preserving row order.
pub fn derive_all<S: AsRef<str>>(
    table: &Table,
    columns: &ResolvedColumns,
    missing_tokens: &[S],
) -> Vec<DerivedRecord> {
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, record)| derive_record(row, record, columns, missing_tokens))
        .collect()
}

fn pct(value: Option<Decimal>, reference: Option<Decimal>, base: Option<Decimal>) -> Option<Decimal> {
    percent_change(value?, reference?, base?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOKENS: [&str; 4] = ["-", "NA", "N/A", ""];

    fn table(columns: &[&str], rows: Vec<Vec<&str>>) -> Table {
        Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(Value::from).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn both_missing_required_columns_are_listed() {
        let t = table(&["SYMBOL", "CLOSE"], vec![]);
        let err = ResolvedColumns::resolve(&t, &ColumnMapping::new("HI", "LO")).unwrap_err();
        assert_eq!(err.missing, vec!["HI".to_string(), "LO".to_string()]);
    }

    #[test]
    fn unknown_optional_columns_are_unset() {
        let t = table(&["HI", "LO"], vec![]);
        let mapping = ColumnMapping::new("HI", "LO")
            .with_symbol("SYMBOL")
            .with_current_price("LTP")
            .with_sector("SECTOR");
        let resolved = ResolvedColumns::resolve(&t, &mapping).unwrap();
        assert_eq!(
            resolved,
            ResolvedColumns {
                symbol: None,
                high: 0,
                low: 1,
                current_price: None,
                sector: None,
            }
        );
    }

    #[test]
    fn derived_metrics_follow_the_formulas() {
        let t = table(
            &["SYMBOL", "HI", "LO", "LTP", "SECTOR"],
            vec![vec!["ABC", "120", "100", "102", " Banks "]],
        );
        let mapping = ColumnMapping::new("HI", "LO")
            .with_symbol("SYMBOL")
            .with_current_price("LTP")
            .with_sector("SECTOR");
        let resolved = ResolvedColumns::resolve(&t, &mapping).unwrap();

        let derived = derive_record(0, &t.rows()[0], &resolved, &TOKENS);

        assert_eq!(derived.symbol.as_deref(), Some("ABC"));
        assert_eq!(derived.sector.as_deref(), Some("Banks"));
        assert_eq!(derived.price_range_pct, Some(dec!(20)));
        assert_eq!(derived.current_vs_low_pct, Some(dec!(2)));
        assert_eq!(derived.current_vs_high_pct, Some(dec!(-15)));
        assert_eq!(derived.current_distance_to_high_pct(), Some(dec!(15)));
        assert_eq!(
            derived.distance_to_high_pct.map(|d| d.round_dp(4)),
            Some(dec!(16.6667))
        );
        assert_eq!(derived.record.get(1), Some(&Value::Number(dec!(120))));
        assert_eq!(derived.record.get(4), Some(&Value::from(" Banks ")));
    }

    #[test]
    fn tokens_and_garbage_become_absent_everywhere() {
        let t = table(
            &["SYMBOL", "HI", "LO", "NOTE"],
            vec![vec!["ABC", "N/A", "abc", "-"]],
        );
        let resolved = ResolvedColumns::resolve(&t, &ColumnMapping::new("HI", "LO")).unwrap();

        let derived = derive_record(0, &t.rows()[0], &resolved, &TOKENS);

        assert_eq!(derived.high, None);
        assert_eq!(derived.low, None);
        assert_eq!(derived.price_range_pct, None);
        assert_eq!(derived.distance_to_high_pct, None);
        assert_eq!(derived.record.get(2), Some(&Value::Absent));
        assert_eq!(derived.record.get(3), Some(&Value::Absent));
        assert_eq!(derived.record.get(0), Some(&Value::from("ABC")));
    }

    #[test]
    fn zero_high_leaves_range_defined_but_distance_absent() {
        let t = table(&["HI", "LO"], vec![vec!["0", "10"]]);
        let resolved = ResolvedColumns::resolve(&t, &ColumnMapping::new("HI", "LO")).unwrap();

        let derived = derive_record(0, &t.rows()[0], &resolved, &TOKENS);

        assert_eq!(derived.price_range_pct, Some(dec!(-100)));
        assert_eq!(derived.distance_to_high_pct, None);
    }
}
