use crate::error::CoreError;
use crate::value::Value;
use serde::Serialize;

/// One row of a [`Table`]: exactly one value per table column, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a copy with `f` applied to every cell.
    pub fn map_values<F>(&self, f: F) -> Record
    where
        F: Fn(usize, &Value) -> Value,
    {
        Record {
            values: self
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| f(index, value))
                .collect(),
        }
    }
}

/// An in-memory snapshot table: named columns plus an ordered list of records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table, rejecting any row whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, CoreError> {
        let width = columns.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(CoreError::InvalidInput(
                format!("row {index}"),
                format!("expected {width} values, found {}", row.len()),
            ));
        }

        Ok(Self {
            columns,
            rows: rows.into_iter().map(Record::new).collect(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Looks up a single cell by row position and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Table::new(
            columns(&["SYMBOL", "HIGH"]),
            vec![vec!["ABC".into(), "10".into()], vec!["XYZ".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref what, _) if what == "row 1"));
    }

    #[test]
    fn cells_are_addressed_by_column_name() {
        let table = Table::new(
            columns(&["SYMBOL", "HIGH"]),
            vec![vec!["ABC".into(), "10".into()]],
        )
        .unwrap();
        assert_eq!(table.value(0, "HIGH"), Some(&Value::from("10")));
        assert_eq!(table.value(0, "LOW"), None);
        assert_eq!(table.value(1, "HIGH"), None);
        assert!(table.has_column("SYMBOL"));
        assert_eq!(table.len(), 1);
    }
}
