use thiserror::Error;

use crate::value::Value;

pub type Row = Vec<Value>;

/// Rows returned by one retrieving statement, in the order the server
/// reported them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self, ColumnCountError> {
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(ColumnCountError {
                row,
                expected: columns.len(),
                actual: values.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Error, Debug)]
#[error("Row {row} has {actual} values, expected {expected}")]
pub struct ColumnCountError {
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_column_and_row_order() -> Result<(), ColumnCountError> {
        let results = ResultSet::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![Value::Int(2), "Bob".into()],
                vec![Value::Int(1), "Alice".into()],
            ],
        )?;

        assert_eq!(results.columns(), ["id", "name"]);
        assert_eq!(results.number_of_rows(), 2);
        assert_eq!(results.rows()[0][1], Value::Str("Bob".into()));
        assert!(!results.is_empty());

        Ok(())
    }

    #[test]
    fn new_rejects_short_row() {
        let err = ResultSet::new(
            vec!["id".into(), "name".into()],
            vec![vec![Value::Int(1), "Alice".into()], vec![Value::Int(2)]],
        )
        .unwrap_err();

        assert_eq!(err.row, 1);
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 1);
    }

    #[test]
    fn columns_without_rows_is_empty() -> Result<(), ColumnCountError> {
        let results = ResultSet::new(vec!["Field".into(), "Type".into()], vec![])?;

        assert!(results.is_empty());
        assert_eq!(results.columns().len(), 2);

        Ok(())
    }
}
