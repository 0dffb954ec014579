//! Database type definitions
//!
//! Wire-level data structures crossing the adapter boundary. Every cell
//! value is already text at this point: adapters stringify at the boundary
//! so the rendering layer never branches on engine-specific types.

use crate::error::{AdapterError, AdapterResult};

/// One column record from catalog discovery, as a flat row of metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRecord {
    /// Column name
    pub name: String,
    /// 1-based position within the table
    pub ordinal: i32,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Underlying data type name as the engine reports it (e.g. "int4")
    pub data_type: String,
    /// Maximum character length, for types that carry one
    pub max_length: Option<i32>,
    /// Whether the column is an identity column
    pub is_identity: bool,
}

/// Query execution result: column names plus rows of stringified cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Check the structural invariant: every row has exactly as many cells
    /// as there are columns. A violating result is a hard adapter error and
    /// must never reach the rendering layer.
    pub fn validate(&self) -> AdapterResult<()> {
        let width = self.columns.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != width {
                return Err(AdapterError::MalformedResult(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_uniform_rows() {
        let result = QueryResult {
            columns: vec!["id".into(), "name".into()],
            rows: vec![
                vec!["1".into(), "ada".into()],
                vec!["2".into(), "grace".into()],
            ],
        };
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_row() {
        let result = QueryResult {
            columns: vec!["id".into(), "name".into()],
            rows: vec![vec!["1".into(), "ada".into()], vec!["2".into()]],
        };
        let err = result.validate().unwrap_err();
        assert!(matches!(err, AdapterError::MalformedResult(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_validate_empty_result() {
        let result = QueryResult {
            columns: vec![],
            rows: vec![],
        };
        assert!(result.validate().is_ok());
    }
}
