//! Dynamically typed in-memory tables.
//!
//! The synthesizer emits typed record vectors; this module gives them a
//! column-oriented shape the validator can check and the presentation layer
//! can chart. A `DataTable` keeps its column headers even when it has zero
//! rows, so empty-edge-case tables still carry a full schema.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SimulationError};

/// Element type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int,
    Float,
    Str,
    Bool,
    Timestamp,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int => "int",
            DType::Float => "float",
            DType::Str => "str",
            DType::Bool => "bool",
            DType::Timestamp => "timestamp",
        };
        write!(f, "{}", name)
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Element type of this cell; `None` for nulls.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            CellValue::Null => None,
            CellValue::Int(_) => Some(DType::Int),
            CellValue::Float(_) => Some(DType::Float),
            CellValue::Bool(_) => Some(DType::Bool),
            CellValue::Str(_) => Some(DType::Str),
            CellValue::Timestamp(_) => Some(DType::Timestamp),
        }
    }

    /// Numeric view of this cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Canonical representation for uniqueness hashing.
    ///
    /// Floats are keyed by bit pattern so equal values collide and NaN
    /// payloads stay distinguishable.
    pub fn key_repr(&self) -> String {
        match self {
            CellValue::Null => "\u{0}null".to_string(),
            CellValue::Int(v) => format!("i:{}", v),
            CellValue::Float(v) => format!("f:{:016x}", v.to_bits()),
            CellValue::Bool(v) => format!("b:{}", v),
            CellValue::Str(v) => format!("s:{}", v),
            CellValue::Timestamp(v) => format!("t:{}", v.timestamp_nanos_opt().unwrap_or(0)),
        }
    }
}

impl From<Option<DateTime<Utc>>> for CellValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(ts) => CellValue::Timestamp(ts),
            None => CellValue::Null,
        }
    }
}

/// Ordered columns plus rows of dynamically typed cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Create an empty table with the given column headers.
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row. The row must match the table's column arity.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(SimulationError::Type(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Iterate the cells of a named column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Row-oriented JSON for the charting boundary.
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (name, cell) in self.columns.iter().zip(row) {
                    let value = serde_json::to_value(cell).unwrap_or(Value::Null);
                    obj.insert(name.clone(), value);
                }
                Value::Object(obj)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_table() -> DataTable {
        let mut table = DataTable::new(&["agent_id", "score"]);
        table
            .push_row(vec![CellValue::Int(1), CellValue::Float(95.5)])
            .unwrap();
        table
            .push_row(vec![CellValue::Int(2), CellValue::Null])
            .unwrap();
        table
    }

    #[test]
    fn test_empty_table_keeps_headers() {
        let table = DataTable::new(&["timestamp", "agent_id", "value"]);
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["timestamp", "agent_id", "value"]);
    }

    #[test]
    fn test_push_row_arity_mismatch() {
        let mut table = DataTable::new(&["a", "b"]);
        let err = table.push_row(vec![CellValue::Int(1)]).unwrap_err();
        assert!(matches!(err, SimulationError::Type(_)));
    }

    #[test]
    fn test_column_iteration() {
        let table = sample_table();
        let scores: Vec<_> = table.column("score").unwrap().collect();
        assert_eq!(scores.len(), 2);
        assert!(scores[1].is_null());
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_float_key_repr_equal_bits() {
        let a = CellValue::Float(0.5);
        let b = CellValue::Float(0.25 + 0.25);
        assert_eq!(a.key_repr(), b.key_repr());
    }

    #[test]
    fn test_to_json_rows() {
        let table = sample_table();
        let rows = table.to_json_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["agent_id"], 1);
        assert!(rows[1]["score"].is_null());
    }

    #[test]
    fn test_timestamp_cell_serializes_as_string() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let mut table = DataTable::new(&["timestamp"]);
        table.push_row(vec![CellValue::Timestamp(ts)]).unwrap();
        let rows = table.to_json_rows();
        assert!(rows[0]["timestamp"].is_string());
    }
}
