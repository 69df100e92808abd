//! Descriptive statistics over numeric table columns.
//!
//! Produced by the validator after a table passes its structural checks.
//! Purely informational: never part of the pass/fail contract.

use std::fmt;

use serde::Serialize;

use crate::table::frame::{CellValue, DataTable, DType};

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summary statistics for a whole table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub table: String,
    pub row_count: usize,
    pub columns: Vec<ColumnSummary>,
}

impl TableSummary {
    /// Summarize the numeric columns of a table. Null cells are skipped;
    /// columns with no numeric values are omitted.
    pub fn describe(table: &DataTable, name: &str) -> Self {
        let mut columns = Vec::new();

        for column_name in table.columns() {
            let is_numeric = table
                .column(column_name)
                .map(|mut cells| {
                    cells.any(|c| matches!(c.dtype(), Some(DType::Int) | Some(DType::Float)))
                })
                .unwrap_or(false);
            if !is_numeric {
                continue;
            }

            let values: Vec<f64> = table
                .column(column_name)
                .map(|cells| cells.filter_map(CellValue::as_f64).collect())
                .unwrap_or_default();

            if let Some(summary) = ColumnSummary::from_values(column_name, &values) {
                columns.push(summary);
            }
        }

        Self {
            table: name.to_string(),
            row_count: table.len(),
            columns,
        }
    }
}

impl ColumnSummary {
    fn from_values(name: &str, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;

        let std = if count > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            name: name.to_string(),
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

/// Linear-interpolation quantile over pre-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table={} rows={}", self.table, self.row_count)?;
        for col in &self.columns {
            write!(
                f,
                " | {}: count={} mean={:.4} min={:.4} max={:.4}",
                col.name, col.count, col.mean, col.min, col.max
            )?;
        }
        Ok(())
    }
}
