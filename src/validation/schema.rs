//! Structural table validation.
//!
//! Confirms schema conformance of a tabular dataset before it is trusted
//! downstream: expected columns, element types, nullability of critical
//! fields, and unique key integrity. All missing columns are reported in one
//! error. On success the caller gets descriptive statistics over the numeric
//! columns; those are informational only.

use std::collections::HashSet;

use crate::error::{Result, SimulationError};
use crate::logging::structured::LogContext;
use crate::model::records::{AgentLogRecord, SecurityMetricRecord, SensorReading};
use crate::table::{DataTable, DType, TableSummary};

/// Declared expectations for one table.
#[derive(Debug, Clone)]
pub struct TableExpectations {
    pub expected_columns: Vec<&'static str>,
    pub expected_dtypes: Vec<(&'static str, DType)>,
    pub critical_fields_no_null: Vec<&'static str>,
    pub unique_key: Vec<&'static str>,
}

impl TableExpectations {
    /// Expectations for the synthesized sensor readings table.
    pub fn sensor_data() -> Self {
        Self {
            expected_columns: SensorReading::COLUMNS.to_vec(),
            expected_dtypes: vec![
                ("timestamp", DType::Timestamp),
                ("agent_id", DType::Int),
                ("sensor_type", DType::Str),
                ("value", DType::Float),
                ("unit", DType::Str),
                ("status", DType::Str),
            ],
            critical_fields_no_null: vec!["timestamp", "agent_id", "value"],
            unique_key: Vec::new(),
        }
    }

    /// Expectations for the synthesized agent logs table.
    pub fn agent_logs() -> Self {
        Self {
            expected_columns: AgentLogRecord::COLUMNS.to_vec(),
            expected_dtypes: vec![
                ("timestamp", DType::Timestamp),
                ("agent_id", DType::Int),
                ("log_type", DType::Str),
                ("severity", DType::Str),
                ("message", DType::Str),
            ],
            critical_fields_no_null: vec!["timestamp", "agent_id", "log_type"],
            unique_key: Vec::new(),
        }
    }

    /// Expectations for the per-agent security metrics table.
    /// `last_alert_time` is deliberately absent from the no-null list: agents
    /// that never alerted have no last alert.
    pub fn security_metrics() -> Self {
        Self {
            expected_columns: SecurityMetricRecord::COLUMNS.to_vec(),
            expected_dtypes: vec![
                ("agent_id", DType::Int),
                ("total_alerts_generated", DType::Int),
                ("average_integrity_score", DType::Float),
                ("alert_frequency", DType::Float),
            ],
            critical_fields_no_null: vec![
                "agent_id",
                "total_alerts_generated",
                "average_integrity_score",
            ],
            unique_key: vec!["agent_id"],
        }
    }

    /// Validate a table against these expectations.
    pub fn validate(&self, table: &DataTable, name: &str, ctx: &LogContext) -> Result<TableSummary> {
        validate_and_summarize(
            table,
            name,
            &self.expected_columns,
            &self.expected_dtypes,
            &self.critical_fields_no_null,
            &self.unique_key,
            ctx,
        )
    }
}

/// Validate a table's structure and summarize its numeric columns.
///
/// Checks run in a fixed order and the first failing category raises:
/// 1. expected columns - all missing names reported in one error
/// 2. element types - only for columns that are present; nulls are skipped
/// 3. critical no-null fields - only for fields that are present
/// 4. unique key - empty slice skips the check entirely
pub fn validate_and_summarize(
    table: &DataTable,
    name: &str,
    expected_columns: &[&str],
    expected_dtypes: &[(&str, DType)],
    critical_fields_no_null: &[&str],
    unique_key: &[&str],
    ctx: &LogContext,
) -> Result<TableSummary> {
    let ctx = ctx.with_table(name);
    log::debug!("{} VALIDATION_START rows={}", ctx, table.len());

    check_columns(table, name, expected_columns, &ctx)?;
    check_dtypes(table, name, expected_dtypes, &ctx)?;
    check_no_nulls(table, name, critical_fields_no_null, &ctx)?;
    check_unique_key(table, name, unique_key, &ctx)?;

    let summary = TableSummary::describe(table, name);
    log::info!(
        "{} VALIDATION_PASSED rows={} numeric_columns={}",
        ctx,
        table.len(),
        summary.columns.len()
    );
    Ok(summary)
}

fn check_columns(
    table: &DataTable,
    name: &str,
    expected_columns: &[&str],
    ctx: &LogContext,
) -> Result<()> {
    let missing: Vec<&str> = expected_columns
        .iter()
        .filter(|c| !table.has_column(c))
        .copied()
        .collect();

    if !missing.is_empty() {
        let missing_str = missing.join(", ");
        log::error!("{} VALIDATION_COLUMNS_MISSING columns={}", ctx, missing_str);
        return Err(SimulationError::validation(
            name,
            format!("missing expected columns: {}", missing_str),
        ));
    }
    Ok(())
}

fn check_dtypes(
    table: &DataTable,
    name: &str,
    expected_dtypes: &[(&str, DType)],
    ctx: &LogContext,
) -> Result<()> {
    for (column, expected) in expected_dtypes {
        // Absent columns were already reported by the column check.
        let cells = match table.column(column) {
            Some(cells) => cells,
            None => continue,
        };

        for cell in cells {
            let actual = match cell.dtype() {
                Some(dtype) => dtype,
                None => continue,
            };
            if actual != *expected {
                log::error!(
                    "{} VALIDATION_DTYPE_MISMATCH column={} expected={} actual={}",
                    ctx,
                    column,
                    expected,
                    actual
                );
                return Err(SimulationError::validation(
                    name,
                    format!(
                        "column '{}' has incorrect element type: expected '{}', got '{}'",
                        column, expected, actual
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn check_no_nulls(
    table: &DataTable,
    name: &str,
    critical_fields: &[&str],
    ctx: &LogContext,
) -> Result<()> {
    for field in critical_fields {
        let cells = match table.column(field) {
            Some(cells) => cells,
            None => continue,
        };

        let null_count = cells.filter(|c| c.is_null()).count();
        if null_count > 0 {
            log::error!(
                "{} VALIDATION_NULLS_FOUND field={} nulls={}",
                ctx,
                field,
                null_count
            );
            return Err(SimulationError::validation(
                name,
                format!("critical field '{}' contains {} null values", field, null_count),
            ));
        }
    }
    Ok(())
}

fn check_unique_key(
    table: &DataTable,
    name: &str,
    unique_key: &[&str],
    ctx: &LogContext,
) -> Result<()> {
    if unique_key.is_empty() {
        log::debug!("{} VALIDATION_UNIQUE_KEY_SKIPPED", ctx);
        return Ok(());
    }

    let missing: Vec<&str> = unique_key
        .iter()
        .filter(|c| !table.has_column(c))
        .copied()
        .collect();
    if !missing.is_empty() {
        let missing_str = missing.join(", ");
        log::error!("{} VALIDATION_KEY_COLUMNS_MISSING columns={}", ctx, missing_str);
        return Err(SimulationError::validation(
            name,
            format!("unique key columns missing from table: {}", missing_str),
        ));
    }

    let indices: Vec<usize> = unique_key
        .iter()
        .filter_map(|c| table.column_index(c))
        .collect();

    let mut seen = HashSet::with_capacity(table.len());
    for row in table.rows() {
        let key: String = indices
            .iter()
            .map(|&i| row[i].key_repr())
            .collect::<Vec<_>>()
            .join("|");
        if !seen.insert(key) {
            let joined = unique_key.join(", ");
            log::error!("{} VALIDATION_DUPLICATE_KEY key={}", ctx, joined);
            return Err(SimulationError::validation(
                name,
                format!("unique key '{}' contains duplicate entries", joined),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn ctx() -> LogContext {
        LogContext::new("test-run")
    }

    fn metrics_like_table() -> DataTable {
        let mut table = DataTable::new(&["agent_id", "score"]);
        table
            .push_row(vec![CellValue::Int(1), CellValue::Float(95.0)])
            .unwrap();
        table
            .push_row(vec![CellValue::Int(2), CellValue::Float(88.5)])
            .unwrap();
        table
    }

    #[test]
    fn test_valid_table_returns_summary() {
        let table = metrics_like_table();
        let summary = validate_and_summarize(
            &table,
            "metrics",
            &["agent_id", "score"],
            &[("agent_id", DType::Int), ("score", DType::Float)],
            &["agent_id"],
            &["agent_id"],
            &ctx(),
        )
        .unwrap();
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.columns.len(), 2);
    }

    #[test]
    fn test_missing_columns_all_listed() {
        let table = metrics_like_table();
        let err = validate_and_summarize(
            &table,
            "metrics",
            &["agent_id", "score", "unit", "status"],
            &[],
            &[],
            &[],
            &ctx(),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unit"));
        assert!(msg.contains("status"));
    }

    #[test]
    fn test_dtype_mismatch_raises() {
        let table = metrics_like_table();
        let err = validate_and_summarize(
            &table,
            "metrics",
            &["agent_id"],
            &[("agent_id", DType::Float)],
            &[],
            &[],
            &ctx(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("agent_id"));
        assert!(matches!(err, SimulationError::Validation { .. }));
    }

    #[test]
    fn test_dtype_check_skips_absent_columns() {
        let table = metrics_like_table();
        // "missing" is not in expected_columns, so only the dtype map names it;
        // absent columns are skipped rather than failing the dtype pass.
        validate_and_summarize(
            &table,
            "metrics",
            &["agent_id"],
            &[("missing", DType::Int)],
            &[],
            &[],
            &ctx(),
        )
        .unwrap();
    }

    #[test]
    fn test_null_in_critical_field_raises() {
        let mut table = DataTable::new(&["agent_id"]);
        table.push_row(vec![CellValue::Int(1)]).unwrap();
        table.push_row(vec![CellValue::Null]).unwrap();
        let err = validate_and_summarize(
            &table,
            "metrics",
            &["agent_id"],
            &[],
            &["agent_id"],
            &[],
            &ctx(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("agent_id"));
    }

    #[test]
    fn test_duplicate_unique_key_raises() {
        let mut table = DataTable::new(&["agent_id"]);
        table.push_row(vec![CellValue::Int(1)]).unwrap();
        table.push_row(vec![CellValue::Int(1)]).unwrap();
        let err = validate_and_summarize(
            &table,
            "metrics",
            &["agent_id"],
            &[],
            &[],
            &["agent_id"],
            &ctx(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_composite_unique_key() {
        let mut table = DataTable::new(&["a", "b"]);
        table
            .push_row(vec![CellValue::Int(1), CellValue::Int(1)])
            .unwrap();
        table
            .push_row(vec![CellValue::Int(1), CellValue::Int(2)])
            .unwrap();
        // Distinct combinations pass.
        validate_and_summarize(&table, "t", &[], &[], &[], &["a", "b"], &ctx()).unwrap();

        table
            .push_row(vec![CellValue::Int(1), CellValue::Int(2)])
            .unwrap();
        let err =
            validate_and_summarize(&table, "t", &[], &[], &[], &["a", "b"], &ctx()).unwrap_err();
        assert!(err.to_string().contains("a, b"));
    }

    #[test]
    fn test_missing_unique_key_column_raises() {
        let table = metrics_like_table();
        let err = validate_and_summarize(&table, "t", &[], &[], &[], &["nope"], &ctx())
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_empty_unique_key_skips_check() {
        let mut table = DataTable::new(&["agent_id"]);
        table.push_row(vec![CellValue::Int(1)]).unwrap();
        table.push_row(vec![CellValue::Int(1)]).unwrap();
        validate_and_summarize(&table, "t", &["agent_id"], &[], &[], &[], &ctx()).unwrap();
    }

    #[test]
    fn test_canonical_expectations_accept_synthesized_tables() {
        let out = crate::synthesis::generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        TableExpectations::sensor_data()
            .validate(&out.sensor_table(), "sensor_data", &ctx())
            .unwrap();
        TableExpectations::agent_logs()
            .validate(&out.log_table(), "agent_logs", &ctx())
            .unwrap();
        TableExpectations::security_metrics()
            .validate(&out.metrics_table(), "security_metrics", &ctx())
            .unwrap();
    }

    #[test]
    fn test_empty_synthesized_tables_pass_validation() {
        let out = crate::synthesis::generate(&ctx(), 0, 2, 5.0, 2.5, 42).unwrap();
        TableExpectations::security_metrics()
            .validate(&out.metrics_table(), "security_metrics", &ctx())
            .unwrap();
    }
}
