//! Record types for synthesized telemetry.
//!
//! Three record families come out of the synthesizer: sensor readings,
//! agent log records, and per-agent security metrics. Each family knows how
//! to lay itself out as a `DataTable` with a fixed column order, so empty
//! runs still hand downstream consumers the full set of headers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::{CellValue, DataTable};

/// Kind of sensor attached to a monitored agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Temperature,
    Pressure,
    Vibration,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [
        SensorType::Temperature,
        SensorType::Pressure,
        SensorType::Vibration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Pressure => "pressure",
            SensorType::Vibration => "vibration",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorType::Temperature => "°C",
            SensorType::Pressure => "kPa",
            SensorType::Vibration => "mm/s",
        }
    }

    /// Nominal reading around which baseline values are drawn.
    pub fn baseline(&self) -> f64 {
        match self {
            SensorType::Temperature => 25.0,
            SensorType::Pressure => 100.0,
            SensorType::Vibration => 5.0,
        }
    }

    /// Standard deviation of baseline noise.
    pub fn noise_std(&self) -> f64 {
        match self {
            SensorType::Temperature => 2.0,
            SensorType::Pressure => 5.0,
            SensorType::Vibration => 1.0,
        }
    }
}

/// Status tag carried on every sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
}

impl SensorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Normal => "normal",
            SensorStatus::Warning => "warning",
            SensorStatus::Critical => "critical",
        }
    }
}

/// One reading from one sensor on one agent at one timestep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub agent_id: u32,
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    pub status: SensorStatus,
}

impl SensorReading {
    pub const COLUMNS: [&'static str; 6] =
        ["timestamp", "agent_id", "sensor_type", "value", "unit", "status"];

    /// Lay out a slice of readings as a `DataTable`.
    pub fn table(rows: &[SensorReading]) -> DataTable {
        let mut table = DataTable::new(&Self::COLUMNS);
        for r in rows {
            // Arity is fixed by COLUMNS; push cannot fail here.
            let _ = table.push_row(vec![
                CellValue::Timestamp(r.timestamp),
                CellValue::Int(r.agent_id as i64),
                CellValue::Str(r.sensor_type.as_str().to_string()),
                CellValue::Float(r.value),
                CellValue::Str(r.unit.clone()),
                CellValue::Str(r.status.as_str().to_string()),
            ]);
        }
        table
    }
}

/// Kind of agent log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLogType {
    Heartbeat,
    DataTransfer,
    StatusUpdate,
    ConfigurationChange,
    AlertGenerated,
}

impl AgentLogType {
    /// Routine log types; `AlertGenerated` is produced separately.
    pub const NORMAL: [AgentLogType; 4] = [
        AgentLogType::Heartbeat,
        AgentLogType::DataTransfer,
        AgentLogType::StatusUpdate,
        AgentLogType::ConfigurationChange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentLogType::Heartbeat => "heartbeat",
            AgentLogType::DataTransfer => "data_transfer",
            AgentLogType::StatusUpdate => "status_update",
            AgentLogType::ConfigurationChange => "configuration_change",
            AgentLogType::AlertGenerated => "alert_generated",
        }
    }

    /// Fixed message carried by routine log records.
    pub fn routine_message(&self) -> &'static str {
        match self {
            AgentLogType::Heartbeat => "Agent operational check.",
            AgentLogType::DataTransfer => "Transferred sensor data to central server.",
            AgentLogType::StatusUpdate => "Reporting system status as normal.",
            AgentLogType::ConfigurationChange => "Configuration updated successfully.",
            AgentLogType::AlertGenerated => "ALERT: Potential anomaly detected.",
        }
    }
}

/// Severity of an agent log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
}

impl LogSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogSeverity::Info => "INFO",
            LogSeverity::Warning => "WARNING",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// One log record emitted by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLogRecord {
    pub timestamp: DateTime<Utc>,
    pub agent_id: u32,
    pub log_type: AgentLogType,
    pub severity: LogSeverity,
    pub message: String,
}

impl AgentLogRecord {
    pub const COLUMNS: [&'static str; 5] =
        ["timestamp", "agent_id", "log_type", "severity", "message"];

    pub fn table(rows: &[AgentLogRecord]) -> DataTable {
        let mut table = DataTable::new(&Self::COLUMNS);
        for r in rows {
            let _ = table.push_row(vec![
                CellValue::Timestamp(r.timestamp),
                CellValue::Int(r.agent_id as i64),
                CellValue::Str(r.log_type.as_str().to_string()),
                CellValue::Str(r.severity.as_str().to_string()),
                CellValue::Str(r.message.clone()),
            ]);
        }
        table
    }
}

/// Baseline (or attacked) per-agent security metrics. One row per agent;
/// `agent_id` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetricRecord {
    pub agent_id: u32,
    pub total_alerts_generated: u32,
    /// Trust metric on the canonical 0-100 scale.
    pub average_integrity_score: f64,
    pub last_alert_time: Option<DateTime<Utc>>,
    /// Alerts per simulated hour. This is the field the impact simulator
    /// amplifies system-wide under attack.
    pub alert_frequency: f64,
}

impl SecurityMetricRecord {
    pub const COLUMNS: [&'static str; 5] = [
        "agent_id",
        "total_alerts_generated",
        "average_integrity_score",
        "last_alert_time",
        "alert_frequency",
    ];

    pub fn table(rows: &[SecurityMetricRecord]) -> DataTable {
        let mut table = DataTable::new(&Self::COLUMNS);
        for r in rows {
            let _ = table.push_row(vec![
                CellValue::Int(r.agent_id as i64),
                CellValue::Int(r.total_alerts_generated as i64),
                CellValue::Float(r.average_integrity_score),
                CellValue::from(r.last_alert_time),
                CellValue::Float(r.alert_frequency),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sensor_type_constants() {
        assert_eq!(SensorType::Temperature.baseline(), 25.0);
        assert_eq!(SensorType::Pressure.noise_std(), 5.0);
        assert_eq!(SensorType::Vibration.unit(), "mm/s");
    }

    #[test]
    fn test_sensor_table_layout() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let reading = SensorReading {
            timestamp: ts,
            agent_id: 3,
            sensor_type: SensorType::Pressure,
            value: 101.32,
            unit: SensorType::Pressure.unit().to_string(),
            status: SensorStatus::Normal,
        };
        let table = SensorReading::table(&[reading]);
        assert_eq!(table.columns(), &SensorReading::COLUMNS);
        assert_eq!(table.rows()[0][2], CellValue::Str("pressure".to_string()));
    }

    #[test]
    fn test_metrics_table_null_last_alert() {
        let metric = SecurityMetricRecord {
            agent_id: 1,
            total_alerts_generated: 0,
            average_integrity_score: 95.0,
            last_alert_time: None,
            alert_frequency: 0.0,
        };
        let table = SecurityMetricRecord::table(&[metric]);
        assert!(table.rows()[0][3].is_null());
    }

    #[test]
    fn test_log_severity_serde_uppercase() {
        let json = serde_json::to_string(&LogSeverity::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
    }
}
