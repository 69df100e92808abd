//! Baseline telemetry generation.
//!
//! One seeded ChaCha8 generator drives the whole invocation: sensor noise,
//! anomaly injection, log placement, and metric noise all consume the same
//! stream. Reordering any draw would silently change every downstream table,
//! so the generation order here is load-bearing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::error::{Result, SimulationError};
use crate::logging::structured::LogContext;
use crate::model::config::SimulationConfig;
use crate::model::records::{
    AgentLogRecord, AgentLogType, LogSeverity, SecurityMetricRecord, SensorReading, SensorStatus,
    SensorType,
};
use crate::synthesis::timeline::{build_timeline, step_minutes};
use crate::table::DataTable;

/// Alert message for WARNING-severity alert logs.
const ALERT_WARNING_MESSAGE: &str = "ALERT: Potential anomaly detected.";
/// Alert message for ERROR-severity alert logs.
const ALERT_ERROR_MESSAGE: &str = "CRITICAL ALERT: Abnormal condition detected in monitored area.";

/// Expected routine log records per agent per simulated hour.
const ROUTINE_LOGS_PER_AGENT_HOUR: u32 = 2;

/// Everything one synthesis run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutput {
    pub sensor_readings: Vec<SensorReading>,
    pub agent_logs: Vec<AgentLogRecord>,
    pub security_metrics: Vec<SecurityMetricRecord>,
    pub config: SimulationConfig,
}

impl SynthesisOutput {
    pub fn sensor_table(&self) -> DataTable {
        SensorReading::table(&self.sensor_readings)
    }

    pub fn log_table(&self) -> DataTable {
        AgentLogRecord::table(&self.agent_logs)
    }

    pub fn metrics_table(&self) -> DataTable {
        SecurityMetricRecord::table(&self.security_metrics)
    }
}

/// Generate a full baseline dataset.
///
/// Zero agents or zero hours is a defined edge case: all three tables come
/// back empty (headers intact) alongside the config. Negative rates are a
/// hard `Value` error; non-finite rates are a `Type` error. Nothing is
/// coerced or clamped at this boundary.
pub fn generate(
    ctx: &LogContext,
    num_agents: u32,
    duration_hours: u32,
    base_alert_rate: f64,
    anomaly_multiplier: f64,
    seed: u64,
) -> Result<SynthesisOutput> {
    check_finite("base_alert_rate", base_alert_rate)?;
    check_finite("anomaly_rate_multiplier", anomaly_multiplier)?;
    check_non_negative("base_alert_rate", base_alert_rate)?;
    check_non_negative("anomaly_rate_multiplier", anomaly_multiplier)?;

    let config = SimulationConfig::new(
        num_agents,
        duration_hours,
        base_alert_rate,
        anomaly_multiplier,
        seed,
    );

    log::info!(
        "{} SYNTHESIS_START agents={} hours={} rate={} multiplier={} seed={}",
        ctx,
        num_agents,
        duration_hours,
        base_alert_rate,
        anomaly_multiplier,
        seed
    );

    if num_agents == 0 || duration_hours == 0 {
        log::info!("{} SYNTHESIS_EMPTY reason=zero_population", ctx);
        return Ok(SynthesisOutput {
            sensor_readings: Vec::new(),
            agent_logs: Vec::new(),
            security_metrics: Vec::new(),
            config,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let timeline = build_timeline(duration_hours);

    let sensor_readings = generate_sensor_readings(
        &mut rng,
        &timeline,
        num_agents,
        duration_hours,
        base_alert_rate,
        anomaly_multiplier,
    );

    let agent_logs = generate_agent_logs(
        &mut rng,
        &timeline,
        num_agents,
        duration_hours,
        base_alert_rate,
        anomaly_multiplier,
    );

    let security_metrics =
        derive_security_metrics(&mut rng, &agent_logs, num_agents, duration_hours);

    log::info!(
        "{} SYNTHESIS_COMPLETE sensors={} logs={} metrics={}",
        ctx,
        sensor_readings.len(),
        agent_logs.len(),
        security_metrics.len()
    );

    Ok(SynthesisOutput {
        sensor_readings,
        agent_logs,
        security_metrics,
        config,
    })
}

/// Gaussian readings per (agent, timestep, sensor type), with seeded
/// anomaly injection.
fn generate_sensor_readings(
    rng: &mut ChaCha8Rng,
    timeline: &[chrono::DateTime<chrono::Utc>],
    num_agents: u32,
    duration_hours: u32,
    base_alert_rate: f64,
    anomaly_multiplier: f64,
) -> Vec<SensorReading> {
    let readings_per_hour = 60.0 / step_minutes(duration_hours) as f64;
    let readings_per_hour_total =
        num_agents as f64 * SensorType::ALL.len() as f64 * readings_per_hour;
    let p_anomaly = (base_alert_rate * anomaly_multiplier) / readings_per_hour_total;

    let mut readings =
        Vec::with_capacity(num_agents as usize * timeline.len() * SensorType::ALL.len());

    for agent_id in 1..=num_agents {
        for &ts in timeline {
            for sensor_type in SensorType::ALL {
                let std = sensor_type.noise_std();
                let z: f64 = rng.sample(StandardNormal);
                let mut value = sensor_type.baseline() + std * z;
                let mut status = SensorStatus::Normal;

                if rng.gen::<f64>() < p_anomaly {
                    let magnitude = rng.gen_range(2.0..5.0) * std;
                    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    value += sign * magnitude;
                    status = if rng.gen_bool(0.7) {
                        SensorStatus::Warning
                    } else {
                        SensorStatus::Critical
                    };
                }

                readings.push(SensorReading {
                    timestamp: ts,
                    agent_id,
                    sensor_type,
                    value: round2(value),
                    unit: sensor_type.unit().to_string(),
                    status,
                });
            }
        }
    }

    readings
}

/// Routine and alert log records, uniformly placed on the timeline and
/// sorted by timestamp.
fn generate_agent_logs(
    rng: &mut ChaCha8Rng,
    timeline: &[chrono::DateTime<chrono::Utc>],
    num_agents: u32,
    duration_hours: u32,
    base_alert_rate: f64,
    anomaly_multiplier: f64,
) -> Vec<AgentLogRecord> {
    // Routine volume scales with population; every agent logs at least once.
    let routine_count = (ROUTINE_LOGS_PER_AGENT_HOUR as u64 * num_agents as u64
        * duration_hours as u64)
        .max(num_agents as u64) as usize;

    // Alert volume is governed by the alert rate, independent of sensor data.
    let alert_count = if base_alert_rate > 0.0 {
        ((base_alert_rate * duration_hours as f64 * anomaly_multiplier).floor() as usize).max(1)
    } else {
        0
    };

    let mut logs = Vec::with_capacity(routine_count + alert_count);

    for _ in 0..routine_count {
        let ts = timeline[rng.gen_range(0..timeline.len())];
        let agent_id = rng.gen_range(1..=num_agents);
        let log_type = AgentLogType::NORMAL[rng.gen_range(0..AgentLogType::NORMAL.len())];
        logs.push(AgentLogRecord {
            timestamp: ts,
            agent_id,
            log_type,
            severity: LogSeverity::Info,
            message: log_type.routine_message().to_string(),
        });
    }

    for _ in 0..alert_count {
        let ts = timeline[rng.gen_range(0..timeline.len())];
        let agent_id = rng.gen_range(1..=num_agents);
        let (severity, message) = if rng.gen_bool(0.7) {
            (LogSeverity::Warning, ALERT_WARNING_MESSAGE)
        } else {
            (LogSeverity::Error, ALERT_ERROR_MESSAGE)
        };
        logs.push(AgentLogRecord {
            timestamp: ts,
            agent_id,
            log_type: AgentLogType::AlertGenerated,
            severity,
            message: message.to_string(),
        });
    }

    // Stable sort keeps insertion order within a timestep deterministic.
    logs.sort_by_key(|r| r.timestamp);
    logs
}

/// Per-agent metrics derived from the log table. Not an independent random
/// draw: given the same logs and generator state, the same metrics come out.
fn derive_security_metrics(
    rng: &mut ChaCha8Rng,
    agent_logs: &[AgentLogRecord],
    num_agents: u32,
    duration_hours: u32,
) -> Vec<SecurityMetricRecord> {
    let mut metrics = Vec::with_capacity(num_agents as usize);

    for agent_id in 1..=num_agents {
        let alerts: Vec<&AgentLogRecord> = agent_logs
            .iter()
            .filter(|r| r.agent_id == agent_id && r.log_type == AgentLogType::AlertGenerated)
            .collect();

        let total_alerts = alerts.len() as u32;
        let last_alert_time = alerts.iter().map(|r| r.timestamp).max();

        let deviation_factor =
            total_alerts as f64 / (duration_hours as f64 * num_agents as f64 + 1e-6);
        let noise: f64 = rng.sample::<f64, _>(StandardNormal) * 2.0;
        let integrity = (95.0 - deviation_factor * 10.0 + noise).clamp(0.0, 100.0);

        metrics.push(SecurityMetricRecord {
            agent_id,
            total_alerts_generated: total_alerts,
            average_integrity_score: round2(integrity),
            last_alert_time,
            alert_frequency: total_alerts as f64 / duration_hours as f64,
        });
    }

    metrics
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SimulationError::Type(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(SimulationError::Value(format!(
            "{} cannot be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> LogContext {
        LogContext::new("test-run")
    }

    #[test]
    fn test_determinism_identical_outputs() {
        let a = generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        let b = generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        let b = generate(&ctx(), 5, 2, 5.0, 2.5, 43).unwrap();
        assert_ne!(a.sensor_readings, b.sensor_readings);
    }

    #[test]
    fn test_zero_agents_empty_tables_with_headers() {
        let out = generate(&ctx(), 0, 2, 5.0, 2.5, 42).unwrap();
        assert!(out.sensor_readings.is_empty());
        assert!(out.agent_logs.is_empty());
        assert!(out.security_metrics.is_empty());
        assert_eq!(out.sensor_table().columns(), &SensorReading::COLUMNS);
        assert_eq!(out.log_table().columns(), &AgentLogRecord::COLUMNS);
        assert_eq!(out.metrics_table().columns(), &SecurityMetricRecord::COLUMNS);
        assert_eq!(out.config.num_agents, 0);
    }

    #[test]
    fn test_zero_duration_empty_tables() {
        let out = generate(&ctx(), 3, 0, 5.0, 2.5, 42).unwrap();
        assert!(out.sensor_readings.is_empty());
        assert!(out.security_metrics.is_empty());
    }

    #[test]
    fn test_negative_rate_is_value_error() {
        let err = generate(&ctx(), 3, 2, -1.0, 2.5, 42).unwrap_err();
        assert!(matches!(err, SimulationError::Value(_)));
        let err = generate(&ctx(), 3, 2, 5.0, -0.5, 42).unwrap_err();
        assert!(matches!(err, SimulationError::Value(_)));
    }

    #[test]
    fn test_non_finite_rate_is_type_error() {
        let err = generate(&ctx(), 3, 2, f64::NAN, 2.5, 42).unwrap_err();
        assert!(matches!(err, SimulationError::Type(_)));
        let err = generate(&ctx(), 3, 2, 5.0, f64::INFINITY, 42).unwrap_err();
        assert!(matches!(err, SimulationError::Type(_)));
    }

    #[test]
    fn test_sensor_reading_cardinality() {
        let out = generate(&ctx(), 4, 2, 5.0, 2.5, 42).unwrap();
        // 4 agents x 13 timesteps x 3 sensor types
        assert_eq!(out.sensor_readings.len(), 4 * 13 * 3);
    }

    #[test]
    fn test_agent_ids_contiguous_in_metrics() {
        let out = generate(&ctx(), 6, 1, 5.0, 2.5, 7).unwrap();
        let ids: Vec<u32> = out.security_metrics.iter().map(|m| m.agent_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_metrics_derived_from_log_counts() {
        let out = generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        for metric in &out.security_metrics {
            let counted = out
                .agent_logs
                .iter()
                .filter(|r| {
                    r.agent_id == metric.agent_id && r.log_type == AgentLogType::AlertGenerated
                })
                .count() as u32;
            assert_eq!(metric.total_alerts_generated, counted);
            assert!((metric.alert_frequency - counted as f64 / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_last_alert_time_matches_logs() {
        let out = generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        for metric in &out.security_metrics {
            let expected = out
                .agent_logs
                .iter()
                .filter(|r| {
                    r.agent_id == metric.agent_id && r.log_type == AgentLogType::AlertGenerated
                })
                .map(|r| r.timestamp)
                .max();
            assert_eq!(metric.last_alert_time, expected);
        }
    }

    #[test]
    fn test_zero_alert_rate_produces_no_alert_logs() {
        let out = generate(&ctx(), 5, 2, 0.0, 2.5, 42).unwrap();
        assert!(out
            .agent_logs
            .iter()
            .all(|r| r.log_type != AgentLogType::AlertGenerated));
        assert!(out.security_metrics.iter().all(|m| m.total_alerts_generated == 0));
    }

    #[test]
    fn test_logs_sorted_by_timestamp() {
        let out = generate(&ctx(), 5, 2, 5.0, 2.5, 42).unwrap();
        assert!(out
            .agent_logs
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_routine_log_volume_floor() {
        // Low rate, one hour: still at least one routine log per agent.
        let out = generate(&ctx(), 8, 1, 0.0, 0.0, 42).unwrap();
        assert!(out.agent_logs.len() >= 8);
    }

    proptest! {
        #[test]
        fn prop_determinism(
            agents in 0u32..6,
            hours in 0u32..4,
            rate in 0.0f64..10.0,
            mult in 0.0f64..3.0,
            seed in 0u64..1000,
        ) {
            let a = generate(&ctx(), agents, hours, rate, mult, seed).unwrap();
            let b = generate(&ctx(), agents, hours, rate, mult, seed).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_integrity_in_canonical_range(
            agents in 1u32..6,
            hours in 1u32..4,
            rate in 0.0f64..20.0,
            seed in 0u64..1000,
        ) {
            let out = generate(&ctx(), agents, hours, rate, 2.0, seed).unwrap();
            for metric in &out.security_metrics {
                prop_assert!((0.0..=100.0).contains(&metric.average_integrity_score));
            }
        }
    }
}
