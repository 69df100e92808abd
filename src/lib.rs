//! SentinelLab Core - attack-impact simulation engine
//!
//! This crate is the computational core of SentinelLab, an educational
//! sandbox that models how classes of attacks against an agentic AI
//! monitoring platform degrade observable security metrics. The
//! implementation prioritizes:
//!
//! 1. **Determinism** - identical inputs yield bit-identical tables
//! 2. **Validation** - no stage consumes data that failed the gate
//! 3. **Logging** - every decision point logged with run context
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `synthesis` - deterministic baseline telemetry generation
//! - `validation` - structural table validation (the gate)
//! - `attack` - parameterized vulnerability impact simulation
//! - `table` - in-memory tabular structures and summaries
//! - `model` - record types and the simulation configuration
//! - `cache` - caller-owned TTL memoization of synthesis runs
//! - `logging` - structured logging with run context
//!
//! Control flow: synthesizer -> validator (gate) -> impact simulator ->
//! presentation adapters (external; they only receive tables).

pub mod attack;
pub mod cache;
pub mod error;
pub mod logging;
pub mod model;
pub mod synthesis;
pub mod table;
pub mod validation;

pub use attack::{AttackCoefficients, AttackEvent, AttackType, BASE_DETECTION_LATENCY_MINS};
pub use cache::{SynthesisCache, SynthesisKey, DEFAULT_CACHE_TTL_SECS};
pub use error::{Result, SimulationError};
pub use model::{
    AgentLogRecord, AgentLogType, LogSeverity, SecurityMetricRecord, SensorReading, SensorStatus,
    SensorType, SimulationConfig,
};
pub use synthesis::SynthesisOutput;
pub use table::{CellValue, DType, DataTable, TableSummary};
pub use validation::TableExpectations;

use logging::structured::LogContext;

/// Initialize the module-level logger.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}

/// Generate a synthetic baseline dataset.
///
/// Returns sensor readings, agent logs, and per-agent security metrics,
/// plus the config echoed back for downstream reproducibility. Each call
/// gets its own run id for log correlation.
pub fn generate_synthetic_safety_data(
    num_agents: u32,
    duration_hours: u32,
    base_alert_rate: f64,
    anomaly_multiplier: f64,
    seed: u64,
) -> Result<SynthesisOutput> {
    let ctx = LogContext::new_run();
    synthesis::generate(
        &ctx,
        num_agents,
        duration_hours,
        base_alert_rate,
        anomaly_multiplier,
        seed,
    )
}

/// Validate a table's structure and summarize its numeric columns.
///
/// This is the gate between synthesis and attack analysis: callers must
/// treat any error as fatal to the current run. See
/// [`validation::validate_and_summarize`] for the check order.
pub fn validate_and_summarize(
    table: &DataTable,
    name: &str,
    expected_columns: &[&str],
    expected_dtypes: &[(&str, DType)],
    critical_fields_no_null: &[&str],
    unique_key: &[&str],
) -> Result<TableSummary> {
    let ctx = LogContext::new_run();
    validation::validate_and_summarize(
        table,
        name,
        expected_columns,
        expected_dtypes,
        critical_fields_no_null,
        unique_key,
        &ctx,
    )
}

/// Apply an attack model to baseline metrics.
///
/// Returns the perturbed metrics and zero or one attack events. Pure
/// function of its inputs aside from the seeded compromised-agent draw.
pub fn simulate_vulnerability_impact(
    baseline: &[SecurityMetricRecord],
    attack_type: AttackType,
    intensity: f64,
    num_compromised: usize,
    config: &SimulationConfig,
) -> Result<(Vec<SecurityMetricRecord>, Vec<AttackEvent>)> {
    let ctx = LogContext::new_run();
    attack::simulate_vulnerability_impact(
        &ctx,
        baseline,
        attack_type,
        intensity,
        num_compromised,
        config,
    )
}
