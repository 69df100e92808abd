//! Simulation configuration.
//!
//! Immutable generation parameters. The config is returned alongside the
//! synthesized tables and passed back into the impact simulator so that
//! compromised-agent selection reuses the same seed.

use serde::{Deserialize, Serialize};

/// Parameters of one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_agents: u32,
    pub simulation_duration_hours: u32,
    pub base_alert_rate: f64,
    pub anomaly_rate_multiplier: f64,
    pub random_seed: u64,
}

impl SimulationConfig {
    pub fn new(
        num_agents: u32,
        simulation_duration_hours: u32,
        base_alert_rate: f64,
        anomaly_rate_multiplier: f64,
        random_seed: u64,
    ) -> Self {
        Self {
            num_agents,
            simulation_duration_hours,
            base_alert_rate,
            anomaly_rate_multiplier,
            random_seed,
        }
    }
}
