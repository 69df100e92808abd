//! Vulnerability impact simulation.
//!
//! Pure function of its inputs: baseline metrics in, perturbed metrics plus
//! at most one attack event out. Alert amplification is a system-wide
//! symptom applied to every agent's alert frequency; integrity decay is
//! local to the sampled compromised agents. All input validation happens
//! before any mutation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::attack::coefficients::{AttackType, BASE_DETECTION_LATENCY_MINS};
use crate::error::{Result, SimulationError};
use crate::logging::structured::LogContext;
use crate::model::config::SimulationConfig;
use crate::model::records::SecurityMetricRecord;
use crate::synthesis::timeline::simulation_origin;
use crate::table::{CellValue, DataTable};

/// Record of one simulated attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub timestamp: DateTime<Utc>,
    pub attack_type: AttackType,
    pub attack_intensity: f64,
    pub num_compromised_agents: u32,
    /// intensity x compromised count; a plotting label, not a risk measure.
    pub attack_severity: f64,
    /// Simulated minutes between attack and notional detection.
    pub detection_latency: f64,
}

impl AttackEvent {
    pub const COLUMNS: [&'static str; 6] = [
        "timestamp",
        "attack_type",
        "attack_intensity",
        "num_compromised_agents",
        "attack_severity",
        "detection_latency",
    ];

    pub fn table(rows: &[AttackEvent]) -> DataTable {
        let mut table = DataTable::new(&Self::COLUMNS);
        for r in rows {
            let _ = table.push_row(vec![
                CellValue::Timestamp(r.timestamp),
                CellValue::Str(r.attack_type.as_str().to_string()),
                CellValue::Float(r.attack_intensity),
                CellValue::Int(r.num_compromised_agents as i64),
                CellValue::Float(r.attack_severity),
                CellValue::Float(r.detection_latency),
            ]);
        }
        table
    }
}

/// Apply an attack model to baseline metrics.
///
/// Output preserves the cardinality and ordering of the input rows; only
/// `alert_frequency` and `average_integrity_score` are mutated. With
/// `intensity == 0` and `num_compromised == 0` the call is an exact
/// identity and emits zero events.
pub fn simulate_vulnerability_impact(
    ctx: &LogContext,
    baseline: &[SecurityMetricRecord],
    attack_type: AttackType,
    intensity: f64,
    num_compromised: usize,
    config: &SimulationConfig,
) -> Result<(Vec<SecurityMetricRecord>, Vec<AttackEvent>)> {
    if !intensity.is_finite() {
        return Err(SimulationError::Type(format!(
            "attack_intensity must be a finite number, got {}",
            intensity
        )));
    }
    if !(0.0..=1.0).contains(&intensity) {
        return Err(SimulationError::Value(format!(
            "attack_intensity ({}) must be between 0 and 1",
            intensity
        )));
    }

    // Distinct ids in first-seen order; the baseline invariant is one row
    // per agent, but sampling must not depend on it.
    let mut seen = HashSet::new();
    let agent_ids: Vec<u32> = baseline
        .iter()
        .map(|m| m.agent_id)
        .filter(|id| seen.insert(*id))
        .collect();
    let total_agents = agent_ids.len();

    if num_compromised > total_agents {
        return Err(SimulationError::Value(format!(
            "num_compromised_agents ({}) must be between 0 and the total number of agents ({})",
            num_compromised, total_agents
        )));
    }

    let compromised = sample_compromised(&agent_ids, num_compromised, config.random_seed);

    let coeffs = attack_type.coefficients();
    let alert_factor = 1.0 + intensity * coeffs.alert_amplification;
    let integrity_factor = 1.0 - intensity * coeffs.integrity_decay;

    let mut attacked = baseline.to_vec();
    if intensity > 0.0 {
        for metric in &mut attacked {
            metric.alert_frequency *= alert_factor;
        }
    }
    for metric in &mut attacked {
        if compromised.contains(&metric.agent_id) {
            metric.average_integrity_score *= integrity_factor;
        }
    }

    let events = if intensity > 0.0 || num_compromised > 0 {
        let event = AttackEvent {
            timestamp: simulation_origin(),
            attack_type,
            attack_intensity: intensity,
            num_compromised_agents: num_compromised as u32,
            attack_severity: intensity * num_compromised as f64,
            detection_latency: BASE_DETECTION_LATENCY_MINS
                + intensity * coeffs.detection_difficulty_mins,
        };
        log::info!(
            "{} ATTACK_APPLIED type={} intensity={} compromised={} latency={}",
            ctx,
            attack_type,
            intensity,
            num_compromised,
            event.detection_latency
        );
        vec![event]
    } else {
        log::debug!("{} ATTACK_NOOP type={}", ctx, attack_type);
        Vec::new()
    };

    Ok((attacked, events))
}

/// Uniform without-replacement sample of compromised agent ids, seeded from
/// the run config so repeated calls pick the same agents.
fn sample_compromised(agent_ids: &[u32], num_compromised: usize, seed: u64) -> HashSet<u32> {
    if num_compromised == 0 {
        return HashSet::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, agent_ids.len(), num_compromised)
        .into_iter()
        .map(|i| agent_ids[i])
        .collect()
}
