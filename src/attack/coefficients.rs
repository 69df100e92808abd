//! Attack types and their perturbation coefficients.
//!
//! Each attack type carries one coefficient triple: alert amplification `C`,
//! integrity decay `K`, and detection difficulty `D` (minutes). One global
//! baseline latency applies to every type. These are labeling heuristics for
//! the simulation, not measured properties of real attacks.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Baseline detection latency in simulated minutes, shared by all types.
pub const BASE_DETECTION_LATENCY_MINS: f64 = 5.0;

/// The four modeled attack classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    #[serde(rename = "Prompt Injection")]
    PromptInjection,
    #[serde(rename = "Data Poisoning")]
    DataPoisoning,
    #[serde(rename = "Synthetic Identity")]
    SyntheticIdentity,
    #[serde(rename = "Untraceable Data Leakage")]
    UntraceableDataLeakage,
}

/// Coefficient triple for one attack type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttackCoefficients {
    /// `C` - system-wide alert frequency amplification.
    pub alert_amplification: f64,
    /// `K` - per-compromised-agent integrity decay.
    pub integrity_decay: f64,
    /// `D` - detection difficulty, in minutes of added latency.
    pub detection_difficulty_mins: f64,
}

lazy_static! {
    static ref COEFFICIENTS: HashMap<AttackType, AttackCoefficients> = {
        let mut m = HashMap::new();
        m.insert(
            AttackType::PromptInjection,
            AttackCoefficients {
                alert_amplification: 0.5,
                integrity_decay: 0.4,
                detection_difficulty_mins: 20.0,
            },
        );
        m.insert(
            AttackType::DataPoisoning,
            AttackCoefficients {
                alert_amplification: 0.8,
                integrity_decay: 0.7,
                detection_difficulty_mins: 60.0,
            },
        );
        m.insert(
            AttackType::SyntheticIdentity,
            AttackCoefficients {
                alert_amplification: 0.6,
                integrity_decay: 0.8,
                detection_difficulty_mins: 45.0,
            },
        );
        m.insert(
            AttackType::UntraceableDataLeakage,
            AttackCoefficients {
                alert_amplification: 0.7,
                integrity_decay: 0.5,
                detection_difficulty_mins: 30.0,
            },
        );
        m
    };
}

impl AttackType {
    pub const ALL: [AttackType; 4] = [
        AttackType::PromptInjection,
        AttackType::DataPoisoning,
        AttackType::SyntheticIdentity,
        AttackType::UntraceableDataLeakage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackType::PromptInjection => "Prompt Injection",
            AttackType::DataPoisoning => "Data Poisoning",
            AttackType::SyntheticIdentity => "Synthetic Identity",
            AttackType::UntraceableDataLeakage => "Untraceable Data Leakage",
        }
    }

    pub fn coefficients(&self) -> AttackCoefficients {
        // The table is keyed by every variant; a miss is unreachable.
        COEFFICIENTS[self]
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttackType {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttackType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = AttackType::ALL.iter().map(|t| t.as_str()).collect();
                SimulationError::Value(format!(
                    "unknown attack type '{}': must be one of {:?}",
                    s, known
                ))
            })
    }
}
