//! Crate error taxonomy.
//!
//! Three kinds of failure, mirroring the simulation's input contract:
//! - `Type` - a value of the wrong kind (non-finite float, malformed row)
//! - `Value` - a value out of range or an unknown enum member
//! - `Validation` - a structural check failed at the validation gate
//!
//! All failures are immediate and synchronous; no operation retries or
//! partially applies.

use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Wrong kind of value (e.g. NaN where a finite number is required).
    #[error("type error: {0}")]
    Type(String),

    /// Out-of-range value, unknown enum member, or count over population.
    #[error("value error: {0}")]
    Value(String),

    /// Structural validation failure for a named table.
    #[error("[{table}] validation failed: {reason}")]
    Validation { table: String, reason: String },
}

impl SimulationError {
    pub fn validation(table: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_table() {
        let err = SimulationError::validation("sensor_data", "missing columns: unit");
        assert_eq!(
            err.to_string(),
            "[sensor_data] validation failed: missing columns: unit"
        );
    }
}
