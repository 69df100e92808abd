//! Vulnerability impact simulation module.
//!
//! Applies parameterized attack models to baseline security metrics:
//! - attack-type coefficient table (alert amplification, integrity decay,
//!   detection difficulty)
//! - the impact simulator itself, a pure function of its inputs

pub mod coefficients;
pub mod impact;

pub use coefficients::*;
pub use impact::*;
