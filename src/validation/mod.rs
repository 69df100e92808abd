//! Structural validation module.
//!
//! The gate between synthesis and attack simulation:
//! - column presence, element types, and nullability checks
//! - unique key enforcement
//! - descriptive statistics on success
//!
//! Downstream impact simulation must never run over a table that failed
//! validation; callers treat any error from here as fatal to the run.

pub mod schema;

pub use schema::*;
