//! Data model module.
//!
//! Record types emitted by the synthesizer and the immutable simulation
//! configuration threaded through every stage.

pub mod config;
pub mod records;

pub use config::*;
pub use records::*;
