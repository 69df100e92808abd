//! Tabular data module.
//!
//! In-memory tables handed across the core's boundaries:
//! - `DataTable` - ordered columns plus dynamically typed rows
//! - `CellValue` / `DType` - cell values and their element types
//! - `TableSummary` - descriptive statistics over numeric columns

pub mod frame;
pub mod summary;

pub use frame::*;
pub use summary::*;
