//! Core types, aggregation, and utilities for wabastat
//!
//! This crate provides the row model, the pure aggregation functions,
//! filtering, error handling, and the [`source::RowSource`] trait used by
//! every other wabastat crate.

pub mod aggregation;
pub mod error;
pub mod filters;
pub mod source;
pub mod summary;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, WabastatError};
pub use summary::{CountrySummary, Dashboard, TotalsSummary};
pub use types::{CellValue, CounterField, Field, Row};
