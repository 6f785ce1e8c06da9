//! Error types for wabastat
//!
//! This module defines the error types used throughout the wabastat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Note that malformed counter cells are never errors: they coerce to zero
//! (see [`crate::types::coerce_int`]). Only whole-file failures surface here.
//!
//! # Example
//!
//! ```
//! use wabastat_core::error::{WabastatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to WabastatError
//!     let _file = std::fs::read_to_string("nonexistent.xlsx")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for wabastat operations
#[derive(Error, Debug)]
pub enum WabastatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be decoded into rows
    #[error("Failed to decode {source_name}: {message}")]
    Decode {
        /// Name of the file or buffer being decoded
        source_name: String,
        /// Decoder message
        message: String,
    },

    /// The workbook has no worksheet or the first worksheet has no header row
    #[error("Workbook {0} has no data in its first worksheet")]
    EmptyWorkbook(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File watching failed
    #[error("Watch error: {0}")]
    Watch(String),
}

impl WabastatError {
    /// Build a decode error for the named source
    pub fn decode(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error belongs to the "could not read the file" class
    ///
    /// These errors degrade to an empty row set instead of aborting.
    pub fn is_ingest_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Decode { .. } | Self::EmptyWorkbook(_)
        )
    }
}

/// Convenience type alias for Results in wabastat
pub type Result<T> = std::result::Result<T, WabastatError>;
