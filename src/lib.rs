//! wabastat - Summarize WhatsApp Business messaging-delivery spreadsheets
//!
//! This library provides functionality to:
//! - Decode the first worksheet of an uploaded spreadsheet into rows
//! - Sum the eight delivery counters across all rows
//! - Break delivered/failed counts down by country
//! - Render the result as a terminal table and bar chart, or as JSON
//! - Re-render when the input file is replaced
//!
//! # Examples
//!
//! ```no_run
//! use wabastat::{filters::RowFilter, ingest::open_source, report::build_dashboard};
//! use wabastat::output::{DisplayOptions, get_formatter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = open_source("stats.xlsx");
//!     let dashboard = build_dashboard(source.as_ref(), &RowFilter::new()).await;
//!
//!     let formatter = get_formatter(false, DisplayOptions::default());
//!     println!("{}", formatter.format_dashboard(&dashboard));
//! }
//! ```

pub mod cli;
pub mod live_monitor;
pub mod report;

// Re-export the workspace crates under one roof
pub use wabastat_core::{aggregation, error, filters, source, summary, types};
pub use wabastat_ingest as ingest;
pub use wabastat_terminal::output;

pub use error::{Result, WabastatError};
pub use summary::{CountrySummary, Dashboard, TotalsSummary};
pub use types::{CellValue, CounterField, Field, Row};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
