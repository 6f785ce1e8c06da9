//! Terminal output formatting for wabastat
//!
//! This crate provides the table and JSON output formatters and the
//! per-country bar chart.

pub mod chart;
pub mod output;

pub use chart::{BarChart, detect_chart_width};
pub use output::{
    DisplayOptions, JsonFormatter, OutputFormatter, TableFormatter, format_number, get_formatter,
};
