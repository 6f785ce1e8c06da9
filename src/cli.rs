//! CLI interface for wabastat
//!
//! This module defines the command-line interface using clap.
//!
//! When the subcommand is omitted, a bare file argument runs the full
//! report. This means `wabastat stats.xlsx` is equivalent to
//! `wabastat report stats.xlsx`.
//!
//! # Example
//!
//! ```bash
//! # Full dashboard: row table, Sum footer, country chart, as-of caption
//! wabastat report stats.xlsx
//!
//! # Totals for one country as JSON
//! wabastat totals stats.xlsx --country IN --json
//!
//! # Re-render whenever the file is replaced
//! wabastat report stats.xlsx --watch
//! ```

use crate::error::{Result, WabastatError};
use crate::filters::RowFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wabastat_terminal::{DisplayOptions, detect_chart_width};

/// Summarize WhatsApp Business messaging-delivery spreadsheets
#[derive(Parser, Debug, Clone)]
#[command(name = "wabastat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Only include rows for this country ("Unknown" selects rows without one)
    #[arg(long, short = 'c', global = true)]
    pub country: Option<String>,

    /// Only include rows for this account id
    #[arg(long, short = 'a', global = true)]
    pub account: Option<String>,

    /// Input file for the default report
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Row filter built from the global filter flags
    pub fn row_filter(&self) -> RowFilter {
        let mut filter = RowFilter::new();
        if let Some(country) = &self.country {
            filter = filter.with_country(country.clone());
        }
        if let Some(account) = &self.account {
            filter = filter.with_account(account.clone());
        }
        filter
    }
}

/// Input file argument shared by every report
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Spreadsheet (.xlsx, .xls, .xlsb, .ods) or JSON row file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the full report
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Hide the per-row table (the Sum footer is still shown)
    #[arg(long)]
    pub no_rows: bool,

    /// Hide the country bar chart
    #[arg(long)]
    pub no_chart: bool,

    /// Re-render whenever the file changes
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Chart width in columns (defaults to the terminal width)
    #[arg(long, env = "WABASTAT_CHART_WIDTH")]
    pub chart_width: Option<usize>,
}

impl ReportArgs {
    /// Report arguments with every option at its default
    pub fn for_file(file: PathBuf) -> Self {
        Self {
            input: InputArgs { file },
            no_rows: false,
            no_chart: false,
            watch: false,
            chart_width: None,
        }
    }

    /// Display options for this report
    pub fn display_options(&self, color: bool) -> DisplayOptions {
        DisplayOptions {
            show_rows: !self.no_rows,
            show_chart: !self.no_chart,
            color,
            chart_width: self.chart_width.unwrap_or_else(detect_chart_width),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show rows, totals, the per-country chart and the as-of date
    Report(ReportArgs),
    /// Show column totals only
    Totals(InputArgs),
    /// Show delivered/failed per country only
    Countries(InputArgs),
}

impl Command {
    /// The input file this command reads
    pub fn file(&self) -> &PathBuf {
        match self {
            Command::Report(args) => &args.input.file,
            Command::Totals(args) | Command::Countries(args) => &args.file,
        }
    }
}

/// Resolve the command to run, treating a bare file as `report <FILE>`
pub fn resolve_command(cli: &Cli) -> Result<Command> {
    match (&cli.command, &cli.file) {
        (Some(command), _) => Ok(command.clone()),
        (None, Some(file)) => Ok(Command::Report(ReportArgs::for_file(file.clone()))),
        (None, None) => Err(WabastatError::InvalidArgument(
            "no input file given; usage: wabastat [report|totals|countries] <FILE>".to_string(),
        )),
    }
}
