//! Output formatting module for wabastat
//!
//! This module provides formatters for displaying a [`Dashboard`] in
//! different formats:
//! - Table format: a row table with a `Sum` footer, the per-country bar chart
//!   and the as-of caption
//! - JSON format for machine-readable output
//!
//! # Examples
//!
//! ```
//! use wabastat_core::summary::Dashboard;
//! use wabastat_core::types::{CounterField, Field, Row};
//! use wabastat_terminal::output::{DisplayOptions, get_formatter};
//!
//! let dashboard = Dashboard::from_rows(vec![
//!     Row::new()
//!         .with(Field::Country, "US")
//!         .with(Field::Counter(CounterField::Delivered), "5"),
//! ]);
//!
//! let table = get_formatter(false, DisplayOptions::plain());
//! assert!(table.format_dashboard(&dashboard).contains("Sum"));
//!
//! let json = get_formatter(true, DisplayOptions::plain());
//! assert!(json.format_dashboard(&dashboard).contains("\"countries\""));
//! ```

use crate::chart::{BarChart, detect_chart_width};
use prettytable::{Cell, Row as TableRow, Table, format};
use serde::Serialize;
use tracing::error;
use wabastat_core::summary::{CountrySummary, Dashboard, TotalsSummary};
use wabastat_core::types::{CounterField, Field, Row};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the full dashboard: rows, totals, country breakdown, as-of date
    fn format_dashboard(&self, dashboard: &Dashboard) -> String;

    /// Format column totals only
    fn format_totals(&self, totals: &TotalsSummary) -> String;

    /// Format the per-country breakdown only
    fn format_countries(&self, countries: &[CountrySummary]) -> String;
}

/// Which dashboard sections to render and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Show the per-row table (the `Sum` footer is always shown)
    pub show_rows: bool,
    /// Show the country bar chart
    pub show_chart: bool,
    /// Colorize chart bars
    pub color: bool,
    /// Chart width in columns
    pub chart_width: usize,
}

impl DisplayOptions {
    /// Everything shown, no color, fixed width; stable output for tests and pipes
    pub fn plain() -> Self {
        Self {
            show_rows: true,
            show_chart: true,
            color: false,
            chart_width: 80,
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_rows: true,
            show_chart: true,
            color: true,
            chart_width: detect_chart_width(),
        }
    }
}

/// Format a count with thousands separators, e.g. `1,234,567`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Table formatter for human-readable output
///
/// Row cells show the raw values as they appeared in the sheet; totals are
/// formatted with thousands separators.
pub struct TableFormatter {
    options: DisplayOptions,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    fn titles() -> TableRow {
        let mut cells = vec![
            Cell::new("Account ID").style_spec("b"),
            Cell::new("WABA Number").style_spec("b"),
        ];
        cells.extend(
            CounterField::ALL
                .iter()
                .map(|field| Cell::new(field.label()).style_spec("b")),
        );
        TableRow::new(cells)
    }

    fn data_row(row: &Row) -> TableRow {
        let mut cells = vec![
            Cell::new(&row.display(Field::AccountId)),
            Cell::new(&row.display(Field::WabaNumber)),
        ];
        cells.extend(
            CounterField::ALL
                .iter()
                .map(|field| Cell::new(&row.display(Field::Counter(*field))).style_spec("r")),
        );
        TableRow::new(cells)
    }

    /// Create the `Sum` footer row
    fn totals_row(totals: &TotalsSummary) -> TableRow {
        let mut cells = vec![Cell::new("Sum").style_spec("b"), Cell::new("")];
        cells.extend(
            totals
                .iter()
                .map(|(_, amount)| Cell::new(&format_number(amount)).style_spec("br")),
        );
        TableRow::new(cells)
    }

    fn rows_table(&self, dashboard: &Dashboard) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(Self::titles());

        if self.options.show_rows {
            for row in &dashboard.rows {
                table.add_row(Self::data_row(row));
            }
            // Add separator
            table.add_row(TableRow::new(vec![Cell::new(""); CounterField::COUNT + 2]));
        }

        table.add_row(Self::totals_row(&dashboard.totals));
        table.to_string()
    }

    fn chart(&self, countries: &[CountrySummary]) -> String {
        let chart = BarChart::new(self.options.chart_width, self.options.color);
        format!(
            "\nDelivery Overview by Country\n\n{}",
            chart.render(countries)
        )
    }

    fn caption(&self, as_of_date: &str) -> String {
        let caption = format!("As of : {as_of_date}");
        format!("{caption:>width$}\n", width = self.options.chart_width)
    }
}

impl OutputFormatter for TableFormatter {
    fn format_dashboard(&self, dashboard: &Dashboard) -> String {
        if dashboard.is_empty() {
            return "No data found.\n".to_string();
        }

        let mut output = self.rows_table(dashboard);

        if self.options.show_chart {
            output.push_str(&self.chart(&dashboard.countries));
        }

        if let Some(as_of_date) = &dashboard.as_of_date {
            output.push('\n');
            output.push_str(&self.caption(as_of_date));
        }

        output
    }

    fn format_totals(&self, totals: &TotalsSummary) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(TableRow::new(vec![
            Cell::new("Counter").style_spec("b"),
            Cell::new("Total").style_spec("b"),
        ]));

        for (field, amount) in totals.iter() {
            table.add_row(TableRow::new(vec![
                Cell::new(field.label()),
                Cell::new(&format_number(amount)).style_spec("r"),
            ]));
        }

        table.to_string()
    }

    fn format_countries(&self, countries: &[CountrySummary]) -> String {
        if countries.is_empty() {
            return "No data found.\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(TableRow::new(vec![
            Cell::new("Country").style_spec("b"),
            Cell::new("Delivered").style_spec("b"),
            Cell::new("Failed").style_spec("b"),
        ]));

        for summary in countries {
            table.add_row(TableRow::new(vec![
                Cell::new(&summary.country),
                Cell::new(&format_number(summary.delivered)).style_spec("r"),
                Cell::new(&format_number(summary.failed)).style_spec("r"),
            ]));
        }

        let mut output = table.to_string();
        if self.options.show_chart {
            output.push_str(&self.chart(countries));
        }
        output
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            error!("Failed to serialize output: {}", e);
            "{}".to_string()
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_dashboard(&self, dashboard: &Dashboard) -> String {
        Self::to_pretty(dashboard)
    }

    fn format_totals(&self, totals: &TotalsSummary) -> String {
        Self::to_pretty(totals)
    }

    fn format_countries(&self, countries: &[CountrySummary]) -> String {
        Self::to_pretty(countries)
    }
}

/// Get the formatter for the requested output mode
pub fn get_formatter(json: bool, options: DisplayOptions) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(options))
    }
}
