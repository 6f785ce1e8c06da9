//! Aggregation over an in-memory row set
//!
//! All three operations are pure functions of their input: they hold no
//! state between calls and always recompute from the full slice. Row order
//! only affects the order of the country breakdown, never the sums.
//!
//! # Examples
//!
//! ```
//! use wabastat_core::aggregation::{
//!     compute_country_breakdown, compute_totals, extract_as_of_date,
//! };
//! use wabastat_core::types::{CounterField, Field, Row};
//!
//! let rows = vec![
//!     Row::new()
//!         .with(Field::Country, "US")
//!         .with(Field::Counter(CounterField::Delivered), "5")
//!         .with(Field::Counter(CounterField::Failed), "1"),
//!     Row::new()
//!         .with(Field::Country, "")
//!         .with(Field::Counter(CounterField::Delivered), "2"),
//! ];
//!
//! let totals = compute_totals(&rows);
//! assert_eq!(totals[CounterField::Delivered], 7);
//!
//! let countries = compute_country_breakdown(&rows);
//! assert_eq!(countries[0].country, "US");
//! assert_eq!(countries[1].country, "Unknown");
//!
//! assert_eq!(extract_as_of_date(&rows), None);
//! ```

use crate::summary::{CountrySummary, TotalsSummary};
use crate::types::{CounterField, Row};
use std::collections::HashMap;

/// Sum each counter field across all rows
///
/// Missing or non-numeric cells contribute zero. An empty slice yields a
/// summary with every counter at zero.
pub fn compute_totals(rows: &[Row]) -> TotalsSummary {
    let mut totals = TotalsSummary::default();
    for row in rows {
        totals.add_row(row);
    }
    totals
}

/// Delivered and failed sums per country, in first-seen order
///
/// Rows without a country (or with an empty one) are grouped under
/// `"Unknown"`. Each row lands in exactly one entry.
pub fn compute_country_breakdown(rows: &[Row]) -> Vec<CountrySummary> {
    let mut summaries: Vec<CountrySummary> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let country = row.normalized_country();
        let position = match positions.get(&country) {
            Some(&position) => position,
            None => {
                summaries.push(CountrySummary::new(country.clone()));
                positions.insert(country, summaries.len() - 1);
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[position];
        summary.delivered = summary
            .delivered
            .saturating_add(row.counter_value(CounterField::Delivered));
        summary.failed = summary
            .failed
            .saturating_add(row.counter_value(CounterField::Failed));
    }

    summaries
}

/// The `as_of_date` of the first row, if present and non-empty
///
/// Later rows are not consulted even when their dates differ.
pub fn extract_as_of_date(rows: &[Row]) -> Option<String> {
    rows.first()
        .and_then(|row| row.as_of_date.as_ref())
        .filter(|value| value.is_truthy())
        .map(ToString::to_string)
}
