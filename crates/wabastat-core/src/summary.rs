//! Aggregated summary types for wabastat
//!
//! Pure data structures produced by [`crate::aggregation`]. None of them hold
//! incremental state: they are rebuilt from the full row set every time.

use crate::aggregation::{compute_country_breakdown, compute_totals, extract_as_of_date};
use crate::types::{CounterField, Row};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::ops::Index;

/// Column-wise sums of the eight counter fields
///
/// Always carries every counter; an empty input yields zeros, not missing
/// keys.
///
/// # Examples
/// ```
/// use wabastat_core::summary::TotalsSummary;
/// use wabastat_core::types::CounterField;
///
/// let mut totals = TotalsSummary::default();
/// totals.add_count(CounterField::Delivered, 5);
/// totals.add_count(CounterField::Delivered, 3);
/// assert_eq!(totals[CounterField::Delivered], 8);
/// assert_eq!(totals.get(CounterField::Failed), 0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TotalsSummary {
    counts: [u64; CounterField::COUNT],
}

impl TotalsSummary {
    /// Sum for one counter
    pub fn get(&self, field: CounterField) -> u64 {
        self.counts[field.index()]
    }

    /// Add to one counter, saturating at `u64::MAX`
    pub fn add_count(&mut self, field: CounterField, amount: u64) {
        let slot = &mut self.counts[field.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Add every counter of a row
    pub fn add_row(&mut self, row: &Row) {
        for field in CounterField::ALL {
            self.add_count(field, row.counter_value(field));
        }
    }

    /// `(field, sum)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (CounterField, u64)> + '_ {
        CounterField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl Index<CounterField> for TotalsSummary {
    type Output = u64;

    fn index(&self, field: CounterField) -> &u64 {
        &self.counts[field.index()]
    }
}

impl Serialize for TotalsSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CounterField::COUNT))?;
        for (field, amount) in self.iter() {
            map.serialize_entry(field.key(), &amount)?;
        }
        map.end()
    }
}

/// Delivered and failed totals for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySummary {
    /// Country name, or `"Unknown"`
    pub country: String,
    /// Cumulative delivered count
    pub delivered: u64,
    /// Cumulative failed count
    pub failed: u64,
}

impl CountrySummary {
    /// Create an empty summary for a country
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            delivered: 0,
            failed: 0,
        }
    }
}

/// The current dataset and everything derived from it
///
/// A new upload replaces the whole value; nothing is updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    /// Rows in ingestion order
    pub rows: Vec<Row>,
    /// Column totals
    pub totals: TotalsSummary,
    /// Per-country breakdown in first-seen order
    pub countries: Vec<CountrySummary>,
    /// Snapshot date from the first row
    pub as_of_date: Option<String>,
}

impl Dashboard {
    /// Derive every summary from a row set
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let totals = compute_totals(&rows);
        let countries = compute_country_breakdown(&rows);
        let as_of_date = extract_as_of_date(&rows);
        Self {
            rows,
            totals,
            countries,
            as_of_date,
        }
    }

    /// The zero-row dashboard
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
