//! Row filtering
//!
//! Filters are applied before aggregation, so totals and the country
//! breakdown always describe exactly the rows that are displayed.
//!
//! # Examples
//!
//! ```
//! use wabastat_core::filters::RowFilter;
//! use wabastat_core::types::{Field, Row};
//!
//! let rows = vec![
//!     Row::new().with(Field::Country, "US"),
//!     Row::new().with(Field::Country, "DE"),
//!     Row::new(),
//! ];
//!
//! let filter = RowFilter::new().with_country("us".to_string());
//! assert_eq!(filter.apply(rows.clone()).len(), 1);
//!
//! let filter = RowFilter::new().with_country("Unknown".to_string());
//! assert_eq!(filter.apply(rows).len(), 1);
//! ```

use crate::types::{Field, Row};

/// Filter configuration for rows
///
/// All constraints are optional and combine with AND.
#[derive(Debug, Default, Clone)]
pub struct RowFilter {
    /// Country name (case-insensitive, `Unknown` matches rows without one)
    pub country: Option<String>,
    /// Exact account id
    pub account_id: Option<String>,
}

impl RowFilter {
    /// Create a filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the country filter
    pub fn with_country(mut self, country: String) -> Self {
        self.country = Some(country);
        self
    }

    /// Set the account filter
    pub fn with_account(mut self, account_id: String) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Whether any constraint is set
    pub fn is_active(&self) -> bool {
        self.country.is_some() || self.account_id.is_some()
    }

    /// Check if a row passes the filter
    pub fn matches(&self, row: &Row) -> bool {
        if let Some(country) = &self.country
            && !row.normalized_country().eq_ignore_ascii_case(country)
        {
            return false;
        }

        if let Some(account_id) = &self.account_id
            && row.get(Field::AccountId).map(ToString::to_string).as_deref()
                != Some(account_id.as_str())
        {
            return false;
        }

        true
    }

    /// Keep matching rows, preserving order
    pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
        if !self.is_active() {
            return rows;
        }
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}
