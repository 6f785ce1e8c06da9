//! Shared test utilities for unit tests
//!
//! Integration tests cannot see this module because it is compiled only
//! under `#[cfg(test)]`; they carry their own builder in
//! `tests/common/mod.rs`.

use crate::types::{CellValue, CounterField, Field, Row};

/// Builder for test rows
pub struct RowBuilder {
    row: Row,
}

impl RowBuilder {
    /// Start from a row with no fields set
    pub fn new() -> Self {
        Self { row: Row::new() }
    }

    pub fn account(mut self, value: impl Into<CellValue>) -> Self {
        self.row.set(Field::AccountId, value.into());
        self
    }

    pub fn country(mut self, value: impl Into<CellValue>) -> Self {
        self.row.set(Field::Country, value.into());
        self
    }

    pub fn counter(mut self, field: CounterField, value: impl Into<CellValue>) -> Self {
        self.row.set(Field::Counter(field), value.into());
        self
    }

    pub fn delivered(self, value: impl Into<CellValue>) -> Self {
        self.counter(CounterField::Delivered, value)
    }

    pub fn failed(self, value: impl Into<CellValue>) -> Self {
        self.counter(CounterField::Failed, value)
    }

    pub fn as_of_date(mut self, value: impl Into<CellValue>) -> Self {
        self.row.set(Field::AsOfDate, value.into());
        self
    }

    pub fn build(self) -> Row {
        self.row
    }
}

impl Default for RowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
