//! Common test utilities for wabastat integration tests
//!
//! Fixture workbooks are written with rust_xlsxwriter so the tests exercise
//! the same decoding path as real uploads.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::PathBuf;
use tempfile::TempDir;
use wabastat::types::{CounterField, Field, Row};

/// Header row as exported by the WhatsApp Business dashboard
pub const HEADERS: &[&str] = &[
    "accountid",
    "wabanumber",
    "country",
    "requestedcount",
    "submittedcount",
    "sentcount",
    "deliveredcount",
    "readcount",
    "failedcount",
    "pendingcount",
    "notsentcount",
    "as_of_date",
];

/// One fixture row; `None` leaves the cell empty
pub struct FixtureRow {
    pub account_id: Option<&'static str>,
    pub waba_number: Option<&'static str>,
    pub country: Option<&'static str>,
    pub counters: [Option<f64>; CounterField::COUNT],
    pub as_of_date: Option<&'static str>,
}

impl FixtureRow {
    pub fn new(account_id: &'static str, country: Option<&'static str>) -> Self {
        Self {
            account_id: Some(account_id),
            waba_number: None,
            country,
            counters: [None; CounterField::COUNT],
            as_of_date: None,
        }
    }

    pub fn counter(mut self, field: CounterField, value: f64) -> Self {
        self.counters[field.index()] = Some(value);
        self
    }

    pub fn dated(mut self, date: &'static str) -> Self {
        self.as_of_date = Some(date);
        self
    }
}

/// The three-row scenario: two US rows and one without a country
pub fn scenario() -> Vec<FixtureRow> {
    vec![
        FixtureRow::new("1001", Some("US"))
            .counter(CounterField::Delivered, 5.0)
            .counter(CounterField::Failed, 1.0)
            .dated("2024-01-01"),
        FixtureRow::new("1002", Some("US"))
            .counter(CounterField::Delivered, 3.0)
            .counter(CounterField::Failed, 0.0),
        FixtureRow::new("1003", Some(""))
            .counter(CounterField::Delivered, 2.0)
            .counter(CounterField::Failed, 2.0),
    ]
}

/// Encode fixture rows as an xlsx workbook with a single sheet
pub fn workbook_bytes(rows: &[FixtureRow]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let texts = [row.account_id, row.waba_number, row.country];
        for (col, text) in texts.iter().enumerate() {
            if let Some(text) = text {
                worksheet.write_string(r, col as u16, *text).unwrap();
            }
        }
        for (offset, value) in row.counters.iter().enumerate() {
            if let Some(value) = value {
                worksheet.write_number(r, (3 + offset) as u16, *value).unwrap();
            }
        }
        if let Some(date) = row.as_of_date {
            worksheet.write_string(r, 11, date).unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Write fixture rows to `<dir>/<name>` and return the path
pub fn write_workbook(dir: &TempDir, name: &str, rows: &[FixtureRow]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, workbook_bytes(rows)).unwrap();
    path
}

/// In-memory row with the given country and delivered/failed text cells
pub fn row(country: Option<&str>, delivered: &str, failed: &str) -> Row {
    let mut row = Row::new()
        .with(Field::Counter(CounterField::Delivered), delivered)
        .with(Field::Counter(CounterField::Failed), failed);
    if let Some(country) = country {
        row = row.with(Field::Country, country);
    }
    row
}
