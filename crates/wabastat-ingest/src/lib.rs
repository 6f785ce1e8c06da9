//! Ingestion adapters for wabastat
//!
//! This crate turns input files into [`Row`](wabastat_core::types::Row) sequences. Spreadsheets go
//! through [`WorkbookSource`] (xlsx, xls, xlsb, ods via calamine); JSON row
//! arrays go through [`JsonSource`].

pub mod json;
pub mod workbook;

pub use json::JsonSource;
pub use workbook::WorkbookSource;

use std::path::Path;
use wabastat_core::source::RowSource;

/// Pick an adapter for a file by its extension
///
/// `.json` files are read as row arrays; everything else is handed to the
/// workbook decoder, which sniffs the actual format.
pub fn open_source(path: impl AsRef<Path>) -> Box<dyn RowSource> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Box::new(JsonSource::from_path(path))
    } else {
        Box::new(WorkbookSource::from_path(path))
    }
}
