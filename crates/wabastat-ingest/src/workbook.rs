//! Spreadsheet decoding
//!
//! Reads the first worksheet of a workbook, treats its first row as the
//! header, and yields one [`Row`] per following row. Later worksheets are
//! ignored.

use async_trait::async_trait;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDateTime, Timelike};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use wabastat_core::error::{Result, WabastatError};
use wabastat_core::source::RowSource;
use wabastat_core::types::{CellValue, Row, bool_label};

enum WorkbookInput {
    Path(PathBuf),
    Bytes { name: String, bytes: Arc<[u8]> },
}

/// Row source backed by a spreadsheet file or buffer
pub struct WorkbookSource {
    input: WorkbookInput,
}

impl WorkbookSource {
    /// Read the workbook from disk on each load
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: WorkbookInput::Path(path.into()),
        }
    }

    /// Decode an in-memory workbook, e.g. an uploaded file
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            input: WorkbookInput::Bytes {
                name: name.into(),
                bytes: bytes.into(),
            },
        }
    }
}

#[async_trait]
impl RowSource for WorkbookSource {
    fn name(&self) -> String {
        match &self.input {
            WorkbookInput::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            WorkbookInput::Bytes { name, .. } => name.clone(),
        }
    }

    async fn load_rows(&self) -> Result<Vec<Row>> {
        let name = self.name();
        let bytes: Arc<[u8]> = match &self.input {
            WorkbookInput::Path(path) => tokio::fs::read(path).await?.into(),
            WorkbookInput::Bytes { bytes, .. } => bytes.clone(),
        };

        debug!("Decoding workbook {} ({} bytes)", name, bytes.len());
        let task_name = name.clone();
        let rows = tokio::task::spawn_blocking(move || decode_workbook(&task_name, bytes))
            .await
            .map_err(|e| WabastatError::decode(&name, e))??;

        info!("Loaded {} rows from {}", rows.len(), name);
        Ok(rows)
    }
}

/// Decode the first worksheet of a workbook into rows
///
/// Fully empty rows are skipped. A workbook without worksheets, or whose
/// first worksheet has no header row, is [`WabastatError::EmptyWorkbook`].
pub fn decode_workbook(name: &str, bytes: Arc<[u8]>) -> Result<Vec<Row>> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| WabastatError::decode(name, e))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.len() > 1 {
        debug!(
            "{} has {} worksheets; reading only '{}'",
            name,
            sheet_names.len(),
            sheet_names[0]
        );
    }

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| WabastatError::EmptyWorkbook(name.to_string()))?
        .map_err(|e| WabastatError::decode(name, e))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| WabastatError::EmptyWorkbook(name.to_string()))?
        .iter()
        .map(header_text)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(WabastatError::EmptyWorkbook(name.to_string()));
    }

    let mut rows = Vec::new();
    for cells in sheet_rows {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        rows.push(Row::from_cells(
            headers
                .iter()
                .zip(cells)
                .filter(|(header, _)| !header.is_empty())
                .filter_map(|(header, cell)| cell_value(cell).map(|value| (header.as_str(), value))),
        ));
    }

    Ok(rows)
}

fn header_text(cell: &Data) -> String {
    cell_value(cell)
        .map(|value| value.to_string().trim().to_string())
        .unwrap_or_default()
}

/// Map a decoded cell to a row value
///
/// Empty strings, error cells and empty cells have no value.
fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Text(bool_label(*b).to_string())),
        Data::DateTime(dt) if dt.is_duration() => Some(CellValue::Number(dt.as_f64())),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Some(CellValue::Text(format_datetime(&datetime))),
            None => Some(CellValue::Number(dt.as_f64())),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        _ => None,
    }
}

fn format_datetime(datetime: &NaiveDateTime) -> String {
    if datetime.time().num_seconds_from_midnight() == 0 {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
