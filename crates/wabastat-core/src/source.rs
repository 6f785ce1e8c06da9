//! Row source trait for ingestion adapters
//!
//! Each adapter in `wabastat-ingest` (workbook, JSON) implements
//! [`RowSource`] so the binary can load any input with the same code path.

use crate::error::Result;
use crate::types::Row;
use async_trait::async_trait;
use tracing::warn;

/// An input that can be decoded into rows
///
/// Loading is the only suspension point in the pipeline; everything after
/// it is synchronous.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable name for logs and errors (usually the file name)
    fn name(&self) -> String;

    /// Decode every row of the input, in order
    async fn load_rows(&self) -> Result<Vec<Row>>;
}

/// Load rows, degrading any ingestion failure to an empty row set
///
/// Unreadable or undecodable input is logged and treated as zero rows so the
/// caller can still render an empty dashboard. Errors outside the ingestion
/// class are logged the same way; none of them are fatal here.
pub async fn load_rows_or_empty(source: &dyn RowSource) -> Vec<Row> {
    match source.load_rows().await {
        Ok(rows) => rows,
        Err(e) if e.is_ingest_failure() => {
            warn!("Could not read {}: {}", source.name(), e);
            Vec::new()
        }
        Err(e) => {
            warn!("Unexpected error while loading {}: {}", source.name(), e);
            Vec::new()
        }
    }
}
