//! JSON row arrays
//!
//! Accepts the shape a sheet-to-JSON export produces: an array of objects
//! keyed by column header.
//!
//! ```json
//! [
//!   {"accountid": "1001", "country": "IN", "deliveredcount": 40, "failedcount": "2"},
//!   {"accountid": "1002", "country": "BR", "deliveredcount": "12"}
//! ]
//! ```

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;
use wabastat_core::error::{Result, WabastatError};
use wabastat_core::source::RowSource;
use wabastat_core::types::Row;

enum JsonInput {
    Path(PathBuf),
    Text { name: String, text: String },
}

/// Row source backed by a JSON array of row objects
pub struct JsonSource {
    input: JsonInput,
}

impl JsonSource {
    /// Read the JSON file from disk on each load
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: JsonInput::Path(path.into()),
        }
    }

    /// Parse an in-memory JSON document
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Text {
                name: name.into(),
                text: text.into(),
            },
        }
    }
}

#[async_trait]
impl RowSource for JsonSource {
    fn name(&self) -> String {
        match &self.input {
            JsonInput::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            JsonInput::Text { name, .. } => name.clone(),
        }
    }

    async fn load_rows(&self) -> Result<Vec<Row>> {
        let rows = match &self.input {
            JsonInput::Path(path) => {
                let text = tokio::fs::read_to_string(path).await?;
                parse_rows(&self.name(), &text)?
            }
            JsonInput::Text { name, text } => parse_rows(name, text)?,
        };

        info!("Loaded {} rows from {}", rows.len(), self.name());
        Ok(rows)
    }
}

/// Parse a JSON array of row objects
pub fn parse_rows(name: &str, text: &str) -> Result<Vec<Row>> {
    serde_json::from_str(text).map_err(|e| WabastatError::decode(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wabastat_core::types::CounterField;

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows(
            "rows.json",
            r#"[
                {"accountid": "1001", "country": "IN", "deliveredcount": 40, "failedcount": "2"},
                {"Account ID": 1002, "Country": "BR", "Delivered Count": "12", "extra": [1, 2]}
            ]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].counter_value(CounterField::Delivered), 40);
        assert_eq!(rows[0].counter_value(CounterField::Failed), 2);
        assert_eq!(rows[1].normalized_country(), "BR");
        assert_eq!(rows[1].counter_value(CounterField::Delivered), 12);
    }

    #[test]
    fn test_parse_rows_rejects_non_arrays() {
        let err = parse_rows("rows.json", r#"{"country": "IN"}"#).unwrap_err();
        assert!(matches!(err, WabastatError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_empty_array_is_zero_rows() {
        let source = JsonSource::from_text("empty.json", "[]");
        assert!(source.load_rows().await.unwrap().is_empty());
    }
}
