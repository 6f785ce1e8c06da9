//! Ingest → filter → aggregate pipeline
//!
//! Every run, whether one-shot or triggered by the watcher, goes through
//! [`build_dashboard`] and replaces the previous dashboard wholesale.

use crate::filters::RowFilter;
use crate::source::{RowSource, load_rows_or_empty};
use crate::summary::Dashboard;
use tracing::info;

/// Load rows from a source and derive the dashboard
///
/// Unreadable input yields the empty dashboard rather than an error.
pub async fn build_dashboard(source: &dyn RowSource, filter: &RowFilter) -> Dashboard {
    let rows = load_rows_or_empty(source).await;
    let loaded = rows.len();
    let rows = filter.apply(rows);

    if filter.is_active() {
        info!("Filter kept {} of {} rows", rows.len(), loaded);
    }

    Dashboard::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CounterField;
    use wabastat_ingest::{JsonSource, WorkbookSource};

    const ROWS: &str = r#"[
        {"accountid": "a", "country": "US", "deliveredcount": "5", "failedcount": "1", "as_of_date": "2024-01-01"},
        {"accountid": "b", "country": "US", "deliveredcount": "3", "failedcount": "0"},
        {"accountid": "c", "country": "", "deliveredcount": "2", "failedcount": "2"}
    ]"#;

    #[tokio::test]
    async fn test_build_dashboard() {
        let source = JsonSource::from_text("rows.json", ROWS);
        let dashboard = build_dashboard(&source, &RowFilter::new()).await;

        assert_eq!(dashboard.rows.len(), 3);
        assert_eq!(dashboard.totals[CounterField::Delivered], 10);
        assert_eq!(dashboard.totals[CounterField::Failed], 3);
        assert_eq!(dashboard.countries.len(), 2);
        assert_eq!(dashboard.as_of_date.as_deref(), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn test_filter_applies_before_aggregation() {
        let source = JsonSource::from_text("rows.json", ROWS);
        let filter = RowFilter::new().with_country("Unknown".to_string());
        let dashboard = build_dashboard(&source, &filter).await;

        assert_eq!(dashboard.rows.len(), 1);
        assert_eq!(dashboard.totals[CounterField::Delivered], 2);
        assert_eq!(dashboard.countries[0].country, "Unknown");
        // the first remaining row carries no date
        assert_eq!(dashboard.as_of_date, None);
    }

    #[tokio::test]
    async fn test_undecodable_input_is_empty_dashboard() {
        let source = WorkbookSource::from_bytes("broken.xlsx", b"not a workbook".to_vec());
        let dashboard = build_dashboard(&source, &RowFilter::new()).await;
        assert_eq!(dashboard, Dashboard::empty());
    }
}
