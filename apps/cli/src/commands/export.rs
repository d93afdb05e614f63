//! # Export Command
//!
//! Writes the saved history to a CSV or JSON file.
//!
//! ```text
//! $ gorent export --format csv
//! Exported 12 transaction(s) to gorent_transactions_1719826200000.csv
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use gorent_core::export::{export, export_file_name};
use gorent_core::ExportFormat;

use crate::error::CliResult;
use crate::state::DbState;

/// Exports the history to `output`, or to a timestamped file in the
/// current directory.
pub async fn export_history(
    db: &DbState,
    format: ExportFormat,
    output: Option<PathBuf>,
    now: DateTime<Utc>,
) -> CliResult<String> {
    debug!(%format, ?output, "export command");

    let history = db.inner().transactions().load().await?;
    let contents = export(&history, format)?;

    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(format, now)));
    std::fs::write(&path, contents)?;

    info!(path = %path.display(), count = history.len(), "History exported");
    Ok(format!(
        "Exported {} transaction(s) to {}",
        history.len(),
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::quote::{quote, QuoteOptions};
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use gorent_core::{RentalRequest, Transaction};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gorent-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_empty_history_is_an_error() {
        let db = DbState::in_memory().await.unwrap();
        let path = temp_path("empty.csv");

        let err = export_history(&db, ExportFormat::Csv, Some(path.clone()), Utc::now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyHistory);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_exports_csv_and_json() {
        let config = ConfigState::default();
        let db = DbState::in_memory().await.unwrap();
        let options = QuoteOptions {
            save: true,
            ..Default::default()
        };
        for name in ["Budi", "Siti"] {
            let request = RentalRequest::new("beat", name, 3, 1);
            quote(&config, &db, &request, options, Utc::now()).await.unwrap();
        }

        let csv_path = temp_path("export.csv");
        let msg = export_history(&db, ExportFormat::Csv, Some(csv_path.clone()), Utc::now())
            .await
            .unwrap();
        assert!(msg.starts_with("Exported 2 transaction(s)"));

        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Transaction ID,Date,Customer Name"));
        assert!(lines[1].contains("\"Siti\""));

        let json_path = temp_path("export.json");
        export_history(&db, ExportFormat::Json, Some(json_path.clone()), Utc::now())
            .await
            .unwrap();
        let parsed: Vec<Transaction> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].customer_name, "Siti");

        std::fs::remove_file(csv_path).ok();
        std::fs::remove_file(json_path).ok();
    }
}
