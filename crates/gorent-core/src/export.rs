//! # Exports
//!
//! CSV and pretty-printed JSON renderings of the transaction history.
//!
//! ## CSV Layout
//! ```text
//! Transaction ID,Date,Customer Name,Vehicle,Type,Price/Day,Days,Units,Subtotal,Discount %,Discount Amount,Total
//! "GR-LXZ3K1A0-7QF2","2024-07-01T09:30:00+00:00","Budi","Toyota Avanza","car","350000","7","1","2450000","15","367500","2082500"
//! ```
//!
//! Amounts are raw integers so spreadsheets can sum them. Every data cell is
//! quoted; a quote inside a value is doubled.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::history::TransactionHistory;
use crate::types::Transaction;

/// Column headers of the CSV export.
pub const CSV_HEADERS: [&str; 12] = [
    "Transaction ID",
    "Date",
    "Customer Name",
    "Vehicle",
    "Type",
    "Price/Day",
    "Days",
    "Units",
    "Subtotal",
    "Discount %",
    "Discount Amount",
    "Total",
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type of the rendered content.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(CoreError::InvalidConfig(format!(
                "Unknown export format: '{}'. Valid options: csv, json",
                other
            ))),
        }
    }
}

/// Renders the whole history in `format`.
///
/// Fails with [`CoreError::NothingToExport`] when the history is empty.
pub fn export(history: &TransactionHistory, format: ExportFormat) -> CoreResult<String> {
    if history.is_empty() {
        return Err(CoreError::NothingToExport);
    }

    match format {
        ExportFormat::Csv => Ok(to_csv(history.entries())),
        ExportFormat::Json => to_json(history.entries()),
    }
}

/// Header line plus one quoted row per transaction, joined with `\n`.
pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for t in transactions {
        let cells = [
            t.transaction_id.clone(),
            t.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            t.customer_name.clone(),
            t.vehicle_name.clone(),
            t.vehicle_type.to_string(),
            t.price_per_day.amount().to_string(),
            t.days.to_string(),
            t.units.to_string(),
            t.subtotal.amount().to_string(),
            t.discount_percentage().value().to_string(),
            t.discount_amount().amount().to_string(),
            t.total.amount().to_string(),
        ];
        let row: Vec<String> = cells.iter().map(|c| quote(c)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Pretty-printed JSON array (camelCase keys, two-space indent).
pub fn to_json(transactions: &[Transaction]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// `gorent_transactions_<unix millis>.<ext>`
pub fn export_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "gorent_transactions_{}.{}",
        now.timestamp_millis(),
        format.extension()
    )
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

// =============================================================================
// Unit Tests
// =============================================================================
