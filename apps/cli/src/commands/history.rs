//! # History Commands
//!
//! Saved transactions and the statistics computed from them.
//!
//! ```text
//! $ gorent history --limit 2
//! GR-LXZ3K1A0-7QF2  2024-07-01 09:30  Budi Santoso   Toyota Avanza   7d x1   Rp 2.082.500
//! GR-LXZ2P0Q1-K81M  2024-06-30 15:02  Siti Rahma     Honda Beat      2d x2     Rp 300.000
//!
//! $ gorent history --clear
//! Cleared 12 transaction(s)
//! ```

use serde::Serialize;
use tracing::{debug, info};

use gorent_core::{HistoryStatistics, Transaction};

use crate::error::CliResult;
use crate::state::{ConfigState, DbState};

const EMPTY_HISTORY: &str = "No transactions saved yet.";

/// Lists saved transactions, newest first.
pub async fn history(
    config: &ConfigState,
    db: &DbState,
    limit: Option<usize>,
    json: bool,
) -> CliResult<String> {
    debug!(?limit, "history command");

    let history = db.inner().transactions().load().await?;
    let shown: Vec<&Transaction> = history
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&shown)?);
    }

    if history.is_empty() {
        return Ok(EMPTY_HISTORY.to_string());
    }

    let mut lines: Vec<String> = shown.iter().map(|t| render_row(config, t)).collect();
    if shown.len() < history.len() {
        lines.push(format!("({} of {} shown)", shown.len(), history.len()));
    }
    Ok(lines.join("\n"))
}

/// Deletes every saved transaction. Stock is not touched.
pub async fn clear_history(db: &DbState) -> CliResult<String> {
    debug!("history --clear command");

    let repo = db.inner().transactions();
    let count = repo.load().await?.len();
    repo.clear().await?;

    info!(count, "History cleared");
    Ok(format!("Cleared {} transaction(s)", count))
}

fn render_row(config: &ConfigState, t: &Transaction) -> String {
    format!(
        "{:<18}{}  {:<15}{:<16}{:>3}d x{:<3}{:>14}",
        t.transaction_id,
        t.timestamp.format("%Y-%m-%d %H:%M"),
        truncate(&t.customer_name, 14),
        truncate(&t.vehicle_name, 15),
        t.days,
        t.units,
        config.format_currency(t.total)
    )
}

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

/// JSON shape of `stats --json`; `null` statistics for an empty history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOutput {
    statistics: Option<HistoryStatistics>,
}

/// Totals, per-vehicle breakdown and monthly revenue.
pub async fn stats(config: &ConfigState, db: &DbState, json: bool) -> CliResult<String> {
    debug!("stats command");

    let history = db.inner().transactions().load().await?;
    let statistics = history.statistics();

    if json {
        return Ok(serde_json::to_string_pretty(&StatsOutput { statistics })?);
    }

    let Some(stats) = statistics else {
        return Ok(EMPTY_HISTORY.to_string());
    };

    let money = |m| config.format_currency(m);
    let mut lines = vec![
        format!("{:<24}{}", "Transactions", stats.total_transactions),
        format!("{:<24}{}", "Total revenue", money(stats.total_revenue)),
        format!("{:<24}{}", "Total discounts", money(stats.total_discount)),
        format!("{:<24}{} day(s)", "Average rental", stats.average_rental_days),
        String::new(),
        "By vehicle".to_string(),
    ];

    for (name, v) in &stats.vehicle_breakdown {
        lines.push(format!("  {:<22}{:>3} rental(s)  {}", name, v.count, money(v.revenue)));
    }

    lines.push(String::new());
    lines.push("By month".to_string());
    for (month, revenue) in &stats.monthly_revenue {
        lines.push(format!("  {:<22}{}", month, money(*revenue)));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::quote::save_transaction;
    use chrono::{TimeZone, Utc};
    use gorent_core::pricing::calculate;
    use gorent_core::RentalRequest;

    async fn seeded() -> (ConfigState, DbState) {
        let config = ConfigState::default();
        let db = DbState::in_memory().await.unwrap();

        for (vehicle, name, days, units, month) in [
            ("avanza", "Budi Santoso", 7, 1, 6),
            ("beat", "Siti Rahma", 2, 2, 7),
            ("beat", "Agus", 3, 1, 7),
        ] {
            let stock = db.inner().stock().load(&config.calculator).await.unwrap();
            let now = Utc.with_ymd_and_hms(2024, month, 10, 8, 0, 0).unwrap();
            let request = RentalRequest::new(vehicle, name, days, units);
            let tx = calculate(&config.calculator, &stock, &request, now).unwrap();
            save_transaction(&config, &db, tx).await.unwrap();
        }

        (config, db)
    }

    #[tokio::test]
    async fn test_empty_history() {
        let config = ConfigState::default();
        let db = DbState::in_memory().await.unwrap();

        assert_eq!(history(&config, &db, None, false).await.unwrap(), EMPTY_HISTORY);
        assert_eq!(history(&config, &db, None, true).await.unwrap(), "[]");
        assert_eq!(stats(&config, &db, false).await.unwrap(), EMPTY_HISTORY);

        let json = stats(&config, &db, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["statistics"].is_null());
    }

    #[tokio::test]
    async fn test_history_newest_first_with_limit() {
        let (config, db) = seeded().await;

        let out = history(&config, &db, None, false).await.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Agus"));
        assert!(lines[2].contains("Budi Santoso"));
        assert!(lines[2].contains("Rp 2.082.500"));

        let out = history(&config, &db, Some(1), false).await.unwrap();
        assert!(out.contains("Agus"));
        assert!(out.ends_with("(1 of 3 shown)"));
    }

    #[tokio::test]
    async fn test_clear_history_keeps_stock() {
        let (config, db) = seeded().await;

        assert_eq!(clear_history(&db).await.unwrap(), "Cleared 3 transaction(s)");
        assert_eq!(history(&config, &db, None, false).await.unwrap(), EMPTY_HISTORY);

        let stock = db.inner().stock().load(&config.calculator).await.unwrap();
        assert_eq!(stock.available("beat"), Some(7));

        assert_eq!(clear_history(&db).await.unwrap(), "Cleared 0 transaction(s)");
    }

    #[tokio::test]
    async fn test_stats() {
        let (config, db) = seeded().await;

        let out = stats(&config, &db, false).await.unwrap();
        // 2.082.500 + 300.000 + 202.500
        assert!(out.contains("Rp 2.585.000"));
        // 367.500 + 22.500
        assert!(out.contains("Rp 390.000"));
        assert!(out.contains("Average rental          4 day(s)"));
        assert!(out.contains("Honda Beat"));
        assert!(out.contains("2024-06"));
        assert!(out.contains("2024-07"));

        let json = stats(&config, &db, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["statistics"]["totalTransactions"], 3);
        assert_eq!(value["statistics"]["vehicleBreakdown"]["Honda Beat"]["count"], 2);
    }
}
