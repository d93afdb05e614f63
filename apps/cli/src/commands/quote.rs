//! # Quote Commands
//!
//! Price a rental, optionally save it, print a receipt.
//!
//! ## Quote Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  quote --vehicle avanza --days 7 --units 1 --name "Budi"               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load stock ──► calculate() ──► errors? ──► VALIDATION_ERROR (exit 2)  │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │                 Transaction (unsaved quote)                             │
//! │                      │                                                  │
//! │            --save ───┤                                                  │
//! │                      ▼                                                  │
//! │  save_transaction(): re-check stock, reserve units,                    │
//! │                      push to history, store both atomically            │
//! │                      │                                                  │
//! │         --receipt ───┤                                                  │
//! │                      ▼                                                  │
//! │                 fixed-width receipt                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without `--save` nothing is written: re-running the same quote gives the
//! same numbers and a fresh transaction id.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use gorent_core::discount::next_tier;
use gorent_core::pricing::{calculate, quick_quote};
use gorent_core::receipt::render_receipt;
use gorent_core::{CoreError, RentalRequest, Transaction, TransactionHistory, ValidationError};

use crate::commands::catalog::price_per_day;
use crate::error::{CliError, CliResult};
use crate::state::{ConfigState, DbState};

/// Output switches for [`quote`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteOptions {
    /// Store the transaction and take its units out of stock.
    pub save: bool,
    /// Print the receipt instead of the summary.
    pub receipt: bool,
    /// Print the transaction as JSON.
    pub json: bool,
}

/// Calculates a quote for `request`.
pub async fn quote(
    config: &ConfigState,
    db: &DbState,
    request: &RentalRequest,
    options: QuoteOptions,
    now: DateTime<Utc>,
) -> CliResult<String> {
    debug!(vehicle = %request.vehicle_id, days = request.days, units = request.units, "quote command");

    let stock = db.inner().stock().load(&config.calculator).await?;
    let tx = calculate(&config.calculator, &stock, request, now)?;

    let saved = if options.save {
        save_transaction(config, db, tx.clone()).await?;
        true
    } else {
        false
    };

    let mut output = if options.json {
        serde_json::to_string_pretty(&tx)?
    } else if options.receipt {
        render_receipt(&tx, &config.calculator.currency, &config.store_name)
    } else {
        render_summary(config, &tx)
    };

    if saved && !options.json {
        output.push_str(&format!("\n\nSaved transaction {}", tx.transaction_id));
    }

    Ok(output)
}

/// Records a calculated transaction.
///
/// Stock is re-read here, so a quote computed earlier cannot oversell a
/// vehicle that was rented out in between. History and stock are written
/// in one database transaction.
pub async fn save_transaction(
    config: &ConfigState,
    db: &DbState,
    tx: Transaction,
) -> CliResult<TransactionHistory> {
    let mut stock = db.inner().stock().load(&config.calculator).await?;

    let available = stock
        .available(&tx.vehicle_id)
        .ok_or_else(|| CliError::not_found("Vehicle", &tx.vehicle_id))?;
    if tx.units > available {
        return Err(CoreError::from(ValidationError::InsufficientStock {
            vehicle: tx.vehicle_name.clone(),
            available,
        })
        .into());
    }
    let remaining = stock.reserve(&tx.vehicle_id, tx.units)?;

    let repo = db.inner().transactions();
    let mut history = repo.load().await?;
    let id = tx.transaction_id.clone();
    history.push(tx);
    repo.save_with_stock(&history, &stock).await?;

    info!(transaction_id = %id, remaining, "Transaction saved");
    Ok(history)
}

fn render_summary(config: &ConfigState, tx: &Transaction) -> String {
    let mut lines = vec![
        format!("Quote {} for {}", tx.transaction_id, tx.customer_name),
        String::new(),
        format!("  {:<20}{}", "Vehicle", tx.vehicle_name),
        format!("  {:<20}{}", "Price", price_per_day(config, tx.price_per_day)),
        format!("  {:<20}{} day(s) x {} unit(s)", "Rental", tx.days, tx.units),
        format!("  {:<20}{}", "Subtotal", config.format_currency(tx.subtotal)),
    ];

    if let Some(discount) = &tx.discount {
        lines.push(format!(
            "  {:<20}-{}",
            format!("{} ({})", discount.name, discount.percentage),
            config.format_currency(discount.amount)
        ));
    }

    lines.push(format!("  {:<20}{}", "Total", config.format_currency(tx.total)));

    if let Some(next) = next_tier(&config.calculator.discounts, tx.days) {
        lines.push(String::new());
        lines.push(format!(
            "Tip: rent {} more day(s) to get {} ({})",
            next.days_needed, next.tier.name, next.tier.percentage
        ));
    }

    lines.join("\n")
}

/// One-unit estimate, as on the price list's quick buttons.
///
/// No form rules apply here, so a length beyond `max_days` is still priced.
pub fn quick(config: &ConfigState, vehicle_id: &str, days: u32, json: bool) -> CliResult<String> {
    debug!(vehicle = %vehicle_id, days, "quick command");

    let estimate = quick_quote(&config.calculator, vehicle_id, days)?;

    if json {
        return Ok(serde_json::to_string_pretty(&estimate)?);
    }

    let mut line = format!(
        "{}, {} day(s): {}",
        estimate.vehicle_name,
        estimate.days,
        config.format_currency(estimate.total)
    );
    if !estimate.discount_percentage.is_zero() {
        line.push_str(&format!(
            " (save {} with {} off {})",
            config.format_currency(estimate.discount_amount),
            estimate.discount_percentage,
            config.format_currency(estimate.subtotal)
        ));
    }
    Ok(line)
}

/// Reprints the receipt of a saved transaction.
pub async fn receipt(config: &ConfigState, db: &DbState, transaction_id: &str) -> CliResult<String> {
    debug!(transaction_id, "receipt command");

    let history = db.inner().transactions().load().await?;
    let tx = history
        .find(transaction_id.trim())
        .ok_or_else(|| CliError::not_found("Transaction", transaction_id))?;

    Ok(render_receipt(tx, &config.calculator.currency, &config.store_name))
}
