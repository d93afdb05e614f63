//! # Receipt Rendering
//!
//! Fixed-width text receipt for a transaction, ready for a monospace
//! printer or a terminal.
//!
//! ```text
//! ╔══════════════════════════════════════════════════════════╗
//! ║                         GO-RENT                          ║
//! ║                     PAYMENT RECEIPT                      ║
//! ╠══════════════════════════════════════════════════════════╣
//! ║  Transaction : GR-LXZ3K1A0-7QF2                          ║
//! ║  ...                                                     ║
//! ╚══════════════════════════════════════════════════════════╝
//! ```
//!
//! Every line is exactly [`RECEIPT_WIDTH`] characters wide; values longer
//! than [`VALUE_WIDTH`] are cut.

use crate::money::CurrencyFormat;
use crate::types::Transaction;

/// Characters between the two vertical borders.
pub const RECEIPT_WIDTH: usize = 58;

/// Room for a value after its label.
pub const VALUE_WIDTH: usize = 36;

const LABEL_WIDTH: usize = 14;

/// Renders the receipt. `store_name` heads the box.
pub fn render_receipt(tx: &Transaction, currency: &CurrencyFormat, store_name: &str) -> String {
    let date = tx.timestamp.format("%a, %d %b %Y %H:%M UTC").to_string();
    let rule = "─".repeat(RECEIPT_WIDTH - 4);

    let mut lines = vec![
        border('╔', '╗'),
        centered(store_name),
        centered("PAYMENT RECEIPT"),
        border('╠', '╣'),
        field("Transaction", &tx.transaction_id),
        field("Date", &date),
        border('╠', '╣'),
        field("Customer", &tx.customer_name),
        border('╠', '╣'),
        text("RENTAL DETAILS"),
        text(&rule),
        field("Vehicle", &tx.vehicle_name),
        field("Price/Day", &currency.format(tx.price_per_day)),
        field("Duration", &format!("{} day(s)", tx.days)),
        field("Units", &format!("{} unit(s)", tx.units)),
        border('╠', '╣'),
        text("COST BREAKDOWN"),
        text(&rule),
        field("Subtotal", &currency.format(tx.subtotal)),
    ];

    if let Some(discount) = &tx.discount {
        lines.push(field(
            &format!("Discount ({})", discount.percentage),
            &format!("-{}", currency.format(discount.amount)),
        ));
    }

    lines.extend([
        text(&rule),
        field("TOTAL", &currency.format(tx.total)),
        border('╠', '╣'),
        centered(&format!("Thank you for renting with {}!", store_name)),
        centered("Drive safely!"),
        border('╚', '╝'),
    ]);

    lines.join("\n")
}

fn border(left: char, right: char) -> String {
    format!("{}{}{}", left, "═".repeat(RECEIPT_WIDTH), right)
}

fn boxed(inner: &str) -> String {
    let inner: String = inner.chars().take(RECEIPT_WIDTH).collect();
    format!("║{:<width$}║", inner, width = RECEIPT_WIDTH)
}

fn text(content: &str) -> String {
    boxed(&format!("  {}", content))
}

fn centered(content: &str) -> String {
    let content: String = content.chars().take(RECEIPT_WIDTH).collect();
    format!("║{:^width$}║", content, width = RECEIPT_WIDTH)
}

fn field(label: &str, value: &str) -> String {
    let value: String = value.chars().take(VALUE_WIDTH).collect();
    boxed(&format!(
        "  {:<label$}: {:<value$}",
        label,
        value,
        label = LABEL_WIDTH,
        value = VALUE_WIDTH
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculate;
    use crate::{CalculatorConfig, RentalRequest, StockLedger};
    use chrono::{TimeZone, Utc};

    fn quote(days: i64, name: &str) -> Transaction {
        let config = CalculatorConfig::default();
        let stock = StockLedger::from_catalog(&config);
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        calculate(&config, &stock, &RentalRequest::new("avanza", name, days, 1), now).unwrap()
    }

    #[test]
    fn test_every_line_has_fixed_width() {
        let receipt = render_receipt(&quote(7, "Budi Santoso"), &CurrencyFormat::default(), "GO-RENT");
        for line in receipt.lines() {
            assert_eq!(line.chars().count(), RECEIPT_WIDTH + 2, "line: {line}");
        }
    }

    #[test]
    fn test_contains_breakdown_with_discount() {
        let tx = quote(7, "Budi Santoso");
        let receipt = render_receipt(&tx, &CurrencyFormat::default(), "GO-RENT");

        assert!(receipt.contains(&tx.transaction_id));
        assert!(receipt.contains("Budi Santoso"));
        assert!(receipt.contains("Toyota Avanza"));
        assert!(receipt.contains("Rp 350.000"));
        assert!(receipt.contains("7 day(s)"));
        assert!(receipt.contains("Rp 2.450.000"));
        assert!(receipt.contains("Discount (15%)"));
        assert!(receipt.contains("-Rp 367.500"));
        assert!(receipt.contains("Rp 2.082.500"));
        assert!(receipt.contains("Mon, 01 Jul 2024 09:30 UTC"));
    }

    #[test]
    fn test_long_weekday_and_month_fit() {
        let mut tx = quote(7, "Budi Santoso");
        tx.timestamp = Utc.with_ymd_and_hms(2024, 9, 25, 9, 30, 0).unwrap();

        let receipt = render_receipt(&tx, &CurrencyFormat::default(), "GO-RENT");
        assert!(receipt.contains("Wed, 25 Sep 2024 09:30 UTC"));
        for line in receipt.lines() {
            assert_eq!(line.chars().count(), RECEIPT_WIDTH + 2, "line: {line}");
        }
    }

    #[test]
    fn test_no_discount_line_without_discount() {
        let receipt = render_receipt(&quote(1, "Budi"), &CurrencyFormat::default(), "GO-RENT");
        assert!(!receipt.contains("Discount"));
    }

    #[test]
    fn test_long_values_are_truncated() {
        let name = "A".repeat(50);
        let receipt = render_receipt(&quote(1, &name), &CurrencyFormat::default(), "GO-RENT");
        assert!(!receipt.contains(&name));
        assert!(receipt.contains(&"A".repeat(VALUE_WIDTH)));
    }
}
