//! # Transaction History
//!
//! Saved transactions, newest first, capped at [`MAX_HISTORY_ENTRIES`].
//!
//! ```text
//! push(tx_101)
//!      │
//!      ▼
//! [tx_101, tx_100, tx_99, ... , tx_2]   ← tx_1 falls off the end
//! ```
//!
//! Statistics are computed on demand from whatever is in the list, so they
//! only ever describe the last hundred rentals.

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Transaction;
use crate::MAX_HISTORY_ENTRIES;

// =============================================================================
// History
// =============================================================================

/// Bounded, newest-first list of saved transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHistory {
    entries: Vec<Transaction>,
    capacity: usize,
}

impl Default for TransactionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionHistory {
    /// Empty history with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_ENTRIES)
    }

    /// Empty history holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        TransactionHistory {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Wraps an already newest-first list, dropping anything past capacity.
    pub fn from_entries(mut entries: Vec<Transaction>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        TransactionHistory {
            entries,
            capacity: MAX_HISTORY_ENTRIES,
        }
    }

    /// Records a transaction as the newest entry.
    pub fn push(&mut self, transaction: Transaction) {
        self.entries.insert(0, transaction);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently saved transaction.
    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.first()
    }

    /// Finds a transaction by id.
    pub fn find(&self, transaction_id: &str) -> Option<&Transaction> {
        self.entries
            .iter()
            .find(|t| t.transaction_id == transaction_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Transaction> {
        self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Summary figures, `None` for an empty history.
    pub fn statistics(&self) -> Option<HistoryStatistics> {
        if self.entries.is_empty() {
            return None;
        }

        let mut stats = HistoryStatistics {
            total_transactions: self.entries.len(),
            total_revenue: Money::zero(),
            total_discount: Money::zero(),
            average_rental_days: 0,
            vehicle_breakdown: BTreeMap::new(),
            monthly_revenue: BTreeMap::new(),
        };

        let mut total_days: u64 = 0;

        for t in &self.entries {
            stats.total_revenue += t.total;
            stats.total_discount += t.discount_amount();
            total_days += t.days as u64;

            let vehicle = stats
                .vehicle_breakdown
                .entry(t.vehicle_name.clone())
                .or_default();
            vehicle.count += 1;
            vehicle.revenue += t.total;

            *stats
                .monthly_revenue
                .entry(t.timestamp.format("%Y-%m").to_string())
                .or_default() += t.total;
        }

        // round(total_days / n), half up
        let n = self.entries.len() as u64;
        stats.average_rental_days = ((2 * total_days + n) / (2 * n)) as u32;

        Some(stats)
    }
}

impl<'a> IntoIterator for &'a TransactionHistory {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Rentals and revenue for one vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct VehicleStatistics {
    pub count: usize,
    pub revenue: Money,
}

/// Summary of the saved history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatistics {
    pub total_transactions: usize,
    pub total_revenue: Money,
    pub total_discount: Money,
    /// Mean rental length, rounded to whole days.
    pub average_rental_days: u32,
    /// Keyed by vehicle name.
    pub vehicle_breakdown: BTreeMap<String, VehicleStatistics>,
    /// Keyed by `YYYY-MM` (UTC).
    pub monthly_revenue: BTreeMap<String, Money>,
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

    fn tx(vehicle: &str, days: i64, month: u32) -> Transaction {
        let config = CalculatorConfig::default();
        let stock = StockLedger::from_catalog(&config);
        let now = Utc.with_ymd_and_hms(2024, month, 15, 10, 0, 0).unwrap();
        calculate(&config, &stock, &RentalRequest::new(vehicle, "Budi", days, 1), now).unwrap()
    }

    #[test]
    fn test_push_is_newest_first() {
        let mut history = TransactionHistory::new();
        let first = tx("beat", 1, 1);
        let second = tx("vario", 2, 1);

        history.push(first.clone());
        history.push(second.clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest(), Some(&second));
        assert_eq!(history.entries()[1], first);
        assert!(history.find(&first.transaction_id).is_some());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = TransactionHistory::new();
        let oldest = tx("beat", 1, 1);
        history.push(oldest.clone());

        for _ in 0..MAX_HISTORY_ENTRIES {
            history.push(tx("vario", 1, 2));
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert!(history.find(&oldest.transaction_id).is_none());
    }

    #[test]
    fn test_from_entries_truncates() {
        let entries: Vec<Transaction> = (0..MAX_HISTORY_ENTRIES + 5).map(|_| tx("beat", 1, 3)).collect();
        let history = TransactionHistory::from_entries(entries);
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
    }

    #[test]
    fn test_statistics_empty() {
        assert!(TransactionHistory::new().statistics().is_none());
    }

    #[test]
    fn test_statistics() {
        let mut history = TransactionHistory::new();
        history.push(tx("avanza", 7, 1)); // 2.082.500, discount 367.500
        history.push(tx("beat", 2, 1)); // 150.000
        history.push(tx("beat", 3, 2)); // 225.000 - 22.500 = 202.500

        let stats = history.statistics().unwrap();
        assert_eq!(stats.total_transactions, 3);
        assert_eq!(stats.total_revenue, Money::new(2_082_500 + 150_000 + 202_500));
        assert_eq!(stats.total_discount, Money::new(367_500 + 22_500));
        // (7 + 2 + 3) / 3 = 4
        assert_eq!(stats.average_rental_days, 4);

        let beat = &stats.vehicle_breakdown["Honda Beat"];
        assert_eq!(beat.count, 2);
        assert_eq!(beat.revenue, Money::new(352_500));

        assert_eq!(stats.monthly_revenue["2024-01"], Money::new(2_232_500));
        assert_eq!(stats.monthly_revenue["2024-02"], Money::new(202_500));
    }

    #[test]
    fn test_average_days_rounds_half_up() {
        let mut history = TransactionHistory::new();
        history.push(tx("beat", 1, 1));
        history.push(tx("beat", 2, 1));
        // 1.5 → 2
        assert_eq!(history.statistics().unwrap().average_rental_days, 2);
    }
}
