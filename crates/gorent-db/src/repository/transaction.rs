//! # Transaction Repository
//!
//! Persists the [`TransactionHistory`] as one JSON array under
//! [`TRANSACTIONS_KEY`].
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote --save                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  history = repo.load()            (corrupt value → empty + warning)    │
//! │  history.push(tx)                 (newest first, oldest beyond 100     │
//! │  stock.reserve(vehicle, units)     falls off)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.save_with_stock(&history, &stock)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN; upsert gorent_transactions; upsert gorent_stock; COMMIT        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use gorent_core::{StockLedger, Transaction, TransactionHistory, MAX_HISTORY_ENTRIES};

use crate::error::DbResult;
use crate::repository::kv::KeyValueRepository;
use crate::repository::stock::{encode_levels, STOCK_KEY};

/// Storage key of the history.
pub const TRANSACTIONS_KEY: &str = "gorent_transactions";

/// Repository for the saved transaction history.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    kv: KeyValueRepository,
}

impl TransactionRepository {
    pub fn new(kv: KeyValueRepository) -> Self {
        TransactionRepository { kv }
    }

    /// Loads the history, newest first.
    ///
    /// A missing key is an empty history. So is a value that is not a valid
    /// transaction list; it is logged and left in place until the next save
    /// overwrites it.
    pub async fn load(&self) -> DbResult<TransactionHistory> {
        let Some(raw) = self.kv.get(TRANSACTIONS_KEY).await? else {
            return Ok(TransactionHistory::new());
        };

        match serde_json::from_str::<Vec<Transaction>>(&raw) {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded transaction history");
                Ok(TransactionHistory::from_entries(entries))
            }
            Err(e) => {
                warn!(error = %e, "Stored transaction history is corrupt, starting empty");
                Ok(TransactionHistory::new())
            }
        }
    }

    /// Replaces the stored history.
    pub async fn save(&self, history: &TransactionHistory) -> DbResult<()> {
        let encoded = encode_history(history)?;
        self.kv.set(TRANSACTIONS_KEY, &encoded).await
    }

    /// Stores the history and the stock levels in one database transaction.
    pub async fn save_with_stock(
        &self,
        history: &TransactionHistory,
        stock: &StockLedger,
    ) -> DbResult<()> {
        let entries = [
            (TRANSACTIONS_KEY, encode_history(history)?),
            (STOCK_KEY, encode_levels(stock)?),
        ];
        self.kv.set_many(&entries).await
    }

    /// Deletes the stored history. Stock levels are left alone.
    pub async fn clear(&self) -> DbResult<()> {
        if self.kv.remove(TRANSACTIONS_KEY).await? {
            info!("Transaction history cleared");
        }
        Ok(())
    }
}

fn encode_history(history: &TransactionHistory) -> DbResult<String> {
    let capped: Vec<&Transaction> = history.iter().take(MAX_HISTORY_ENTRIES).collect();
    Ok(serde_json::to_string(&capped)?)
}

// =============================================================================
// Unit Tests
// =============================================================================
