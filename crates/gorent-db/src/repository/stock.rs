//! # Stock Repository
//!
//! Remaining units per vehicle, stored as a JSON object under [`STOCK_KEY`]:
//!
//! ```json
//! { "avanza": 4, "beat": 10, "innova": 3, "vario": 8 }
//! ```
//!
//! Levels are overlaid on the catalog when loaded, so a vehicle added to the
//! configuration later simply starts at full stock.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use gorent_core::{CalculatorConfig, StockLedger};

use crate::error::DbResult;
use crate::repository::kv::KeyValueRepository;

/// Storage key of the stock levels.
pub const STOCK_KEY: &str = "gorent_stock";

/// Repository for stock levels.
#[derive(Debug, Clone)]
pub struct StockRepository {
    kv: KeyValueRepository,
}

impl StockRepository {
    pub fn new(kv: KeyValueRepository) -> Self {
        StockRepository { kv }
    }

    /// Current stock for the catalog in `config`.
    ///
    /// Missing or unreadable levels fall back to catalog stock.
    pub async fn load(&self, config: &CalculatorConfig) -> DbResult<StockLedger> {
        let Some(raw) = self.kv.get(STOCK_KEY).await? else {
            return Ok(StockLedger::from_catalog(config));
        };

        match serde_json::from_str::<BTreeMap<String, u32>>(&raw) {
            Ok(levels) => {
                debug!(vehicles = levels.len(), "Loaded stock levels");
                Ok(StockLedger::with_levels(config, &levels))
            }
            Err(e) => {
                warn!(error = %e, "Stored stock levels are corrupt, using catalog stock");
                Ok(StockLedger::from_catalog(config))
            }
        }
    }

    /// Stores the ledger's levels.
    pub async fn save(&self, stock: &StockLedger) -> DbResult<()> {
        self.kv.set(STOCK_KEY, &encode_levels(stock)?).await
    }

    /// Puts every vehicle back to catalog stock and stores the result.
    pub async fn reset(&self, config: &CalculatorConfig) -> DbResult<StockLedger> {
        let mut stock = self.load(config).await?;
        stock.restock_all();
        self.save(&stock).await?;

        info!(vehicles = stock.levels().len(), "Stock reset to catalog levels");
        Ok(stock)
    }
}

pub(crate) fn encode_levels(stock: &StockLedger) -> DbResult<String> {
    Ok(serde_json::to_string(stock.levels())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_defaults_to_catalog_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = CalculatorConfig::default();

        let stock = db.stock().load(&config).await.unwrap();
        assert_eq!(stock.available("avanza"), Some(5));
        assert_eq!(stock.available("beat"), Some(10));
    }

    #[tokio::test]
    async fn test_save_load_and_reset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = CalculatorConfig::default();
        let repo = db.stock();

        let mut stock = repo.load(&config).await.unwrap();
        stock.reserve("avanza", 2).unwrap();
        repo.save(&stock).await.unwrap();

        let raw = db.kv().get(STOCK_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"avanza\":3"));
        assert_eq!(repo.load(&config).await.unwrap().available("avanza"), Some(3));

        let restored = repo.reset(&config).await.unwrap();
        assert_eq!(restored.available("avanza"), Some(5));
        assert_eq!(repo.load(&config).await.unwrap().available("avanza"), Some(5));

        let raw = db.kv().get(STOCK_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"avanza\":5"));
    }

    #[tokio::test]
    async fn test_corrupt_levels_fall_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().set(STOCK_KEY, "[1, 2").await.unwrap();

        let stock = db.stock().load(&CalculatorConfig::default()).await.unwrap();
        assert_eq!(stock.available("innova"), Some(3));
    }
}
