//! # gorent-db: Local Storage for GO-RENT
//!
//! SQLite-backed key-value storage holding the transaction history and the
//! remaining stock per vehicle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GO-RENT Data Flow                                │
//! │                                                                         │
//! │  CLI command (quote --save)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     gorent-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ TransactionRepo ─┐ │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ StockRepo ───────┤ │  │ 001_kv_    │  │   │
//! │  │   │               │    │ KeyValueRepo ◄───┘ │  │ store.sql  │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: kv_store(key, value, updated_at)                       │   │
//! │  │  ~/.local/share/gorent/gorent.db                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value, transaction and stock repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gorent_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("gorent.db")).await?;
//!
//! let mut history = db.transactions().load().await?;
//! history.push(transaction);
//! db.transactions().save(&history).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::kv::KeyValueRepository;
pub use repository::stock::{StockRepository, STOCK_KEY};
pub use repository::transaction::{TransactionRepository, TRANSACTIONS_KEY};
