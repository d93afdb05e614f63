//! # Repository Module
//!
//! Everything GO-RENT stores is a JSON document under a fixed key.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  TransactionRepository ──► "gorent_transactions" ──┐                   │
//! │  (TransactionHistory)       JSON array, max 100     │                   │
//! │                                                     ▼                   │
//! │                                          KeyValueRepository             │
//! │                                          get / set / remove / keys      │
//! │                                                     │                   │
//! │  StockRepository ────────► "gorent_stock" ─────────┘                   │
//! │  (StockLedger)              JSON object             ▼                   │
//! │                                          kv_store table                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KeyValueRepository`] - Raw string storage
//! - [`transaction::TransactionRepository`] - Saved transaction history
//! - [`stock::StockRepository`] - Remaining units per vehicle

pub mod kv;
pub mod stock;
pub mod transaction;
