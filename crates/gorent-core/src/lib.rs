//! # gorent-core: Pure Business Logic for GO-RENT
//!
//! This crate is the **heart** of the GO-RENT rental calculator. It contains
//! all pricing logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GO-RENT Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    gorent CLI (apps/cli)                        │   │
//! │  │    vehicles ──► quote ──► save ──► receipt / export / stats    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gorent-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │ discount │ │ pricing  │ │ validation       │  │   │
//! │  │   │ Vehicles │ │ Tiers    │ │ Quote    │ │ name/days/units  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐                       │   │
//! │  │   │ history  │ │ receipt  │ │ export   │                       │   │
//! │  │   │ + stats  │ │ text box │ │ CSV/JSON │                       │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    gorent-db (Storage Layer)                    │   │
//! │  │          SQLite key-value table, migrations, repositories       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and currency formatting
//! - [`types`] - Domain types (Vehicle, DiscountTier, Transaction, ...)
//! - [`catalog`] - Calculator configuration and the stock ledger
//! - [`discount`] - Tier resolution and next-tier hints
//! - [`validation`] - Form validation rules
//! - [`pricing`] - The quote calculation itself
//! - [`history`] - Bounded transaction history and statistics
//! - [`receipt`] - Fixed-width text receipt
//! - [`export`] - CSV and JSON exports
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use gorent_core::{pricing, CalculatorConfig, RentalRequest, StockLedger};
//!
//! let config = CalculatorConfig::default();
//! let stock = StockLedger::from_catalog(&config);
//! let request = RentalRequest::new("avanza", "Budi Santoso", 7, 1);
//!
//! let quote = pricing::calculate(&config, &stock, &request, Utc::now()).unwrap();
//!
//! assert_eq!(quote.subtotal.amount(), 2_450_000);
//! assert_eq!(quote.discount_amount().amount(), 367_500);
//! assert_eq!(quote.total.amount(), 2_082_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod discount;
pub mod error;
pub mod export;
pub mod history;
pub mod money;
pub mod pricing;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CalculatorConfig, StockLedger, ValidationRules};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use export::ExportFormat;
pub use history::{HistoryStatistics, TransactionHistory};
pub use money::{CurrencyFormat, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of transactions kept in the history.
///
/// Older entries are dropped when a new one is saved past this limit.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Prefix of every generated transaction id (`GR-<time>-<random>`).
pub const TRANSACTION_ID_PREFIX: &str = "GR";
