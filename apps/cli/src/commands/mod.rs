//! # Commands Module
//!
//! One function per subcommand. Each returns the text for stdout.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── vehicles, restock, discounts
//! ├── quote.rs    ◄─── quote, quick, receipt
//! ├── history.rs  ◄─── history (--clear), stats
//! ├── export.rs   ◄─── export
//! └── config.rs   ◄─── config
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  $ gorent quote --vehicle avanza --days 7 --name "Budi"                │
//! │         │                                                               │
//! │         ▼  (clap)                                                       │
//! │  Command::Quote(QuoteArgs)                                              │
//! │         │                                                               │
//! │         ▼  (lib.rs dispatch)                                            │
//! │  commands::quote::quote(                                                │
//! │      &ConfigState,   ◄── catalog, currency, store name                 │
//! │      &DbState,       ◄── history + stock                               │
//! │      &RentalRequest, ◄── from the arguments                            │
//! │      ...                                                                │
//! │  ) -> Result<String, CliError>                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout (Ok) / stderr + exit code (Err)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that never touch storage (`discounts`, `quick`, `config`) take
//! no `DbState`, so they run without opening the database.

pub mod catalog;
pub mod config;
pub mod export;
pub mod history;
pub mod quote;
