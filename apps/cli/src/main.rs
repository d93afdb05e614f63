//! # `gorent` Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              gorent                                     │
//! │                                                                         │
//! │  main.rs ────► gorent_cli::run()                                        │
//! │                                                                         │
//! │  lib.rs ─────► clap parsing, logging, config, database, dispatch        │
//! │                                                                         │
//! │  commands/ ──► vehicles, restock, discounts, quote, quick, receipt,     │
//! │                history, export, stats, config                           │
//! │                                                                         │
//! │  state/ ─────► ConfigState, DbState                                     │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  gorent.db: kv_store { gorent_transactions, gorent_stock }       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs so it can be tested
    gorent_cli::run()
}
