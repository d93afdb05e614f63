//! # State Module
//!
//! Application state handed to commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                       │
//! │          ▼                                     ▼                        │
//! │  ┌──────────────────┐                 ┌──────────────────┐             │
//! │  │   ConfigState    │                 │     DbState      │             │
//! │  │                  │                 │                  │             │
//! │  │  store_name      │                 │  Database        │             │
//! │  │  catalog         │                 │  (SQLite pool)   │             │
//! │  │  discount tiers  │                 │                  │             │
//! │  └──────────────────┘                 └──────────────────┘             │
//! │                                                                         │
//! │  Each command takes only the state it needs. ConfigState is read-only; │
//! │  history and stock live in the database and are loaded per command.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{ConfigError, ConfigState, ENV_CONFIG, ENV_DB_PATH, ENV_STORE_NAME};
pub use db::DbState;
