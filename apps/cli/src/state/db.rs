//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! The `Database` from `gorent-db` holds a `SqlitePool`, so clones are
//! cheap and share connections.

use std::path::PathBuf;

use tracing::info;

use gorent_db::{Database, DbConfig, DbResult};

/// Wrapper around `Database` handed to commands.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens the database file, creating it and running migrations.
    pub async fn open(path: PathBuf) -> DbResult<Self> {
        info!(path = %path.display(), "Opening database");
        let db = Database::new(DbConfig::new(path)).await?;
        Ok(DbState::new(db))
    }

    /// Fresh in-memory database (tests).
    pub async fn in_memory() -> DbResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(DbState::new(db))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
