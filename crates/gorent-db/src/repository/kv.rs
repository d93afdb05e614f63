//! # Key-Value Repository
//!
//! String values under string keys, backed by the `kv_store` table.
//! Writes are upserts and stamp `updated_at`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for raw key-value access.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Storing value");

        sqlx::query(UPSERT)
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Stores several values in one database transaction.
    ///
    /// Either every pair is written or none is.
    pub async fn set_many(&self, entries: &[(&str, String)]) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for (key, value) in entries {
            debug!(key = %key, bytes = value.len(), "Storing value");
            sqlx::query(UPSERT)
                .bind(*key)
                .bind(value.as_str())
                .bind(now.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Deletes `key`. Returns whether anything was removed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

const UPSERT: &str = r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_set_remove() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        assert_eq!(kv.get("greeting").await.unwrap(), None);

        kv.set("greeting", "halo").await.unwrap();
        assert_eq!(kv.get("greeting").await.unwrap().as_deref(), Some("halo"));

        kv.set("greeting", "hello").await.unwrap();
        assert_eq!(kv.get("greeting").await.unwrap().as_deref(), Some("hello"));

        assert!(kv.remove("greeting").await.unwrap());
        assert!(!kv.remove("greeting").await.unwrap());
        assert_eq!(kv.get("greeting").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_many_and_keys() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.set_many(&[("b", "2".to_string()), ("a", "1".to_string())])
            .await
            .unwrap();

        assert_eq!(kv.keys().await.unwrap(), vec!["a", "b"]);
        assert_eq!(kv.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
