//! Key-value access over the `key_value` table

use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::database::Database;
use crate::Result;

/// Byte store addressed by string keys.
///
/// `get` and `set` surface I/O failures; `remove` is best-effort and never
/// fails observably.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str);
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM key_value WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO key_value (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) {
        let result = self.with_connection(|conn| {
            conn.execute("DELETE FROM key_value WHERE key = ?1", [key])?;
            Ok(())
        });

        if let Err(e) = result {
            tracing::warn!(key = %key, error = %e, "Failed to remove key");
        }
    }
}
