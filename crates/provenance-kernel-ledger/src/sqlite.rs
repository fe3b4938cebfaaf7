//! SQLite implementation of the Ledger trait.
//!
//! A single-node stand-in for the replicated host ledger, useful for local
//! deployments and durable tests. Uses rusqlite with bundled SQLite,
//! wrapped in async via tokio::spawn_blocking.
//!
//! Access is serialized through a connection mutex, so concurrent
//! invocations cannot observe each other mid-write and commit conflicts do
//! not arise in this backend.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::migration;
use crate::traits::Ledger;

/// SQLite-backed ledger.
pub struct SqliteLedger {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database. Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking closure against the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|e| LedgerError::Storage {
                key: String::new(),
                reason: format!("mutex poisoned: {}", e),
            })?;
            f(&conn)
        })
        .await
        .map_err(|e| LedgerError::Storage {
            key: String::new(),
            reason: format!("blocking task failed: {}", e),
        })?
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value.map(Bytes::from))
        })
        .await
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO state (key, value, version, updated_at)
                 VALUES (?1, ?2, 1, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     version = state.version + 1,
                     updated_at = excluded.updated_at",
                params![key, value.as_ref(), now_seconds()],
            )?;
            debug!(key = %key, bytes = value.len(), "state written");
            Ok(())
        })
        .await
    }
}

/// Current time in Unix seconds.
fn now_seconds() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs() as i64
}
