//! Error types for the ledger boundary.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Underlying read/write failure.
    #[error("storage error for key {key}: {reason}")]
    Storage { key: String, reason: String },

    /// Optimistic-concurrency commit conflict. Transient: the caller may
    /// retry the whole invocation from a fresh read.
    #[error("commit conflict on key {key}")]
    Conflict { key: String },

    /// Operation on a transaction that already committed.
    #[error("transaction is no longer active")]
    TransactionClosed,

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
