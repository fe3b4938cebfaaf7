//! Ledger trait: the abstract interface to the external transactional
//! key-value store.
//!
//! The kernel consumes the ledger as a collaborator; consensus, replication,
//! and durability live behind this boundary. One kernel invocation maps to
//! one externally managed, atomically committed transaction, so an
//! implementation handed to the kernel is expected to be scoped to exactly
//! one such transaction.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// The two primitives the kernel requires from its host ledger.
///
/// # Contract
///
/// - **Atomicity**: every write issued through one `Ledger` handle commits
///   or fails as a unit. The kernel writes two records per upload and relies
///   on this.
/// - **Serializability**: reads observe a consistent snapshot. Hosts using
///   optimistic concurrency surface losing transactions as
///   [`LedgerError::Conflict`](crate::LedgerError::Conflict), which callers
///   treat as retryable.
/// - No in-process locking is layered on top by the kernel.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write `value` under `key`, overwriting any existing value.
    async fn put_state(&self, key: &str, value: Bytes) -> Result<()>;
}

// A shared handle to a ledger is itself a ledger. Lets a caller keep the
// transaction handle (to commit it) while the kernel holds a clone.
#[async_trait]
impl<L: Ledger + ?Sized> Ledger for std::sync::Arc<L> {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).get_state(key).await
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        (**self).put_state(key, value).await
    }
}
