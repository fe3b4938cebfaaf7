//! In-memory implementation of the Ledger trait.
//!
//! Primarily for tests, but it also models the host contract faithfully:
//! committed values carry versions, and [`MemoryTransaction`] implements
//! read-set validation with abort-on-conflict at commit, so the retryable
//! conflict path can be exercised without a real ledger.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::{LedgerError, Result};
use crate::traits::Ledger;

/// In-memory ledger. Thread-safe via RwLock; all data is lost on drop.
///
/// Implements [`Ledger`] directly with auto-commit semantics (each call is
/// its own tiny transaction). For multi-operation atomicity and conflict
/// detection, use [`MemoryLedger::begin`].
#[derive(Clone, Default)]
pub struct MemoryLedger {
    committed: Arc<RwLock<Committed>>,
}

#[derive(Default)]
struct Committed {
    entries: HashMap<String, VersionedValue>,
}

struct VersionedValue {
    value: Bytes,
    /// Committed versions start at 1; version 0 means "absent".
    version: u64,
}

impl Committed {
    fn version_of(&self, key: &str) -> u64 {
        self.entries.get(key).map(|v| v.version).unwrap_or(0)
    }
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transaction scoped to one kernel invocation.
    pub fn begin(&self) -> MemoryTransaction {
        MemoryTransaction {
            committed: Arc::clone(&self.committed),
            state: RwLock::new(TxState::default()),
        }
    }

    /// Number of committed keys. Test helper.
    pub fn len(&self) -> usize {
        self.committed.read().unwrap().entries.len()
    }

    /// Whether the ledger holds no committed keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        let committed = self.committed.read().unwrap();
        Ok(committed.entries.get(key).map(|v| v.value.clone()))
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        let mut committed = self.committed.write().unwrap();
        let version = committed.version_of(key) + 1;
        committed
            .entries
            .insert(key.to_string(), VersionedValue { value, version });
        Ok(())
    }
}

/// One open transaction against a [`MemoryLedger`].
///
/// Reads record the observed version of each key; writes are buffered.
/// [`commit`](MemoryTransaction::commit) re-validates the read set against
/// the committed state and fails with [`LedgerError::Conflict`] if any read
/// key changed underneath, leaving the ledger untouched.
pub struct MemoryTransaction {
    committed: Arc<RwLock<Committed>>,
    state: RwLock<TxState>,
}

#[derive(Default)]
struct TxState {
    /// key -> version observed at first read.
    reads: HashMap<String, u64>,
    /// Buffered writes, applied atomically at commit.
    writes: BTreeMap<String, Bytes>,
    /// Set once committed; the handle is dead afterwards.
    closed: bool,
}

impl MemoryTransaction {
    /// Commit the transaction: validate the read set, then apply all
    /// buffered writes atomically. The handle cannot be used afterwards.
    pub fn commit(&self) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.closed {
            return Err(LedgerError::TransactionClosed);
        }
        state.closed = true;

        let mut committed = self.committed.write().unwrap();

        for (key, observed) in &state.reads {
            let current = committed.version_of(key);
            if current != *observed {
                warn!(key = %key, observed, current, "transaction conflict");
                return Err(LedgerError::Conflict { key: key.clone() });
            }
        }

        let writes = std::mem::take(&mut state.writes);
        debug!(writes = writes.len(), "transaction committed");
        for (key, value) in writes {
            let version = committed.version_of(&key) + 1;
            committed
                .entries
                .insert(key, VersionedValue { value, version });
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for MemoryTransaction {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        let mut state = self.state.write().unwrap();
        if state.closed {
            return Err(LedgerError::TransactionClosed);
        }

        // Reads observe this transaction's own buffered writes.
        if let Some(value) = state.writes.get(key) {
            return Ok(Some(value.clone()));
        }

        let committed = self.committed.read().unwrap();
        let version = committed.version_of(key);
        state.reads.entry(key.to_string()).or_insert(version);
        Ok(committed.entries.get(key).map(|v| v.value.clone()))
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.closed {
            return Err(LedgerError::TransactionClosed);
        }
        state.writes.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_commit_roundtrip() {
        let ledger = MemoryLedger::new();

        assert!(ledger.get_state("k").await.unwrap().is_none());
        ledger.put_state("k", Bytes::from_static(b"v")).await.unwrap();
        assert_eq!(
            ledger.get_state("k").await.unwrap(),
            Some(Bytes::from_static(b"v"))
        );
    }

    #[tokio::test]
    async fn test_transaction_buffers_until_commit() {
        let ledger = MemoryLedger::new();

        let tx = ledger.begin();
        tx.put_state("k", Bytes::from_static(b"v")).await.unwrap();

        // Own reads see the buffered write; the ledger does not.
        assert_eq!(
            tx.get_state("k").await.unwrap(),
            Some(Bytes::from_static(b"v"))
        );
        assert!(ledger.get_state("k").await.unwrap().is_none());

        tx.commit().unwrap();
        assert_eq!(
            ledger.get_state("k").await.unwrap(),
            Some(Bytes::from_static(b"v"))
        );
    }

    #[tokio::test]
    async fn test_conflicting_commit_fails() {
        let ledger = MemoryLedger::new();
        ledger.put_state("k", Bytes::from_static(b"v0")).await.unwrap();

        let tx1 = ledger.begin();
        let tx2 = ledger.begin();

        // Both read the same key, then both write it.
        tx1.get_state("k").await.unwrap();
        tx2.get_state("k").await.unwrap();
        tx1.put_state("k", Bytes::from_static(b"v1")).await.unwrap();
        tx2.put_state("k", Bytes::from_static(b"v2")).await.unwrap();

        tx1.commit().unwrap();
        let err = tx2.commit().unwrap_err();
        assert!(matches!(err, LedgerError::Conflict { .. }));

        // Loser left no trace.
        assert_eq!(
            ledger.get_state("k").await.unwrap(),
            Some(Bytes::from_static(b"v1"))
        );
    }

    #[tokio::test]
    async fn test_disjoint_transactions_both_commit() {
        let ledger = MemoryLedger::new();

        let tx1 = ledger.begin();
        let tx2 = ledger.begin();
        tx1.put_state("a", Bytes::from_static(b"1")).await.unwrap();
        tx2.put_state("b", Bytes::from_static(b"2")).await.unwrap();

        tx1.commit().unwrap();
        tx2.commit().unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn test_committed_transaction_is_closed() {
        let ledger = MemoryLedger::new();

        let tx = ledger.begin();
        tx.put_state("k", Bytes::from_static(b"v")).await.unwrap();
        tx.commit().unwrap();

        assert!(matches!(
            tx.get_state("k").await.unwrap_err(),
            LedgerError::TransactionClosed
        ));
        assert!(matches!(tx.commit().unwrap_err(), LedgerError::TransactionClosed));
    }

    #[tokio::test]
    async fn test_read_of_absent_key_participates_in_validation() {
        let ledger = MemoryLedger::new();

        let tx = ledger.begin();
        assert!(tx.get_state("k").await.unwrap().is_none());

        // Someone else creates the key before we commit.
        ledger.put_state("k", Bytes::from_static(b"v")).await.unwrap();

        tx.commit().unwrap_err();
    }
}
