//! IntegrityVerifier: recompute a block's hash and compare it against the
//! stored Appendix.

use std::sync::Arc;

use tracing::debug;

use provenance_kernel_core::BlockHash;
use provenance_kernel_ledger::Ledger;

use crate::appendix::AppendixStore;
use crate::error::Result;

/// Verifies the correctness and integrity of a block payload against the
/// provenance record on the ledger.
pub struct IntegrityVerifier<L> {
    appendixes: AppendixStore<L>,
}

impl<L: Ledger> IntegrityVerifier<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            appendixes: AppendixStore::new(ledger),
        }
    }

    /// Recompute the payload's hash, look up the Appendix under it, and
    /// compare against the stored hash field.
    ///
    /// A payload that was never uploaded (or was mutated since upload)
    /// hashes to a key with no Appendix and fails with `NotFound` - which
    /// callers treat as "verification failed", never as a stale `true`.
    ///
    /// Once the record is found, the equality is structurally guaranteed by
    /// the keying scheme; the comparison stays explicit so a future schema
    /// that decouples lookup key from stored hash keeps verifying.
    pub async fn verify_hash_value(&self, block_payload: &[u8]) -> Result<bool> {
        let block_hash = BlockHash::digest(block_payload);
        let appendix = self.appendixes.load(&block_hash).await?;

        let matches = appendix.block_hash == block_hash;
        debug!(block_hash = %block_hash, matches, "integrity check");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use provenance_kernel_core::Address;
    use provenance_kernel_ledger::MemoryLedger;

    #[tokio::test]
    async fn test_verify_after_upload() {
        let ledger = Arc::new(MemoryLedger::new());
        let store = AppendixStore::new(Arc::clone(&ledger));
        let verifier = IntegrityVerifier::new(ledger);

        store
            .upload("alice", Address::new("0xA1"), 1_700_000_000, b"payload1")
            .await
            .unwrap();

        assert!(verifier.verify_hash_value(b"payload1").await.unwrap());
    }

    #[tokio::test]
    async fn test_mutated_payload_is_not_found() {
        let ledger = Arc::new(MemoryLedger::new());
        let store = AppendixStore::new(Arc::clone(&ledger));
        let verifier = IntegrityVerifier::new(ledger);

        store
            .upload("alice", Address::new("0xA1"), 1_700_000_000, b"payload1")
            .await
            .unwrap();

        // One flipped byte hashes to a different key entirely.
        let err = verifier.verify_hash_value(b"payload2").await.unwrap_err();
        assert!(matches!(err, KernelError::NotFound { .. }));
    }
}
