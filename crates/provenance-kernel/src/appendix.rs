//! AppendixStore: immutable provenance records keyed by block hash.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use provenance_kernel_core::{storage_key, Address, Appendix, BlockHash, ObjectType};
use provenance_kernel_ledger::Ledger;

use crate::error::{KernelError, Result};

/// Reads and writes [`Appendix`] records through the ledger.
pub struct AppendixStore<L> {
    ledger: Arc<L>,
}

impl<L: Ledger> AppendixStore<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Compute the block hash and write the Appendix record under it.
    ///
    /// An existing record under the same hash is overwritten; re-upload
    /// policy is enforced above this layer.
    pub async fn upload(
        &self,
        owner_account: &str,
        owner_address: Address,
        data_timestamp: i64,
        block_payload: &[u8],
    ) -> Result<BlockHash> {
        let block_hash = BlockHash::digest(block_payload);
        let appendix = Appendix {
            owner_account: owner_account.to_string(),
            data_timestamp,
            block_hash,
            owner_address,
        };

        let key = storage_key(ObjectType::Appendix, &block_hash);
        let bytes = appendix.to_bytes().map_err(|e| KernelError::Serialization {
            key: key.clone(),
            reason: e.to_string(),
        })?;

        self.ledger.put_state(&key, Bytes::from(bytes)).await?;
        debug!(block_hash = %block_hash, owner = %appendix.owner_account, "appendix written");
        Ok(block_hash)
    }

    /// Load the Appendix for a block hash.
    ///
    /// `NotFound` if absent; `Serialization` if the stored bytes are
    /// malformed.
    pub async fn load(&self, block_hash: &BlockHash) -> Result<Appendix> {
        let key = storage_key(ObjectType::Appendix, block_hash);

        let bytes = self
            .ledger
            .get_state(&key)
            .await?
            .ok_or(KernelError::NotFound {
                object_type: ObjectType::Appendix,
                block_hash: *block_hash,
            })?;

        Appendix::from_bytes(&bytes).map_err(|e| KernelError::Serialization {
            key,
            reason: e.to_string(),
        })
    }

    /// Read the owner address recorded for a block hash.
    pub async fn owner_address(&self, block_hash: &BlockHash) -> Result<Address> {
        Ok(self.load(block_hash).await?.owner_address)
    }

    /// Whether an Appendix exists for this hash. Used by re-upload checks.
    pub async fn exists(&self, block_hash: &BlockHash) -> Result<bool> {
        let key = storage_key(ObjectType::Appendix, block_hash);
        Ok(self.ledger.get_state(&key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenance_kernel_ledger::MemoryLedger;

    fn store() -> AppendixStore<MemoryLedger> {
        AppendixStore::new(Arc::new(MemoryLedger::new()))
    }

    #[tokio::test]
    async fn test_upload_then_load() {
        let store = store();
        let hash = store
            .upload("alice", Address::new("0xA1"), 1_700_000_000, b"payload1")
            .await
            .unwrap();

        let appendix = store.load(&hash).await.unwrap();
        assert_eq!(appendix.owner_account, "alice");
        assert_eq!(appendix.owner_address, Address::new("0xA1"));
        assert_eq!(appendix.data_timestamp, 1_700_000_000);
        assert_eq!(appendix.block_hash, hash);
    }

    #[tokio::test]
    async fn test_load_absent_is_not_found() {
        let store = store();
        let err = store.load(&BlockHash::digest(b"never uploaded")).await.unwrap_err();
        assert!(matches!(
            err,
            KernelError::NotFound {
                object_type: ObjectType::Appendix,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_stored_bytes_surface_as_serialization_error() {
        let ledger = Arc::new(MemoryLedger::new());
        let store = AppendixStore::new(Arc::clone(&ledger));

        let hash = BlockHash::digest(b"payload");
        let key = storage_key(ObjectType::Appendix, &hash);
        ledger
            .put_state(&key, Bytes::from_static(b"garbage"))
            .await
            .unwrap();

        let err = store.load(&hash).await.unwrap_err();
        assert!(matches!(err, KernelError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_reupload_overwrites() {
        let store = store();
        let h1 = store
            .upload("alice", Address::new("0xA1"), 1, b"payload")
            .await
            .unwrap();
        let h2 = store
            .upload("bob", Address::new("0xB2"), 2, b"payload")
            .await
            .unwrap();
        assert_eq!(h1, h2);

        // Last write wins at this layer.
        assert_eq!(store.owner_address(&h1).await.unwrap(), Address::new("0xB2"));
    }
}
