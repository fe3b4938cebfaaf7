//! AccessListStore and PermissionEngine: the mutable accept/reject
//! consumer-address lists and the operations over them.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use provenance_kernel_core::{storage_key, Address, BlockHash, DataInfo, ObjectType, Permission};
use provenance_kernel_ledger::Ledger;

use crate::error::{KernelError, Result};

/// Reads and writes [`DataInfo`] records through the ledger.
pub struct AccessListStore<L> {
    ledger: Arc<L>,
}

impl<L: Ledger> AccessListStore<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Write the empty record created alongside an Appendix at upload time.
    pub async fn init(&self, block_hash: &BlockHash) -> Result<()> {
        self.store(block_hash, &DataInfo::empty()).await
    }

    /// Load the DataInfo for a block hash.
    pub async fn load(&self, block_hash: &BlockHash) -> Result<DataInfo> {
        let key = storage_key(ObjectType::DataInfo, block_hash);

        let bytes = self
            .ledger
            .get_state(&key)
            .await?
            .ok_or(KernelError::NotFound {
                object_type: ObjectType::DataInfo,
                block_hash: *block_hash,
            })?;

        DataInfo::from_bytes(&bytes).map_err(|e| KernelError::Serialization {
            key,
            reason: e.to_string(),
        })
    }

    /// Write a DataInfo record back.
    pub async fn store(&self, block_hash: &BlockHash, info: &DataInfo) -> Result<()> {
        let key = storage_key(ObjectType::DataInfo, block_hash);
        let bytes = info.to_bytes().map_err(|e| KernelError::Serialization {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.ledger.put_state(&key, Bytes::from(bytes)).await?;
        Ok(())
    }
}

/// Grants or denies consumer access and answers access queries.
///
/// Every mutation is a read-modify-write of the single DataInfo record for
/// the block hash; concurrent mutations of the same hash are arbitrated by
/// the host transaction layer (see the ledger crate's concurrency contract).
pub struct PermissionEngine<L> {
    lists: AccessListStore<L>,
    reject_dual_listing: bool,
}

impl<L: Ledger> PermissionEngine<L> {
    pub fn new(ledger: Arc<L>, reject_dual_listing: bool) -> Self {
        Self {
            lists: AccessListStore::new(ledger),
            reject_dual_listing,
        }
    }

    /// Access to the underlying record store (used at upload time).
    pub fn lists(&self) -> &AccessListStore<L> {
        &self.lists
    }

    /// Append `address` to the accept or reject list of the block.
    ///
    /// Appends are not deduplicated: repeated grants produce repeated
    /// entries. With `reject_dual_listing` set, an address already on the
    /// opposite list is refused instead of appended.
    pub async fn grant_or_deny(
        &self,
        block_hash: &BlockHash,
        address: Address,
        permission: Permission,
    ) -> Result<()> {
        let mut info = self.lists.load(block_hash).await?;

        if self.reject_dual_listing && info.on_opposite_list(&address, permission) {
            return Err(KernelError::DualListing {
                address,
                block_hash: *block_hash,
            });
        }

        debug!(block_hash = %block_hash, address = %address, ?permission, "access recorded");
        info.record(address, permission);
        self.lists.store(block_hash, &info).await
    }

    /// Whether `address` was granted access to the block.
    ///
    /// True iff the address appears in the accept list. The reject list is
    /// not consulted: absence from the accept list means "not verified",
    /// not "explicitly denied".
    pub async fn verify_access(&self, block_hash: &BlockHash, address: &Address) -> Result<bool> {
        let info = self.lists.load(block_hash).await?;
        Ok(info.is_accepted(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenance_kernel_ledger::MemoryLedger;

    fn engine(reject_dual_listing: bool) -> (PermissionEngine<MemoryLedger>, BlockHash) {
        let engine = PermissionEngine::new(Arc::new(MemoryLedger::new()), reject_dual_listing);
        (engine, BlockHash::digest(b"block"))
    }

    #[tokio::test]
    async fn test_grant_then_verify() {
        let (engine, hash) = engine(false);
        engine.lists().init(&hash).await.unwrap();

        engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Granted)
            .await
            .unwrap();

        assert!(engine.verify_access(&hash, &Address::new("0xC1")).await.unwrap());
        assert!(!engine.verify_access(&hash, &Address::new("0xC2")).await.unwrap());
    }

    #[tokio::test]
    async fn test_denied_address_is_not_verified() {
        let (engine, hash) = engine(false);
        engine.lists().init(&hash).await.unwrap();

        engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Denied)
            .await
            .unwrap();

        // Denied is recorded, but verification only consults the accept list.
        assert!(!engine.verify_access(&hash, &Address::new("0xC1")).await.unwrap());
        let info = engine.lists().load(&hash).await.unwrap();
        assert_eq!(info.reject_list, vec![Address::new("0xC1")]);
    }

    #[tokio::test]
    async fn test_grant_on_missing_record_is_not_found() {
        let (engine, hash) = engine(false);

        let err = engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Granted)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            KernelError::NotFound {
                object_type: ObjectType::DataInfo,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_repeated_grants_accumulate() {
        let (engine, hash) = engine(false);
        engine.lists().init(&hash).await.unwrap();

        for _ in 0..3 {
            engine
                .grant_or_deny(&hash, Address::new("0xC1"), Permission::Granted)
                .await
                .unwrap();
        }

        let info = engine.lists().load(&hash).await.unwrap();
        assert_eq!(info.accept_list.len(), 3);
    }

    #[tokio::test]
    async fn test_dual_listing_allowed_by_default() {
        let (engine, hash) = engine(false);
        engine.lists().init(&hash).await.unwrap();

        engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Granted)
            .await
            .unwrap();
        engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Denied)
            .await
            .unwrap();

        let info = engine.lists().load(&hash).await.unwrap();
        assert_eq!(info.accept_list.len(), 1);
        assert_eq!(info.reject_list.len(), 1);
    }

    #[tokio::test]
    async fn test_dual_listing_rejected_when_configured() {
        let (engine, hash) = engine(true);
        engine.lists().init(&hash).await.unwrap();

        engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Granted)
            .await
            .unwrap();
        let err = engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Denied)
            .await
            .unwrap_err();
        assert!(matches!(err, KernelError::DualListing { .. }));

        // Repeating the same side is still allowed; only crossing is refused.
        engine
            .grant_or_deny(&hash, Address::new("0xC1"), Permission::Granted)
            .await
            .unwrap();
    }
}
