//! The Kernel: unified API over provenance records and access permissions.
//!
//! One kernel invocation maps to one externally scoped ledger transaction;
//! the kernel itself holds no locks and performs no I/O beyond the ledger's
//! get/put primitives.

use std::sync::Arc;

use tracing::debug;

use provenance_kernel_core::{Address, BlockHash, Permission};
use provenance_kernel_ledger::Ledger;

use crate::access::PermissionEngine;
use crate::appendix::AppendixStore;
use crate::command::{Command, CommandOutput};
use crate::error::{KernelError, Result};
use crate::events::{EventObserver, KernelEvent};
use crate::verify::IntegrityVerifier;

/// Configuration for the Kernel.
///
/// The defaults are permissive; each flag opts into a stricter policy.
#[derive(Debug, Clone, Default)]
pub struct KernelConfig {
    /// Fail an upload whose block hash already has an Appendix, instead of
    /// silently overwriting it.
    pub reject_reupload: bool,

    /// Refuse a grant/deny that would put an address on both access lists.
    pub reject_dual_listing: bool,
}

/// The main Kernel struct.
///
/// Provides a unified API for:
/// - Publishing blocks (Appendix + empty DataInfo)
/// - Querying provenance (owner address)
/// - Granting/denying and verifying consumer access
/// - Verifying block integrity against the ledger
pub struct Kernel<L: Ledger> {
    appendixes: AppendixStore<L>,
    permissions: PermissionEngine<L>,
    integrity: IntegrityVerifier<L>,
    config: KernelConfig,
    observer: Option<Arc<dyn EventObserver>>,
}

impl<L: Ledger> Kernel<L> {
    /// Create a kernel over a ledger handle scoped to one transaction (or
    /// over an auto-committing ledger for single-operation use).
    pub fn new(ledger: L, config: KernelConfig) -> Self {
        let ledger = Arc::new(ledger);
        Self {
            appendixes: AppendixStore::new(Arc::clone(&ledger)),
            permissions: PermissionEngine::new(Arc::clone(&ledger), config.reject_dual_listing),
            integrity: IntegrityVerifier::new(ledger),
            config,
            observer: None,
        }
    }

    /// Register an observer notified after each successful mutation.
    pub fn with_observer(mut self, observer: Arc<dyn EventObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn emit(&self, event: KernelEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Publish Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Publish a block: derive its content hash, write the Appendix record
    /// and the empty DataInfo record under it, and return the hash.
    ///
    /// Both writes happen inside the single surrounding transaction, which
    /// commits them all-or-nothing; the kernel adds no compensation logic.
    pub async fn upload_block_appendix(
        &self,
        owner_account: &str,
        owner_address: Address,
        timestamp: i64,
        block_data: &[u8],
    ) -> Result<BlockHash> {
        if owner_account.is_empty() {
            return Err(KernelError::InvalidArguments(
                "ownerAccount must not be empty".to_string(),
            ));
        }
        if owner_address.as_str().is_empty() {
            return Err(KernelError::InvalidArguments(
                "ownerAddress must not be empty".to_string(),
            ));
        }

        if self.config.reject_reupload {
            let block_hash = BlockHash::digest(block_data);
            if self.appendixes.exists(&block_hash).await? {
                return Err(KernelError::AlreadyUploaded(block_hash));
            }
        }

        let block_hash = self
            .appendixes
            .upload(owner_account, owner_address, timestamp, block_data)
            .await?;
        self.permissions.lists().init(&block_hash).await?;

        debug!(block_hash = %block_hash, owner = %owner_account, "block published");
        self.emit(KernelEvent::AppendixUploaded { block_hash });
        Ok(block_hash)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the owner address recorded for a block hash.
    pub async fn get_owner_address(&self, block_hash: &BlockHash) -> Result<Address> {
        self.appendixes.owner_address(block_hash).await
    }

    /// Whether `address` was granted access to the block.
    pub async fn verify_access(&self, block_hash: &BlockHash, address: &Address) -> Result<bool> {
        self.permissions.verify_access(block_hash, address).await
    }

    /// Recompute `block_data`'s hash and verify it against the stored
    /// Appendix. `NotFound` if no block with that content was published.
    pub async fn verify_hash_value(&self, block_data: &[u8]) -> Result<bool> {
        self.integrity.verify_hash_value(block_data).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append `address` to the block's accept or reject list.
    pub async fn grant_or_deny_access(
        &self,
        block_hash: &BlockHash,
        address: Address,
        permission: Permission,
    ) -> Result<()> {
        if address.as_str().is_empty() {
            return Err(KernelError::InvalidArguments(
                "address must not be empty".to_string(),
            ));
        }

        self.permissions
            .grant_or_deny(block_hash, address.clone(), permission)
            .await?;

        self.emit(KernelEvent::AccessUpdated {
            block_hash: *block_hash,
            address,
            permission,
        });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Command Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Execute a typed command, mapping each variant to its handler.
    pub async fn execute(&self, command: Command) -> Result<CommandOutput> {
        match command {
            Command::UploadBlockAppendix {
                owner_account,
                owner_address,
                timestamp,
                block_data,
            } => {
                let hash = self
                    .upload_block_appendix(&owner_account, owner_address, timestamp, &block_data)
                    .await?;
                Ok(CommandOutput::Hash(hash))
            }
            Command::GetOwnerAddress { block_hash } => Ok(CommandOutput::OwnerAddress(
                self.get_owner_address(&block_hash).await?,
            )),
            Command::GrantOrDenyAccess {
                block_hash,
                address,
                permission,
            } => {
                self.grant_or_deny_access(&block_hash, address, permission)
                    .await?;
                Ok(CommandOutput::Done)
            }
            Command::VerifyAccess {
                block_hash,
                address,
            } => Ok(CommandOutput::Verified(
                self.verify_access(&block_hash, &address).await?,
            )),
            Command::VerifyHashValue { block_data } => Ok(CommandOutput::Verified(
                self.verify_hash_value(&block_data).await?,
            )),
        }
    }
}
