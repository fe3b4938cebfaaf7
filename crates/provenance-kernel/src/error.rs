//! Error types for the Kernel.

use provenance_kernel_core::{Address, BlockHash, ObjectType};
use provenance_kernel_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during Kernel operations.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Malformed or incomplete call, detected before any ledger access.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An expected record is absent from the ledger.
    #[error("the {object_type} of block hash {block_hash} does not exist")]
    NotFound {
        object_type: ObjectType,
        block_hash: BlockHash,
    },

    /// Stored bytes fail to decode against the expected record schema.
    #[error("serialization error for key {key}: {reason}")]
    Serialization { key: String, reason: String },

    /// Underlying ledger read/write failure.
    #[error("storage error: {0}")]
    Storage(LedgerError),

    /// Optimistic-concurrency commit conflict. Retryable by the caller
    /// from a fresh read; not an application error.
    #[error("commit conflict on key {key}, retry the invocation")]
    Conflict { key: String },

    /// An Appendix already exists for this block hash.
    /// Only raised when [`KernelConfig::reject_reupload`] is set.
    ///
    /// [`KernelConfig::reject_reupload`]: crate::KernelConfig::reject_reupload
    #[error("appendix already uploaded for block hash {0}")]
    AlreadyUploaded(BlockHash),

    /// The address is already on the opposite access list.
    /// Only raised when [`KernelConfig::reject_dual_listing`] is set.
    ///
    /// [`KernelConfig::reject_dual_listing`]: crate::KernelConfig::reject_dual_listing
    #[error("address {address} is already on the opposite list for block hash {block_hash}")]
    DualListing {
        address: Address,
        block_hash: BlockHash,
    },
}

impl KernelError {
    /// Whether the caller may retry the whole invocation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, KernelError::Conflict { .. })
    }
}

impl From<LedgerError> for KernelError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Conflict { key } => KernelError::Conflict { key },
            other => KernelError::Storage(other),
        }
    }
}

/// Result type for Kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_retryable() {
        let err = KernelError::from(LedgerError::Conflict {
            key: "dataInfo_ab".to_string(),
        });
        assert!(err.is_retryable());
        assert!(matches!(err, KernelError::Conflict { .. }));
    }

    #[test]
    fn test_other_ledger_errors_map_to_storage() {
        let err = KernelError::from(LedgerError::Storage {
            key: "k".to_string(),
            reason: "disk on fire".to_string(),
        });
        assert!(!err.is_retryable());
        assert!(matches!(err, KernelError::Storage(_)));
    }
}
