//! The two persisted records: `Appendix` and `DataInfo`.
//!
//! Both are created together at upload time, keyed by the same block hash.
//! The Appendix is immutable thereafter; the DataInfo is the only record
//! later mutated (list append). Neither is ever deleted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Address, BlockHash};

/// Immutable provenance record binding an owner to a block hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appendix {
    /// String identifier of the publishing owner.
    pub owner_account: String,

    /// Unix seconds at publish time.
    pub data_timestamp: i64,

    /// The block's content hash. Duplicates the storage key on purpose:
    /// integrity verification compares against this stored field.
    pub block_hash: BlockHash,

    /// Address/public identifier of the owner, supplied at publish time.
    pub owner_address: Address,
}

impl Appendix {
    /// Serialize to the persisted JSON encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(|e| CoreError::Encode(e.to_string()))
    }

    /// Deserialize from stored bytes. Stored data is untrusted input:
    /// malformed bytes surface as an error, never a panic.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::Decode(e.to_string()))
    }
}

/// Mutable record of which consumer addresses were granted or denied
/// access to a block.
///
/// Created empty alongside the Appendix. Appends are not deduplicated;
/// repeated grants produce repeated entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataInfo {
    /// Addresses explicitly granted access, in grant order.
    pub accept_list: Vec<Address>,

    /// Addresses explicitly denied access, in denial order.
    pub reject_list: Vec<Address>,
}

impl DataInfo {
    /// The empty record written at upload time.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append an address to the list selected by `permission`.
    pub fn record(&mut self, address: Address, permission: Permission) {
        match permission {
            Permission::Granted => self.accept_list.push(address),
            Permission::Denied => self.reject_list.push(address),
        }
    }

    /// Whether `address` appears in the accept list.
    ///
    /// The reject list is deliberately not consulted: absence from the
    /// accept list means "not verified", not "explicitly denied".
    pub fn is_accepted(&self, address: &Address) -> bool {
        self.accept_list.iter().any(|a| a == address)
    }

    /// Whether `address` appears in the list opposite to `permission`.
    pub fn on_opposite_list(&self, address: &Address, permission: Permission) -> bool {
        let other = match permission {
            Permission::Granted => &self.reject_list,
            Permission::Denied => &self.accept_list,
        };
        other.iter().any(|a| a == address)
    }

    /// Serialize to the persisted JSON encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(|e| CoreError::Encode(e.to_string()))
    }

    /// Deserialize from stored bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::Decode(e.to_string()))
    }
}

/// The two permission outcomes recorded for a consumer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Record the address in the accept list.
    Granted,
    /// Record the address in the reject list.
    Denied,
}
