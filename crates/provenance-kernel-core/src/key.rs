//! Storage-key derivation.
//!
//! Every record lives under `objectType + "_" + blockHash`. The derivation
//! must be injective: object-type tags are fixed, disjoint, and never
//! contain the separator, so no two distinct (objectType, blockHash) pairs
//! collide on the same key.

use std::fmt;

use crate::types::BlockHash;

/// Separator between the object-type tag and the hex hash.
pub const KEY_SEPARATOR: char = '_';

/// The kinds of record stored per block hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Immutable provenance record.
    Appendix,
    /// Mutable accept/reject list record.
    DataInfo,
}

impl ObjectType {
    /// The fixed tag used in storage keys. Must never contain [`KEY_SEPARATOR`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Appendix => "appendix",
            ObjectType::DataInfo => "dataInfo",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construct the ledger key for a record.
///
/// Pure and injective: e.g. `storage_key(Appendix, h)` yields
/// `"appendix_<64 hex chars>"`.
pub fn storage_key(object_type: ObjectType, block_hash: &BlockHash) -> String {
    format!("{}{}{}", object_type.as_str(), KEY_SEPARATOR, block_hash.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_format() {
        let hash = BlockHash::from_bytes([0x11; 32]);
        assert_eq!(
            storage_key(ObjectType::Appendix, &hash),
            format!("appendix_{}", "11".repeat(32))
        );
        assert_eq!(
            storage_key(ObjectType::DataInfo, &hash),
            format!("dataInfo_{}", "11".repeat(32))
        );
    }

    #[test]
    fn test_tags_never_contain_separator() {
        for ot in [ObjectType::Appendix, ObjectType::DataInfo] {
            assert!(!ot.as_str().contains(KEY_SEPARATOR));
        }
    }

    proptest! {
        #[test]
        fn test_key_derivation_injective(a: [u8; 32], b: [u8; 32]) {
            let ha = BlockHash::from_bytes(a);
            let hb = BlockHash::from_bytes(b);

            // Different object types never collide, even on the same hash.
            prop_assert_ne!(
                storage_key(ObjectType::Appendix, &ha),
                storage_key(ObjectType::DataInfo, &ha)
            );

            // Same object type collides only when the hashes are equal.
            let same = storage_key(ObjectType::Appendix, &ha)
                == storage_key(ObjectType::Appendix, &hb);
            prop_assert_eq!(same, a == b);
        }
    }
}
