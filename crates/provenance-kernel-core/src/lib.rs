//! # Provenance Kernel Core
//!
//! Pure primitives for the Provenance Kernel: block hashes, storage keys,
//! and the two persisted records.
//!
//! This crate contains no I/O and no ledger access. It is pure computation
//! over hash-identified provenance data.
//!
//! ## Key Types
//!
//! - [`BlockHash`] - Content-addressed block identity (256-bit digest, hex)
//! - [`Appendix`] - Immutable provenance record (owner, timestamp, hash)
//! - [`DataInfo`] - Mutable accept/reject consumer-address lists
//! - [`Permission`] - Grant or deny outcome for a consumer address
//!
//! ## Storage keys
//!
//! Records are keyed by `objectType + "_" + blockHash`. See [`key`] module.

pub mod error;
pub mod key;
pub mod record;
pub mod types;

pub use error::CoreError;
pub use key::{storage_key, ObjectType, KEY_SEPARATOR};
pub use record::{Appendix, DataInfo, Permission};
pub use types::{Address, BlockHash};
