//! # Provenance Kernel
//!
//! Provenance and consumer access permissions for hash-identified data
//! blocks, recorded in a replicated transactional key-value ledger.
//!
//! ## Overview
//!
//! A data owner publishes a block; the kernel derives its content hash,
//! stores an [`Appendix`] binding owner identity and timestamp to that
//! hash, and maintains a mutable [`DataInfo`] of granted/denied consumer
//! addresses. Any party can later verify a block's integrity or a
//! consumer's access status.
//!
//! ## Key Concepts
//!
//! - **BlockHash**: content digest, the primary key for both records.
//! - **Appendix**: immutable. Written once per block hash at publish time.
//! - **DataInfo**: the only record later mutated (list append). Nothing is
//!   ever deleted; the ledger is append-only at this layer.
//! - **Transaction boundary**: one invocation = one externally supplied,
//!   atomically committed transaction. Commit conflicts surface as the
//!   retryable [`KernelError::Conflict`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use provenance_kernel::{Kernel, KernelConfig};
//! use provenance_kernel::core::{Address, Permission};
//! use provenance_kernel::ledger::MemoryLedger;
//!
//! async fn example() {
//!     let kernel = Kernel::new(MemoryLedger::new(), KernelConfig::default());
//!
//!     let hash = kernel
//!         .upload_block_appendix("alice", Address::new("0xA1"), 1_700_000_000, b"payload")
//!         .await
//!         .unwrap();
//!
//!     kernel
//!         .grant_or_deny_access(&hash, Address::new("0xC1"), Permission::Granted)
//!         .await
//!         .unwrap();
//!
//!     assert!(kernel.verify_access(&hash, &Address::new("0xC1")).await.unwrap());
//! }
//! ```

pub mod access;
pub mod appendix;
pub mod command;
pub mod error;
pub mod events;
pub mod kernel;
pub mod verify;

// Re-export component crates
pub use provenance_kernel_core as core;
pub use provenance_kernel_ledger as ledger;

// Re-export main types for convenience
pub use access::{AccessListStore, PermissionEngine};
pub use appendix::AppendixStore;
pub use command::{Command, CommandOutput};
pub use error::{KernelError, Result};
pub use events::{EventObserver, KernelEvent};
pub use kernel::{Kernel, KernelConfig};
pub use verify::IntegrityVerifier;

// Re-export commonly used core types
pub use provenance_kernel_core::{Address, Appendix, BlockHash, DataInfo, Permission};
