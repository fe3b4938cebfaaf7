//! # Provenance Kernel Ledger
//!
//! The boundary to the external transactional key-value ledger, plus two
//! bundled implementations.
//!
//! ## Overview
//!
//! The kernel never talks to storage directly; it is handed a [`Ledger`]
//! scoped to one externally managed, atomically committed transaction per
//! invocation. Consensus, replication, and durability live behind this
//! trait and are deliberately not modeled here.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async get/put trait the kernel requires
//! - [`MemoryLedger`] / [`MemoryTransaction`] - In-memory ledger with
//!   optimistic-concurrency transactions, for tests
//! - [`SqliteLedger`] - Durable single-node implementation
//! - [`LedgerError`] - Error taxonomy, with [`LedgerError::Conflict`] as
//!   the retryable class
//!
//! ## Concurrency contract
//!
//! Two invocations mutating the same key race. Hosts with optimistic
//! concurrency control abort the losing transaction at commit; that
//! surfaces here as [`LedgerError::Conflict`], which callers retry from a
//! fresh read. The memory implementation reproduces exactly this behavior.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{LedgerError, Result};
pub use memory::{MemoryLedger, MemoryTransaction};
pub use sqlite::SqliteLedger;
pub use traits::Ledger;
