//! # Provenance Kernel Testkit
//!
//! Testing utilities for the Provenance Kernel.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned hashes and storage keys, so key-layout drift
//!   is caught before it corrupts a ledger
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use provenance_kernel_testkit::fixtures::TestFixture;
//! use provenance_kernel::Address;
//!
//! # async fn example() {
//! let fixture = TestFixture::new();
//! let hash = fixture
//!     .upload_and_grant(b"payload", &Address::new("0xC1"))
//!     .await
//!     .unwrap();
//! # }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use provenance_kernel_testkit::generators::{appendix_from_params, AppendixParams};
//!
//! proptest! {
//!     #[test]
//!     fn appendix_encoding_roundtrips(params: AppendixParams) {
//!         let appendix = appendix_from_params(&params);
//!         let bytes = appendix.to_bytes().unwrap();
//!         prop_assert_eq!(
//!             provenance_kernel::Appendix::from_bytes(&bytes).unwrap(),
//!             appendix
//!         );
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{consumer_addresses, random_payload, RecordingObserver, TestFixture};
pub use generators::{appendix_from_params, AppendixParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
