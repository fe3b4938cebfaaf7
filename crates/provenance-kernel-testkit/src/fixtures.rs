//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Mutex};

use rand::RngCore;

use provenance_kernel::{
    EventObserver, Kernel, KernelConfig, KernelEvent, Result,
};
use provenance_kernel_core::{Address, BlockHash, Permission};
use provenance_kernel_ledger::MemoryLedger;

/// A test fixture with a kernel over a fresh in-memory ledger.
pub struct TestFixture {
    pub ledger: MemoryLedger,
    pub kernel: Kernel<MemoryLedger>,
}

impl TestFixture {
    /// Create a fixture with the default (permissive) configuration.
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    /// Create a fixture with an explicit configuration.
    pub fn with_config(config: KernelConfig) -> Self {
        let ledger = MemoryLedger::new();
        Self {
            kernel: Kernel::new(ledger.clone(), config),
            ledger,
        }
    }

    /// Publish a block for the canonical test owner and return its hash.
    pub async fn upload(&self, block_data: &[u8]) -> Result<BlockHash> {
        self.kernel
            .upload_block_appendix("alice", Address::new("0xA1"), 1_700_000_000, block_data)
            .await
    }

    /// Publish a block and grant one consumer access to it.
    pub async fn upload_and_grant(
        &self,
        block_data: &[u8],
        consumer: &Address,
    ) -> Result<BlockHash> {
        let hash = self.upload(block_data).await?;
        self.kernel
            .grant_or_deny_access(&hash, consumer.clone(), Permission::Granted)
            .await?;
        Ok(hash)
    }

    /// A second kernel over the same ledger, as another invoker would see it.
    pub fn another_kernel(&self) -> Kernel<MemoryLedger> {
        Kernel::new(self.ledger.clone(), KernelConfig::default())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An observer that records every event it sees, for assertions.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<KernelEvent>>,
}

impl RecordingObserver {
    /// Create a shared recorder plus a fixture whose kernel reports to it.
    pub fn fixture() -> (Arc<Self>, TestFixture) {
        let observer = Arc::new(Self::default());
        let ledger = MemoryLedger::new();
        let kernel = Kernel::new(ledger.clone(), KernelConfig::default())
            .with_observer(Arc::clone(&observer) as Arc<dyn EventObserver>);
        (observer, TestFixture { ledger, kernel })
    }

    /// All events recorded so far, in order.
    pub fn events(&self) -> Vec<KernelEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventObserver for RecordingObserver {
    fn on_event(&self, event: &KernelEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Random payload bytes of the given length.
pub fn random_payload(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// Distinct consumer addresses ("0xC0", "0xC1", ...) for multi-party tests.
pub fn consumer_addresses(count: usize) -> Vec<Address> {
    (0..count).map(|i| Address::new(format!("0xC{i}"))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_upload_and_grant() {
        let fixture = TestFixture::new();
        let consumer = Address::new("0xC1");

        let hash = fixture.upload_and_grant(b"payload", &consumer).await.unwrap();

        assert!(fixture.kernel.verify_access(&hash, &consumer).await.unwrap());
        assert_eq!(
            fixture.kernel.get_owner_address(&hash).await.unwrap(),
            Address::new("0xA1")
        );
    }

    #[tokio::test]
    async fn test_another_kernel_shares_the_ledger() {
        let fixture = TestFixture::new();
        let hash = fixture.upload(b"shared").await.unwrap();

        let other = fixture.another_kernel();
        assert!(other.verify_hash_value(b"shared").await.unwrap());
        assert_eq!(
            other.get_owner_address(&hash).await.unwrap(),
            Address::new("0xA1")
        );
    }

    #[tokio::test]
    async fn test_recording_observer() {
        let (observer, fixture) = RecordingObserver::fixture();
        let hash = fixture.upload(b"observed").await.unwrap();

        let events = observer.events();
        assert_eq!(events, vec![KernelEvent::AppendixUploaded { block_hash: hash }]);
    }

    #[test]
    fn test_consumer_addresses_are_distinct() {
        let addrs = consumer_addresses(4);
        assert_eq!(addrs.len(), 4);
        assert_ne!(addrs[0], addrs[3]);
    }
}
