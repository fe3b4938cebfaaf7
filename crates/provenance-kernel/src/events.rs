//! Post-mutation event notification.
//!
//! Observers are a side channel for parties that want to react to
//! successful mutations (indexers, notifiers). They carry no semantic
//! weight: core correctness never depends on whether an observer is
//! registered or what it does.

use provenance_kernel_core::{Address, BlockHash, Permission};

/// A successful mutation, reported after the kernel's writes succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelEvent {
    /// An Appendix and its empty DataInfo were written.
    AppendixUploaded { block_hash: BlockHash },

    /// An address was appended to an access list.
    AccessUpdated {
        block_hash: BlockHash,
        address: Address,
        permission: Permission,
    },
}

impl KernelEvent {
    /// Short event name, matching the mutation that produced it.
    pub fn name(&self) -> &'static str {
        match self {
            KernelEvent::AppendixUploaded { .. } => "AppendixUploaded",
            KernelEvent::AccessUpdated { permission, .. } => match permission {
                Permission::Granted => "AccessGranted",
                Permission::Denied => "AccessDenied",
            },
        }
    }
}

/// Callback invoked after each successful mutation.
///
/// Invoked synchronously on the calling task; implementations should be
/// cheap and must not call back into the kernel.
pub trait EventObserver: Send + Sync {
    fn on_event(&self, event: &KernelEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let hash = BlockHash::digest(b"x");
        assert_eq!(
            KernelEvent::AppendixUploaded { block_hash: hash }.name(),
            "AppendixUploaded"
        );
        assert_eq!(
            KernelEvent::AccessUpdated {
                block_hash: hash,
                address: Address::new("0xC1"),
                permission: Permission::Denied,
            }
            .name(),
            "AccessDenied"
        );
    }
}
