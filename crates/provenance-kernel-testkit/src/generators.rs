//! Proptest generators for property-based testing.

use proptest::prelude::*;

use provenance_kernel_core::{Address, Appendix, BlockHash, ObjectType, Permission};

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate an address ("0x" plus 1-16 hex characters).
pub fn address() -> impl Strategy<Value = Address> {
    "0x[0-9a-fA-F]{1,16}".prop_map(Address::new)
}

/// Generate an owner account name.
pub fn owner_account() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// Generate either permission.
pub fn permission() -> impl Strategy<Value = Permission> {
    prop_oneof![Just(Permission::Granted), Just(Permission::Denied)]
}

/// Generate either object type.
pub fn object_type() -> impl Strategy<Value = ObjectType> {
    prop_oneof![Just(ObjectType::Appendix), Just(ObjectType::DataInfo)]
}

/// Parameters for building an Appendix record.
#[derive(Debug, Clone)]
pub struct AppendixParams {
    pub owner_account: String,
    pub owner_address: Address,
    pub timestamp: i64,
    pub payload: Vec<u8>,
}

impl Arbitrary for AppendixParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (owner_account(), address(), timestamp(), payload(1000))
            .prop_map(|(owner_account, owner_address, timestamp, payload)| AppendixParams {
                owner_account,
                owner_address,
                timestamp,
                payload,
            })
            .boxed()
    }
}

/// Build the Appendix an upload of these parameters would persist.
pub fn appendix_from_params(params: &AppendixParams) -> Appendix {
    Appendix {
        owner_account: params.owner_account.clone(),
        data_timestamp: params.timestamp,
        block_hash: BlockHash::digest(&params.payload),
        owner_address: params.owner_address.clone(),
    }
}
