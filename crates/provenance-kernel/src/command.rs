//! Typed command surface.
//!
//! Callers that receive operations as a function name plus positional
//! string arguments (the usual shape of a chaincode/RPC invocation) parse
//! them into a [`Command`] first. Parsing performs all arity and shape
//! validation, so `InvalidArguments` fires before any ledger access.

use bytes::Bytes;

use provenance_kernel_core::{Address, BlockHash, Permission};

use crate::error::{KernelError, Result};

/// One kernel invocation, fully typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Publish a block: write its Appendix and empty DataInfo.
    UploadBlockAppendix {
        owner_account: String,
        owner_address: Address,
        timestamp: i64,
        block_data: Bytes,
    },

    /// Read the owner address recorded for a block hash.
    GetOwnerAddress { block_hash: BlockHash },

    /// Append a consumer address to the accept or reject list.
    GrantOrDenyAccess {
        block_hash: BlockHash,
        address: Address,
        permission: Permission,
    },

    /// Check whether a consumer address was granted access.
    VerifyAccess {
        block_hash: BlockHash,
        address: Address,
    },

    /// Recompute a payload's hash and verify it against the ledger.
    VerifyHashValue { block_data: Bytes },
}

/// Result of executing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Block hash returned by an upload.
    Hash(BlockHash),
    /// Owner address returned by a lookup.
    OwnerAddress(Address),
    /// Outcome of an access or integrity check.
    Verified(bool),
    /// Mutation with no return value.
    Done,
}

impl Command {
    /// The operation name each variant answers to.
    pub fn name(&self) -> &'static str {
        match self {
            Command::UploadBlockAppendix { .. } => "UploadBlockAppendix",
            Command::GetOwnerAddress { .. } => "GetOwnerAddress",
            Command::GrantOrDenyAccess { .. } => "GrantOrDenyAccess",
            Command::VerifyAccess { .. } => "VerifyAccess",
            Command::VerifyHashValue { .. } => "VerifyHashValue",
        }
    }

    /// Parse an operation name and positional string arguments.
    ///
    /// Fails with `InvalidArguments` on unknown names, wrong arity, or
    /// malformed argument values. Never touches the ledger.
    pub fn parse(name: &str, args: &[&str]) -> Result<Self> {
        match name {
            "UploadBlockAppendix" => {
                let [owner_account, owner_address, timestamp, block_data] = expect_args(name, args)?;
                if owner_account.is_empty() {
                    return Err(KernelError::InvalidArguments(
                        "ownerAccount must not be empty".to_string(),
                    ));
                }
                if owner_address.is_empty() {
                    return Err(KernelError::InvalidArguments(
                        "ownerAddress must not be empty".to_string(),
                    ));
                }
                let timestamp: i64 = timestamp.parse().map_err(|_| {
                    KernelError::InvalidArguments(format!(
                        "timestamp is not an integer: {timestamp:?}"
                    ))
                })?;
                Ok(Command::UploadBlockAppendix {
                    owner_account: owner_account.to_string(),
                    owner_address: Address::new(owner_address),
                    timestamp,
                    block_data: Bytes::copy_from_slice(block_data.as_bytes()),
                })
            }
            "GetOwnerAddress" => {
                let [block_hash] = expect_args(name, args)?;
                Ok(Command::GetOwnerAddress {
                    block_hash: parse_hash(block_hash)?,
                })
            }
            "GrantOrDenyAccess" => {
                let [block_hash, address, permission] = expect_args(name, args)?;
                Ok(Command::GrantOrDenyAccess {
                    block_hash: parse_hash(block_hash)?,
                    address: parse_address(address)?,
                    permission: parse_permission(permission)?,
                })
            }
            "VerifyAccess" => {
                let [block_hash, address] = expect_args(name, args)?;
                Ok(Command::VerifyAccess {
                    block_hash: parse_hash(block_hash)?,
                    address: parse_address(address)?,
                })
            }
            "VerifyHashValue" => {
                let [block_data] = expect_args(name, args)?;
                Ok(Command::VerifyHashValue {
                    block_data: Bytes::copy_from_slice(block_data.as_bytes()),
                })
            }
            other => Err(KernelError::InvalidArguments(format!(
                "unknown operation: {other:?}"
            ))),
        }
    }
}

fn expect_args<'a, const N: usize>(name: &str, args: &[&'a str]) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| {
        KernelError::InvalidArguments(format!(
            "{name} expects {N} argument(s), got {}",
            args.len()
        ))
    })
}

fn parse_hash(s: &str) -> Result<BlockHash> {
    BlockHash::from_hex(s)
        .map_err(|e| KernelError::InvalidArguments(format!("malformed block hash: {e}")))
}

fn parse_address(s: &str) -> Result<Address> {
    if s.is_empty() {
        return Err(KernelError::InvalidArguments(
            "address must not be empty".to_string(),
        ));
    }
    Ok(Address::new(s))
}

/// `1`/`granted` records in the accept list, `0`/`denied` in the reject
/// list. `1`/`0` are the numeric wire forms accepted on the string surface.
fn parse_permission(s: &str) -> Result<Permission> {
    match s {
        "1" | "granted" => Ok(Permission::Granted),
        "0" | "denied" => Ok(Permission::Denied),
        other => Err(KernelError::InvalidArguments(format!(
            "malformed permission: {other:?}"
        ))),
    }
}
