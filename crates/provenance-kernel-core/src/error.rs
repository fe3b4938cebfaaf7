//! Error types for the Provenance Kernel core.

use thiserror::Error;

/// Errors from core primitives: record codecs and hash parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encode(String),

    #[error("decoding error: {0}")]
    Decode(String),

    #[error("invalid block hash: {0}")]
    InvalidHash(String),
}
