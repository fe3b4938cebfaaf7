//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the content-hash function and the storage-key layout,
//! so any change that would silently re-key existing ledger state fails
//! here first. Digests are the published BLAKE3 reference vectors.

use provenance_kernel_core::BlockHash;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Block payload.
    pub payload: &'static [u8],
    /// Expected block hash (64 lowercase hex characters).
    pub expected_hash: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty payload",
            payload: b"",
            expected_hash: "af1349b9f5f9a1a6a0404dee36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
        },
        GoldenVector {
            name: "abc payload",
            payload: b"abc",
            expected_hash: "6437b3ac38465133ffb63b75273a8db548c558465d79db03fd359c6cd5bd9d85",
        },
    ]
}

/// Verify every golden vector, returning the first mismatch.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let hash = BlockHash::digest(vector.payload);
        if hash.to_hex() != vector.expected_hash {
            return Err(format!(
                "vector {:?}: expected {}, got {}",
                vector.name,
                vector.expected_hash,
                hash.to_hex()
            ));
        }
    }
    Ok(())
}
