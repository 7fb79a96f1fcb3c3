//! SHA-256 digests for leaves and internal nodes.

use sha2::{Digest, Sha256};

use crate::MerkleTreeError;

/// The length of a digest (in bytes).
pub const HASH_LENGTH: usize = 32;
/// Length of two concatenated digests.
pub const HASH_LENGTH_X2: usize = 64;

/// A SHA-256 digest.
pub type CryptoHash = [u8; HASH_LENGTH];

/// A zero-filled digest.
pub const NULL_HASH: CryptoHash = [0; HASH_LENGTH];

/// Hash the serialized bytes of a single leaf item.
pub fn leaf_hash(bytes: &[u8]) -> CryptoHash {
    Sha256::digest(bytes).into()
}

/// Hash two child digests into their parent: `sha256(left || right)`.
///
/// The raw 32-byte digests are concatenated, never their hex forms.
pub fn node_hash(left: &CryptoHash, right: &CryptoHash) -> CryptoHash {
    let mut input = [0u8; HASH_LENGTH_X2];
    input[..HASH_LENGTH].copy_from_slice(left);
    input[HASH_LENGTH..].copy_from_slice(right);
    Sha256::digest(input).into()
}

/// Lowercase hex display form of a digest.
pub fn to_hex(hash: &CryptoHash) -> String {
    hex::encode(hash)
}

/// Parse a digest from its 64-character hex form.
pub fn from_hex(encoded: &str) -> Result<CryptoHash, MerkleTreeError> {
    let mut hash = [0u8; HASH_LENGTH];
    hex::decode_to_slice(encoded, &mut hash).map_err(|e| {
        MerkleTreeError::InvalidDigest(format!("{:?} is not a 32-byte hex digest: {}", encoded, e))
    })?;
    Ok(hash)
}
