//! Inclusion proof verification.
//!
//! Verification is a pure function of the claimed item, its claimed leaf
//! index, the sibling digests and the expected root. No tree instance is
//! needed, so proofs received from untrusted peers can be checked directly.
//!
//! A mismatch of any kind is reported as `false`, never as an error.

use bincode::{Decode, Encode};
use tracing::trace;

use crate::{
    hash::{node_hash, to_hex, CryptoHash},
    leaf::Leaf,
    MerkleTreeError,
};

#[cfg(test)]
mod tests;

/// Upper bound on the encoded size of an [`InclusionProof`]. A proof for a
/// tree of `2^64` leaves stays well below this.
const MAX_ENCODED_PROOF_BYTES: usize = 4 * 1024;

/// Recompute the root implied by `item` sitting at leaf `index` with the
/// given sibling digests.
///
/// At each level the parity of the halved leaf index decides the order: an
/// even index is a left child and hashes as `H(current || sibling)`, an odd
/// index is a right child and hashes as `H(sibling || current)`.
pub fn compute_root<T: Leaf + ?Sized>(item: &T, proof: &[CryptoHash], index: usize) -> CryptoHash {
    let mut hash = item.digest();
    let mut index = index;
    for sibling in proof {
        hash = if index % 2 == 0 {
            node_hash(&hash, sibling)
        } else {
            node_hash(sibling, &hash)
        };
        index /= 2;
    }
    hash
}

/// Check that `item` is the leaf at `index` of the tree with root `root`.
///
/// A proof of `k` siblings describes a tree of `2^k` leaf slots, so an index
/// with any bit set at or above `k` is rejected.
pub fn verify_proof<T: Leaf + ?Sized>(
    item: &T,
    proof: &[CryptoHash],
    root: &CryptoHash,
    index: usize,
) -> bool {
    // Proofs of usize::BITS or more siblings put no bound on the index
    let beyond_tree = u32::try_from(proof.len())
        .ok()
        .and_then(|depth| index.checked_shr(depth))
        .unwrap_or(0);
    if beyond_tree != 0 {
        trace!(
            index,
            siblings = proof.len(),
            "leaf index lies outside a tree of this depth"
        );
        return false;
    }

    let computed = compute_root(item, proof, index);
    if &computed != root {
        trace!(
            index,
            expected = %to_hex(root),
            computed = %to_hex(&computed),
            "inclusion proof does not match root"
        );
        return false;
    }
    true
}

/// A self-describing inclusion proof for one leaf.
///
/// Carries the leaf index and padded leaf count alongside the siblings so the
/// shape of the proof can be checked before any hashing.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct InclusionProof {
    /// Index of the proved leaf.
    pub leaf_index: u64,
    /// Leaf slots of the tree including padding (a power of two).
    pub padded_leaf_count: u64,
    /// Sibling digests ordered from the leaf level up to below the root.
    pub siblings: Vec<CryptoHash>,
}

impl InclusionProof {
    /// Verify the proof for `item` against `root`.
    ///
    /// Returns `false` for a malformed proof as well as for a mismatch.
    pub fn verify<T: Leaf + ?Sized>(&self, item: &T, root: &CryptoHash) -> bool {
        if let Err(e) = self.validate_shape() {
            trace!(error = %e, "rejecting malformed inclusion proof");
            return false;
        }
        match usize::try_from(self.leaf_index) {
            Ok(index) => verify_proof(item, &self.siblings, root, index),
            Err(_) => false,
        }
    }

    /// Number of sibling digests a proof for this tree size must contain.
    pub fn expected_len(&self) -> Option<usize> {
        if !self.padded_leaf_count.is_power_of_two() {
            return None;
        }
        Some(self.padded_leaf_count.trailing_zeros() as usize)
    }

    fn validate_shape(&self) -> Result<(), MerkleTreeError> {
        let expected_len = self.expected_len().ok_or_else(|| {
            MerkleTreeError::InvalidProof(format!(
                "padded leaf count {} is not a power of two",
                self.padded_leaf_count
            ))
        })?;
        if self.leaf_index >= self.padded_leaf_count {
            return Err(MerkleTreeError::InvalidProof(format!(
                "leaf index {} is outside a tree of {} leaves",
                self.leaf_index, self.padded_leaf_count
            )));
        }
        if self.siblings.len() != expected_len {
            return Err(MerkleTreeError::InvalidProof(format!(
                "expected {} siblings, got {}",
                expected_len,
                self.siblings.len()
            )));
        }
        Ok(())
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleTreeError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes and proofs whose shape is inconsistent.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleTreeError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleTreeError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        proof.validate_shape()?;
        Ok(proof)
    }
}
