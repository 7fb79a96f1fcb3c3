//! Binary Merkle tree over an ordered sequence of items, using SHA-256.
//!
//! Every node of a complete binary tree lives in one flat array in level
//! order: the root at position 0 and the children of `i` at `2i+1` and
//! `2i+2`. The leaf count is padded to the next power of two by repeating the
//! digest of the last item, and internal nodes hash
//!
//! `sha256(left || right)`
//!
//! over the raw 32-byte child digests.
//!
//! ```
//! use flat_merkle_tree::{verify_proof, MerkleTree};
//!
//! let tree = MerkleTree::new(vec!["a", "b", "c", "d"]).expect("non-empty input");
//! let proof = tree.proof(2).expect("index in range");
//! assert!(verify_proof("c", &proof, &tree.root(), 2));
//! assert!(!verify_proof("x", &proof, &tree.root(), 2));
//! ```

#![warn(missing_docs)]

mod error;
pub mod hash;
pub mod index;
mod leaf;
mod proof;
mod tree;
#[cfg(feature = "visualize")]
mod visualize;


pub use error::MerkleTreeError;
pub use hash::{from_hex, to_hex, CryptoHash, HASH_LENGTH};
pub use leaf::Leaf;
pub use proof::{compute_root, verify_proof, InclusionProof};
#[cfg(feature = "parallel")]
pub use tree::PARALLEL_THRESHOLD;
pub use tree::MerkleTree;
