use thiserror::Error;

/// Errors from Merkle tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// Construction was attempted with zero items.
    #[error("cannot create tree with empty data")]
    EmptyInput,
    /// A proof was requested for a position that holds no real leaf.
    #[error("index {index} out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// The requested leaf index.
        index: usize,
        /// Number of real leaves in the tree.
        leaf_count: usize,
    },
    /// An encoded proof could not be decoded or has an inconsistent shape.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    /// A textual digest is not 64 hex characters.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}
