use tracing::{debug, trace};

use crate::{
    hash::{node_hash, to_hex, CryptoHash, NULL_HASH},
    index,
    leaf::Leaf,
    proof::InclusionProof,
    MerkleTreeError,
};

/// Padded leaf count from which [`MerkleTree::par_new`] splits work across
/// threads. Smaller trees are built sequentially.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1024;

/// A binary Merkle tree stored as a flat level-order array.
///
/// Positions are indexed level-order (BFS): root=0, left child=2i+1, right
/// child=2i+2. Leaves are padded up to the next power of two by repeating
/// the digest of the last real leaf, so every internal level is full.
///
/// The tree never changes after construction. All read operations take
/// `&self` and can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct MerkleTree<T> {
    nodes: Vec<CryptoHash>,
    leaf_data: Vec<T>,
    leaf_offset: usize,
    leaf_count: usize,
    padded_leaf_count: usize,
}

impl<T: Leaf> MerkleTree<T> {
    /// Build a tree over `leaves`, in order.
    ///
    /// Fails with [`MerkleTreeError::EmptyInput`] if `leaves` is empty.
    pub fn new(leaves: Vec<T>) -> Result<Self, MerkleTreeError> {
        let mut tree = Self::allocate(leaves)?;
        let leaf_offset = tree.leaf_offset;
        hash_leaves(&tree.leaf_data, &mut tree.nodes[leaf_offset..]);
        for position in (0..leaf_offset).rev() {
            tree.nodes[position] = node_hash(
                &tree.nodes[index::left_child(position)],
                &tree.nodes[index::right_child(position)],
            );
        }
        tree.log_built();
        Ok(tree)
    }

    /// Build a tree from a borrowed slice of items.
    pub fn from_leaves(leaves: &[T]) -> Result<Self, MerkleTreeError>
    where
        T: Clone,
    {
        Self::new(leaves.to_vec())
    }

    /// Validate the input and lay out an unhashed node array for it.
    fn allocate(leaf_data: Vec<T>) -> Result<Self, MerkleTreeError> {
        if leaf_data.is_empty() {
            return Err(MerkleTreeError::EmptyInput);
        }
        let leaf_count = leaf_data.len();
        let padded_leaf_count = index::next_power_of_two(leaf_count);
        Ok(Self {
            nodes: vec![NULL_HASH; index::node_count(padded_leaf_count)],
            leaf_data,
            leaf_offset: index::leaf_offset(padded_leaf_count),
            leaf_count,
            padded_leaf_count,
        })
    }

    fn log_built(&self) {
        debug!(
            leaf_count = self.leaf_count,
            padded_leaf_count = self.padded_leaf_count,
            root = %to_hex(&self.root()),
            "built merkle tree"
        );
    }
}

#[cfg(feature = "parallel")]
impl<T: Leaf + Sync> MerkleTree<T> {
    /// Build a tree like [`MerkleTree::new`], hashing leaves and each level
    /// of the tree on the rayon thread pool.
    ///
    /// The resulting nodes are identical to the sequential build.
    pub fn par_new(leaves: Vec<T>) -> Result<Self, MerkleTreeError> {
        use rayon::prelude::*;

        if index::next_power_of_two(leaves.len()) < PARALLEL_THRESHOLD {
            return Self::new(leaves);
        }

        let mut tree = Self::allocate(leaves)?;
        let leaf_offset = tree.leaf_offset;
        {
            let (real, padding) = tree.nodes[leaf_offset..].split_at_mut(tree.leaf_count);
            real.par_iter_mut()
                .zip(tree.leaf_data.par_iter())
                .for_each(|(slot, leaf)| *slot = leaf.digest());
            if let Some(last) = real.last() {
                padding.fill(*last);
            }
        }

        // Level d holds positions [2^d - 1, 2^(d+1) - 1); its children are
        // the level that starts right after it.
        for depth in (0..tree.depth()).rev() {
            let level_start = (1usize << depth) - 1;
            let level_len = 1usize << depth;
            let (upper, lower) = tree.nodes.split_at_mut(level_start + level_len);
            upper[level_start..]
                .par_iter_mut()
                .zip(lower[..2 * level_len].par_chunks(2))
                .for_each(|(parent, children)| *parent = node_hash(&children[0], &children[1]));
        }

        tree.log_built();
        Ok(tree)
    }
}

impl<T> MerkleTree<T> {
    /// Root digest of the tree.
    pub fn root(&self) -> CryptoHash {
        self.nodes.first().copied().unwrap_or(NULL_HASH)
    }

    /// Root digest in lowercase hex, or an empty string for a tree without
    /// nodes.
    pub fn root_hex(&self) -> String {
        match self.nodes.first() {
            Some(root) => to_hex(root),
            None => String::new(),
        }
    }

    /// Sibling digests from the leaf at `index` up to, but excluding, the
    /// root.
    ///
    /// The proof always has [`depth`](Self::depth) entries. Only real leaves
    /// can be proved; padding slots are rejected with
    /// [`MerkleTreeError::IndexOutOfRange`].
    pub fn proof(&self, index: usize) -> Result<Vec<CryptoHash>, MerkleTreeError> {
        if index >= self.leaf_count {
            return Err(MerkleTreeError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count,
            });
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut position = self.leaf_offset + index;
        while let (Some(sibling), Some(parent)) =
            (index::sibling(position), index::parent(position))
        {
            proof.push(self.nodes[sibling]);
            position = parent;
        }

        trace!(index, siblings = proof.len(), "generated inclusion proof");
        Ok(proof)
    }

    /// Proof for the leaf at `index` bundled with the metadata needed to
    /// check it later.
    pub fn inclusion_proof(&self, index: usize) -> Result<InclusionProof, MerkleTreeError> {
        let siblings = self.proof(index)?;
        Ok(InclusionProof {
            leaf_index: index as u64,
            padded_leaf_count: self.padded_leaf_count as u64,
            siblings,
        })
    }

    /// Number of real (non-padding) leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of leaf slots including padding, always a power of two.
    pub fn padded_leaf_count(&self) -> usize {
        self.padded_leaf_count
    }

    /// Position of the first leaf in [`nodes`](Self::nodes).
    pub fn leaf_offset(&self) -> usize {
        self.leaf_offset
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        index::depth(self.padded_leaf_count)
    }

    /// All node digests in level order.
    pub fn nodes(&self) -> &[CryptoHash] {
        &self.nodes
    }

    /// Digest at a level-order position.
    pub fn node(&self, position: usize) -> Option<&CryptoHash> {
        self.nodes.get(position)
    }

    /// The items the tree was built from.
    pub fn leaf_data(&self) -> &[T] {
        &self.leaf_data
    }

    /// Original item at `index`.
    pub fn leaf(&self, index: usize) -> Option<&T> {
        self.leaf_data.get(index)
    }

    /// Digest stored for the real leaf at `index`.
    pub fn leaf_hash(&self, index: usize) -> Option<CryptoHash> {
        if index >= self.leaf_count {
            return None;
        }
        self.nodes.get(self.leaf_offset + index).copied()
    }
}

#[cfg(test)]
impl<T> MerkleTree<T> {
    /// A tree holding no nodes at all, which `new` can never produce.
    pub(crate) fn without_nodes() -> Self {
        Self {
            nodes: Vec::new(),
            leaf_data: Vec::new(),
            leaf_offset: 0,
            leaf_count: 0,
            padded_leaf_count: 0,
        }
    }
}

/// Hash real leaves into the first slots and repeat the last digest over the
/// padding slots.
fn hash_leaves<T: Leaf>(leaves: &[T], slots: &mut [CryptoHash]) {
    let (real, padding) = slots.split_at_mut(leaves.len());
    for (slot, leaf) in real.iter_mut().zip(leaves) {
        *slot = leaf.digest();
    }
    if let Some(last) = real.last() {
        padding.fill(*last);
    }
}
