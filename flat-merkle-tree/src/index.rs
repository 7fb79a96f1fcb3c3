//! Index arithmetic for a complete binary tree stored in level order.
//!
//! Root is 0, the children of `i` are `2i+1` and `2i+2`, and the leaves of a
//! tree with `padded` leaves occupy `padded - 1 .. 2 * padded - 1`.

/// Smallest power of two `>= n`, with `0` mapping to `1`.
pub fn next_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    n.next_power_of_two()
}

/// Position of the left child.
pub const fn left_child(index: usize) -> usize {
    2 * index + 1
}

/// Position of the right child.
pub const fn right_child(index: usize) -> usize {
    2 * index + 2
}

/// Parent position, `None` for the root.
pub const fn parent(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

/// Left children sit at odd positions.
pub const fn is_left_child(index: usize) -> bool {
    index % 2 == 1
}

/// The other child of this node's parent, `None` for the root.
pub const fn sibling(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else if is_left_child(index) {
        Some(index + 1)
    } else {
        Some(index - 1)
    }
}

/// Total number of nodes for a padded leaf count.
pub const fn node_count(padded_leaf_count: usize) -> usize {
    2 * padded_leaf_count - 1
}

/// Position of the first leaf for a padded leaf count.
pub const fn leaf_offset(padded_leaf_count: usize) -> usize {
    padded_leaf_count - 1
}

/// Number of levels above the leaves, which is also the proof length.
pub const fn depth(padded_leaf_count: usize) -> usize {
    padded_leaf_count.trailing_zeros() as usize
}
