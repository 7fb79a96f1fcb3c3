//! Items that can be placed in a tree.

use crate::hash::{leaf_hash, CryptoHash};

/// An item with a canonical byte serialization.
///
/// Byte buffers serialize as themselves and text serializes as its UTF-8
/// encoding, so `"abc"` and `b"abc"` produce the same leaf.
pub trait Leaf {
    /// Bytes fed to the leaf hash.
    fn leaf_bytes(&self) -> &[u8];

    /// Leaf digest of this item.
    fn digest(&self) -> CryptoHash {
        leaf_hash(self.leaf_bytes())
    }
}

impl Leaf for [u8] {
    fn leaf_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> Leaf for [u8; N] {
    fn leaf_bytes(&self) -> &[u8] {
        self
    }
}

impl Leaf for Vec<u8> {
    fn leaf_bytes(&self) -> &[u8] {
        self
    }
}

impl Leaf for str {
    fn leaf_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Leaf for String {
    fn leaf_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<T: Leaf + ?Sized> Leaf for &T {
    fn leaf_bytes(&self) -> &[u8] {
        (**self).leaf_bytes()
    }
}
