//! History tree over leaf byte strings.
//!
//! Subtrees split at the largest power of two strictly smaller than the
//! leaf count, so the tree for `n` leaves is a stable prefix of the tree
//! for `n + 1`, the shape that makes append-only consistency possible.
//! The audit paths produced here are exactly what `AuditProof` carries:
//! bottom-up sibling hashes, deepest first.

use seglog_records::Hash32;

use crate::hasher::TreeHasher;

/// In-memory Merkle tree, built once from leaf hashes.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    hasher: TreeHasher,
    leaves: Vec<Hash32>,
}

impl MerkleTree {
    /// Build from raw leaf data, hashing each entry under the leaf domain.
    pub fn from_leaf_data<'a, I>(leaves: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let hasher = TreeHasher;
        let leaves = leaves.into_iter().map(|d| hasher.hash_leaf(d)).collect();
        Self { hasher, leaves }
    }

    /// Build from already-hashed leaves.
    pub fn from_leaf_hashes(leaves: Vec<Hash32>) -> Self {
        Self {
            hasher: TreeHasher,
            leaves,
        }
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaf_hash(&self, index: usize) -> Option<Hash32> {
        self.leaves.get(index).copied()
    }

    /// Root over all leaves. The empty tree hashes to the empty string's
    /// digest.
    pub fn root(&self) -> Hash32 {
        if self.leaves.is_empty() {
            return self.hasher.hash_empty();
        }
        self.subtree_root(0, self.leaves.len())
    }

    /// Ordered sibling hashes witnessing `index`, deepest level first.
    /// `None` if the index is outside the tree. A single-leaf tree yields
    /// an empty path.
    pub fn audit_path(&self, index: usize) -> Option<Vec<Hash32>> {
        if index >= self.leaves.len() {
            return None;
        }
        let mut path = Vec::new();
        self.collect_path(index, 0, self.leaves.len(), &mut path);
        Some(path)
    }

    /// Root of the leaf range `[lo, hi)`, `hi > lo`.
    fn subtree_root(&self, lo: usize, hi: usize) -> Hash32 {
        if hi - lo == 1 {
            return self.leaves[lo];
        }
        let k = split_point(hi - lo);
        let left = self.subtree_root(lo, lo + k);
        let right = self.subtree_root(lo + k, hi);
        self.hasher.hash_node(&left, &right)
    }

    fn collect_path(&self, index: usize, lo: usize, hi: usize, out: &mut Vec<Hash32>) {
        if hi - lo == 1 {
            return;
        }
        let k = split_point(hi - lo);
        if index < lo + k {
            self.collect_path(index, lo, lo + k, out);
            out.push(self.subtree_root(lo + k, hi));
        } else {
            self.collect_path(index, lo + k, hi, out);
            out.push(self.subtree_root(lo, lo + k));
        }
    }
}

/// Largest power of two strictly smaller than `n`. Requires `n >= 2`.
fn split_point(n: usize) -> usize {
    debug_assert!(n >= 2);
    1 << (n - 1).ilog2()
}
