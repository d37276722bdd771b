//! Domain-separated SHA-256 hashing for the log's Merkle trees.
//!
//! Leaves and interior nodes are hashed under distinct one-byte prefixes so
//! a leaf can never be reinterpreted as a node (second-preimage hardening).

use seglog_records::Hash32;
use sha2::{Digest, Sha256};

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// The hash oracle the record formats are defined against: 32-byte SHA-256
/// digests with leaf/node domain separation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeHasher;

impl TreeHasher {
    /// Root of the empty tree: the hash of the empty string.
    pub fn hash_empty(&self) -> Hash32 {
        finish(Sha256::new())
    }

    /// `SHA256(0x00 || data)`.
    pub fn hash_leaf(&self, data: &[u8]) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update([LEAF_PREFIX]);
        hasher.update(data);
        finish(hasher)
    }

    /// `SHA256(0x01 || left || right)`.
    pub fn hash_node(&self, left: &Hash32, right: &Hash32) -> Hash32 {
        let mut hasher = Sha256::new();
        hasher.update([NODE_PREFIX]);
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        finish(hasher)
    }
}

fn finish(hasher: Sha256) -> Hash32 {
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash32(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_is_sha256_of_nothing() {
        assert_eq!(
            TreeHasher.hash_empty().to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn empty_leaf_is_sha256_of_the_leaf_prefix() {
        assert_eq!(
            TreeHasher.hash_leaf(b"").to_string(),
            "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d"
        );
    }

    #[test]
    fn leaf_and_node_domains_are_separated() {
        let left = TreeHasher.hash_leaf(b"a");
        let right = TreeHasher.hash_leaf(b"b");
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(&left.0);
        concat.extend_from_slice(&right.0);
        assert_ne!(TreeHasher.hash_node(&left, &right), TreeHasher.hash_leaf(&concat));
    }
}
