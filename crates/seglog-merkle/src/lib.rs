//! Merkle-side collaborators for the seglog record formats.
//!
//! `seglog-records` is a pure codec: it produces the tree-data byte strings
//! but never hashes or verifies anything. This crate supplies the other
//! half: the domain-separated SHA-256 tree hasher, history-tree root and
//! audit-path computation, and the verification entry points that consume
//! decoded records.

pub mod hasher;
pub mod tree;
pub mod verify;

pub use hasher::TreeHasher;
pub use tree::MerkleTree;
pub use verify::{
    root_from_audit_path, verify_audit_proof, verify_head_checkpoint, verify_segment_checkpoint,
    MerkleError, SignatureVerifier,
};
