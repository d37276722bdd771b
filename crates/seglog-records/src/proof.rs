//! Merkle audit proofs.
//!
//! An audit proof witnesses that a leaf sits at `leaf_index` in a tree of
//! `tree_size` leaves under a committed root. The tree type is not on the
//! wire: the endpoint a proof was fetched from commits the receiver to one
//! tree, and the receiver passes that knowledge to the decoder. Prepending
//! a tag would break interoperability with every deployed decoder.

use serde::{Deserialize, Serialize};

use crate::segment::TreeType;
use crate::signature::DigitallySigned;
use crate::wire::{put_uint, take_u32};
use crate::{Hash32, RecordError, Result};

/// Audit proof for one leaf of a segment tree or the segment-info tree.
///
/// For `SegmentInfoTree` proofs the tree size is implicit (the tree over
/// segment checkpoints always holds `sequence_number + 1` leaves) and is
/// absent from the wire form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditProof {
    pub tree_type: TreeType,
    pub sequence_number: u32,
    pub tree_size: u32,
    pub leaf_index: u32,
    pub signature: DigitallySigned,
    pub audit_path: Vec<Hash32>,
}

impl AuditProof {
    /// `u32 seq || [u32 tree_size iff segment tree] || u32 leaf_index ||
    /// signature || path nodes (32 bytes each, raw)`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            16 + self.signature.signature.len() + 32 * self.audit_path.len(),
        );
        put_uint(&mut out, u64::from(self.sequence_number), 4);
        if self.tree_type == TreeType::LogSegmentTree {
            put_uint(&mut out, u64::from(self.tree_size), 4);
        }
        put_uint(&mut out, u64::from(self.leaf_index), 4);
        self.signature.write_to(&mut out);
        for node in &self.audit_path {
            out.extend_from_slice(node.as_bytes());
        }
        out
    }

    /// Parse a proof for the tree the caller knows it belongs to.
    ///
    /// Everything after the signature must chunk into whole 32-byte path
    /// nodes. An empty path is legal: a single-leaf tree needs no
    /// siblings.
    pub fn deserialize(tree_type: TreeType, buf: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let sequence_number = take_u32(buf, &mut pos)?;
        let tree_size = match tree_type {
            TreeType::LogSegmentTree => take_u32(buf, &mut pos)?,
            TreeType::SegmentInfoTree => sequence_number.wrapping_add(1),
        };
        let leaf_index = take_u32(buf, &mut pos)?;
        let (signature, sig_len) = DigitallySigned::read_from(&buf[pos..])?;
        pos += sig_len;

        let rest = &buf[pos..];
        if rest.len() % 32 != 0 {
            return Err(RecordError::UnalignedAuditPath(rest.len()));
        }
        let audit_path = rest
            .chunks_exact(32)
            .map(|chunk| {
                let mut node = [0u8; 32];
                node.copy_from_slice(chunk);
                Hash32(node)
            })
            .collect();

        Ok(AuditProof {
            tree_type,
            sequence_number,
            tree_size,
            leaf_index,
            signature,
            audit_path,
        })
    }
}
