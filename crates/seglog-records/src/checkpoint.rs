//! Signed checkpoint records.
//!
//! A [`LogSegmentCheckpoint`] commits to the Merkle root over the leaves of
//! one segment; a [`LogHeadCheckpoint`] commits to the Merkle root over the
//! segment checkpoints themselves (the log-of-logs). Each has two wire
//! forms: the signed form carrying the signature and root, and the
//! tree-data form, the exact byte string the signature is computed over
//! and the hasher consumes.

use serde::{Deserialize, Serialize};

use crate::segment::TreeType;
use crate::signature::DigitallySigned;
use crate::wire::{decode_uint, put_uint};
use crate::{Hash32, RecordError, Result};

/// Signed commitment to the Merkle root over `segment_size` leaves of
/// segment `sequence_number`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSegmentCheckpoint {
    pub sequence_number: u32,
    pub segment_size: u32,
    pub signature: DigitallySigned,
    pub root: Hash32,
}

impl LogSegmentCheckpoint {
    /// Signed form: `u32 seq || u32 segment_size || signature || root`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(44 + self.signature.signature.len());
        put_uint(&mut out, u64::from(self.sequence_number), 4);
        put_uint(&mut out, u64::from(self.segment_size), 4);
        self.signature.write_to(&mut out);
        out.extend_from_slice(self.root.as_bytes());
        out
    }

    /// Tree-data form fed to the hasher and signer:
    /// `u8 tree_type || u32 seq || u32 segment_size || root`.
    pub fn serialize_tree_data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(41);
        put_uint(&mut out, TreeType::LogSegmentTree as u64, 1);
        put_uint(&mut out, u64::from(self.sequence_number), 4);
        put_uint(&mut out, u64::from(self.segment_size), 4);
        out.extend_from_slice(self.root.as_bytes());
        out
    }

    pub fn deserialize(buf: &[u8]) -> Result<Self> {
        if buf.len() < 8 {
            return Err(RecordError::ShortBuffer {
                needed: 8,
                have: buf.len(),
            });
        }
        let sequence_number = decode_uint(&buf[0..4]) as u32;
        let segment_size = decode_uint(&buf[4..8]) as u32;
        let (signature, sig_len) = DigitallySigned::read_from(&buf[8..])?;
        let root = read_trailing_root(buf, 8 + sig_len)?;
        Ok(LogSegmentCheckpoint {
            sequence_number,
            segment_size,
            signature,
            root,
        })
    }
}

/// Signed commitment to the Merkle root over the first
/// `sequence_number + 1` segment checkpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogHeadCheckpoint {
    pub sequence_number: u32,
    pub signature: DigitallySigned,
    pub root: Hash32,
}

impl LogHeadCheckpoint {
    /// Signed form: `u32 seq || signature || root`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(40 + self.signature.signature.len());
        put_uint(&mut out, u64::from(self.sequence_number), 4);
        self.signature.write_to(&mut out);
        out.extend_from_slice(self.root.as_bytes());
        out
    }

    /// Tree-data form: `u8 tree_type || u32 seq || root`.
    pub fn serialize_tree_data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(37);
        put_uint(&mut out, TreeType::SegmentInfoTree as u64, 1);
        put_uint(&mut out, u64::from(self.sequence_number), 4);
        out.extend_from_slice(self.root.as_bytes());
        out
    }

    pub fn deserialize(buf: &[u8]) -> Result<Self> {
        if buf.len() < 4 {
            return Err(RecordError::ShortBuffer {
                needed: 4,
                have: buf.len(),
            });
        }
        let sequence_number = decode_uint(&buf[0..4]) as u32;
        let (signature, sig_len) = DigitallySigned::read_from(&buf[4..])?;
        let root = read_trailing_root(buf, 4 + sig_len)?;
        Ok(LogHeadCheckpoint {
            sequence_number,
            signature,
            root,
        })
    }
}

/// Exactly 32 bytes must remain at `pos`; they are the root.
fn read_trailing_root(buf: &[u8], pos: usize) -> Result<Hash32> {
    let rest = &buf[pos..];
    if rest.len() < 32 {
        return Err(RecordError::ShortBuffer {
            needed: pos + 32,
            have: buf.len(),
        });
    }
    if rest.len() > 32 {
        return Err(RecordError::TrailingData(rest.len() - 32));
    }
    let mut root = [0u8; 32];
    root.copy_from_slice(rest);
    Ok(Hash32(root))
}
