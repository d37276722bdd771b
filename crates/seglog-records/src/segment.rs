//! The segment-info record: one segment checkpoint and one head checkpoint
//! under a shared timestamp.

use serde::{Deserialize, Serialize};

use crate::checkpoint::{LogHeadCheckpoint, LogSegmentCheckpoint};
use crate::signature::DigitallySigned;
use crate::wire::{decode_uint, put_uint};
use crate::{Hash32, RecordError, Result};

/// Discriminator selecting which Merkle tree a record inhabits.
///
/// The byte values are part of the wire contract: `LogSegmentTree` is 0
/// (per-segment leaf trees), `SegmentInfoTree` is 1 (the tree over segment
/// checkpoints).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TreeType {
    LogSegmentTree = 0,
    SegmentInfoTree = 1,
}

/// A segment checkpoint and the head checkpoint that covers it, tied
/// together under one timestamp.
///
/// Invariant: both checkpoints carry the same sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentData {
    pub log_segment: LogSegmentCheckpoint,
    pub log_head: LogHeadCheckpoint,
    pub timestamp: u32,
}

impl SegmentData {
    /// Segment-info form:
    /// `u32 seq || u32 timestamp || u32 segment_size || segment sig || head sig`.
    ///
    /// The Merkle roots are not carried here; verifiers reconstruct them
    /// from the tree-data forms and the signatures. Panics if the two
    /// checkpoints disagree on the sequence number (programmer error).
    pub fn serialize_segment_info(&self) -> Vec<u8> {
        assert_eq!(
            self.log_segment.sequence_number, self.log_head.sequence_number,
            "segment and head checkpoints disagree on sequence number"
        );
        let mut out = Vec::with_capacity(
            20 + self.log_segment.signature.signature.len()
                + self.log_head.signature.signature.len(),
        );
        put_uint(&mut out, u64::from(self.log_segment.sequence_number), 4);
        put_uint(&mut out, u64::from(self.timestamp), 4);
        put_uint(&mut out, u64::from(self.log_segment.segment_size), 4);
        self.log_segment.signature.write_to(&mut out);
        self.log_head.signature.write_to(&mut out);
        out
    }

    /// Parse the segment-info form.
    ///
    /// The two embedded signatures are the only variable-length fields, so
    /// the first is prefix-parsed and the second must consume everything
    /// that remains. Decoded checkpoints come back with zeroed roots and
    /// the shared sequence number copied into the head checkpoint.
    pub fn deserialize_segment_info(buf: &[u8]) -> Result<Self> {
        if buf.len() < 12 {
            return Err(RecordError::ShortBuffer {
                needed: 12,
                have: buf.len(),
            });
        }
        let sequence_number = decode_uint(&buf[0..4]) as u32;
        let timestamp = decode_uint(&buf[4..8]) as u32;
        let segment_size = decode_uint(&buf[8..12]) as u32;
        let (segment_signature, sig_len) = DigitallySigned::read_from(&buf[12..])?;
        let head_signature = DigitallySigned::deserialize(&buf[12 + sig_len..])?;
        Ok(SegmentData {
            log_segment: LogSegmentCheckpoint {
                sequence_number,
                segment_size,
                signature: segment_signature,
                root: Hash32::ZERO,
            },
            log_head: LogHeadCheckpoint {
                sequence_number,
                signature: head_signature,
                root: Hash32::ZERO,
            },
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{HashAlgorithm, SignatureAlgorithm};

    fn sample() -> SegmentData {
        SegmentData {
            log_segment: LogSegmentCheckpoint {
                sequence_number: 12,
                segment_size: 300,
                signature: DigitallySigned {
                    hash_algo: HashAlgorithm::Sha256,
                    sig_algo: SignatureAlgorithm::Ecdsa,
                    signature: vec![1, 2, 3],
                },
                root: Hash32::ZERO,
            },
            log_head: LogHeadCheckpoint {
                sequence_number: 12,
                signature: DigitallySigned {
                    hash_algo: HashAlgorithm::Sha384,
                    sig_algo: SignatureAlgorithm::Rsa,
                    signature: vec![9, 8, 7, 6],
                },
                root: Hash32::ZERO,
            },
            timestamp: 1_234_567,
        }
    }

    #[test]
    fn tree_type_wire_bytes_are_stable() {
        assert_eq!(TreeType::LogSegmentTree as u8, 0);
        assert_eq!(TreeType::SegmentInfoTree as u8, 1);
    }

    #[test]
    fn segment_info_roundtrips() {
        let data = sample();
        let bytes = data.serialize_segment_info();
        let decoded = SegmentData::deserialize_segment_info(&bytes).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn decode_restores_the_shared_sequence_number() {
        let data = sample();
        let decoded = SegmentData::deserialize_segment_info(&data.serialize_segment_info()).unwrap();
        assert_eq!(
            decoded.log_segment.sequence_number,
            decoded.log_head.sequence_number
        );
    }

    #[test]
    fn stray_trailing_byte_rejected() {
        // The second signature is parsed strictly, so one extra byte after
        // a valid encoding must fail the whole record.
        let mut bytes = sample().serialize_segment_info();
        bytes.push(0xff);
        assert_eq!(
            SegmentData::deserialize_segment_info(&bytes),
            Err(RecordError::TrailingData(1))
        );
    }

    #[test]
    fn short_header_rejected() {
        assert_eq!(
            SegmentData::deserialize_segment_info(&[0u8; 11]),
            Err(RecordError::ShortBuffer {
                needed: 12,
                have: 11
            })
        );
    }

    #[test]
    fn first_signature_failure_propagates() {
        let mut bytes = vec![0u8; 12];
        bytes.extend_from_slice(&[0x00, 0x04, 0x00, 0x00]); // sig_algo 4 invalid
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(
            SegmentData::deserialize_segment_info(&bytes),
            Err(RecordError::BadSignatureAlgorithm(4))
        );
    }

    #[test]
    #[should_panic(expected = "disagree on sequence number")]
    fn mismatched_sequence_numbers_panic_on_encode() {
        let mut data = sample();
        data.log_head.sequence_number += 1;
        let _ = data.serialize_segment_info();
    }
}
