//! Record wire formats for the seglog transparency log.
//!
//! Everything a client, auditor or monitor exchanges with a log is one of
//! five byte-exact records: a [`DigitallySigned`] envelope, the two signed
//! checkpoint forms ([`LogSegmentCheckpoint`], [`LogHeadCheckpoint`]), the
//! combined [`SegmentData`] segment-info form, and [`AuditProof`]. Their
//! encodings are the interoperability contract of the log: signatures are
//! computed over the exact serialized tree data, so a single byte of drift
//! breaks verification everywhere.
//!
//! This crate is a pure codec. It performs no I/O, no hashing and no
//! signature checks; it only turns records into bytes and bytes back into
//! records, enforcing the structural invariants along the way. Hashing and
//! verification live in `seglog-merkle`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod checkpoint;
pub mod proof;
pub mod segment;
pub mod signature;
pub mod wire;

pub use checkpoint::{LogHeadCheckpoint, LogSegmentCheckpoint};
pub use proof::AuditProof;
pub use segment::{SegmentData, TreeType};
pub use signature::{DigitallySigned, HashAlgorithm, SignatureAlgorithm, MAX_SIGNATURE_BYTES};

/// 32-byte hash newtype used for Merkle roots and audit-path nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    /// The all-zero hash. Used as the placeholder root in decoded
    /// segment-info records, which do not carry roots on the wire.
    pub const ZERO: Hash32 = Hash32([0u8; 32]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash32(bytes)
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", hex::encode(self.as_bytes()))
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.as_bytes()))
    }
}

/// Unified error type for record decoding.
///
/// Decoders reject malformed input atomically: on error no partially
/// constructed record escapes, and the input is never mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("input too short: need {needed} bytes, have {have}")]
    ShortBuffer { needed: usize, have: usize },

    #[error("unknown hash algorithm: {0}")]
    BadHashAlgorithm(u8),

    #[error("unknown signature algorithm: {0}")]
    BadSignatureAlgorithm(u8),

    #[error("{0} trailing bytes after record")]
    TrailingData(usize),

    #[error("audit path of {0} bytes is not a multiple of 32")]
    UnalignedAuditPath(usize),
}

pub type Result<T> = std::result::Result<T, RecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash32_displays_as_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let hash = Hash32(bytes);
        let text = hash.to_string();
        assert!(text.starts_with("ab"));
        assert!(text.ends_with("01"));
        assert_eq!(text.len(), 64);
    }

    #[test]
    fn errors_render_context() {
        let err = RecordError::ShortBuffer { needed: 4, have: 1 };
        assert_eq!(err.to_string(), "input too short: need 4 bytes, have 1");
        assert_eq!(
            RecordError::BadHashAlgorithm(9).to_string(),
            "unknown hash algorithm: 9"
        );
    }
}
