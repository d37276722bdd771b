//! The `DigitallySigned` envelope: an algorithm-tagged, length-prefixed
//! signature blob embedded in every checkpoint and proof record.
//!
//! The envelope never interprets the signature bytes. Algorithm enums are
//! validated at decode time so downstream verifiers never see a malformed
//! discriminator.

use serde::{Deserialize, Serialize};

use crate::wire::{decode_uint, put_uint};
use crate::{RecordError, Result};

/// Hash algorithm discriminator (TLS registry values 0 through 6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HashAlgorithm {
    None = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha224 = 3,
    Sha256 = 4,
    Sha384 = 5,
    Sha512 = 6,
}

impl HashAlgorithm {
    pub fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::None,
            1 => Self::Md5,
            2 => Self::Sha1,
            3 => Self::Sha224,
            4 => Self::Sha256,
            5 => Self::Sha384,
            6 => Self::Sha512,
            other => return Err(RecordError::BadHashAlgorithm(other)),
        })
    }
}

/// Signature algorithm discriminator (TLS registry values 0 through 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureAlgorithm {
    Anonymous = 0,
    Rsa = 1,
    Dsa = 2,
    Ecdsa = 3,
}

impl SignatureAlgorithm {
    pub fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Anonymous,
            1 => Self::Rsa,
            2 => Self::Dsa,
            3 => Self::Ecdsa,
            other => return Err(RecordError::BadSignatureAlgorithm(other)),
        })
    }
}

/// The 2-byte length prefix bounds signatures to 65535 bytes.
pub const MAX_SIGNATURE_BYTES: usize = u16::MAX as usize;

/// Algorithm-tagged signature envelope.
///
/// Wire form: `u8 hash_algo || u8 sig_algo || u16 length || signature`.
/// A zero-length signature is legal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitallySigned {
    pub hash_algo: HashAlgorithm,
    pub sig_algo: SignatureAlgorithm,
    pub signature: Vec<u8>,
}

impl DigitallySigned {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.signature.len());
        self.write_to(&mut out);
        out
    }

    /// Append the wire form to `out`. Panics if the signature exceeds the
    /// 2-byte length prefix (programmer error).
    pub fn write_to(&self, out: &mut Vec<u8>) {
        assert!(
            self.signature.len() <= MAX_SIGNATURE_BYTES,
            "signature of {} bytes exceeds the u16 length prefix",
            self.signature.len()
        );
        put_uint(out, self.hash_algo as u64, 1);
        put_uint(out, self.sig_algo as u64, 1);
        put_uint(out, self.signature.len() as u64, 2);
        out.extend_from_slice(&self.signature);
    }

    /// Prefix parse: decode an envelope off the front of `buf` and return
    /// it with the number of bytes consumed. Bytes past the envelope are
    /// ignored; embedding records use this to parse a variable-length
    /// field mid-buffer.
    pub fn read_from(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.len() < 4 {
            return Err(RecordError::ShortBuffer {
                needed: 4,
                have: buf.len(),
            });
        }
        let hash_algo = HashAlgorithm::from_u8(buf[0])?;
        let sig_algo = SignatureAlgorithm::from_u8(buf[1])?;
        let sig_len = decode_uint(&buf[2..4]) as usize;
        let total = 4 + sig_len;
        if buf.len() < total {
            return Err(RecordError::ShortBuffer {
                needed: total,
                have: buf.len(),
            });
        }
        let signed = DigitallySigned {
            hash_algo,
            sig_algo,
            signature: buf[4..total].to_vec(),
        };
        Ok((signed, total))
    }

    /// Strict parse: the envelope must span the entire buffer.
    pub fn deserialize(buf: &[u8]) -> Result<Self> {
        let (signed, consumed) = Self::read_from(buf)?;
        if consumed != buf.len() {
            return Err(RecordError::TrailingData(buf.len() - consumed));
        }
        Ok(signed)
    }
}
