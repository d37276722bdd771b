//! Fixed-width big-endian integer primitives.
//!
//! Every multi-byte integer in the record formats is serialized MSB-first
//! in exactly 1, 2 or 4 bytes. No varints, no native endianness: the widths
//! are part of the wire contract.

use crate::{RecordError, Result};

/// Append `value` to `out`, MSB-first, in exactly `width` bytes.
///
/// Panics if `width` is not in `1..=8` or `value` does not fit. Encoders
/// call this with trusted inputs; a violation is a programmer error, not a
/// decode failure.
pub fn put_uint(out: &mut Vec<u8>, value: u64, width: usize) {
    assert!((1..=8).contains(&width), "uint width {width} out of range");
    assert!(
        width == 8 || value >> (width * 8) == 0,
        "value {value} does not fit in {width} bytes"
    );
    for shift in (0..width).rev() {
        out.push((value >> (shift * 8)) as u8);
    }
}

/// Encode `value` MSB-first in exactly `width` bytes.
pub fn encode_uint(value: u64, width: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width);
    put_uint(&mut out, value, width);
    out
}

/// Fold `bytes` MSB-first into an unsigned integer.
///
/// Panics if `bytes` is longer than 8; callers always pass a slice of the
/// field's exact width.
pub fn decode_uint(bytes: &[u8]) -> u64 {
    assert!(bytes.len() <= 8, "uint wider than 8 bytes");
    bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

/// Slice `n` bytes out of `buf` at `*pos`, advancing `*pos`.
pub(crate) fn take<'a>(buf: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8]> {
    let end = pos.saturating_add(n);
    if end > buf.len() {
        return Err(RecordError::ShortBuffer {
            needed: end,
            have: buf.len(),
        });
    }
    let bytes = &buf[*pos..end];
    *pos = end;
    Ok(bytes)
}

/// Read a 4-byte big-endian counter at `*pos`.
pub(crate) fn take_u32(buf: &[u8], pos: &mut usize) -> Result<u32> {
    Ok(decode_uint(take(buf, pos, 4)?) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_msb_first() {
        assert_eq!(encode_uint(0x01, 1), vec![0x01]);
        assert_eq!(encode_uint(0x0102, 2), vec![0x01, 0x02]);
        assert_eq!(encode_uint(0x01020304, 4), vec![0x01, 0x02, 0x03, 0x04]);
        assert_eq!(encode_uint(7, 4), vec![0x00, 0x00, 0x00, 0x07]);
    }

    #[test]
    fn decodes_msb_first() {
        assert_eq!(decode_uint(&[0x01, 0x02]), 0x0102);
        assert_eq!(decode_uint(&[]), 0);
        assert_eq!(decode_uint(&[0xff; 8]), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn rejects_value_wider_than_field() {
        encode_uint(0x100, 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn rejects_zero_width() {
        encode_uint(0, 0);
    }

    #[test]
    fn take_reports_total_needed() {
        let buf = [0u8; 6];
        let mut pos = 4;
        assert_eq!(
            take_u32(&buf, &mut pos),
            Err(RecordError::ShortBuffer { needed: 8, have: 6 })
        );
        // pos untouched on failure
        assert_eq!(pos, 4);
    }

    proptest! {
        #[test]
        fn uint_roundtrips(value in any::<u32>(), width in 1usize..=4) {
            prop_assume!(width == 4 || u64::from(value) >> (width * 8) == 0);
            let bytes = encode_uint(u64::from(value), width);
            prop_assert_eq!(bytes.len(), width);
            prop_assert_eq!(decode_uint(&bytes), u64::from(value));
        }
    }
}
