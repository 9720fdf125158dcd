//! Packed block framing and byte-plane de-interleaving.
//!
//! A packed block is laid out as:
//!
//! ```text
//! u32              packed payload length (L)
//! [u8; P]          decompressor properties (P = Decompressor::properties_len)
//! [u8; L]          payload
//! ```
//!
//! The unpacked stream holds `N` 32-bit values split into byte planes: all
//! most significant bytes first, then all second bytes, and so on.

use crate::decompress::Decompressor;
use crate::error::DecodeResult;
use crate::reader::{ByteReader, byte_len};

/// Read and unpack the block at `offset` into `count` 32-bit values.
///
/// Returns the values and the number of bytes the block occupies.
pub fn read_packed<D: Decompressor + ?Sized>(
    reader: &ByteReader<'_>,
    offset: usize,
    count: usize,
    decompressor: &D,
) -> DecodeResult<(Vec<u32>, usize)> {
    let payload_len = reader.read_u32(offset)? as usize;
    let block_len = decompressor.properties_len() + payload_len;
    let packed = reader.bytes(offset + 4, block_len)?;

    let planes = decompressor.decompress(packed, byte_len(count)?)?;
    Ok((deinterleave(&planes), 4 + block_len))
}

/// Rebuild big-endian values from four byte planes.
///
/// `planes.len()` must be a multiple of four.
#[must_use]
pub fn deinterleave(planes: &[u8]) -> Vec<u32> {
    let n = planes.len() / 4;
    let (b0, rest) = planes.split_at(n);
    let (b1, rest) = rest.split_at(n);
    let (b2, b3) = rest.split_at(n);

    b0.iter()
        .zip(b1)
        .zip(b2)
        .zip(&b3[..n])
        .map(|(((&a, &b), &c), &d)| u32::from_be_bytes([a, b, c, d]))
        .collect()
}

/// Decode a signed-magnitude integer (sign in the least significant bit).
#[must_use]
pub fn to_signed(value: u32) -> i32 {
    if value & 1 == 0 {
        (value >> 1) as i32
    } else {
        -((value >> 1) as i32) - 1
    }
}

/// Split a component-major stream into `components` planes of equal length.
pub fn planes(values: &[u32], components: usize) -> impl Iterator<Item = &[u32]> {
    values.chunks_exact((values.len() / components.max(1)).max(1))
}
