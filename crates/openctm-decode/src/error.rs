//! Decode error types.

use thiserror::Error;

use crate::tags::FourCc;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Any failure while decoding an OpenCTM file.
///
/// Every error is fatal to the file being decoded; no partial mesh is
/// returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is structurally malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The entropy decompressor failed on a packed block.
    #[error(transparent)]
    Decompression(#[from] DecompressionError),
}

/// Malformed structural input.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The file does not start with the `OCTM` magic.
    #[error("not an OpenCTM file: expected magic OCTM, found {found}")]
    BadMagic { found: FourCc },

    /// The header names a compression method this decoder does not know.
    #[error("unsupported compression method {0}")]
    UnsupportedCompression(FourCc),

    /// A chunk tag that is unknown, or not valid for the active method.
    #[error("unexpected chunk {tag} at offset {offset}")]
    UnknownChunk { tag: FourCc, offset: usize },

    /// A read ran past the end of the buffer.
    #[error("truncated input: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A length-prefixed string is not valid UTF-8.
    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidString { offset: usize },

    /// A triangle index refers to a vertex that does not exist.
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },

    /// A float component decoded to NaN.
    #[error("NaN component at position {position} in {what}")]
    NotANumber { what: &'static str, position: usize },

    /// A chunk required to build the mesh never appeared.
    #[error("missing {0} chunk")]
    MissingChunk(&'static str),

    /// A single-instance chunk appeared more than once.
    #[error("duplicate {0} chunk")]
    DuplicateChunk(&'static str),

    /// An MG2 chunk appeared before the `MG2H` header chunk.
    #[error("{0} chunk appears before the MG2 header")]
    MissingMg2Header(FourCc),

    /// The MG2 header failed sanity checks.
    #[error("invalid MG2 header: {0}")]
    InvalidMg2Header(String),

    /// A grid cell id is outside the MG2 grid.
    #[error("grid index {index} out of range for {cell_count} cells")]
    GridIndexOutOfRange { index: u32, cell_count: u64 },

    /// A stored precision is not a positive finite number.
    #[error("invalid {what} precision {value}")]
    InvalidPrecision { what: &'static str, value: f32 },

    /// The number of map chunks disagrees with the header.
    #[error("header declares {expected} {what} maps, file contains {actual}")]
    MapCountMismatch {
        what: &'static str,
        expected: u32,
        actual: usize,
    },

    /// The header declares no vertices or no triangles.
    #[error("mesh has {vertex_count} vertices and {triangle_count} triangles")]
    EmptyMesh {
        vertex_count: u32,
        triangle_count: u32,
    },

    /// Element counts from the header overflow the address space.
    #[error("element count overflows: {0}")]
    CountOverflow(&'static str),
}

/// Failure reported by a [`Decompressor`](crate::Decompressor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompressionError {
    /// The backend rejected the packed stream.
    #[error("decompression failed: {0}")]
    Failed(String),

    /// The backend produced the wrong number of bytes.
    #[error("decompressed {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
