//! Decoded chunk payloads.

use crate::error::FormatError;
use crate::header::Mg2Header;
use crate::mesh::{AttributeMap, UvMap};
use crate::tags::ChunkTag;

/// The payload of one chunk, after any unpacking the chunk allows on its own.
///
/// MG2 vertices and normals stay quantized until the assembler has every
/// chunk they depend on.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Indices(Vec<u32>),
    Vertices(Vec<f32>),
    Normals(Vec<f32>),
    UvMap(UvMap),
    AttributeMap(AttributeMap),
    Mg2Header(Mg2Header),
    /// Absolute grid cell id per vertex.
    GridIndices(Vec<u32>),
    /// Component-major intra-cell integers (x deltas, then y, then z).
    QuantizedVertices(Vec<u32>),
    /// Component-major magnitude, phi and theta planes.
    QuantizedNormals(Vec<u32>),
}

/// A chunk payload together with the number of body bytes it occupied.
pub type ChunkRead = (Chunk, usize);

/// Error for a tag that exists but is not valid under the active method.
pub(crate) fn unexpected(tag: ChunkTag, body_offset: usize) -> FormatError {
    FormatError::UnknownChunk {
        tag: tag.fourcc(),
        offset: body_offset - 4,
    }
}
