//! Decode OpenCTM compressed triangle meshes.
//!
//! Reads `.ctm` files in all three encodings (RAW, MG1 and MG2). Decoding
//! borrows the input buffer and returns a freshly owned [`Mesh`]. Nothing is
//! shared between calls, so callers may decode several files in parallel.
//!
//! # Design principles
//!
//! - **Blocking and self-contained**: One call turns one byte slice into one mesh
//! - **Strict**: Malformed input fails the whole decode; no partial meshes
//! - **Pluggable entropy coding**: LZMA sits behind the [`Decompressor`] trait
//!
//! # Key functions
//!
//! - [`decode`]: Decode a file, unpacking MG1/MG2 blocks with LZMA
//! - [`decode_with`]: Decode with a caller-supplied [`Decompressor`]
//! - [`unpack_indices`]: Undo delta coding of triangle indices
//! - [`dequantize`]: Rebuild MG2 positions from grid cells
//! - [`restore_normals`]: Rebuild MG2 normals from their spherical form

mod chunk;
mod decode;
mod error;

pub mod decompress;
pub mod header;
pub mod indices;
pub mod mesh;
pub mod mg1;
pub mod mg2;
pub mod normals;
pub mod packed;
pub mod raw;
pub mod reader;
pub mod tags;
pub mod texcoords;
pub mod vertices;

pub use chunk::{Chunk, ChunkRead};
pub use decode::{decode, decode_with};
pub use decompress::{Decompressor, Lzma, Stored};
pub use error::{DecodeError, DecodeResult, DecompressionError, FormatError};
pub use header::{FileHeader, Mg2Header};
pub use indices::unpack_indices;
pub use mesh::{AttributeMap, Mesh, MeshAssembler, UvMap};
pub use normals::{restore as restore_normals, smooth_normals};
pub use reader::ByteReader;
pub use tags::{ChunkTag, CompressionMethod, FourCc};
pub use texcoords::unpack_map;
pub use vertices::{dequantize, unpack_grid_indices};
