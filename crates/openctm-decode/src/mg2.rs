//! MG2 method: grid-quantized positions and spherical normals.
//!
//! Vertex and normal chunks only carry integers here; turning them into
//! floats needs the grid indices, the full index list and the vertices, so
//! that happens in [`MeshAssembler::finish`](crate::MeshAssembler::finish).

use crate::chunk::{Chunk, ChunkRead};
use crate::decompress::Decompressor;
use crate::error::{DecodeResult, FormatError};
use crate::header::{FileHeader, Mg2Header, check_precision};
use crate::mesh::{AttributeMap, UvMap, check_not_nan};
use crate::mg1::read_indices;
use crate::packed::read_packed;
use crate::reader::ByteReader;
use crate::tags::ChunkTag;
use crate::texcoords::unpack_map;
use crate::vertices::unpack_grid_indices;

/// Decode the body of one MG2 chunk starting at `offset`.
///
/// `mg2` is the header chunk seen so far, if any; every chunk except `MG2H`
/// itself and `INDX` requires it.
pub fn read_chunk<D: Decompressor + ?Sized>(
    reader: &ByteReader<'_>,
    header: &FileHeader,
    mg2: Option<&Mg2Header>,
    tag: ChunkTag,
    offset: usize,
    decompressor: &D,
) -> DecodeResult<ChunkRead> {
    let require_mg2 = || mg2.ok_or(FormatError::MissingMg2Header(tag.fourcc()));

    match tag {
        ChunkTag::Mg2Header => {
            let mg2 = Mg2Header::parse(reader, offset)?;
            Ok((Chunk::Mg2Header(mg2), Mg2Header::LEN))
        }
        ChunkTag::Indices => read_indices(reader, header, offset, decompressor),
        ChunkTag::Vertices => {
            require_mg2()?;
            let count = header.vertex_components(3)?;
            let (quantized, len) = read_packed(reader, offset, count, decompressor)?;
            Ok((Chunk::QuantizedVertices(quantized), len))
        }
        ChunkTag::GridIndices => {
            let mg2 = require_mg2()?;
            let (deltas, len) = read_packed(reader, offset, header.vertices(), decompressor)?;
            let grid_indices = unpack_grid_indices(&deltas, mg2)?;
            Ok((Chunk::GridIndices(grid_indices), len))
        }
        ChunkTag::Normals => {
            require_mg2()?;
            let count = header.vertex_components(3)?;
            let (quantized, len) = read_packed(reader, offset, count, decompressor)?;
            Ok((Chunk::QuantizedNormals(quantized), len))
        }
        ChunkTag::TexCoords => {
            require_mg2()?;
            let (name, name_len) = reader.read_string(offset)?;
            let (file_name, file_len) = reader.read_string(offset + name_len)?;
            let strings_len = name_len + file_len;
            let (coords, len) =
                read_map(reader, offset + strings_len, header, 2, "UV map", decompressor)?;
            let map = UvMap {
                name,
                file_name,
                coords,
            };
            Ok((Chunk::UvMap(map), strings_len + len))
        }
        ChunkTag::Attributes => {
            require_mg2()?;
            let (name, name_len) = reader.read_string(offset)?;
            let (values, len) = read_map(
                reader,
                offset + name_len,
                header,
                4,
                "attribute map",
                decompressor,
            )?;
            Ok((Chunk::AttributeMap(AttributeMap { name, values }), name_len + len))
        }
    }
}

/// Read a map's precision and packed deltas.
fn read_map<D: Decompressor + ?Sized>(
    reader: &ByteReader<'_>,
    offset: usize,
    header: &FileHeader,
    components: usize,
    what: &'static str,
    decompressor: &D,
) -> DecodeResult<(Vec<f32>, usize)> {
    let precision = reader.read_f32(offset)?;
    check_precision(what, precision)?;

    let count = header.vertex_components(components)?;
    let (deltas, len) = read_packed(reader, offset + 4, count, decompressor)?;
    let values = unpack_map(&deltas, components, precision);
    check_not_nan(what, &values)?;
    Ok((values, 4 + len))
}
