//! MG1 method: packed arrays with delta-coded indices.

use crate::chunk::{Chunk, ChunkRead, unexpected};
use crate::decompress::Decompressor;
use crate::error::DecodeResult;
use crate::header::FileHeader;
use crate::indices::unpack_indices;
use crate::mesh::{AttributeMap, UvMap, check_not_nan};
use crate::packed::read_packed;
use crate::reader::ByteReader;
use crate::tags::ChunkTag;

/// Decode the body of one MG1 chunk starting at `offset`.
pub fn read_chunk<D: Decompressor + ?Sized>(
    reader: &ByteReader<'_>,
    header: &FileHeader,
    tag: ChunkTag,
    offset: usize,
    decompressor: &D,
) -> DecodeResult<ChunkRead> {
    match tag {
        ChunkTag::Indices => read_indices(reader, header, offset, decompressor),
        ChunkTag::Vertices => {
            let count = header.vertex_components(3)?;
            let (vertices, len) = read_packed_floats(reader, offset, count, "vertices", decompressor)?;
            Ok((Chunk::Vertices(vertices), len))
        }
        ChunkTag::Normals => {
            let count = header.vertex_components(3)?;
            let (normals, len) = read_packed_floats(reader, offset, count, "normals", decompressor)?;
            Ok((Chunk::Normals(normals), len))
        }
        ChunkTag::TexCoords => {
            let (name, name_len) = reader.read_string(offset)?;
            let (file_name, file_len) = reader.read_string(offset + name_len)?;
            let strings_len = name_len + file_len;
            let (coords, len) = read_packed_floats(
                reader,
                offset + strings_len,
                header.vertex_components(2)?,
                "UV map",
                decompressor,
            )?;
            let map = UvMap {
                name,
                file_name,
                coords,
            };
            Ok((Chunk::UvMap(map), strings_len + len))
        }
        ChunkTag::Attributes => {
            let (name, name_len) = reader.read_string(offset)?;
            let (values, len) = read_packed_floats(
                reader,
                offset + name_len,
                header.vertex_components(4)?,
                "attribute map",
                decompressor,
            )?;
            Ok((Chunk::AttributeMap(AttributeMap { name, values }), name_len + len))
        }
        ChunkTag::Mg2Header | ChunkTag::GridIndices => Err(unexpected(tag, offset).into()),
    }
}

/// Read a packed `INDX` body; shared with MG2, which codes indices the same way.
pub(crate) fn read_indices<D: Decompressor + ?Sized>(
    reader: &ByteReader<'_>,
    header: &FileHeader,
    offset: usize,
    decompressor: &D,
) -> DecodeResult<ChunkRead> {
    let (deltas, len) = read_packed(reader, offset, header.index_count()?, decompressor)?;
    let indices = unpack_indices(&deltas, header.vertex_count)?;
    Ok((Chunk::Indices(indices), len))
}

/// Read a packed block and reinterpret its values as IEEE-754 floats.
fn read_packed_floats<D: Decompressor + ?Sized>(
    reader: &ByteReader<'_>,
    offset: usize,
    count: usize,
    what: &'static str,
    decompressor: &D,
) -> DecodeResult<(Vec<f32>, usize)> {
    let (bits, len) = read_packed(reader, offset, count, decompressor)?;
    let values: Vec<f32> = bits.into_iter().map(f32::from_bits).collect();
    check_not_nan(what, &values)?;
    Ok((values, len))
}
