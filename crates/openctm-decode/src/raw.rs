//! RAW method: uncompressed little-endian arrays.

use crate::chunk::{Chunk, ChunkRead, unexpected};
use crate::error::DecodeResult;
use crate::header::FileHeader;
use crate::indices::check_indices;
use crate::mesh::{AttributeMap, UvMap, check_not_nan};
use crate::reader::ByteReader;
use crate::tags::ChunkTag;

/// Decode the body of one RAW chunk starting at `offset`.
pub fn read_chunk(
    reader: &ByteReader<'_>,
    header: &FileHeader,
    tag: ChunkTag,
    offset: usize,
) -> DecodeResult<ChunkRead> {
    match tag {
        ChunkTag::Indices => {
            let count = header.index_count()?;
            let indices = reader.read_u32_array(offset, count)?;
            check_indices(&indices, header.vertex_count)?;
            Ok((Chunk::Indices(indices), count * 4))
        }
        ChunkTag::Vertices => {
            let (vertices, len) = read_floats(reader, offset, header.vertex_components(3)?, "vertices")?;
            Ok((Chunk::Vertices(vertices), len))
        }
        ChunkTag::Normals => {
            let (normals, len) = read_floats(reader, offset, header.vertex_components(3)?, "normals")?;
            Ok((Chunk::Normals(normals), len))
        }
        ChunkTag::TexCoords => {
            let (name, name_len) = reader.read_string(offset)?;
            let (file_name, file_len) = reader.read_string(offset + name_len)?;
            let strings_len = name_len + file_len;
            let (coords, len) = read_floats(
                reader,
                offset + strings_len,
                header.vertex_components(2)?,
                "UV map",
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
            let (values, len) = read_floats(
                reader,
                offset + name_len,
                header.vertex_components(4)?,
                "attribute map",
            )?;
            Ok((Chunk::AttributeMap(AttributeMap { name, values }), name_len + len))
        }
        ChunkTag::Mg2Header | ChunkTag::GridIndices => Err(unexpected(tag, offset).into()),
    }
}

fn read_floats(
    reader: &ByteReader<'_>,
    offset: usize,
    count: usize,
    what: &'static str,
) -> DecodeResult<(Vec<f32>, usize)> {
    let values = reader.read_f32_array(offset, count)?;
    check_not_nan(what, &values)?;
    Ok((values, count * 4))
}
