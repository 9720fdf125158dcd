//! File-level decoding: header, chunk loop, assembly.

use crate::decompress::{Decompressor, Lzma};
use crate::error::{DecodeResult, FormatError};
use crate::header::FileHeader;
use crate::mesh::{Mesh, MeshAssembler};
use crate::reader::ByteReader;
use crate::tags::{ChunkTag, CompressionMethod};
use crate::{mg1, mg2, raw};

/// Decode an OpenCTM file, unpacking MG1/MG2 blocks with LZMA.
pub fn decode(data: &[u8]) -> DecodeResult<Mesh> {
    decode_with(data, &Lzma::new())
}

/// Decode an OpenCTM file with a caller-supplied decompressor.
///
/// Chunks are processed strictly in file order, since each chunk's size is
/// only known once it has been read. Any error aborts the whole decode.
pub fn decode_with<D: Decompressor + ?Sized>(data: &[u8], decompressor: &D) -> DecodeResult<Mesh> {
    let reader = ByteReader::new(data);
    let header = FileHeader::parse(&reader)?;
    tracing::debug!(
        method = %header.compression.fourcc(),
        vertices = header.vertex_count,
        triangles = header.triangle_count,
        uv_maps = header.uv_map_count,
        attribute_maps = header.attribute_map_count,
        "parsed OpenCTM header"
    );

    let mut assembler = MeshAssembler::new(&header);
    let mut offset = header.body_offset;
    while offset < reader.len() {
        let code = reader.read_fourcc(offset)?;
        let tag = ChunkTag::from_fourcc(code)
            .ok_or(FormatError::UnknownChunk { tag: code, offset })?;
        let body = offset + 4;

        let (chunk, consumed) = match header.compression {
            CompressionMethod::Raw => raw::read_chunk(&reader, &header, tag, body)?,
            CompressionMethod::Mg1 => mg1::read_chunk(&reader, &header, tag, body, decompressor)?,
            CompressionMethod::Mg2 => mg2::read_chunk(
                &reader,
                &header,
                assembler.mg2_header(),
                tag,
                body,
                decompressor,
            )?,
        };
        tracing::trace!(%tag, offset, consumed, "decoded chunk");

        assembler.push(chunk)?;
        offset = body + consumed;
    }

    let mesh = assembler.finish()?;
    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        normals = mesh.normals.is_some(),
        "decoded OpenCTM mesh"
    );
    Ok(mesh)
}
