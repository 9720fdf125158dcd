//! Decoded mesh types and the assembler that builds them from chunks.

use glam::Vec3;

use crate::chunk::Chunk;
use crate::error::{DecodeResult, FormatError};
use crate::header::{FileHeader, Mg2Header};
use crate::{normals, vertices};

/// A decoded triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Triangle corners, three per triangle.
    pub indices: Vec<u32>,
    /// Vertex positions, `x, y, z` per vertex.
    pub vertices: Vec<f32>,
    /// Per-vertex normals, same layout as `vertices`.
    pub normals: Option<Vec<f32>>,
    pub uv_maps: Vec<UvMap>,
    pub attribute_maps: Vec<AttributeMap>,
    /// Free-form comment from the file header.
    pub comment: String,
}

impl Mesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Look up a UV map by name.
    #[must_use]
    pub fn uv_map(&self, name: &str) -> Option<&UvMap> {
        self.uv_maps.iter().find(|m| m.name == name)
    }

    /// Look up an attribute map by name.
    #[must_use]
    pub fn attribute_map(&self, name: &str) -> Option<&AttributeMap> {
        self.attribute_maps.iter().find(|m| m.name == name)
    }
}

/// A named set of texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct UvMap {
    pub name: String,
    /// Reference to the texture this map addresses, usually a file name.
    pub file_name: String,
    /// `u, v` per vertex.
    pub coords: Vec<f32>,
}

/// A named set of four-component per-vertex values.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMap {
    pub name: String,
    /// Four values per vertex.
    pub values: Vec<f32>,
}

/// Reject any NaN component.
pub(crate) fn check_not_nan(what: &'static str, values: &[f32]) -> Result<(), FormatError> {
    match values.iter().position(|v| v.is_nan()) {
        Some(position) => Err(FormatError::NotANumber { what, position }),
        None => Ok(()),
    }
}

/// Collects chunk payloads in file order and produces the final [`Mesh`].
///
/// MG2 vertex dequantization and normal reconstruction are deferred to
/// [`finish`](Self::finish), since they need chunks that may arrive later.
#[derive(Debug)]
pub struct MeshAssembler<'h> {
    header: &'h FileHeader,
    indices: Option<Vec<u32>>,
    vertices: Option<Vec<f32>>,
    normals: Option<Vec<f32>>,
    uv_maps: Vec<UvMap>,
    attribute_maps: Vec<AttributeMap>,
    mg2_header: Option<Mg2Header>,
    grid_indices: Option<Vec<u32>>,
    quantized_vertices: Option<Vec<u32>>,
    quantized_normals: Option<Vec<u32>>,
}

impl<'h> MeshAssembler<'h> {
    #[must_use]
    pub fn new(header: &'h FileHeader) -> Self {
        Self {
            header,
            indices: None,
            vertices: None,
            normals: None,
            uv_maps: Vec::new(),
            attribute_maps: Vec::new(),
            mg2_header: None,
            grid_indices: None,
            quantized_vertices: None,
            quantized_normals: None,
        }
    }

    /// The MG2 header, once its chunk has been seen.
    #[must_use]
    pub fn mg2_header(&self) -> Option<&Mg2Header> {
        self.mg2_header.as_ref()
    }

    pub fn push(&mut self, chunk: Chunk) -> Result<(), FormatError> {
        match chunk {
            Chunk::Indices(v) => set_once(&mut self.indices, v, "INDX"),
            Chunk::Vertices(v) => set_once(&mut self.vertices, v, "VERT"),
            Chunk::Normals(v) => set_once(&mut self.normals, v, "NORM"),
            Chunk::UvMap(map) => {
                self.uv_maps.push(map);
                Ok(())
            }
            Chunk::AttributeMap(map) => {
                self.attribute_maps.push(map);
                Ok(())
            }
            Chunk::Mg2Header(h) => set_once(&mut self.mg2_header, h, "MG2H"),
            Chunk::GridIndices(v) => set_once(&mut self.grid_indices, v, "GIDX"),
            Chunk::QuantizedVertices(v) => set_once(&mut self.quantized_vertices, v, "VERT"),
            Chunk::QuantizedNormals(v) => set_once(&mut self.quantized_normals, v, "NORM"),
        }
    }

    /// Run deferred reconstruction and validate the complete mesh.
    pub fn finish(self) -> DecodeResult<Mesh> {
        let header = self.header;

        let vertices = match (self.vertices, self.quantized_vertices) {
            (Some(vertices), None) => vertices,
            (None, Some(quantized)) => {
                let mg2 = self
                    .mg2_header
                    .as_ref()
                    .ok_or(FormatError::MissingChunk("MG2H"))?;
                let grid = self
                    .grid_indices
                    .as_deref()
                    .ok_or(FormatError::MissingChunk("GIDX"))?;
                vertices::dequantize(mg2, grid, &quantized)?
            }
            (Some(_), Some(_)) => return Err(FormatError::DuplicateChunk("VERT").into()),
            (None, None) => return Err(FormatError::MissingChunk("VERT").into()),
        };
        let indices = self.indices.ok_or(FormatError::MissingChunk("INDX"))?;

        let normals = match (self.normals, self.quantized_normals) {
            (None, Some(quantized)) => {
                let mg2 = self
                    .mg2_header
                    .as_ref()
                    .ok_or(FormatError::MissingChunk("MG2H"))?;
                Some(normals::restore(
                    &quantized,
                    mg2.normal_precision,
                    &vertices,
                    &indices,
                )?)
            }
            (Some(_), Some(_)) => return Err(FormatError::DuplicateChunk("NORM").into()),
            (normals, None) => normals,
        };
        if header.has_normals() && normals.is_none() {
            return Err(FormatError::MissingChunk("NORM").into());
        }

        check_map_count("UV", header.uv_map_count, self.uv_maps.len())?;
        check_map_count("attribute", header.attribute_map_count, self.attribute_maps.len())?;

        Ok(Mesh {
            indices,
            vertices,
            normals,
            uv_maps: self.uv_maps,
            attribute_maps: self.attribute_maps,
            comment: header.comment.clone(),
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, tag: &'static str) -> Result<(), FormatError> {
    if slot.is_some() {
        return Err(FormatError::DuplicateChunk(tag));
    }
    *slot = Some(value);
    Ok(())
}

fn check_map_count(what: &'static str, expected: u32, actual: usize) -> Result<(), FormatError> {
    if expected as usize == actual {
        Ok(())
    } else {
        Err(FormatError::MapCountMismatch {
            what,
            expected,
            actual,
        })
    }
}
