//! File header and MG2 header parsing.
//!
//! # File header layout
//!
//! | offset | type   | field                |
//! |--------|--------|----------------------|
//! | 0      | u32    | magic (`OCTM`)       |
//! | 4      | u32    | format version       |
//! | 8      | u32    | compression method   |
//! | 12     | u32    | vertex count         |
//! | 16     | u32    | triangle count       |
//! | 20     | u32    | UV map count         |
//! | 24     | u32    | attribute map count  |
//! | 28     | u32    | flags                |
//! | 32     | string | comment              |

use glam::Vec3;

use crate::error::FormatError;
use crate::reader::ByteReader;
use crate::tags::{CompressionMethod, MAGIC};

/// Size of the fixed part of the file header.
pub const FIXED_HEADER_LEN: usize = 32;

/// Format version written by current encoders.
pub const FORMAT_VERSION: u32 = 5;

/// Header flag: the file carries per-vertex normals.
pub const FLAG_HAS_NORMALS: u32 = 0x0000_0001;

/// Parsed OpenCTM file header.
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    pub version: u32,
    pub compression: CompressionMethod,
    pub vertex_count: u32,
    pub triangle_count: u32,
    pub uv_map_count: u32,
    pub attribute_map_count: u32,
    pub flags: u32,
    pub comment: String,
    /// Offset of the first chunk tag.
    pub body_offset: usize,
}

impl FileHeader {
    /// Parse the header at the start of `reader`.
    ///
    /// The magic is checked before any other field is interpreted.
    pub fn parse(reader: &ByteReader<'_>) -> Result<Self, FormatError> {
        let magic = reader.read_fourcc(0)?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        let version = reader.read_u32(4)?;
        if version != FORMAT_VERSION {
            tracing::warn!(version, "unexpected OpenCTM format version");
        }

        let method = reader.read_fourcc(8)?;
        let compression = CompressionMethod::from_fourcc(method)
            .ok_or(FormatError::UnsupportedCompression(method))?;

        let vertex_count = reader.read_u32(12)?;
        let triangle_count = reader.read_u32(16)?;
        if vertex_count == 0 || triangle_count == 0 {
            return Err(FormatError::EmptyMesh {
                vertex_count,
                triangle_count,
            });
        }

        let (comment, comment_len) = reader.read_string(FIXED_HEADER_LEN)?;

        Ok(Self {
            version,
            compression,
            vertex_count,
            triangle_count,
            uv_map_count: reader.read_u32(20)?,
            attribute_map_count: reader.read_u32(24)?,
            flags: reader.read_u32(28)?,
            comment,
            body_offset: FIXED_HEADER_LEN + comment_len,
        })
    }

    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.flags & FLAG_HAS_NORMALS != 0
    }

    /// Number of vertices as a `usize`.
    #[must_use]
    pub fn vertices(&self) -> usize {
        self.vertex_count as usize
    }

    /// Number of triangles as a `usize`.
    #[must_use]
    pub fn triangles(&self) -> usize {
        self.triangle_count as usize
    }

    /// `vertex_count * components`, checked.
    pub fn vertex_components(&self, components: usize) -> Result<usize, FormatError> {
        self.vertices()
            .checked_mul(components)
            .ok_or(FormatError::CountOverflow("vertex components"))
    }

    /// `triangle_count * 3`, checked.
    pub fn index_count(&self) -> Result<usize, FormatError> {
        self.triangles()
            .checked_mul(3)
            .ok_or(FormatError::CountOverflow("triangle indices"))
    }
}

/// Quantization parameters for MG2 files.
///
/// # Layout (44 bytes)
///
/// - vertex precision (f32), normal precision (f32)
/// - bounding box low corner (3 × f32), high corner (3 × f32)
/// - grid divisions (3 × u32)
///
/// The box may have zero thickness on any axis (`min == max`), which is what
/// a planar mesh produces; only an inverted box is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mg2Header {
    pub vertex_precision: f32,
    pub normal_precision: f32,
    pub min: Vec3,
    pub max: Vec3,
    pub divisions: [u32; 3],
}

impl Mg2Header {
    /// Encoded body size, excluding the chunk tag.
    pub const LEN: usize = 44;

    pub fn parse(reader: &ByteReader<'_>, offset: usize) -> Result<Self, FormatError> {
        let f = |i: usize| reader.read_f32(offset + i * 4);
        let u = |i: usize| reader.read_u32(offset + i * 4);

        let header = Self {
            vertex_precision: f(0)?,
            normal_precision: f(1)?,
            min: Vec3::new(f(2)?, f(3)?, f(4)?),
            max: Vec3::new(f(5)?, f(6)?, f(7)?),
            divisions: [u(8)?, u(9)?, u(10)?],
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<(), FormatError> {
        check_precision("vertex", self.vertex_precision)?;
        check_precision("normal", self.normal_precision)?;

        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FormatError::InvalidMg2Header(
                "bounding box is not finite".to_owned(),
            ));
        }
        // Flat meshes legitimately have min == max on one axis.
        if self.max.cmplt(self.min).any() {
            return Err(FormatError::InvalidMg2Header(format!(
                "bounding box is inverted: min {} max {}",
                self.min, self.max
            )));
        }
        if self.divisions.contains(&0) {
            return Err(FormatError::InvalidMg2Header(format!(
                "grid divisions must be at least 1, got {:?}",
                self.divisions
            )));
        }
        Ok(())
    }

    /// Total number of grid cells.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        self.divisions.iter().map(|&d| u64::from(d)).product()
    }

    /// Edge length of one grid cell on each axis.
    #[must_use]
    pub fn cell_size(&self) -> Vec3 {
        let [x, y, z] = self.divisions;
        (self.max - self.min) / Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Lower corner of the grid cell with the given id.
    #[must_use]
    pub fn cell_origin(&self, grid_index: u32) -> Vec3 {
        let [div_x, div_y, _] = self.divisions;
        let gx = grid_index % div_x;
        let rest = grid_index / div_x;
        let gy = rest % div_y;
        let gz = rest / div_y;
        self.min + self.cell_size() * Vec3::new(gx as f32, gy as f32, gz as f32)
    }
}

/// A precision must be a positive finite scale factor.
pub(crate) fn check_precision(what: &'static str, value: f32) -> Result<(), FormatError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FormatError::InvalidPrecision { what, value })
    }
}
