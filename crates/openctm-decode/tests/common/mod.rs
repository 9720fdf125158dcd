//! In-memory OpenCTM file builder for integration tests.
//!
//! Packed blocks are written for the [`Stored`](openctm_decode::Stored)
//! decompressor, which has no properties bytes, so no LZMA encoder is needed.

#![allow(dead_code)]

pub const RAW: &[u8; 4] = b"RAW\0";
pub const MG1: &[u8; 4] = b"MG1\0";
pub const MG2: &[u8; 4] = b"MG2\0";

/// Builds a file one chunk at a time.
pub struct FileBuilder {
    data: Vec<u8>,
}

impl FileBuilder {
    pub fn new(method: &[u8; 4], vertices: u32, triangles: u32) -> Self {
        Self::commented(method, vertices, triangles, "")
    }

    pub fn commented(method: &[u8; 4], vertices: u32, triangles: u32, comment: &str) -> Self {
        let mut builder = Self { data: Vec::new() };
        builder
            .raw(b"OCTM")
            .u32(5)
            .raw(method)
            .u32(vertices)
            .u32(triangles)
            .u32(0)
            .u32(0)
            .u32(0)
            .string(comment);
        builder
    }

    /// Overwrite a header field at byte `offset`.
    pub fn set_u32(mut self, offset: usize, value: u32) -> Self {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn with_uv_maps(self, count: u32) -> Self {
        self.set_u32(20, count)
    }

    pub fn with_attribute_maps(self, count: u32) -> Self {
        self.set_u32(24, count)
    }

    pub fn with_normals(self) -> Self {
        self.set_u32(28, 1)
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn f32(&mut self, value: f32) -> &mut Self {
        self.raw(&value.to_le_bytes())
    }

    pub fn u32s(&mut self, values: &[u32]) -> &mut Self {
        for &v in values {
            self.u32(v);
        }
        self
    }

    pub fn f32s(&mut self, values: &[f32]) -> &mut Self {
        for &v in values {
            self.f32(v);
        }
        self
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.u32(s.len() as u32).raw(s.as_bytes())
    }

    /// A packed block of 32-bit values split into big-endian byte planes.
    pub fn packed(&mut self, values: &[u32]) -> &mut Self {
        let n = values.len();
        let mut planes = vec![0; n * 4];
        for (i, v) in values.iter().enumerate() {
            for (plane, byte) in v.to_be_bytes().into_iter().enumerate() {
                planes[i + plane * n] = byte;
            }
        }
        self.u32(planes.len() as u32).raw(&planes)
    }

    pub fn packed_f32s(&mut self, values: &[f32]) -> &mut Self {
        let bits: Vec<u32> = values.iter().map(|v| v.to_bits()).collect();
        self.packed(&bits)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn build(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// Encode a signed delta in sign-in-low-bit form.
pub fn signed(value: i32) -> u32 {
    if value < 0 {
        ((-value - 1) as u32) << 1 | 1
    } else {
        (value as u32) << 1
    }
}

/// Write an `MG2H` chunk.
pub fn mg2_header(
    file: &mut FileBuilder,
    vertex_precision: f32,
    normal_precision: f32,
    min: [f32; 3],
    max: [f32; 3],
    divisions: [u32; 3],
) {
    file.raw(b"MG2H")
        .f32(vertex_precision)
        .f32(normal_precision)
        .f32s(&min)
        .f32s(&max)
        .u32s(&divisions);
}
