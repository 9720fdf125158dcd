//! Four-character codes used by the OpenCTM container.
//!
//! Every tag is stored as a little-endian `u32` whose bytes spell an ASCII
//! mnemonic, so `"INDX"` is read as `0x5844_4e49`.

use std::fmt;

/// A raw four-character code as read from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub u32);

impl FourCc {
    /// Build a code from its ASCII spelling.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// The four bytes in file order.
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == 0) {
            for b in bytes.iter().take_while(|b| **b != 0) {
                write!(f, "{}", char::from(*b))?;
            }
            Ok(())
        } else {
            write!(f, "{:#010x}", self.0)
        }
    }
}

/// File magic, `"OCTM"`.
pub const MAGIC: FourCc = FourCc::from_bytes(*b"OCTM");

/// Body encoding selected by the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Uncompressed arrays.
    Raw,
    /// LZMA-packed arrays with delta-coded indices.
    Mg1,
    /// MG1 plus grid-quantized positions and spherical normals.
    Mg2,
}

impl CompressionMethod {
    /// Tag for the RAW method.
    pub const RAW: FourCc = FourCc::from_bytes(*b"RAW\0");
    /// Tag for the MG1 method.
    pub const MG1: FourCc = FourCc::from_bytes(*b"MG1\0");
    /// Tag for the MG2 method.
    pub const MG2: FourCc = FourCc::from_bytes(*b"MG2\0");

    #[must_use]
    pub fn from_fourcc(code: FourCc) -> Option<Self> {
        match code {
            Self::RAW => Some(Self::Raw),
            Self::MG1 => Some(Self::Mg1),
            Self::MG2 => Some(Self::Mg2),
            _ => None,
        }
    }

    #[must_use]
    pub const fn fourcc(self) -> FourCc {
        match self {
            Self::Raw => Self::RAW,
            Self::Mg1 => Self::MG1,
            Self::Mg2 => Self::MG2,
        }
    }
}

/// Chunk tags that may follow the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTag {
    /// `INDX`: triangle indices.
    Indices,
    /// `VERT`: vertex positions.
    Vertices,
    /// `NORM`: vertex normals.
    Normals,
    /// `TEXC`: one UV map.
    TexCoords,
    /// `ATTR`: one attribute map.
    Attributes,
    /// `MG2H`: MG2 quantization header.
    Mg2Header,
    /// `GIDX`: MG2 grid cell per vertex.
    GridIndices,
}

impl ChunkTag {
    pub const INDX: FourCc = FourCc::from_bytes(*b"INDX");
    pub const VERT: FourCc = FourCc::from_bytes(*b"VERT");
    pub const NORM: FourCc = FourCc::from_bytes(*b"NORM");
    pub const TEXC: FourCc = FourCc::from_bytes(*b"TEXC");
    pub const ATTR: FourCc = FourCc::from_bytes(*b"ATTR");
    pub const MG2H: FourCc = FourCc::from_bytes(*b"MG2H");
    pub const GIDX: FourCc = FourCc::from_bytes(*b"GIDX");

    #[must_use]
    pub fn from_fourcc(code: FourCc) -> Option<Self> {
        match code {
            Self::INDX => Some(Self::Indices),
            Self::VERT => Some(Self::Vertices),
            Self::NORM => Some(Self::Normals),
            Self::TEXC => Some(Self::TexCoords),
            Self::ATTR => Some(Self::Attributes),
            Self::MG2H => Some(Self::Mg2Header),
            Self::GIDX => Some(Self::GridIndices),
            _ => None,
        }
    }

    #[must_use]
    pub const fn fourcc(self) -> FourCc {
        match self {
            Self::Indices => Self::INDX,
            Self::Vertices => Self::VERT,
            Self::Normals => Self::NORM,
            Self::TexCoords => Self::TEXC,
            Self::Attributes => Self::ATTR,
            Self::Mg2Header => Self::MG2H,
            Self::GridIndices => Self::GIDX,
        }
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fourcc().fmt(f)
    }
}
