//! Positional little-endian reads over an in-memory buffer.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::FormatError;
use crate::tags::FourCc;

/// Bounds-checked reader over the bytes of one file.
///
/// All reads take an absolute offset; nothing is cached between calls.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], FormatError> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(FormatError::Truncated {
                offset,
                needed: len,
                available: self.data.len().saturating_sub(offset),
            })
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, FormatError> {
        Ok(LittleEndian::read_u32(self.bytes(offset, 4)?))
    }

    pub fn read_f32(&self, offset: usize) -> Result<f32, FormatError> {
        Ok(LittleEndian::read_f32(self.bytes(offset, 4)?))
    }

    pub fn read_fourcc(&self, offset: usize) -> Result<FourCc, FormatError> {
        self.read_u32(offset).map(FourCc)
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// Returns the string and the number of bytes consumed (`4 + length`).
    pub fn read_string(&self, offset: usize) -> Result<(String, usize), FormatError> {
        let len = self.read_u32(offset)? as usize;
        let body = self.bytes(offset + 4, len)?;
        let value = std::str::from_utf8(body)
            .map_err(|_| FormatError::InvalidString { offset })?
            .to_owned();
        Ok((value, 4 + len))
    }

    /// Read `count` consecutive `u32` values.
    pub fn read_u32_array(&self, offset: usize, count: usize) -> Result<Vec<u32>, FormatError> {
        let len = byte_len(count)?;
        let bytes = self.bytes(offset, len)?;
        let mut values = vec![0; count];
        LittleEndian::read_u32_into(bytes, &mut values);
        Ok(values)
    }

    /// Read `count` consecutive `f32` values.
    pub fn read_f32_array(&self, offset: usize, count: usize) -> Result<Vec<f32>, FormatError> {
        let len = byte_len(count)?;
        let bytes = self.bytes(offset, len)?;
        let mut values = vec![0.0; count];
        LittleEndian::read_f32_into(bytes, &mut values);
        Ok(values)
    }
}

/// Size in bytes of `count` 4-byte elements.
pub(crate) fn byte_len(count: usize) -> Result<usize, FormatError> {
    count
        .checked_mul(4)
        .ok_or(FormatError::CountOverflow("array byte length"))
}
