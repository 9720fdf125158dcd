//! Entropy decompression backends.
//!
//! The decoder only needs "packed bytes plus expected size in, exactly that
//! many bytes out". [`Lzma`] implements this for real OpenCTM files; [`Stored`]
//! passes bytes through and is handy for hand-built buffers.

use crate::error::DecompressionError;

/// Decompressor for MG1/MG2 packed blocks.
///
/// Implementations must be stateless between calls (or internally
/// synchronized) so one instance can serve concurrent decodes.
pub trait Decompressor: Send + Sync {
    /// Length of the backend-specific properties header that precedes the
    /// counted payload inside every packed block.
    fn properties_len(&self) -> usize {
        0
    }

    /// Decompress `packed` (properties header followed by payload) into
    /// exactly `unpacked_len` bytes.
    fn decompress(&self, packed: &[u8], unpacked_len: usize)
    -> Result<Vec<u8>, DecompressionError>;
}

impl<D: Decompressor + ?Sized> Decompressor for &D {
    fn properties_len(&self) -> usize {
        (**self).properties_len()
    }

    fn decompress(
        &self,
        packed: &[u8],
        unpacked_len: usize,
    ) -> Result<Vec<u8>, DecompressionError> {
        (**self).decompress(packed, unpacked_len)
    }
}

/// Size of the LZMA properties header (lc/lp/pb byte plus dictionary size).
pub const LZMA_PROPERTIES_LEN: usize = 5;

/// Upper bound on the up-front output reservation, as a multiple of the
/// packed size. Larger outputs grow as they are decoded.
const MAX_RESERVE_RATIO: usize = 16;

/// Raw LZMA streams as written by OpenCTM encoders.
///
/// Each packed block stores the 5-byte LZMA properties header followed by
/// the compressed stream; the unpacked size is not stored in the stream and
/// comes from the mesh header instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzma {
    memlimit: Option<usize>,
}

impl Lzma {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the dictionary buffer the decoder may allocate.
    #[must_use]
    pub fn with_memlimit(mut self, bytes: usize) -> Self {
        self.memlimit = Some(bytes);
        self
    }
}

impl Decompressor for Lzma {
    fn properties_len(&self) -> usize {
        LZMA_PROPERTIES_LEN
    }

    fn decompress(
        &self,
        packed: &[u8],
        unpacked_len: usize,
    ) -> Result<Vec<u8>, DecompressionError> {
        let options = lzma_rs::decompress::Options {
            unpacked_size: lzma_rs::decompress::UnpackedSize::UseProvided(Some(
                unpacked_len as u64,
            )),
            memlimit: self.memlimit,
            allow_incomplete: false,
        };

        // `unpacked_len` comes from the file header and is not trusted yet.
        let reserve = unpacked_len.min(packed.len().saturating_mul(MAX_RESERVE_RATIO));
        let mut input = packed;
        let mut output = Vec::with_capacity(reserve);
        lzma_rs::lzma_decompress_with_options(&mut input, &mut output, &options)
            .map_err(|e| DecompressionError::Failed(format!("LZMA: {e}")))?;

        check_len(output, unpacked_len)
    }
}

/// Pass-through backend: the payload already holds the unpacked bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stored;

impl Decompressor for Stored {
    fn decompress(
        &self,
        packed: &[u8],
        unpacked_len: usize,
    ) -> Result<Vec<u8>, DecompressionError> {
        check_len(packed.to_vec(), unpacked_len)
    }
}

fn check_len(output: Vec<u8>, expected: usize) -> Result<Vec<u8>, DecompressionError> {
    if output.len() == expected {
        Ok(output)
    } else {
        Err(DecompressionError::SizeMismatch {
            expected,
            actual: output.len(),
        })
    }
}
