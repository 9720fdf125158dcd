//! Triangle index reconstruction.

use crate::error::FormatError;
use crate::packed::planes;

/// Undo the MG1/MG2 delta coding of triangle indices.
///
/// Input format: 3*N values arranged as [A0..An, B0..Bn, C0..Cn], one
/// plane per triangle corner.
///
/// - the first corner is a running sum over triangles;
/// - the third corner is relative to the first corner of its triangle;
/// - the second corner is relative to the first corner, except when the
///   triangle shares its first corner with the previous one, in which case
///   it continues from the previous triangle's second corner.
///
/// Arithmetic wraps, as the encoder stores negative deltas as `u32`.
pub fn unpack_indices(deltas: &[u32], vertex_count: u32) -> Result<Vec<u32>, FormatError> {
    let mut corners = planes(deltas, 3);
    let (Some(first), Some(second), Some(third)) = (corners.next(), corners.next(), corners.next())
    else {
        return Ok(Vec::new());
    };

    let mut indices = Vec::with_capacity(deltas.len());
    let mut prev: Option<[u32; 3]> = None;
    for ((&da, &db), &dc) in first.iter().zip(second).zip(third) {
        let a = da.wrapping_add(prev.map_or(0, |p| p[0]));
        let b = db.wrapping_add(match prev {
            Some(p) if p[0] == a => p[1],
            _ => a,
        });
        let c = dc.wrapping_add(a);

        indices.extend_from_slice(&[a, b, c]);
        prev = Some([a, b, c]);
    }

    check_indices(&indices, vertex_count)?;
    Ok(indices)
}

/// Every index must address an existing vertex.
pub fn check_indices(indices: &[u32], vertex_count: u32) -> Result<(), FormatError> {
    match indices.iter().find(|&&i| i >= vertex_count) {
        Some(&index) => Err(FormatError::IndexOutOfRange {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}
