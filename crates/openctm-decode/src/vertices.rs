//! MG2 vertex dequantization.

use glam::Vec3;

use crate::error::FormatError;
use crate::header::Mg2Header;
use crate::mesh::check_not_nan;
use crate::packed::planes;

/// Turn grid index deltas into absolute grid cell ids.
///
/// Every id must fall inside the grid described by `header`.
pub fn unpack_grid_indices(deltas: &[u32], header: &Mg2Header) -> Result<Vec<u32>, FormatError> {
    let cell_count = header.cell_count();
    let mut grid_index = 0_u32;
    deltas
        .iter()
        .map(|&delta| {
            grid_index = grid_index.wrapping_add(delta);
            if u64::from(grid_index) < cell_count {
                Ok(grid_index)
            } else {
                Err(FormatError::GridIndexOutOfRange {
                    index: grid_index,
                    cell_count,
                })
            }
        })
        .collect()
}

/// Rebuild vertex positions from grid cells and intra-cell integers.
///
/// Input format: 3*N values arranged as [X0..Xn, Y0..Yn, Z0..Zn].
/// X is delta-coded between consecutive vertices in the same grid cell and
/// restarts whenever the cell changes; Y and Z are absolute.
///
/// Output: N positions, `cell_origin + vertex_precision * integer`.
pub fn dequantize(
    header: &Mg2Header,
    grid_indices: &[u32],
    quantized: &[u32],
) -> Result<Vec<f32>, FormatError> {
    let mut axes = planes(quantized, 3);
    let (Some(xs), Some(ys), Some(zs)) = (axes.next(), axes.next(), axes.next()) else {
        return Err(FormatError::MissingChunk("VERT"));
    };

    let mut vertices = Vec::with_capacity(quantized.len());
    let mut prev: Option<(u32, u32)> = None;
    for (((&grid_index, &dx), &y), &z) in grid_indices.iter().zip(xs).zip(ys).zip(zs) {
        let x = match prev {
            Some((prev_grid, prev_x)) if prev_grid == grid_index => dx.wrapping_add(prev_x),
            _ => dx,
        };
        prev = Some((grid_index, x));

        let offset = Vec3::new(x as f32, y as f32, z as f32) * header.vertex_precision;
        let position = header.cell_origin(grid_index) + offset;
        vertices.extend_from_slice(&position.to_array());
    }

    check_not_nan("vertices", &vertices)?;
    Ok(vertices)
}
