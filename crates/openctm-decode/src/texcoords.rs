//! MG2 UV and attribute map unpacking.

use crate::packed::{planes, to_signed};

/// Undo the per-component delta coding of an MG2 map.
///
/// Input format: `components` planes of N signed-magnitude deltas,
/// [C0_0..C0_n, C1_0..C1_n, ...]. Each plane is a running sum that is then
/// scaled by `precision`.
///
/// Output: N interleaved tuples of `components` floats.
#[must_use]
pub fn unpack_map(deltas: &[u32], components: usize, precision: f32) -> Vec<f32> {
    let mut values = vec![0.0; deltas.len()];
    for (component, plane) in planes(deltas, components).enumerate() {
        let mut acc = 0_i32;
        for (i, &delta) in plane.iter().enumerate() {
            acc = acc.wrapping_add(to_signed(delta));
            values[i * components + component] = acc as f32 * precision;
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_planes_accumulate_and_interleave() {
        // u deltas +4, +2, -1; v deltas 0, +1, +1 in signed-magnitude form.
        let deltas = [8, 4, 1, 0, 2, 2];
        let uv = unpack_map(&deltas, 2, 0.125);
        assert_eq!(uv, vec![0.5, 0.0, 0.75, 0.125, 0.625, 0.25]);
    }

    #[test]
    fn attribute_planes_are_independent() {
        let deltas = [2, 2, 4, 4, 1, 1, 0, 0];
        let values = unpack_map(&deltas, 4, 1.0);
        assert_eq!(values, vec![1.0, 2.0, -1.0, 0.0, 2.0, 4.0, -2.0, 0.0]);
    }
}
