//! MG2 normal reconstruction.
//!
//! Normals are stored relative to the mesh's own smooth normals: a
//! magnitude plus two angles that describe how far the real normal leans
//! away from the smooth one.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::error::FormatError;
use crate::mesh::check_not_nan;
use crate::packed::planes;

/// Face normals shorter than this are treated as degenerate.
const NORMAL_EPSILON: f32 = 1e-10;

/// Tangent axes shorter than this are left unnormalized.
const BASIS_EPSILON: f32 = 1e-20;

/// Average the unit face normals around each vertex.
///
/// Indices must already be validated against the vertex count.
#[must_use]
pub fn smooth_normals(vertices: &[f32], indices: &[u32]) -> Vec<Vec3> {
    let positions: Vec<Vec3> = vertices.chunks_exact(3).map(Vec3::from_slice).collect();
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| triangle[k] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        let len = face.length();
        let face = if len < NORMAL_EPSILON {
            Vec3::ZERO
        } else {
            face / len
        };
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    for sum in &mut sums {
        let len = sum.length();
        if len >= NORMAL_EPSILON {
            *sum /= len;
        }
    }
    sums
}

/// Tangent axis perpendicular to `normal`, continuous in `normal`.
///
/// This is `(0, 0, 1) x n + (1, 0, 0) x n`, which only vanishes for
/// normals along `(1, 0, 1)`.
fn tangent(normal: Vec3) -> Vec3 {
    let axis = Vec3::new(-normal.y, normal.x - normal.z, normal.y);
    let len = axis.length();
    if len > BASIS_EPSILON { axis / len } else { axis }
}

/// Decode one normal from its magnitude and angle integers.
fn restore_one(smooth: Vec3, magnitude: u32, phi: u32, theta: u32, precision: f32) -> Vec3 {
    let magnitude = magnitude as f32 * precision;
    if phi == 0 {
        return smooth * magnitude;
    }

    let angle_phi = phi as f32 * precision * FRAC_PI_2;
    // Fewer theta buckets are used close to the pole.
    let angle_theta = if phi <= 4 {
        (theta as f32 - 2.0) * FRAC_PI_2
    } else {
        (theta as f32 * 4.0 / phi as f32 - 2.0) * FRAC_PI_2
    };

    let (sin_phi, cos_phi) = angle_phi.sin_cos();
    let (sin_theta, cos_theta) = angle_theta.sin_cos();
    let local = Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi) * magnitude;

    let x_axis = tangent(smooth);
    let y_axis = smooth.cross(x_axis);
    x_axis * local.x + y_axis * local.y + smooth * local.z
}

/// Rebuild normals from their quantized spherical form.
///
/// Input format: 3*N values arranged as [magnitude.., phi.., theta..].
/// `vertices` and `indices` must be complete; the smooth normals they imply
/// are the reference frame for every stored normal.
pub fn restore(
    quantized: &[u32],
    precision: f32,
    vertices: &[f32],
    indices: &[u32],
) -> Result<Vec<f32>, FormatError> {
    let mut fields = planes(quantized, 3);
    let (Some(magnitudes), Some(phis), Some(thetas)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(FormatError::MissingChunk("NORM"));
    };

    let smooth = smooth_normals(vertices, indices);
    let mut normals = Vec::with_capacity(quantized.len());
    for (((&s, &magnitude), &phi), &theta) in smooth.iter().zip(magnitudes).zip(phis).zip(thetas) {
        let normal = restore_one(s, magnitude, phi, theta, precision);
        normals.extend_from_slice(&normal.to_array());
    }

    check_not_nan("normals", &normals)?;
    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a} != {b}");
    }

    #[test]
    fn single_triangle_smooth_normal_is_face_normal() {
        let smooth = smooth_normals(&TRIANGLE, &[0, 1, 2]);
        assert_eq!(smooth, vec![Vec3::Z; 3]);
    }

    #[test]
    fn degenerate_triangle_contributes_nothing() {
        let vertices = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let smooth = smooth_normals(&vertices, &[0, 1, 2]);
        assert_eq!(smooth, vec![Vec3::ZERO; 3]);
    }

    #[test]
    fn shared_vertex_averages_faces() {
        // Two faces at right angles sharing the edge 0-1.
        let vertices = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ];
        let smooth = smooth_normals(&vertices, &[0, 1, 2, 0, 3, 1]);
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert_close(smooth[0], expected);
        assert_close(smooth[1], expected);
        assert_close(smooth[2], Vec3::Z);
        assert_close(smooth[3], Vec3::Y);
    }

    #[test]
    fn zero_phi_scales_smooth_normal() {
        let precision = 1.0 / 256.0;
        // Magnitude 512 * precision = 2; theta is ignored when phi is 0.
        for theta in [0, 3, 1000] {
            let quantized = [512, 512, 512, 0, 0, 0, theta, theta, theta];
            let normals = restore(&quantized, precision, &TRIANGLE, &[0, 1, 2]).unwrap();
            assert_eq!(normals, vec![0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0]);
        }
    }

    #[test]
    fn leaning_normal_matches_basis_rotation() {
        let precision = 1.0 / 64.0;
        // phi = 32 * precision * pi/2 = pi/4; phi > 4, so theta = (8 * 4 / 32 - 2) * pi/2 = -pi/2.
        let n = restore_one(Vec3::Z, 64, 32, 8, precision);

        let x_axis = Vec3::new(0.0, -1.0, 0.0);
        let y_axis = Vec3::Z.cross(x_axis);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let expected = x_axis * 0.0 + y_axis * -s + Vec3::Z * s;
        assert_close(n, expected);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn coarse_theta_near_pole() {
        let precision = 1.0 / 64.0;
        // phi <= 4 uses quarter turns: theta 2 maps to angle 0.
        let n = restore_one(Vec3::Z, 64, 4, 2, precision);
        let angle_phi = 4.0 * precision * FRAC_PI_2;
        let x_axis = tangent(Vec3::Z);
        let expected = x_axis * angle_phi.sin() + Vec3::Z * angle_phi.cos();
        assert_close(n, expected);
    }

    /// Smooth normal (1, 2, 3) / sqrt(14) and its basis worked out by hand:
    /// X = (-2, -2, 2) normalized, Y = s x X = (5, -4, 1) / sqrt(42).
    fn oblique_basis() -> (Vec3, Vec3, Vec3) {
        let s = Vec3::new(1.0, 2.0, 3.0) / 14.0_f32.sqrt();
        let x_axis = Vec3::new(-1.0, -1.0, 1.0) / 3.0_f32.sqrt();
        let y_axis = Vec3::new(5.0, -4.0, 1.0) / 42.0_f32.sqrt();
        (s, x_axis, y_axis)
    }

    #[test]
    fn oblique_tangent_uses_all_coefficients() {
        let (s, x_axis, y_axis) = oblique_basis();
        assert_close(tangent(s), x_axis);
        assert_close(s.cross(tangent(s)), y_axis);
    }

    #[test]
    fn oblique_leaning_normal_fine_theta() {
        let precision = 1.0 / 64.0;
        let (s, x_axis, y_axis) = oblique_basis();
        // phi = pi/4, theta = (8 * 4 / 32 - 2) * pi/2 = -pi/2.
        let n = restore_one(s, 64, 32, 8, precision);

        let h = std::f32::consts::FRAC_1_SQRT_2;
        let expected = x_axis * 0.0 + y_axis * -h + s * h;
        assert_close(n, expected);
    }

    #[test]
    fn oblique_leaning_normal_coarse_theta() {
        let precision = 1.0 / 64.0;
        let (s, x_axis, y_axis) = oblique_basis();
        // Magnitude 2; phi = 3/64 * pi/2; phi <= 4 so theta = (3 - 2) * pi/2.
        let n = restore_one(s, 128, 3, 3, precision);

        let (sin_phi, cos_phi) = (3.0 * precision * FRAC_PI_2).sin_cos();
        let expected = (x_axis * 0.0 + y_axis * sin_phi + s * cos_phi) * 2.0;
        assert_close(n, expected);
        assert!((n.length() - 2.0).abs() < 1e-5);
    }
}
