//! MG2 files built with the pass-through decompressor.

mod common;

use common::{FileBuilder, MG2, mg2_header, signed};
use openctm_decode::{ChunkTag, DecodeError, FormatError, Mesh, Stored, decode_with};

const NORMAL_PRECISION: f32 = 1.0 / 256.0;

/// One triangle in cell 1 of a 2x1x1 grid over [0,2]x[0,1]x[0,1].
///
/// Positions are (1,0,0), (1.5,0,0) and (1,0.5,0) with precision 0.5, so
/// the intra-cell integers are x = 0,1,0 (delta-coded as 0,+1,-1), y = 0,0,1
/// and z = 0.
fn triangle_file(flags_normals: bool) -> FileBuilder {
    let mut file = FileBuilder::new(MG2, 3, 1);
    if flags_normals {
        file = file.with_normals();
    }
    mg2_header(&mut file, 0.5, NORMAL_PRECISION, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);
    file.raw(b"VERT")
        .packed(&[0, 1, u32::MAX, 0, 0, 1, 0, 0, 0]);
    file.raw(b"GIDX").packed(&[1, 0, 0]);
    file.raw(b"INDX").packed(&[0, 1, 2]);
    file
}

fn decode(file: &FileBuilder) -> Result<Mesh, DecodeError> {
    decode_with(&file.build(), &Stored)
}

#[test]
fn grid_cell_offsets_positions() {
    let mesh = decode(&triangle_file(false)).unwrap();

    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(
        mesh.vertices,
        vec![1.0, 0.0, 0.0, 1.5, 0.0, 0.0, 1.0, 0.5, 0.0]
    );
    assert_eq!(mesh.normals, None);
}

#[test]
fn x_restarts_when_grid_cell_changes() {
    let mut file = FileBuilder::new(MG2, 3, 1);
    mg2_header(&mut file, 0.25, NORMAL_PRECISION, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);
    // Cells 0, 1, 1: the second vertex's x is absolute again.
    file.raw(b"GIDX").packed(&[0, 1, 0]);
    file.raw(b"VERT").packed(&[2, 1, 2, 0, 0, 0, 0, 0, 0]);
    file.raw(b"INDX").packed(&[0, 1, 2]);

    let mesh = decode(&file).unwrap();
    let xs: Vec<f32> = mesh.positions().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.5, 1.25, 1.75]);
}

#[test]
fn zero_phi_normals_follow_smooth_normals() {
    let mut file = triangle_file(true);
    // Magnitude 256 * precision = 1; theta is ignored when phi is 0.
    file.raw(b"NORM")
        .packed(&[256, 256, 256, 0, 0, 0, 7, 0, 3]);

    let mesh = decode(&file).unwrap();
    assert_eq!(
        mesh.normals,
        Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
    );
}

#[test]
fn leaning_normals_keep_their_magnitude() {
    let mut file = triangle_file(true);
    file.raw(b"NORM")
        .packed(&[256, 512, 128, 64, 32, 100, 9, 2, 40]);

    let mesh = decode(&file).unwrap();
    let normals = mesh.normals.unwrap();
    let lengths: Vec<f32> = normals
        .chunks_exact(3)
        .map(|n| n.iter().map(|c| c * c).sum::<f32>().sqrt())
        .collect();
    for (length, expected) in lengths.iter().zip([1.0, 2.0, 0.5]) {
        assert!((length - expected).abs() < 1e-5, "{length} != {expected}");
    }
}

#[test]
fn uv_and_attribute_maps_are_delta_coded() {
    let mut file = triangle_file(false).with_uv_maps(1).with_attribute_maps(1);
    file.raw(b"TEXC")
        .string("Diffuse")
        .string("tex.png")
        .f32(1.0 / 16.0)
        .packed(&[signed(16), signed(-8), signed(4), signed(0), signed(16), signed(-16)]);
    file.raw(b"ATTR")
        .string("Temperature")
        .f32(0.5)
        .packed(&[
            signed(2), signed(2), signed(2), //
            signed(-2), signed(0), signed(0), //
            signed(0), signed(1), signed(1), //
            signed(4), signed(-4), signed(0),
        ]);

    let mesh = decode(&file).unwrap();
    let uv = mesh.uv_map("Diffuse").unwrap();
    assert_eq!(uv.file_name, "tex.png");
    assert_eq!(uv.coords, vec![1.0, 0.0, 0.5, 1.0, 0.75, 0.0]);
    let attr = mesh.attribute_map("Temperature").unwrap();
    assert_eq!(
        attr.values,
        vec![1.0, -1.0, 0.0, 2.0, 2.0, -1.0, 0.5, 0.0, 3.0, -1.0, 1.0, 0.0]
    );
}

#[test]
fn vertices_before_mg2_header_are_rejected() {
    let mut file = FileBuilder::new(MG2, 3, 1);
    file.raw(b"VERT").packed(&[0; 9]);

    assert!(matches!(
        decode(&file),
        Err(DecodeError::Format(FormatError::MissingMg2Header(tag))) if tag == ChunkTag::VERT
    ));
}

#[test]
fn indices_before_mg2_header_are_accepted() {
    let mut file = FileBuilder::new(MG2, 3, 1);
    file.raw(b"INDX").packed(&[0, 1, 2]);
    mg2_header(&mut file, 0.5, NORMAL_PRECISION, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);
    file.raw(b"VERT").packed(&[0, 1, u32::MAX, 0, 0, 1, 0, 0, 0]);
    file.raw(b"GIDX").packed(&[1, 0, 0]);

    let reordered = decode(&file).unwrap();
    assert_eq!(reordered, decode(&triangle_file(false)).unwrap());
}

#[test]
fn grid_index_outside_grid_is_rejected() {
    let mut file = FileBuilder::new(MG2, 3, 1);
    mg2_header(&mut file, 0.5, NORMAL_PRECISION, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);
    file.raw(b"GIDX").packed(&[1, 1, 0]);

    assert!(matches!(
        decode(&file),
        Err(DecodeError::Format(FormatError::GridIndexOutOfRange {
            index: 2,
            cell_count: 2
        }))
    ));
}

#[test]
fn missing_grid_indices_are_reported() {
    let mut file = FileBuilder::new(MG2, 3, 1);
    mg2_header(&mut file, 0.5, NORMAL_PRECISION, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);
    file.raw(b"VERT").packed(&[0; 9]);
    file.raw(b"INDX").packed(&[0, 1, 2]);

    assert!(matches!(
        decode(&file),
        Err(DecodeError::Format(FormatError::MissingChunk("GIDX")))
    ));
}

#[test]
fn invalid_mg2_header_is_rejected() {
    for (precision, max, divisions) in [
        (0.0, [1.0; 3], [1, 1, 1]),
        (f32::NAN, [1.0; 3], [1, 1, 1]),
        (0.5, [-1.0, 1.0, 1.0], [1, 1, 1]),
        (0.5, [1.0; 3], [1, 0, 1]),
    ] {
        let mut file = FileBuilder::new(MG2, 3, 1);
        mg2_header(&mut file, precision, NORMAL_PRECISION, [0.0; 3], max, divisions);

        let err = decode(&file).unwrap_err();
        assert!(
            matches!(
                err,
                DecodeError::Format(
                    FormatError::InvalidPrecision { .. } | FormatError::InvalidMg2Header(_)
                )
            ),
            "{err}"
        );
    }
}

#[test]
fn duplicate_mg2_header_is_rejected() {
    let mut file = triangle_file(false);
    mg2_header(&mut file, 0.5, NORMAL_PRECISION, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);

    assert!(matches!(
        decode(&file),
        Err(DecodeError::Format(FormatError::DuplicateChunk("MG2H")))
    ));
}

#[test]
fn decoded_meshes_have_valid_indices_and_no_nan() {
    let mesh = decode(&triangle_file(false)).unwrap();
    let vertex_count = mesh.vertex_count() as u32;

    assert!(mesh.indices.iter().all(|&i| i < vertex_count));
    assert!(mesh.vertices.iter().all(|v| !v.is_nan()));
}
