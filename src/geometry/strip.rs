use anyhow::Result;
use glam::Vec3;

use super::{Shape, Topology, VertexAttributes};

const CORNERS: [[f32; 3]; 8] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];

/// Covers front, bottom, right, top and back in turn; the left face gets two separate triangles
const STRIP: [u32; 14] = [0, 1, 2, 3, 5, 1, 7, 0, 6, 2, 4, 5, 6, 7];

/// Cube drawn as one triangle strip over its eight corners.
///
/// Corners double as normals, so shading is smooth across edges rather than flat.
pub fn cube_single_strip() -> Result<Shape> {
    let positions: Vec<Vec3> = CORNERS.iter().copied().map(Vec3::from_array).collect();
    let normals = positions.clone();

    Shape::new(
        "cube_single_strip",
        positions,
        VertexAttributes::Normals(normals),
        Some(STRIP.to_vec()),
        Topology::TriangleStrip,
    )
}
