use anyhow::Result;
use glam::Vec3;

use super::{Shape, Topology, VertexAttributes};

// Two opposing faces per axis, four corners each, so every face owns its normal.
const POSITIONS: [[f32; 3]; 24] = [
    // Bottom (-Y), top (+Y)
    [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0],
    // Left (-X), right (+X)
    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0],
    // Front (+Z), back (-Z)
    [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0],
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

/// Two triangles per face, indices local to the face's four corners
const FACE_TRIANGLES: [u32; 6] = [0, 1, 2, 1, 3, 2];

/// Solid cube spanning [-1, 1] on every axis with flat per-face normals
pub fn cube() -> Result<Shape> {
    let positions = POSITIONS.iter().copied().map(Vec3::from_array).collect();

    let normals = FACE_NORMALS
        .iter()
        .flat_map(|n| std::iter::repeat(Vec3::from_array(*n)).take(4))
        .collect();

    let indices = (0..FACE_NORMALS.len() as u32)
        .flat_map(|face| FACE_TRIANGLES.iter().map(move |i| face * 4 + i))
        .collect();

    Shape::new(
        "cube",
        positions,
        VertexAttributes::Normals(normals),
        Some(indices),
        Topology::TriangleList,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = cube().unwrap();
        assert_eq!(cube.positions().len(), 24);
        assert_eq!(cube.normals().unwrap().len(), 24);
        assert_eq!(cube.indices().unwrap().len(), 36);
        assert!(cube.indices().unwrap().iter().all(|&i| i < 24));
    }

    #[test]
    fn test_cube_index_table() {
        let cube = cube().unwrap();
        assert_eq!(
            cube.indices().unwrap(),
            &[
                0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6, 8, 9, 10, 9, 11, 10, 12, 13, 14, 13, 15, 14,
                16, 17, 18, 17, 19, 18, 20, 21, 22, 21, 23, 22,
            ]
        );
    }

    #[test]
    fn test_face_normals_point_outward() {
        let cube = cube().unwrap();
        let normals = cube.normals().unwrap();
        for (p, n) in cube.positions().iter().zip(normals) {
            // Every corner of a face lies on the plane the normal points out of
            assert_eq!(p.dot(*n), 1.0);
        }
    }
}
