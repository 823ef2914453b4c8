use box_scenes::geometry::{cube, cube_outline, cube_single_strip, Topology};
use box_scenes::math::Color;
use std::collections::HashSet;

#[cfg(test)]
mod geometry_tests {
    use super::*;

    #[test]
    fn test_cube_counts_and_index_range() {
        let cube = cube().unwrap();
        assert_eq!(cube.positions().len(), 24);
        assert_eq!(cube.normals().unwrap().len(), 24);

        let indices = cube.indices().unwrap();
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| i < 24), "Every index must address a vertex");
    }

    #[test]
    fn test_cube_faces_share_normals() {
        let cube = cube().unwrap();
        let normals = cube.normals().unwrap();
        for face in normals.chunks(4) {
            assert!(face.iter().all(|n| *n == face[0]), "Face normals differ: {:?}", face);
        }
        let distinct: HashSet<_> = normals.iter().map(|n| n.to_array().map(f32::to_bits)).collect();
        assert_eq!(distinct.len(), 6);
    }

    #[test]
    fn test_cube_triangles_lie_on_their_faces() {
        let cube = cube().unwrap();
        let positions = cube.positions();
        let normals = cube.normals().unwrap();
        for [a, b, c] in cube.triangles() {
            let n = normals[a as usize];
            let d = positions[a as usize].dot(n);
            assert!((positions[b as usize].dot(n) - d).abs() < 1e-6);
            assert!((positions[c as usize].dot(n) - d).abs() < 1e-6);
        }
    }

    #[test]
    fn test_outline_is_white_unindexed_lines() {
        let outline = cube_outline().unwrap();
        assert_eq!(outline.positions().len(), 24);
        assert_eq!(outline.topology(), Topology::LineList);
        assert!(outline.indices().is_none());

        let colors = outline.colors().unwrap();
        assert_eq!(colors.len(), 24);
        assert!(colors.iter().all(|c| *c == Color::WHITE));
    }

    #[test]
    fn test_outline_segments_are_cube_edges() {
        let outline = cube_outline().unwrap();
        let segments = outline.segments();
        assert_eq!(segments.len(), 12);
        for (a, b) in segments {
            assert!((a.distance(b) - 2.0).abs() < 1e-6, "Edge {:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn test_strip_reuses_positions_as_normals() {
        let strip = cube_single_strip().unwrap();
        assert_eq!(strip.positions().len(), 8);
        assert_eq!(strip.normals().unwrap(), strip.positions());
        assert_eq!(strip.topology(), Topology::TriangleStrip);
    }

    #[test]
    fn test_strip_covers_every_face() {
        let strip = cube_single_strip().unwrap();
        let positions = strip.positions();
        let triangles = strip.triangles();
        assert_eq!(triangles.len(), 12);

        let mut faces = HashSet::new();
        for [a, b, c] in triangles {
            let (pa, pb, pc) = (positions[a as usize], positions[b as usize], positions[c as usize]);
            // the axis all three corners agree on names the face
            let axis = (0..3)
                .find(|&axis| pa[axis] == pb[axis] && pa[axis] == pc[axis])
                .expect("Triangle does not lie on a cube face");
            faces.insert((axis, pa[axis] > 0.0));
        }
        assert_eq!(faces.len(), 6, "Strip should cover all six faces");
    }
}
