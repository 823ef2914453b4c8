use anyhow::Result;
use glam::Vec3;

use super::{Shape, Topology, VertexAttributes};
use crate::math::Color;

/// Twelve cube edges as independent segments: back square, front square, then the four
/// edges joining them
const EDGES: [[[f32; 3]; 2]; 12] = [
    [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
    [[1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
    [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0]],
    [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0]],
    [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
    [[1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
    [[1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
    [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0]],
    [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]],
    [[1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
    [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]],
    [[1.0, -1.0, -1.0], [1.0, -1.0, 1.0]],
];

/// Wireframe cube for the basic shader. Colors live on the vertices, so every vertex is white.
pub fn cube_outline() -> Result<Shape> {
    let positions: Vec<Vec3> = EDGES
        .iter()
        .flat_map(|[a, b]| [Vec3::from_array(*a), Vec3::from_array(*b)])
        .collect();
    let colors = vec![Color::WHITE; positions.len()];

    Shape::new(
        "cube_outline",
        positions,
        VertexAttributes::Colors(colors),
        None,
        Topology::LineList,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_outline_counts() {
        let outline = cube_outline().unwrap();
        assert_eq!(outline.positions().len(), 24);
        assert_eq!(outline.colors().unwrap().len(), 24);
        assert!(outline.indices().is_none());
        assert_eq!(outline.segments().len(), 12);
    }

    #[test]
    fn test_outline_all_white() {
        let outline = cube_outline().unwrap();
        assert!(outline.colors().unwrap().iter().all(|c| *c == Color::WHITE));
    }

    #[test]
    fn test_segments_are_distinct_cube_edges() {
        let outline = cube_outline().unwrap();
        let mut seen = HashSet::new();
        for (a, b) in outline.segments() {
            // A cube edge differs in exactly one coordinate, by the full side length
            assert_eq!(a.distance(b), 2.0);
            let key = if a.to_array() < b.to_array() {
                (a.to_array().map(|v| v as i32), b.to_array().map(|v| v as i32))
            } else {
                (b.to_array().map(|v| v as i32), a.to_array().map(|v| v as i32))
            };
            assert!(seen.insert(key), "duplicate edge {:?}", key);
        }
        assert_eq!(seen.len(), 12);
    }
}
