mod cube;
mod outline;
mod strip;

pub use cube::cube;
pub use outline::cube_outline;
pub use strip::cube_single_strip;

use anyhow::{ensure, Result};
use glam::Vec3;

use crate::math::Color;

/// How consecutive vertices (or indices) are assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    TriangleStrip,
    LineList,
}

/// Per-vertex attribute paired one-to-one with positions
#[derive(Debug, Clone, PartialEq)]
pub enum VertexAttributes {
    /// Lit shapes
    Normals(Vec<Vec3>),
    /// Unlit shapes drawn with the basic shader
    Colors(Vec<Color>),
}

impl VertexAttributes {
    pub fn len(&self) -> usize {
        match self {
            Self::Normals(n) => n.len(),
            Self::Colors(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable vertex/index tables for one shape
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    name: &'static str,
    positions: Vec<Vec3>,
    attributes: VertexAttributes,
    indices: Option<Vec<u32>>,
    topology: Topology,
}

impl Shape {
    /// Builds a shape, rejecting tables that could not be drawn as `topology`
    pub fn new(
        name: &'static str,
        positions: Vec<Vec3>,
        attributes: VertexAttributes,
        indices: Option<Vec<u32>>,
        topology: Topology,
    ) -> Result<Self> {
        ensure!(!positions.is_empty(), "shape {name}: no positions");
        ensure!(
            attributes.len() == positions.len(),
            "shape {name}: {} positions but {} attributes",
            positions.len(),
            attributes.len()
        );

        if let Some(indices) = &indices {
            if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                anyhow::bail!(
                    "shape {name}: index {bad} out of range for {} vertices",
                    positions.len()
                );
            }
        }

        let element_count = indices.as_ref().map_or(positions.len(), Vec::len);
        match topology {
            Topology::TriangleList => ensure!(
                element_count % 3 == 0,
                "shape {name}: triangle list of {element_count} elements"
            ),
            Topology::LineList => ensure!(
                element_count % 2 == 0,
                "shape {name}: line list of {element_count} elements"
            ),
            Topology::TriangleStrip => ensure!(
                element_count >= 3,
                "shape {name}: triangle strip of {element_count} elements"
            ),
        }

        Ok(Self {
            name,
            positions,
            attributes,
            indices,
            topology,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn attributes(&self) -> &VertexAttributes {
        &self.attributes
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        match &self.attributes {
            VertexAttributes::Normals(n) => Some(n),
            VertexAttributes::Colors(_) => None,
        }
    }

    pub fn colors(&self) -> Option<&[Color]> {
        match &self.attributes {
            VertexAttributes::Colors(c) => Some(c),
            VertexAttributes::Normals(_) => None,
        }
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of vertices the draw call consumes
    pub fn element_count(&self) -> usize {
        self.indices.as_ref().map_or(self.positions.len(), Vec::len)
    }

    fn element(&self, i: usize) -> u32 {
        match &self.indices {
            Some(indices) => indices[i],
            None => i as u32,
        }
    }

    /// Triangles as vertex indices, with strip winding restored and degenerates dropped
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let n = self.element_count();
        let triangles: Vec<[u32; 3]> = match self.topology {
            Topology::TriangleList => (0..n / 3)
                .map(|t| [self.element(3 * t), self.element(3 * t + 1), self.element(3 * t + 2)])
                .collect(),
            Topology::TriangleStrip => (0..n.saturating_sub(2))
                .map(|t| {
                    let (a, b, c) = (self.element(t), self.element(t + 1), self.element(t + 2));
                    if t % 2 == 0 {
                        [a, b, c]
                    } else {
                        [b, a, c]
                    }
                })
                .collect(),
            Topology::LineList => Vec::new(),
        };

        triangles
            .into_iter()
            .filter(|[a, b, c]| a != b && b != c && a != c)
            .collect()
    }

    /// Endpoints of every independent segment of a line list
    pub fn segments(&self) -> Vec<(Vec3, Vec3)> {
        if self.topology != Topology::LineList {
            return Vec::new();
        }
        (0..self.element_count() / 2)
            .map(|s| {
                let a = self.element(2 * s) as usize;
                let b = self.element(2 * s + 1) as usize;
                (self.positions[a], self.positions[b])
            })
            .collect()
    }
}

/// The shapes the scenes draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    TriangleStrip,
    Outline,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Cube, ShapeKind::TriangleStrip, ShapeKind::Outline];
}

/// One instance of every shape, built once at startup
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    cube: Shape,
    strip: Shape,
    outline: Shape,
}

impl ShapeLibrary {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cube: cube()?,
            strip: cube_single_strip()?,
            outline: cube_outline()?,
        })
    }

    pub fn get(&self, kind: ShapeKind) -> &Shape {
        match kind {
            ShapeKind::Cube => &self.cube,
            ShapeKind::TriangleStrip => &self.strip,
            ShapeKind::Outline => &self.outline,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeKind, &Shape)> {
        ShapeKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}
