use glam::Mat4;

use crate::geometry::{ShapeKind, Topology};
use crate::material::Material;

/// One recorded draw: which shape, where, how it is shaded and how it is assembled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub shape: ShapeKind,
    pub model: Mat4,
    pub material: Material,
    pub primitive: Topology,
}

/// Draw calls a scene issued for one frame, in submission order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn draw(&mut self, shape: ShapeKind, model: Mat4, material: Material, primitive: Topology) {
        self.calls.push(DrawCall {
            shape,
            model,
            material,
            primitive,
        });
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCall> {
        self.calls.iter()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCall;
    type IntoIter = std::slice::Iter<'a, DrawCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}
