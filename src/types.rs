use std::mem::size_of;

use crate::draw::DrawCall;
use crate::frame::ProgramState;
use crate::geometry::{Shape, VertexAttributes};
use crate::math::Color;

/// Vertex for lit shapes: position and normal
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl LitVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex for unlit shapes: position and RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColoredVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Interleaved vertex buffer contents of one shape
#[derive(Debug, Clone, PartialEq)]
pub enum VertexData {
    Lit(Vec<LitVertex>),
    Colored(Vec<ColoredVertex>),
}

impl VertexData {
    pub fn from_shape(shape: &Shape) -> Self {
        let positions = shape.positions();
        match shape.attributes() {
            VertexAttributes::Normals(normals) => VertexData::Lit(
                positions
                    .iter()
                    .zip(normals)
                    .map(|(p, n)| LitVertex {
                        position: p.to_array(),
                        normal: n.to_array(),
                    })
                    .collect(),
            ),
            VertexAttributes::Colors(colors) => VertexData::Colored(
                positions
                    .iter()
                    .zip(colors)
                    .map(|(p, c)| ColoredVertex {
                        position: p.to_array(),
                        color: c.to_array(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, VertexData::Lit(_))
    }

    pub fn len(&self) -> usize {
        match self {
            VertexData::Lit(v) => v.len(),
            VertexData::Colored(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            VertexData::Lit(v) => bytemuck::cast_slice(v),
            VertexData::Colored(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Per-draw uniform block, one slot per draw call in a dynamically offset buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub view_projection: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub camera_center: [f32; 4],
    /// ambient, diffusivity, specularity, smoothness
    pub material: [f32; 4],
    pub light_attenuation: f32,
    pub _pad: [f32; 3],
}

impl DrawUniform {
    pub fn new(call: &DrawCall, state: &ProgramState) -> Self {
        let view_projection = state.projection_transform * state.camera_inverse();
        let (light_position, light_color, light_attenuation) = match state.lights.first() {
            Some(light) => (light.position.to_array(), light.color.to_array(), light.attenuation()),
            None => ([0.0, 0.0, 1.0, 0.0], Color::BLACK.to_array(), 0.0),
        };

        Self {
            model: call.model.to_cols_array_2d(),
            normal_matrix: call.model.inverse().transpose().to_cols_array_2d(),
            view_projection: view_projection.to_cols_array_2d(),
            color: call.material.color.to_array(),
            light_position,
            light_color,
            camera_center: state.camera_position().extend(1.0).to_array(),
            material: call.material.params(),
            light_attenuation,
            _pad: [0.0; 3],
        }
    }
}
