// Quad corner layout shared with shaders/sprite.wgsl

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// One corner of a sprite quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Canvas pixels
    pub position: [f32; 2],
    /// Normalized texture coordinates
    pub tex_coords: [f32; 2],
    /// Multiplied with the sampled texel
    pub tint: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub fn new(position: Vec2, tex_coords: Vec2, tint: Vec4) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
            tint: tint.to_array(),
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
