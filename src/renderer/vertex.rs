//! Vertex format shared by the batch and the pipeline

use bytemuck::{Pod, Zeroable};

use crate::render::Rgba;

/// Position (court pixels until uploaded, then NDC) plus straight RGBA
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same vertex with its position passed through `map`
    pub fn mapped(self, map: impl Fn(f32, f32) -> (f32, f32)) -> Self {
        let (x, y) = map(self.position[0], self.position[1]);
        Self::new(x, y, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
