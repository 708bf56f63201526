//! Vertex types for quad meshes

use bytemuck::{Pod, Zeroable};

/// A vertex type that knows its GPU buffer layout
pub trait MeshVertex: Pod {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Position-only vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

impl MeshVertex for QuadVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Vertex with position and texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }
}

impl MeshVertex for TexturedVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Unit quad centered on the origin
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex::new(-0.5, -0.5),
    QuadVertex::new(-0.5, 0.5),
    QuadVertex::new(0.5, 0.5),
    QuadVertex::new(0.5, -0.5),
];

/// Unit quad with texture coordinates running 0..1 across each axis
pub const TEXTURED_QUAD_VERTICES: [TexturedVertex; 4] = [
    TexturedVertex::new(-0.5, -0.5, 0.0, 0.0),
    TexturedVertex::new(-0.5, 0.5, 0.0, 1.0),
    TexturedVertex::new(0.5, 0.5, 1.0, 1.0),
    TexturedVertex::new(0.5, -0.5, 1.0, 0.0),
];

/// Two triangles covering a quad
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Colors for the frame
pub mod colors {
    pub const BACKGROUND: wgpu::Color = wgpu::Color::BLACK;
}
