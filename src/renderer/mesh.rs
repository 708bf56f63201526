//! Indexed meshes backed by GPU vertex and index buffers

use miette::Result;
use wgpu::util::DeviceExt;

use super::vertex::{MeshVertex, QUAD_INDICES, QUAD_VERTICES, TEXTURED_QUAD_VERTICES};

/// Vertex buffer, index buffer and the layout to draw them with
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    layout: wgpu::VertexBufferLayout<'static>,
}

/// Reject empty meshes and indices pointing past the vertex data
pub fn check_mesh_data(label: &str, vertex_count: usize, indices: &[u16]) -> Result<()> {
    if vertex_count == 0 || indices.is_empty() {
        miette::bail!("Mesh `{label}` has no vertices or no indices");
    }
    if indices.len() % 3 != 0 {
        miette::bail!(
            "Mesh `{label}` has {} indices, not a triangle list",
            indices.len()
        );
    }
    if let Some(index) = indices.iter().find(|i| **i as usize >= vertex_count) {
        miette::bail!(
            "Mesh `{label}` index {index} is out of range for {vertex_count} vertices"
        );
    }
    Ok(())
}

impl Mesh {
    /// Upload vertices and indices
    pub fn new<V: MeshVertex>(
        device: &wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: &[u16],
    ) -> Result<Self> {
        check_mesh_data(label, vertices.len(), indices)?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "Mesh `{label}` created: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            layout: V::desc(),
        })
    }

    /// Position-only quad
    pub fn simple_quad(device: &wgpu::Device) -> Result<Self> {
        Self::new(device, "quad", &QUAD_VERTICES, &QUAD_INDICES)
    }

    /// Quad with texture coordinates
    pub fn textured_quad(device: &wgpu::Device) -> Result<Self> {
        Self::new(device, "textured_quad", &TEXTURED_QUAD_VERTICES, &QUAD_INDICES)
    }

    /// Layout to build a matching pipeline with
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'static> {
        self.layout.clone()
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}
