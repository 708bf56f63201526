//! wgpu rendering module
//!
//! Each object is a unit quad scaled and placed in pixel space by a small
//! uniform block; the fragment program gives it its look.

pub mod gpu;
pub mod mesh;
pub mod pipeline;
pub mod resources;
pub mod shader;
pub mod vertex;

pub use gpu::GpuContext;
pub use mesh::Mesh;
pub use resources::GraphicsResources;
