//! Shader programs built from a vertex and a fragment WGSL source
//!
//! WGSL has no separate linking step, so a program is the two sources joined
//! into one module. The joined source goes through naga before the device
//! sees it; that way a broken shader is reported with its source location
//! instead of surfacing later as an uncaptured device error.

use miette::Result;
use naga::valid::{Capabilities, ValidationFlags, Validator};

pub const QUAD_VERTEX: &str = include_str!("shaders/quad.wgsl");
pub const TEXTURED_QUAD_VERTEX: &str = include_str!("shaders/textured_quad.wgsl");
pub const PADDLE_FRAGMENT: &str = include_str!("shaders/paddle.wgsl");
pub const BALL_FRAGMENT: &str = include_str!("shaders/ball.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Join the two stages into one WGSL source
pub fn link(vertex_src: &str, fragment_src: &str) -> String {
    format!("{vertex_src}\n{fragment_src}")
}

/// Parse and validate a WGSL source
pub fn validate(label: &str, source: &str) -> Result<()> {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(module) => module,
        Err(err) => {
            let diagnostic = err.emit_to_string(source);
            log::error!("Shader `{label}` failed to compile:\n{diagnostic}");
            miette::bail!("Shader `{label}` failed to compile: {err}");
        }
    };

    if let Err(err) = Validator::new(ValidationFlags::all(), Capabilities::all()).validate(&module)
    {
        log::error!("Shader `{label}` failed validation: {err}");
        miette::bail!("Shader `{label}` failed validation: {err}");
    }

    for entry in [VERTEX_ENTRY, FRAGMENT_ENTRY] {
        if !module.entry_points.iter().any(|ep| ep.name == entry) {
            miette::bail!("Shader `{label}` has no `{entry}` entry point");
        }
    }

    Ok(())
}

/// Link, validate and upload a shader program
pub fn create_program(
    device: &wgpu::Device,
    label: &str,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<wgpu::ShaderModule> {
    let source = link(vertex_src, fragment_src);
    validate(label, &source)?;

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    log::debug!("Shader program `{label}` created");

    Ok(module)
}
