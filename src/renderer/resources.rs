//! GPU resources for drawing a game frame

use glam::Vec2;
use miette::{Context, Result};

use super::gpu::GpuContext;
use super::mesh::Mesh;
use super::pipeline::{DrawUniforms, ObjectUniforms, create_quad_pipeline, create_uniform_layout};
use super::shader::{
    BALL_FRAGMENT, PADDLE_FRAGMENT, QUAD_VERTEX, TEXTURED_QUAD_VERTEX, create_program,
};
use super::vertex::colors;
use crate::sim::{Ball, GameState, Paddle, Player};

/// Programs, meshes and uniforms.
///
/// Everything is created in [`GraphicsResources::new`]; a failure part way
/// through drops whatever was already built.
pub struct GraphicsResources {
    paddle_pipeline: wgpu::RenderPipeline,
    ball_pipeline: wgpu::RenderPipeline,
    quad: Mesh,
    textured_quad: Mesh,
    /// Indexed by `Player::index`
    paddle_uniforms: [ObjectUniforms; 2],
    ball_uniforms: ObjectUniforms,
    win_size: Vec2,
}

impl GraphicsResources {
    pub fn new(gpu: &GpuContext, win_size: Vec2) -> Result<Self> {
        let device = &gpu.device;

        let paddle_program = create_program(device, "paddle", QUAD_VERTEX, PADDLE_FRAGMENT)
            .wrap_err("Error creating paddle program")?;
        let ball_program = create_program(device, "ball", TEXTURED_QUAD_VERTEX, BALL_FRAGMENT)
            .wrap_err("Error creating ball program")?;

        let quad = Mesh::simple_quad(device)?;
        let textured_quad = Mesh::textured_quad(device)?;

        let uniform_layout = create_uniform_layout(device);
        let paddle_pipeline = create_quad_pipeline(
            device,
            "paddle",
            gpu.format(),
            &paddle_program,
            &uniform_layout,
            quad.layout(),
        );
        let ball_pipeline = create_quad_pipeline(
            device,
            "ball",
            gpu.format(),
            &ball_program,
            &uniform_layout,
            textured_quad.layout(),
        );

        let paddle_uniforms = [
            ObjectUniforms::new(device, "paddle_one", &uniform_layout),
            ObjectUniforms::new(device, "paddle_two", &uniform_layout),
        ];
        let ball_uniforms = ObjectUniforms::new(device, "ball", &uniform_layout);

        log::info!("Graphics resources created");

        Ok(Self {
            paddle_pipeline,
            ball_pipeline,
            quad,
            textured_quad,
            paddle_uniforms,
            ball_uniforms,
            win_size,
        })
    }

    /// Clear, draw both paddles then the ball, and present
    pub fn render(&self, gpu: &GpuContext, state: &GameState) -> Result<(), wgpu::SurfaceError> {
        for player in Player::ALL {
            self.paddle_uniforms[player.index()]
                .write(&gpu.queue, &paddle_uniforms(self.win_size, state.paddle(player)));
        }
        self.ball_uniforms
            .write(&gpu.queue, &ball_uniforms(self.win_size, &state.ball));

        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.paddle_pipeline);
            for uniforms in &self.paddle_uniforms {
                render_pass.set_bind_group(0, uniforms.bind_group(), &[]);
                self.quad.draw(&mut render_pass);
            }

            render_pass.set_pipeline(&self.ball_pipeline);
            render_pass.set_bind_group(0, self.ball_uniforms.bind_group(), &[]);
            self.textured_quad.draw(&mut render_pass);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

pub fn paddle_uniforms(win_size: Vec2, paddle: &Paddle) -> DrawUniforms {
    DrawUniforms::new(win_size, paddle.size(), paddle.position())
}

/// The ball quad is the bounding square of its circle
pub fn ball_uniforms(win_size: Vec2, ball: &Ball) -> DrawUniforms {
    DrawUniforms::new(win_size, Vec2::splat(ball.radius() * 2.0), ball.position())
}
