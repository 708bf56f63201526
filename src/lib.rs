//! Twin Pong - a two-player desktop Pong clone
//!
//! Core modules:
//! - `sim`: Paddle/ball model, collisions and the scoring state machine
//! - `renderer`: wgpu graphics context, shader programs and quad meshes
//! - `platform`: Logging, clock, keyboard snapshot and window helpers
//! - `session`: Ordered sub-system bring-up and the run lifecycle
//! - `app`: winit event pump driving the frame loop
//! - `settings`: JSON configuration with defaults

pub mod app;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use app::App;
pub use settings::{Settings, Tuning};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default arena (and window) dimensions in pixels
    pub const ARENA_WIDTH: u32 = 1280;
    pub const ARENA_HEIGHT: u32 = 720;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(25.0, 150.0);
    /// Distance between a paddle's center and its own goal line
    pub const PADDLE_WALL_OFFSET: f32 = 50.0;
    pub const PADDLE_SPEED: f32 = 400.0;
    /// Fraction of paddle height a paddle may poke past a wall
    pub const PADDLE_GRACE: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_LAUNCH_SPEED: f32 = 300.0;
    /// Speed added on every paddle hit (never decays within a round)
    pub const BALL_SPEED_INCREMENT: f32 = 50.0;
    /// Fraction of the radius the ball may sink behind a paddle face and still bounce
    pub const BALL_BEHIND_TOLERANCE: f32 = 0.25;
}

/// Returns `1.0` or `-1.0` with equal probability
#[inline]
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
