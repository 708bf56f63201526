//! Game simulation module
//!
//! All gameplay logic lives here, free of windowing and GPU types:
//! - Paddles and ball share `Kinematics` by composition
//! - Input arrives as a per-frame `TickInput` snapshot
//! - Serve randomness comes from a seeded RNG owned by `GameState`

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_paddle, ball_terrain, paddle_terrain, touching_side};
pub use state::{Ball, GameState, Kinematics, Paddle, Player, RoundPhase, Scores, Side};
pub use tick::{GameEvent, PaddleInput, TickInput, tick};
