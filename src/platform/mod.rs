//! Platform layer
//!
//! Thin wrappers over the OS-facing pieces the game loop consumes:
//! - `logfile`: file-backed logger with a scoped guard
//! - `time`: monotonic frame delta
//! - `input`: keyboard snapshot sampled once per frame
//! - `window`: window creation and presentation helpers

pub mod input;
pub mod logfile;
pub mod time;
pub mod window;

pub use input::{Controls, InputState};
pub use logfile::LogGuard;
pub use time::FrameTimer;
