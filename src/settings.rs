//! Game settings and preferences
//!
//! Read from a JSON file at startup. Every field has a default, so a partial
//! file (or no file at all) is valid.

use std::path::{Path, PathBuf};

use glam::Vec2;
use miette::{Context, IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable pointing at an alternative settings file
pub const CONFIG_ENV: &str = "TWIN_PONG_CONFIG";

/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "twin-pong.json";

/// Window options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Inner width in pixels, also the arena width
    pub width: u32,
    /// Inner height in pixels, also the arena height
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            title: "Twin Pong".to_string(),
            vsync: true,
        }
    }
}

/// Log file options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// File the log lines are written to (truncated on start)
    pub path: PathBuf,
    /// Filter in `RUST_LOG` syntax, e.g. `info` or `twin_pong=debug,wgpu=warn`
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("twin-pong.log"),
            level: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".to_string(),
        }
    }
}

/// Gameplay balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Paddle speed while a move key is held (pixels/s)
    pub paddle_speed: f32,
    /// Ball speed right after launch (pixels/s)
    pub ball_launch_speed: f32,
    /// Speed gained on each paddle hit (pixels/s)
    pub ball_speed_increment: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_speed: PADDLE_SPEED,
            ball_launch_speed: BALL_LAUNCH_SPEED,
            ball_speed_increment: BALL_SPEED_INCREMENT,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub log: LogSettings,
    pub tuning: Tuning,
    /// Fixed RNG seed for reproducible serves; time-based when absent
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .into_diagnostic()
            .wrap_err("Error parsing settings JSON")
    }

    /// Load settings from a file, falling back to defaults when it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading settings file {}", path.display()))?;

        Self::from_json(&json)
            .wrap_err_with(|| format!("Invalid settings file {}", path.display()))
    }

    /// Load settings from `TWIN_PONG_CONFIG` or `twin-pong.json`
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::load_from(&path)
    }

    /// Arena size in pixels
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.window.width as f32, self.window.height as f32)
    }

    /// Seed for the serve RNG
    pub fn seed_or_now(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
