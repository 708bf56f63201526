//! Window creation and presentation helpers

use std::sync::Arc;

use miette::{Context, IntoDiagnostic, Result};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::settings::WindowSettings;
use crate::sim::{Player, Scores};

/// Create the game window.
///
/// The window is fixed-size, since the arena matches its inner size, and
/// starts hidden until the run loop begins.
pub fn create_window(event_loop: &ActiveEventLoop, settings: &WindowSettings) -> Result<Arc<Window>> {
    if settings.width == 0 || settings.height == 0 {
        miette::bail!(
            "Invalid window size {}x{}",
            settings.width,
            settings.height
        );
    }

    let size = PhysicalSize::new(settings.width, settings.height);
    let attributes = Window::default_attributes()
        .with_title(settings.title.clone())
        .with_inner_size(size)
        .with_resizable(false)
        .with_visible(false);

    let window = event_loop
        .create_window(attributes)
        .into_diagnostic()
        .wrap_err("Error creating game window")?;

    log::info!(
        "Window created: {}x{} \"{}\"",
        settings.width,
        settings.height,
        settings.title
    );

    Ok(Arc::new(window))
}

pub fn show(window: &Window) {
    window.set_visible(true);
    window.focus_window();
}

pub fn hide(window: &Window) {
    window.set_visible(false);
}

/// Title bar text with the running score
pub fn score_title(title: &str, scores: &Scores) -> String {
    format!(
        "{title} | Player 1: {} | Player 2: {}",
        scores.get(Player::One),
        scores.get(Player::Two)
    )
}
