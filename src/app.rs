//! winit event pump
//!
//! Frames are driven by `about_to_wait` requesting a redraw every loop
//! iteration, with the event loop in `ControlFlow::Poll`.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::session::{GameSession, Lifecycle};
use crate::settings::Settings;

pub struct App {
    settings: Settings,
    lifecycle: Lifecycle<GameSession>,
    /// First fatal error, returned from `main` once the loop stops
    error: Option<miette::Report>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            lifecycle: Lifecycle::new(),
            error: None,
        }
    }

    /// Consume the app after the event loop returned
    pub fn finish(mut self) -> miette::Result<()> {
        self.shutdown();
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.is_running() {
            self.lifecycle.finish_run();
        }
        event_loop.exit();
    }

    fn shutdown(&mut self) {
        if self.lifecycle.is_running() {
            self.lifecycle.finish_run();
        }
        if self.lifecycle.is_initialized() {
            self.lifecycle.cleanup();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.is_initialized() {
            return;
        }

        let settings = &self.settings;
        if let Err(err) = self
            .lifecycle
            .init(|| GameSession::init(event_loop, settings))
        {
            self.error = Some(err);
            event_loop.exit();
            return;
        }

        self.lifecycle.begin_run();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.lifecycle.running_mut() {
            session.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.lifecycle.running_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                self.quit(event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if session.handle_key(&event) {
                    log::info!("Quit key pressed, exiting");
                    self.quit(event_loop);
                }
            }

            WindowEvent::Resized(size) => {
                session.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                session.frame();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
