//! Game session and run lifecycle
//!
//! A [`GameSession`] owns every sub-system as an RAII value. Bring-up goes
//! log file → window → graphics context → graphics resources, and each step
//! returns through `?`, so a failure drops only what was already acquired.
//! Fields are declared in reverse acquisition order; Rust drops struct fields
//! top to bottom, which makes the normal teardown the exact reverse of
//! bring-up.
//!
//! [`Lifecycle`] tracks whether a session exists and whether it is running,
//! and turns misuse (double init, cleanup while running, ...) into logged
//! no-ops instead of panics.

use std::sync::Arc;

use miette::{Context, Result};
use winit::event::KeyEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::platform::{Controls, FrameTimer, InputState, LogGuard, logfile, window};
use crate::renderer::{GpuContext, GraphicsResources};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

/// Callbacks run when a session starts or stops running
pub trait RunHooks {
    fn on_begin_run(&mut self);
    fn on_finish_run(&mut self);
}

/// Where a session is in its life
#[derive(Debug)]
pub enum Lifecycle<S> {
    NotInitialized,
    Initialized(S),
    Running(S),
}

impl<S: RunHooks> Lifecycle<S> {
    pub fn new() -> Self {
        Self::NotInitialized
    }

    /// Create the session with `create`; fails if one already exists
    pub fn init<F>(&mut self, create: F) -> Result<()>
    where
        F: FnOnce() -> Result<S>,
    {
        if !matches!(self, Self::NotInitialized) {
            log::error!("Session is already initialized");
            miette::bail!("Session is already initialized");
        }

        let session = create()?;
        *self = Self::Initialized(session);
        Ok(())
    }

    /// Start running; only valid right after init or a finished run
    pub fn begin_run(&mut self) -> bool {
        match std::mem::replace(self, Self::NotInitialized) {
            Self::Initialized(mut session) => {
                session.on_begin_run();
                *self = Self::Running(session);
                true
            }
            other => {
                log::warn!("begin_run ignored: session is {}", other.describe());
                *self = other;
                false
            }
        }
    }

    /// Stop running, keeping the session for cleanup
    pub fn finish_run(&mut self) -> bool {
        match std::mem::replace(self, Self::NotInitialized) {
            Self::Running(mut session) => {
                session.on_finish_run();
                *self = Self::Initialized(session);
                true
            }
            other => {
                log::warn!("finish_run ignored: session is {}", other.describe());
                *self = other;
                false
            }
        }
    }

    /// Drop the session; refused while running or before init
    pub fn cleanup(&mut self) -> bool {
        match std::mem::replace(self, Self::NotInitialized) {
            Self::Initialized(session) => {
                drop(session);
                true
            }
            Self::Running(session) => {
                log::warn!("cleanup ignored: session is still running");
                *self = Self::Running(session);
                false
            }
            Self::NotInitialized => {
                log::warn!("cleanup ignored: session was never initialized");
                false
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self, Self::NotInitialized)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// The session, only while running
    pub fn running_mut(&mut self) -> Option<&mut S> {
        match self {
            Self::Running(session) => Some(session),
            _ => None,
        }
    }
}

impl<S> Default for Lifecycle<S> {
    fn default() -> Self {
        Self::NotInitialized
    }
}

impl<S> Lifecycle<S> {
    fn describe(&self) -> &'static str {
        match self {
            Self::NotInitialized => "not initialized",
            Self::Initialized(_) => "initialized",
            Self::Running(_) => "running",
        }
    }
}

/// Run the bring-up steps that follow the log file, recording any failure
/// while the log guard is still alive
fn logged_bring_up<T>(steps: impl FnOnce() -> Result<T>) -> Result<T> {
    steps().inspect_err(|err| {
        log::error!("Session init failed: {err}");
        for cause in err.chain().skip(1) {
            log::error!("  caused by: {cause}");
        }
    })
}

/// Everything a running game owns
pub struct GameSession {
    // Drop order is declaration order: reverse of acquisition
    resources: GraphicsResources,
    gpu: GpuContext,
    window: Arc<Window>,
    _log_guard: LogGuard,

    pub state: GameState,
    input: InputState,
    controls: Controls,
    timer: FrameTimer,
    title: String,
}

impl GameSession {
    pub fn init(event_loop: &ActiveEventLoop, settings: &Settings) -> Result<Self> {
        let log_guard = logfile::init(&settings.log.path, &settings.log.level)
            .wrap_err("Error opening log file")?;

        let arena = settings.arena_size();
        let (window, gpu, resources) = logged_bring_up(|| {
            let window = window::create_window(event_loop, &settings.window)?;

            let gpu = pollster::block_on(GpuContext::new(window.clone(), settings.window.vsync))
                .wrap_err("Error creating graphics context")?;

            let resources = GraphicsResources::new(&gpu, arena)
                .wrap_err("Error creating graphics resources")?;

            Ok((window, gpu, resources))
        })?;

        let seed = settings.seed_or_now();
        log::info!("Game initialized with seed: {seed}");

        Ok(Self {
            resources,
            gpu,
            window,
            _log_guard: log_guard,
            state: GameState::new(arena, settings.tuning, seed),
            input: InputState::new(),
            controls: Controls::default(),
            timer: FrameTimer::new(),
            title: settings.window.title.clone(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Record a key event; returns true when it asks to quit
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.input.handle_event(event);
        self.input.pressed(self.controls.quit)
    }

    /// The arena keeps its size; only the surface follows the window
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Advance the simulation by the time since the last frame and draw it
    pub fn frame(&mut self) {
        let delta = self.timer.delta();
        let input = self.input.snapshot(&self.controls);
        let events = tick(&mut self.state, &input, delta);
        self.input.end_frame();

        if events
            .iter()
            .any(|event| matches!(event, GameEvent::Goal { .. }))
        {
            self.update_title();
        }

        self.render();
    }

    fn render(&mut self) {
        match self.resources.render(&self.gpu, &self.state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
            }
            Err(err) => {
                log::warn!("Skipping frame: {err:?}");
            }
        }
    }

    fn update_title(&self) {
        self.window
            .set_title(&window::score_title(&self.title, &self.state.scores));
    }
}

impl RunHooks for GameSession {
    fn on_begin_run(&mut self) {
        self.gpu.log_specifications();
        self.update_title();
        window::show(&self.window);
        self.timer.restart();
        log::info!("Run started");
    }

    fn on_finish_run(&mut self) {
        window::hide(&self.window);
        log::info!(
            "Run finished after {} rounds, {}",
            self.state.rounds,
            self.state.scores
        );
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        log::info!("Shutting down game session");
    }
}
