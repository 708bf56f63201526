//! Twin Pong entry point

use miette::{Context, IntoDiagnostic};
use winit::event_loop::{ControlFlow, EventLoop};

use twin_pong::{App, Settings};

fn main() -> miette::Result<()> {
    let settings = Settings::load()?;

    let event_loop = EventLoop::new()
        .into_diagnostic()
        .wrap_err("Error creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop
        .run_app(&mut app)
        .into_diagnostic()
        .wrap_err("Error running event loop")?;

    app.finish()
}
