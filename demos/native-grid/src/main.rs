//! Native OpenGL grid mesh demo.
//!
//! Drives gridgl-core from a glutin (GL context) + winit (windowing) event
//! loop: one textured grid mesh, redrawn every frame with a time uniform.
//!
//! Run with:
//! ```sh
//! cargo run -p native-grid -- --segments-x 32 --segments-y 20 --top --left
//! ```
//! Set `GRIDGL_LOG=debug` to see resource creation, `trace` for draw calls.

mod cli;
mod logging;
mod scene;
mod window;

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use gridgl_core::{RenderingContext, SurfaceSize};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use crate::{cli::Cli, scene::Scene, window::GlWindow};

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_logging().wrap_err("failed to initialize logging")?;

    let cli = Cli::parse();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), ?cli, "native-grid starting up");

    let event_loop = EventLoop::new().wrap_err("failed to create event loop")?;
    let mut app = App::new(cli);
    event_loop
        .run_app(&mut app)
        .wrap_err("event loop failed")?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    cli: Cli,
    started: Instant,
    state: Option<AppState>,
    error: Option<Report>,
}

struct AppState {
    win: GlWindow,
    ctx: RenderingContext,
    scene: Scene,
}

impl AppState {
    fn new(event_loop: &ActiveEventLoop, cli: &Cli) -> Result<Self> {
        let config = cli.context_config();
        let (win, gl) = GlWindow::new(
            event_loop,
            "gridgl - native grid",
            (cli.width, cli.height),
            cli.glsl.into(),
            &config,
        )?;

        let mut ctx = RenderingContext::new(gl, win.surface_size(), config)?;
        let scene = Scene::new(&mut ctx, cli)?;

        Ok(Self { win, ctx, scene })
    }

    fn handle(&mut self, event: WindowEvent, seconds: f32) -> Result<()> {
        match event {
            WindowEvent::Resized(new_size) if new_size.width > 0 && new_size.height > 0 => {
                self.win.resize_surface(new_size)?;
                self.scene.resize(
                    &mut self.ctx,
                    SurfaceSize::new(new_size.width, new_size.height),
                )?;
                self.win.window.request_redraw();
            },
            WindowEvent::RedrawRequested => {
                self.scene.draw(&mut self.ctx, seconds)?;
                self.win.swap_buffers()?;
            },
            _ => {},
        }

        Ok(())
    }

    /// Releases GPU resources while the window's GL context is still alive.
    fn shutdown(self) {
        let Self { win, mut ctx, scene } = self;
        scene.delete(&mut ctx);
        let _gl = ctx.into_inner();
        tracing::debug!(window = ?win.window.id(), "resources released");
    }
}

impl App {
    fn new(cli: Cli) -> Self {
        Self { cli, started: Instant::now(), state: None, error: None }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Report) {
        tracing::error!(error = %error, "shutting down");
        if let Some(state) = self.state.take() {
            state.shutdown();
        }
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match AppState::new(event_loop, &self.cli) {
            Ok(state) => self.state = Some(state),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(state) = self.state.take() {
                state.shutdown();
            }
            event_loop.exit();
            return;
        }

        let seconds = self.started.elapsed().as_secs_f32();
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if let Err(e) = state.handle(event, seconds) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.win.window.request_redraw();
        }
    }
}
