//! Windowed shell.
//!
//! Owns the winit event loop and drives frames itself: each iteration pumps
//! pending window events without blocking, applies a pending resize, runs
//! one frame through the [`FrameDriver`], presents the canvas and sleeps for
//! the configured pause. Window events other than close and resize are not
//! routed anywhere.

mod window;

use std::thread;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

use crate::backend::SoftwareCanvas;
use crate::config::AppConfig;
use crate::driver::FrameDriver;
use crate::error::Error;
use crate::frame_timing;
use crate::layout::Ui;
use crate::primitives::Size;

pub use window::WindowSurface;

/// Window-side state updated from winit callbacks.
struct Shell {
    config: AppConfig,
    window: Option<WindowSurface>,
    pending_resize: Option<(u32, u32)>,
    fatal: Option<Error>,
}

impl Shell {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            pending_resize: None,
            fatal: None,
        }
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match WindowSurface::new(event_loop, &self.config) {
            Ok(window) => {
                // The platform may not honor the requested size.
                self.pending_resize = Some(window.inner_size());
                self.window = Some(window);
            }
            Err(err) => {
                tracing::error!(%err, "window setup failed");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                tracing::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.pending_resize = Some((size.width, size.height));
            }
            other => tracing::trace!(event = ?other, "window event ignored"),
        }
    }
}

/// Open a window and run `declare` every frame until the window is closed.
pub fn run(config: AppConfig, mut declare: impl FnMut(&mut Ui<'_>)) -> Result<(), Error> {
    frame_timing::set_enabled(config.frame_timing);

    let mut event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let (width, height) = config.window_size;
    let background = config.background_color;
    let pause = config.frame_pause;
    let mut driver = FrameDriver::from_config(SoftwareCanvas::new(width, height), &config);
    let mut shell = Shell::new(config);

    tracing::info!(width, height, "starting frame loop");
    loop {
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut shell) {
            tracing::info!(code, "event loop exited");
            break;
        }
        if let Some(err) = shell.fatal.take() {
            return Err(err);
        }
        let Some(window) = shell.window.as_mut() else {
            thread::sleep(pause);
            continue;
        };

        if let Some((width, height)) = shell.pending_resize.take() {
            driver.resize(Size::new(width as f32, height as f32));
            if let Err(err) = driver.with_context(|ctx| ctx.backend_mut().resize(width, height)) {
                tracing::warn!(%err, "canvas resize skipped");
            }
        }

        if let Err(err) = driver.run_frame(&mut declare) {
            tracing::warn!(%err, "frame failed");
        }

        match driver.with_context(|ctx| window.present(ctx.backend(), background)) {
            Ok(presented) => presented?,
            Err(err) => tracing::warn!(%err, "present skipped"),
        }

        thread::sleep(pause);
    }

    match shell.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
