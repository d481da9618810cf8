//! A winit window with a softbuffer surface.

use std::num::NonZeroU32;
use std::rc::Rc;

use softbuffer::{Context, Surface};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::backend::SoftwareCanvas;
use crate::config::AppConfig;
use crate::error::Error;
use crate::primitives::Color;

/// The demo window and the surface its frames are presented to.
pub struct WindowSurface {
    // Dropped before the context it was created from.
    surface: Surface<Rc<Window>, Rc<Window>>,
    _context: Context<Rc<Window>>,
    window: Rc<Window>,
}

impl WindowSurface {
    /// Create and show the window described by `config`.
    pub fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, Error> {
        let (width, height) = config.window_size;
        let (x, y) = config.window_position;
        let attributes = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_position(PhysicalPosition::new(x, y));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = Context::new(Rc::clone(&window))?;
        let surface = Surface::new(&context, Rc::clone(&window))?;

        tracing::info!(title = %config.title, width, height, "window created");
        Ok(Self {
            surface,
            _context: context,
            window,
        })
    }

    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Copy the canvas surface to the window, over `background`.
    ///
    /// A zero-sized canvas (minimized window) presents nothing.
    pub fn present(&mut self, canvas: &SoftwareCanvas, background: Color) -> Result<(), Error> {
        let (Some(width), Some(height)) = (NonZeroU32::new(canvas.width()), NonZeroU32::new(canvas.height()))
        else {
            return Ok(());
        };

        self.surface.resize(width, height)?;
        let mut buffer = self.surface.buffer_mut()?;
        canvas.copy_to_xrgb(&mut buffer, background);
        buffer.present()?;
        Ok(())
    }
}
