//! Frame driver.
//!
//! One frame is: declare and resolve the layout, then draw the commands into
//! an off-screen group, composite the group onto the surface and flush it.
//! Presenting the surface to a window is the shell's job.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{Backend, BackendError};
use crate::config::AppConfig;
use crate::frame_timing::{FrameTimings, Phase};
use crate::layout::{LayoutEngine, Ui};
use crate::primitives::Size;
use crate::render::{RenderContext, interpret};
use crate::text::{FontTable, measure_fn};

/// Summary of one driven frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub commands: usize,
    pub layout_errors: usize,
}

/// Owns the layout engine and the render context shared with its measure callback.
pub struct FrameDriver<B: Backend + 'static> {
    engine: LayoutEngine,
    context: Rc<RefCell<RenderContext<B>>>,
    frame: u64,
}

impl<B: Backend + 'static> FrameDriver<B> {
    pub fn new(context: RenderContext<B>, dimensions: Size) -> Self {
        let context = Rc::new(RefCell::new(context));
        let mut engine = LayoutEngine::new(dimensions);
        engine.set_measure_text(measure_fn(Rc::clone(&context)));
        Self {
            engine,
            context,
            frame: 0,
        }
    }

    /// Driver for `backend` configured from `config`.
    pub fn from_config(backend: B, config: &AppConfig) -> Self {
        let context = RenderContext::new(backend, FontTable::new(config.fonts.clone()))
            .with_cache_capacity(config.measure_cache_capacity);
        let mut driver = Self::new(context, config.layout_size());
        driver.engine.set_debug(config.debug_layout);
        driver.engine.set_culling(config.culling);
        driver.engine.set_max_elements(config.max_elements);
        driver
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine {
        &mut self.engine
    }

    /// Handle to the render context, as held by the measure callback.
    pub fn shared_context(&self) -> Rc<RefCell<RenderContext<B>>> {
        Rc::clone(&self.context)
    }

    /// Run `f` with exclusive access to the render context.
    pub fn with_context<R>(&self, f: impl FnOnce(&mut RenderContext<B>) -> R) -> Result<R, BackendError> {
        let mut context = self.context.try_borrow_mut().map_err(|_| BackendError::Busy)?;
        Ok(f(&mut context))
    }

    /// New layout dimensions, applied from the next frame.
    pub fn resize(&mut self, size: Size) {
        tracing::debug!(width = size.width, height = size.height, "layout resized");
        self.engine.set_layout_dimensions(size);
    }

    /// Declare, lay out and draw one frame.
    pub fn run_frame(&mut self, declare: impl FnOnce(&mut Ui<'_>)) -> Result<FrameStats, BackendError> {
        let frame = self.frame;
        self.frame += 1;
        let mut timings = FrameTimings::new(frame);

        let commands = {
            let _span = timings.span(Phase::Layout);
            self.engine.frame(declare)
        };

        let mut context = self.context.try_borrow_mut().map_err(|_| BackendError::Busy)?;
        context.backend_mut().push_group();
        {
            let _span = timings.span(Phase::Interpret);
            interpret(&commands, &mut *context);
        }
        {
            let _span = timings.span(Phase::Composite);
            let backend = context.backend_mut();
            backend.pop_group_to_source();
            backend.paint_with_alpha(1.0);
            backend.flush_surface()?;
        }

        let command_count = commands.len();
        timings.report(command_count);
        tracing::trace!(frame, commands = command_count, "frame drawn");

        Ok(FrameStats {
            frame,
            commands: command_count,
            layout_errors: self.engine.errors().len(),
        })
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
