//! Backend renderer contract.
//!
//! The interpreter and the text measurement adapter only talk to a
//! [`Backend`]: a stateful 2D drawing context in the style of a path/paint
//! API (current font, current source, current point, group stack, clip
//! stack). Two implementations ship with the crate:
//!
//! - [`SoftwareCanvas`]: rasterizes into premultiplied ARGB pixmaps, glyphs
//!   via cosmic-text. Used by the windowed shell.
//! - [`RecordingBackend`]: records every call with deterministic fake text
//!   metrics. Used for headless tests.

pub mod canvas;
pub mod recording;

use std::ffi::CStr;

use thiserror::Error;

use crate::primitives::{Point, Rect};
use crate::text::FontFace;

pub use canvas::SoftwareCanvas;
pub use recording::{BackendCall, RecordingBackend};

/// Errors reported by a backend. None of them are fatal to a frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    #[error("text is not valid UTF-8")]
    InvalidText,

    #[error("font state invalid: {0}")]
    Font(String),

    #[error("no group to pop")]
    NoGroup,

    #[error("render context is busy")]
    Busy,

    #[error("surface flush failed: {0}")]
    Flush(String),
}

/// Ink extents of a string under the current font, relative to the
/// baseline origin the text would be shown at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtents {
    /// Offset from the origin to the left edge of the ink box.
    pub x_bearing: f32,
    /// Offset from the origin to the top edge of the ink box (negative above the baseline).
    pub y_bearing: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal pen advance after showing the string.
    pub x_advance: f32,
}

/// A concrete 2D drawing context.
pub trait Backend {
    /// Select the font face used by subsequent text calls.
    fn select_font(&mut self, face: &FontFace);

    fn set_font_size(&mut self, size: f32);

    /// Set a solid source color, channels in 0.0-1.0.
    fn set_source_color(&mut self, rgba: [f32; 4]);

    /// Fill `rect` with the current source.
    fn fill_rectangle(&mut self, rect: Rect);

    /// Tight ink extents of `text` under the current font and size.
    fn text_extents(&mut self, text: &CStr) -> Result<TextExtents, BackendError>;

    /// Set the current point (the baseline origin for `show_text`).
    fn move_to(&mut self, point: Point);

    /// Paint `text` at the current point with the current source.
    fn show_text(&mut self, text: &CStr) -> Result<(), BackendError>;

    /// Redirect drawing into a new transparent off-screen group.
    fn push_group(&mut self);

    /// End the innermost group and make it the current source.
    fn pop_group_to_source(&mut self);

    /// Paint the current source over the whole (clipped) target.
    fn paint_with_alpha(&mut self, alpha: f32);

    /// Intersect the clip region with `rect` until the matching `pop_clip`.
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// Finish all pending drawing on the target surface.
    fn flush_surface(&mut self) -> Result<(), BackendError>;
}
