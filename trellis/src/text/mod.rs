//! Text support: styles, font faces, the string bridge and measurement.
//!
//! Layout never looks at glyphs. It asks a registered measure callback for
//! the intrinsic size of each text element; that callback is the
//! [`measure_fn`] adapter over a shared [`RenderContext`](crate::render::RenderContext),
//! which queries the backend's font subsystem through the [`StringBridge`].

pub mod bridge;
pub mod font;
pub mod measure;

use crate::primitives::Color;

pub use bridge::StringBridge;
pub use font::{FontFace, FontSlant, FontTable, FontWeight};
pub use measure::{TextMeasurer, measure_fn};

/// Style carried by a text element and its render command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Index into the font table.
    pub font_id: u16,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height in pixels; 0 uses the measured height.
    pub line_height: f32,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_id: 0,
            font_size: 16.0,
            line_height: 0.0,
            color: Color::BLACK,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self {
            font_size,
            color,
            ..Self::default()
        }
    }

    pub fn font_id(mut self, font_id: u16) -> Self {
        self.font_id = font_id;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }
}
