//! Application configuration.

use std::time::Duration;

use crate::layout::DEFAULT_MAX_ELEMENTS;
use crate::primitives::{Color, Size};
use crate::text::FontFace;

/// Configuration for a Trellis window and its frame loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Window title.
    pub title: String,

    /// Initial window size in physical pixels.
    pub window_size: (u32, u32),

    /// Initial window position in physical pixels.
    pub window_position: (i32, i32),

    /// Color shown wherever the layout draws nothing.
    pub background_color: Color,

    /// Sleep between frames.
    pub frame_pause: Duration,

    /// Font table; `TextStyle::font_id` indexes into it.
    pub fonts: Vec<FontFace>,

    /// Dump the layout tree every frame (`debug` level).
    pub debug_layout: bool,

    /// Sampled per-frame timings (`debug` level).
    pub frame_timing: bool,

    /// Skip commands outside the window.
    pub culling: bool,

    /// Element limit per frame.
    pub max_elements: usize,

    /// Text measurement cache entries; 0 disables the cache.
    pub measure_cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::from("Hello, World"),
            window_size: (1280, 720),
            window_position: (10, 10),
            background_color: Color::BLACK,
            frame_pause: Duration::from_micros(500),
            fonts: vec![FontFace::sans_bold()],
            debug_layout: false,
            frame_timing: false,
            culling: true,
            max_elements: DEFAULT_MAX_ELEMENTS,
            measure_cache_capacity: 1024,
        }
    }
}

impl AppConfig {
    /// Initial layout dimensions, matching the window size.
    pub fn layout_size(&self) -> Size {
        Size::new(self.window_size.0 as f32, self.window_size.1 as f32)
    }
}
