//! Render context: everything the interpreter and the measure callback share.

use crate::backend::Backend;
use crate::primitives::Size;
use crate::text::{FontFace, FontTable, StringBridge, TextMeasurer, TextStyle};

/// A backend plus the state drawn and measured through it: the string
/// bridge scratch buffer, the font table and the measurement cache.
///
/// One context serves both text measurement (during layout) and drawing
/// (during interpretation) on the same thread.
pub struct RenderContext<B> {
    backend: B,
    bridge: StringBridge,
    fonts: FontTable,
    measurer: TextMeasurer,
}

impl<B: Backend> RenderContext<B> {
    pub fn new(backend: B, fonts: FontTable) -> Self {
        Self {
            backend,
            bridge: StringBridge::new(),
            fonts,
            measurer: TextMeasurer::default(),
        }
    }

    /// Replace the measurement cache with one of `capacity` entries (0 disables it).
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.measurer = TextMeasurer::new(capacity);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    pub fn measurer(&self) -> &TextMeasurer {
        &self.measurer
    }

    /// Measure `text` for layout.
    pub fn measure_text(&mut self, text: &str, style: &TextStyle) -> Size {
        let face = self.fonts.face(style.font_id);
        self.measurer.measure(
            &mut self.backend,
            &mut self.bridge,
            face,
            style.font_id,
            text,
            style.font_size,
        )
    }

    /// Split borrows for drawing: backend, bridge and the face for `font_id`.
    pub(crate) fn text_parts(&mut self, font_id: u16) -> (&mut B, &mut StringBridge, &FontFace) {
        (&mut self.backend, &mut self.bridge, self.fonts.face(font_id))
    }
}
