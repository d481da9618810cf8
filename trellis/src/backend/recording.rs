//! Recording backend for headless tests.

use std::ffi::CStr;

use crate::primitives::{Point, Rect};
use crate::text::FontFace;

use super::{Backend, BackendError, TextExtents};

/// Advance per byte, as a fraction of the font size.
const ADVANCE_RATIO: f32 = 0.5;
/// Ascent above the baseline, as a fraction of the font size.
const ASCENT_RATIO: f32 = 0.75;
const X_BEARING: f32 = 1.0;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SelectFont(FontFace),
    SetFontSize(f32),
    SetSourceColor([f32; 4]),
    FillRectangle(Rect),
    TextExtents(String),
    MoveTo(Point),
    ShowText(String),
    PushGroup,
    PopGroupToSource,
    PaintWithAlpha(f32),
    PushClip(Rect),
    PopClip,
    FlushSurface,
}

/// A backend that draws nothing and records every call.
///
/// Text metrics are synthetic and deterministic: each byte advances
/// `font_size / 2`, the ink box is `font_size` tall starting `0.75 * font_size`
/// above the baseline, with a 1px left bearing.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    font_size: f32,
    fail_text_extents: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `text_extents` call fail, to exercise fallback paths.
    pub fn fail_text_extents(mut self, fail: bool) -> Self {
        self.fail_text_extents = fail;
        self
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded `text_extents` queries.
    pub fn extents_queries(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::TextExtents(_)))
            .count()
    }

    /// All rectangles filled so far, in order.
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::FillRectangle(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Backend for RecordingBackend {
    fn select_font(&mut self, face: &FontFace) {
        self.calls.push(BackendCall::SelectFont(face.clone()));
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.calls.push(BackendCall::SetFontSize(size));
    }

    fn set_source_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(BackendCall::SetSourceColor(rgba));
    }

    fn fill_rectangle(&mut self, rect: Rect) {
        self.calls.push(BackendCall::FillRectangle(rect));
    }

    fn text_extents(&mut self, text: &CStr) -> Result<TextExtents, BackendError> {
        let text = text.to_str().map_err(|_| BackendError::InvalidText)?;
        self.calls.push(BackendCall::TextExtents(text.to_owned()));
        if self.fail_text_extents {
            return Err(BackendError::Font("extents unavailable".into()));
        }

        let width = text.len() as f32 * self.font_size * ADVANCE_RATIO;
        Ok(TextExtents {
            x_bearing: X_BEARING,
            y_bearing: -self.font_size * ASCENT_RATIO,
            width,
            height: self.font_size,
            x_advance: width + X_BEARING,
        })
    }

    fn move_to(&mut self, point: Point) {
        self.calls.push(BackendCall::MoveTo(point));
    }

    fn show_text(&mut self, text: &CStr) -> Result<(), BackendError> {
        let text = text.to_str().map_err(|_| BackendError::InvalidText)?;
        self.calls.push(BackendCall::ShowText(text.to_owned()));
        Ok(())
    }

    fn push_group(&mut self) {
        self.calls.push(BackendCall::PushGroup);
    }

    fn pop_group_to_source(&mut self) {
        self.calls.push(BackendCall::PopGroupToSource);
    }

    fn paint_with_alpha(&mut self, alpha: f32) {
        self.calls.push(BackendCall::PaintWithAlpha(alpha));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.calls.push(BackendCall::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.calls.push(BackendCall::PopClip);
    }

    fn flush_surface(&mut self) -> Result<(), BackendError> {
        self.calls.push(BackendCall::FlushSurface);
        Ok(())
    }
}
