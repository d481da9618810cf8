//! Render command interpreter.
//!
//! Walks the command list once, in paint order, and turns each command into
//! backend calls. This is a translation stage only: geometry is used exactly
//! as resolved by layout.

use crate::backend::Backend;
use crate::layout::BorderWidth;
use crate::primitives::{Color, Point, Rect};

use super::command::{RenderCommand, RenderCommandKind};
use super::context::RenderContext;

/// Draw `commands` against `context`.
///
/// Commands the built-in interpreter has no drawing for (`Custom`) are
/// skipped. Failed text extents skip that text draw and nothing else.
pub fn interpret<B: Backend>(commands: &[RenderCommand<'_>], context: &mut RenderContext<B>) {
    for command in commands {
        if let Some(clip) = command.clip {
            context.backend_mut().push_clip(clip);
        }

        match &command.kind {
            RenderCommandKind::Rectangle { color } => {
                let backend = context.backend_mut();
                backend.set_source_color(color.normalized());
                backend.fill_rectangle(command.bounding_box);
            }
            RenderCommandKind::Border { color, width } => {
                draw_border(context.backend_mut(), command.bounding_box, *color, *width);
            }
            RenderCommandKind::Text {
                text,
                font_id,
                font_size,
                color,
            } => {
                draw_text(context, command.bounding_box, text, *font_id, *font_size, *color);
            }
            RenderCommandKind::Custom { tag } => {
                tracing::trace!(tag, id = ?command.id, "skipping custom render command");
            }
        }

        if command.clip.is_some() {
            context.backend_mut().pop_clip();
        }
    }
}

fn draw_border<B: Backend>(backend: &mut B, bounds: Rect, color: Color, width: BorderWidth) {
    backend.set_source_color(color.normalized());

    if width.top > 0.0 {
        backend.fill_rectangle(Rect::new(bounds.x, bounds.y, bounds.width, width.top));
    }
    if width.bottom > 0.0 {
        backend.fill_rectangle(Rect::new(
            bounds.x,
            bounds.bottom() - width.bottom,
            bounds.width,
            width.bottom,
        ));
    }

    // Side edges run between the top and bottom edges.
    let inner_y = bounds.y + width.top;
    let inner_height = (bounds.height - width.top - width.bottom).max(0.0);
    if width.left > 0.0 {
        backend.fill_rectangle(Rect::new(bounds.x, inner_y, width.left, inner_height));
    }
    if width.right > 0.0 {
        backend.fill_rectangle(Rect::new(
            bounds.right() - width.right,
            inner_y,
            width.right,
            inner_height,
        ));
    }
}

fn draw_text<B: Backend>(
    context: &mut RenderContext<B>,
    bounds: Rect,
    text: &str,
    font_id: u16,
    font_size: f32,
    color: Color,
) {
    let (backend, bridge, face) = context.text_parts(font_id);
    backend.select_font(face);
    backend.set_font_size(font_size);
    backend.set_source_color(color.normalized());

    let c_text = bridge.to_c_str(text);
    let extents = match backend.text_extents(c_text) {
        Ok(extents) => extents,
        Err(err) => {
            tracing::warn!(%err, "skipping text draw");
            return;
        }
    };

    // Shift by the bearing so the ink box starts at the bounding box's corner.
    backend.move_to(Point::new(
        bounds.x - extents.x_bearing,
        bounds.y - extents.y_bearing,
    ));
    if let Err(err) = backend.show_text(c_text) {
        tracing::warn!(%err, "text draw failed");
    }
}
