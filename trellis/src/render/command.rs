//! Render commands produced by the layout engine.

use std::ops::Deref;

use crate::layout::{BorderWidth, ElementId};
use crate::primitives::{Color, Rect};

/// What to draw for one command.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RenderCommandKind<'a> {
    /// Fill the bounding box.
    Rectangle { color: Color },
    /// Draw edges of the given widths inside the bounding box.
    Border { color: Color, width: BorderWidth },
    /// Draw `text` with its ink box aligned to the bounding box's top-left.
    Text {
        text: &'a str,
        font_id: u16,
        font_size: f32,
        color: Color,
    },
    /// Application-defined drawing, identified by `tag`.
    Custom { tag: u32 },
}

/// A resolved drawing instruction with absolute geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand<'a> {
    pub bounding_box: Rect,
    /// Element that produced this command.
    pub id: ElementId,
    /// Clip region inherited from clipping ancestors.
    pub clip: Option<Rect>,
    pub kind: RenderCommandKind<'a>,
}

impl<'a> RenderCommand<'a> {
    pub fn new(id: ElementId, bounding_box: Rect, kind: RenderCommandKind<'a>) -> Self {
        Self {
            bounding_box,
            id,
            clip: None,
            kind,
        }
    }

    pub fn with_clip(mut self, clip: Option<Rect>) -> Self {
        self.clip = clip;
        self
    }
}

/// The ordered command list for one frame. Order is paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderCommands<'a> {
    commands: Vec<RenderCommand<'a>>,
}

impl<'a> RenderCommands<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: RenderCommand<'a>) {
        self.commands.push(command);
    }

    /// Commands produced by element `id`, in paint order.
    pub fn for_element(&self, id: ElementId) -> impl Iterator<Item = &RenderCommand<'a>> {
        self.commands.iter().filter(move |command| command.id == id)
    }

    /// Bounding box of the first command produced by `id`.
    pub fn bounding_box(&self, id: ElementId) -> Option<Rect> {
        self.for_element(id).next().map(|command| command.bounding_box)
    }
}

impl<'a> Deref for RenderCommands<'a> {
    type Target = [RenderCommand<'a>];

    fn deref(&self) -> &Self::Target {
        &self.commands
    }
}

impl<'a> From<Vec<RenderCommand<'a>>> for RenderCommands<'a> {
    fn from(commands: Vec<RenderCommand<'a>>) -> Self {
        Self { commands }
    }
}

impl<'s, 'a> IntoIterator for &'s RenderCommands<'a> {
    type Item = &'s RenderCommand<'a>;
    type IntoIter = std::slice::Iter<'s, RenderCommand<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
