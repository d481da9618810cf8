//! The layout engine: frame lifecycle, the element tree and command emission.
//!
//! Elements are stored in declaration (pre-order) order in a flat `Vec`, each
//! holding its child indices. Text contents are copied into one
//! per-frame string arena so render commands can borrow them after the
//! declaration closures have returned.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::ops::Range;
use std::panic::Location;

use thiserror::Error;

use crate::primitives::{Point, Rect, Size};
use crate::render::{RenderCommand, RenderCommandKind, RenderCommands};
use crate::text::TextStyle;

use super::builder::Ui;
use super::declaration::ElementDeclaration;
use super::id::ElementId;
use super::length::Sizing;
use super::solver;

/// Default upper bound on elements per frame.
pub const DEFAULT_MAX_ELEMENTS: usize = 8192;

/// Text measurement callback: `(text, style) -> size`.
pub type MeasureTextFn = Box<dyn FnMut(&str, &TextStyle) -> Size>;

/// Declaration misuse detected during a frame. The frame still completes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),

    #[error("text declared but no measure function is registered")]
    MeasureTextMissing,

    #[error("close without a matching open")]
    UnbalancedClose,

    #[error("{0} element(s) still open at end of frame")]
    UnclosedElements(usize),

    #[error("element capacity of {max} exceeded")]
    CapacityExceeded { max: usize },
}

#[derive(Debug, Clone)]
pub(crate) enum NodeContent {
    Container,
    Text { range: Range<usize>, style: TextStyle },
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) id: ElementId,
    pub(crate) decl: ElementDeclaration,
    pub(crate) content: NodeContent,
    pub(crate) children: Vec<usize>,
    pub(crate) depth: u16,
    pub(crate) size: Size,
    pub(crate) position: Point,
    /// Clip inherited from clipping ancestors.
    pub(crate) clip: Option<Rect>,
}

impl Node {
    fn new(id: ElementId, decl: ElementDeclaration, content: NodeContent, depth: u16) -> Self {
        Self {
            id,
            decl,
            content,
            children: Vec::new(),
            depth,
            size: Size::ZERO,
            position: Point::ORIGIN,
            clip: None,
        }
    }

    pub(crate) fn is_text(&self) -> bool {
        matches!(self.content, NodeContent::Text { .. })
    }

    pub(crate) fn bounding_box(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// Immediate-mode layout engine.
///
/// Each frame is declared from scratch between [`begin_frame`](Self::begin_frame)
/// and [`Ui::end`]; nothing carries over between frames except configuration
/// and the registered measure function.
pub struct LayoutEngine {
    nodes: Vec<Node>,
    open: Vec<usize>,
    /// Opens swallowed after the capacity limit was hit, closed without effect.
    dropped_depth: usize,
    text: String,
    ids: HashSet<ElementId>,
    errors: Vec<LayoutError>,
    measure: Option<MeasureTextFn>,
    dimensions: Size,
    debug: bool,
    culling: bool,
    max_elements: usize,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl LayoutEngine {
    pub fn new(dimensions: Size) -> Self {
        Self::with_capacity(dimensions, DEFAULT_MAX_ELEMENTS)
    }

    /// Engine accepting at most `max_elements` elements per frame.
    pub fn with_capacity(dimensions: Size, max_elements: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(max_elements.min(1024) + 1),
            open: Vec::with_capacity(32),
            dropped_depth: 0,
            text: String::new(),
            ids: HashSet::new(),
            errors: Vec::new(),
            measure: None,
            dimensions,
            debug: false,
            culling: true,
            max_elements,
        }
    }

    /// Register the text measurement callback. The closure owns whatever
    /// state it needs, typically a shared render context.
    pub fn set_measure_text(&mut self, measure: impl FnMut(&str, &TextStyle) -> Size + 'static) {
        self.measure = Some(Box::new(measure));
    }

    /// Size of the root element, usually the window's inner size.
    pub fn set_layout_dimensions(&mut self, dimensions: Size) {
        self.dimensions = dimensions;
    }

    pub fn layout_dimensions(&self) -> Size {
        self.dimensions
    }

    /// Dump the resolved tree through `tracing::debug!` at the end of each frame.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Skip commands whose box lies entirely outside the layout dimensions.
    pub fn set_culling(&mut self, enabled: bool) {
        self.culling = enabled;
    }

    pub fn set_max_elements(&mut self, max_elements: usize) {
        self.max_elements = max_elements;
    }

    /// Errors collected during the last frame.
    pub fn errors(&self) -> &[LayoutError] {
        &self.errors
    }

    /// Resolved box of `id` from the last completed frame.
    pub fn element_bounds(&self, id: ElementId) -> Option<Rect> {
        self.nodes
            .iter()
            .skip(1)
            .find(|node| node.id == id)
            .map(Node::bounding_box)
    }

    /// Start a frame. Declarations go through the returned [`Ui`].
    pub fn begin_frame(&mut self) -> Ui<'_> {
        self.nodes.clear();
        self.open.clear();
        self.dropped_depth = 0;
        self.text.clear();
        self.ids.clear();
        self.errors.clear();

        let root = ElementDeclaration::new().size(
            Sizing::fixed(self.dimensions.width),
            Sizing::fixed(self.dimensions.height),
        );
        self.nodes
            .push(Node::new(ElementId::ROOT, root, NodeContent::Container, 0));
        self.open.push(0);

        Ui::new(self)
    }

    /// Declare a frame with `declare` and return its commands.
    pub fn frame(&mut self, declare: impl FnOnce(&mut Ui<'_>)) -> RenderCommands<'_> {
        let mut ui = self.begin_frame();
        declare(&mut ui);
        ui.end()
    }

    pub(crate) fn current_id(&self) -> ElementId {
        self.open
            .last()
            .and_then(|&index| self.nodes.get(index))
            .map_or(ElementId::ROOT, |node| node.id)
    }

    fn current_children(&self) -> u32 {
        self.open
            .last()
            .and_then(|&index| self.nodes.get(index))
            .map_or(0, |node| node.children.len() as u32)
    }

    pub(crate) fn auto_id(&self, location: &Location<'_>) -> ElementId {
        ElementId::auto(self.current_id(), location, self.current_children())
    }

    /// Reserve a slot for a new node, or report the capacity error once per frame.
    fn has_capacity(&mut self) -> bool {
        if self.nodes.len() <= self.max_elements {
            return true;
        }
        let error = LayoutError::CapacityExceeded {
            max: self.max_elements,
        };
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
        false
    }

    fn push_node(&mut self, id: ElementId, decl: ElementDeclaration, content: NodeContent) -> usize {
        let parent = self.open.last().copied().unwrap_or(0);
        let depth = self.nodes.get(parent).map_or(0, |node| node.depth + 1);
        let index = self.nodes.len();
        self.nodes
            .push(Node::new(id, decl, content, depth));
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(index);
        }
        index
    }

    pub(crate) fn open_element(&mut self, id: ElementId, decl: ElementDeclaration) {
        if self.dropped_depth > 0 || !self.has_capacity() {
            self.dropped_depth += 1;
            return;
        }
        if !self.ids.insert(id) {
            self.errors.push(LayoutError::DuplicateId(id));
        }
        let index = self.push_node(id, decl, NodeContent::Container);
        self.open.push(index);
    }

    pub(crate) fn close_element(&mut self) {
        if self.dropped_depth > 0 {
            self.dropped_depth -= 1;
            return;
        }
        // The root stays open until the frame ends.
        if self.open.len() <= 1 {
            self.errors.push(LayoutError::UnbalancedClose);
            return;
        }
        self.open.pop();
    }

    pub(crate) fn add_text(&mut self, text: &str, style: TextStyle) {
        if self.dropped_depth > 0 || !self.has_capacity() {
            return;
        }
        let id = self.current_id().local_indexed("text", self.current_children());
        let start = self.text.len();
        self.text.push_str(text);
        let range = start..self.text.len();
        self.push_node(id, ElementDeclaration::new(), NodeContent::Text { range, style });
    }

    /// Finish the frame: measure text, resolve layout, emit commands.
    pub(crate) fn end_frame(&mut self) -> RenderCommands<'_> {
        let unclosed = self.open.len().saturating_sub(1) + self.dropped_depth;
        if unclosed > 0 {
            self.errors.push(LayoutError::UnclosedElements(unclosed));
        }
        self.open.clear();
        self.dropped_depth = 0;

        self.measure_text();
        solver::solve(&mut self.nodes);

        if self.debug {
            self.dump_tree();
        }
        for error in &self.errors {
            tracing::warn!(%error, "layout error");
        }

        self.emit_commands()
    }

    fn measure_text(&mut self) {
        let Self {
            nodes,
            text,
            measure,
            errors,
            ..
        } = self;

        for node in nodes.iter_mut() {
            let NodeContent::Text { range, style } = &node.content else {
                continue;
            };
            let mut size = match measure.as_mut() {
                Some(measure) => measure(&text[range.clone()], style),
                None => {
                    if !errors.contains(&LayoutError::MeasureTextMissing) {
                        errors.push(LayoutError::MeasureTextMissing);
                    }
                    Size::ZERO
                }
            };
            if style.line_height > 0.0 {
                size.height = style.line_height;
            }
            node.size = size;
        }
    }

    fn emit_commands(&self) -> RenderCommands<'_> {
        let mut commands = RenderCommands::new();

        for node in self.nodes.iter().skip(1) {
            let bounds = node.bounding_box();
            if self.culling && offscreen(bounds, self.dimensions) {
                tracing::trace!(id = %node.id, "culled");
                continue;
            }

            let mut emit = |kind| commands.push(RenderCommand::new(node.id, bounds, kind).with_clip(node.clip));
            match &node.content {
                NodeContent::Container => {
                    let decl = &node.decl;
                    if decl.background.is_visible() {
                        emit(RenderCommandKind::Rectangle {
                            color: decl.background,
                        });
                    }
                    if let Some(border) = decl.border.filter(|border| border.is_visible()) {
                        emit(RenderCommandKind::Border {
                            color: border.color,
                            width: border.width,
                        });
                    }
                    if let Some(tag) = decl.custom {
                        emit(RenderCommandKind::Custom { tag });
                    }
                }
                NodeContent::Text { range, style } => {
                    emit(RenderCommandKind::Text {
                        text: &self.text[range.clone()],
                        font_id: style.font_id,
                        font_size: style.font_size,
                        color: style.color,
                    });
                }
            }
        }
        commands
    }

    fn dump_tree(&self) {
        let mut out = String::new();
        for node in &self.nodes {
            let indent = node.depth as usize * 2;
            let kind = match &node.content {
                NodeContent::Container => "element",
                NodeContent::Text { .. } => "text",
            };
            let b = node.bounding_box();
            let _ = writeln!(
                out,
                "{:indent$}{} {} [{:.1}, {:.1}, {:.1} x {:.1}]",
                "", kind, node.id, b.x, b.y, b.width, b.height
            );
        }
        tracing::debug!(elements = self.nodes.len(), "layout tree\n{out}");
    }
}

/// Entirely outside the viewport. Boxes touching an edge are kept.
fn offscreen(bounds: Rect, viewport: Size) -> bool {
    bounds.x > viewport.width
        || bounds.y > viewport.height
        || bounds.right() < 0.0
        || bounds.bottom() < 0.0
}
