//! Declaration builder.
//!
//! [`Ui`] is the handle a frame is declared through. It mutably borrows the
//! engine, so only one frame can be open at a time, and every element it
//! opens is closed again: either when the children closure returns
//! ([`Ui::element`]) or when the [`ElementScope`] guard drops.
//!
//! ```
//! use trellis::layout::{ElementDeclaration, ElementId, LayoutEngine, Sizing};
//! use trellis::primitives::{Color, Size};
//! use trellis::text::TextStyle;
//!
//! let mut engine = LayoutEngine::new(Size::new(800.0, 600.0));
//! engine.set_measure_text(|text, style| Size::new(text.len() as f32 * 8.0, style.font_size));
//!
//! let commands = engine.frame(|ui| {
//!     let card = ElementDeclaration::new()
//!         .padding_all(8.0)
//!         .background(Color::rgb(40, 40, 48));
//!     ui.element(ElementId::new("Card"), card, |ui| {
//!         ui.text("hello", TextStyle::new(16.0, Color::WHITE));
//!     });
//! });
//! assert_eq!(commands.len(), 2);
//! ```

use std::ops::{Deref, DerefMut};
use std::panic::Location;

use crate::render::RenderCommands;
use crate::text::TextStyle;

use super::declaration::ElementDeclaration;
use super::engine::LayoutEngine;
use super::id::ElementId;

/// An open layout frame.
pub struct Ui<'e> {
    engine: &'e mut LayoutEngine,
}

impl<'e> Ui<'e> {
    pub(crate) fn new(engine: &'e mut LayoutEngine) -> Self {
        Self { engine }
    }

    /// Id of the innermost open element (`ElementId::ROOT` at top level).
    pub fn parent_id(&self) -> ElementId {
        self.engine.current_id()
    }

    /// Declare an element; `children` declares its contents.
    pub fn element(
        &mut self,
        id: ElementId,
        decl: ElementDeclaration,
        children: impl FnOnce(&mut Ui<'e>),
    ) {
        self.engine.open_element(id, decl);
        children(self);
        self.engine.close_element();
    }

    /// Declare an element whose id is derived from its parent, the call site
    /// and its position among its siblings.
    ///
    /// Suitable for elements declared in loops or by reusable functions.
    #[track_caller]
    pub fn auto_element(&mut self, decl: ElementDeclaration, children: impl FnOnce(&mut Ui<'e>)) {
        let id = self.engine.auto_id(Location::caller());
        self.element(id, decl, children);
    }

    /// Declare a childless element.
    pub fn leaf(&mut self, id: ElementId, decl: ElementDeclaration) {
        self.element(id, decl, |_| {});
    }

    /// Declare a text leaf in the current element.
    pub fn text(&mut self, text: &str, style: TextStyle) {
        self.engine.add_text(text, style);
    }

    /// Open an element that stays open until the returned guard drops.
    pub fn scope(&mut self, id: ElementId, decl: ElementDeclaration) -> ElementScope<'_, 'e> {
        self.engine.open_element(id, decl);
        ElementScope { ui: self }
    }

    /// Open an element explicitly. Must be paired with [`close`](Self::close).
    pub fn open(&mut self, id: ElementId, decl: ElementDeclaration) {
        self.engine.open_element(id, decl);
    }

    /// Close the innermost open element.
    pub fn close(&mut self) {
        self.engine.close_element();
    }

    /// End the frame and return its commands in paint order.
    pub fn end(self) -> RenderCommands<'e> {
        let Ui { engine } = self;
        engine.end_frame()
    }
}

/// Guard for an element opened with [`Ui::scope`]; closes it on drop.
pub struct ElementScope<'u, 'e> {
    ui: &'u mut Ui<'e>,
}

impl<'e> Deref for ElementScope<'_, 'e> {
    type Target = Ui<'e>;

    fn deref(&self) -> &Self::Target {
        self.ui
    }
}

impl<'e> DerefMut for ElementScope<'_, 'e> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ui
    }
}

impl Drop for ElementScope<'_, '_> {
    fn drop(&mut self) {
        self.ui.close();
    }
}
