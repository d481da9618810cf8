//! Layout engine for Trellis.
//!
//! Immediate-mode, declaration-driven layout: each frame the application
//! declares a tree of elements (sizing, padding, gaps, direction, colors)
//! and text leaves, and the engine resolves it into an ordered list of
//! absolutely-positioned render commands.
//!
//! # Architecture
//!
//! ```text
//! begin_frame() -> Ui declarations -> end() -> measure text -> solve -> RenderCommands
//! ```
//!
//! Commands come out in pre-order, so an element's background always
//! precedes everything drawn inside it.

pub mod builder;
pub mod declaration;
pub mod engine;
pub mod id;
pub mod length;
pub(crate) mod solver;

#[cfg(test)]
mod tests;

pub use builder::{ElementScope, Ui};
pub use declaration::{BorderConfig, BorderWidth, ElementDeclaration};
pub use engine::{DEFAULT_MAX_ELEMENTS, LayoutEngine, LayoutError, MeasureTextFn};
pub use id::ElementId;
pub use length::{AlignX, AlignY, LayoutDirection, Padding, Sizing};
