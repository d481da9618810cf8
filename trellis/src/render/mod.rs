//! Render commands and their interpretation against a [`Backend`](crate::backend::Backend).

pub mod command;
pub mod context;
pub mod interpreter;

pub use command::{RenderCommand, RenderCommandKind, RenderCommands};
pub use context::RenderContext;
pub use interpreter::interpret;
