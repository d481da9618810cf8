//! Trellis: immediate-mode layout with a pluggable 2D renderer
//!
//! Every frame the application re-declares its element tree; the layout
//! engine resolves sizes and positions and flattens the tree into an ordered
//! list of render commands, which are then replayed onto a [`Backend`].
//! Nothing carries over from one frame to the next except configuration.
//!
//! # Architecture
//!
//! - `layout`: declaration builder ([`Ui`]), sizing solver and command emission.
//! - `text`: string bridge, font table and cached text measurement.
//! - `render`: render commands and the interpreter that drives a backend.
//! - `backend`: the backend contract plus a software rasterizer and a
//!   recording backend for tests.
//! - `driver` / `shell`: one frame end to end, and the windowed loop around it.
//!
//! # Usage
//!
//! ```ignore
//! fn main() -> Result<(), trellis::Error> {
//!     trellis::shell::run(trellis::AppConfig::default(), trellis::demo::banner_layout)
//! }
//! ```

// Core primitives
pub mod primitives;

// Errors and configuration
pub mod config;
pub mod error;

// Layout system
pub mod layout;

// Text bridge, fonts and measurement
pub mod text;

// Render commands and interpretation
pub mod backend;
pub mod render;

// Frame loop
pub mod driver;
pub mod frame_timing;
pub mod shell;

// Demo layouts
pub mod demo;

pub use backend::{Backend, BackendError, RecordingBackend, SoftwareCanvas};
pub use config::AppConfig;
pub use driver::{FrameDriver, FrameStats};
pub use error::{Error, Result};
pub use layout::{
    AlignX, AlignY, ElementDeclaration, ElementId, LayoutDirection, LayoutEngine, LayoutError, Padding, Sizing, Ui,
};
pub use primitives::{Color, Point, Rect, Size};
pub use render::{RenderCommand, RenderCommandKind, RenderCommands, RenderContext};
pub use text::{FontFace, TextStyle};
