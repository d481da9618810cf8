//! Fatal errors from the windowed shell.
//!
//! Everything that can go wrong inside a frame (measurement, drawing,
//! declaration misuse) is recoverable and logged instead; see
//! [`BackendError`](crate::backend::BackendError) and
//! [`LayoutError`](crate::layout::LayoutError).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// Message only; softbuffer's platform error is not `Send`.
    #[error("surface error: {0}")]
    Surface(String),
}

impl From<softbuffer::SoftBufferError> for Error {
    fn from(err: softbuffer::SoftBufferError) -> Self {
        Self::Surface(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
