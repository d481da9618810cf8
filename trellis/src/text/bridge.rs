//! String bridge: borrowed text slices to null-terminated strings.
//!
//! Backends take `&CStr` for text measurement and drawing. Layout hands out
//! plain `&str` slices that are never terminated, so every call goes through
//! one reusable scratch buffer owned by the render context.

use std::ffi::CStr;

/// Capacity allocated on first use, unless the first slice is longer.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A single-slot scratch buffer for null-terminated copies of text slices.
///
/// The returned `&CStr` borrows the bridge mutably, so it is only valid until
/// the next call.
#[derive(Debug)]
pub struct StringBridge {
    /// Backing storage, `capacity + 1` bytes once allocated.
    buffer: Vec<u8>,
    /// Largest slice length the buffer can hold (excluding the terminator).
    capacity: usize,
    default_capacity: usize,
}

impl Default for StringBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl StringBridge {
    pub fn new() -> Self {
        Self::with_default_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bridge with a custom first-allocation capacity.
    pub fn with_default_capacity(default_capacity: usize) -> Self {
        Self {
            buffer: Vec::new(),
            capacity: 0,
            default_capacity,
        }
    }

    /// Whether the scratch buffer has been allocated yet.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Longest slice the current buffer holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy `text` into the scratch buffer and return it null-terminated.
    ///
    /// The buffer is allocated lazily (`max(default_capacity, len)`) and only
    /// replaced when a longer slice arrives, in which case it is sized to fit
    /// exactly. An interior NUL truncates the returned string at that byte.
    pub fn to_c_str(&mut self, text: &str) -> &CStr {
        let len = text.len();

        if !self.is_allocated() {
            self.capacity = self.default_capacity.max(len);
            self.buffer = vec![0; self.capacity + 1];
        } else if self.capacity < len {
            self.capacity = len;
            self.buffer = vec![0; len + 1];
        }

        self.buffer[..len].copy_from_slice(text.as_bytes());
        self.buffer[len] = 0;

        CStr::from_bytes_until_nul(&self.buffer[..=len]).unwrap_or(c"")
    }
}
