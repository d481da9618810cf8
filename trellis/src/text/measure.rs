//! Text measurement adapter.
//!
//! Turns a text slice plus style into the pixel size the layout solver uses
//! as the intrinsic size of a text element. Results are memoized in an LRU
//! cache so repeated frames with unchanged text do not reshape it.

use std::cell::RefCell;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;

use crate::backend::Backend;
use crate::primitives::Size;
use crate::render::RenderContext;

use super::{FontFace, StringBridge, TextStyle};

/// Cache key for a measurement: (text hash, font, size). Entries also keep
/// the text itself, so a hash collision reads as a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MeasureKey {
    text_hash: u64,
    font_id: u16,
    font_size_bits: u32,
}

impl MeasureKey {
    fn new(text: &str, font_id: u16, font_size: f32) -> Self {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        Self {
            text_hash: hasher.finish(),
            font_id,
            font_size_bits: font_size.to_bits(),
        }
    }
}

/// Measures text through a backend, with an optional LRU cache.
pub struct TextMeasurer {
    cache: Option<LruCache<MeasureKey, (String, Size)>>,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl TextMeasurer {
    /// Create a measurer caching up to `capacity` results (0 disables caching).
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(LruCache::new),
        }
    }

    /// Measure `text` in `face` at `font_size`.
    ///
    /// Backend failures resolve to `Size::ZERO` so the rest of the layout is
    /// unaffected; failed results are not cached.
    pub fn measure<B: Backend>(
        &mut self,
        backend: &mut B,
        bridge: &mut StringBridge,
        face: &FontFace,
        font_id: u16,
        text: &str,
        font_size: f32,
    ) -> Size {
        let key = MeasureKey::new(text, font_id, font_size);
        let cached = self.cache.as_mut().and_then(|cache| cache.get(&key));
        if let Some((_, size)) = cached.filter(|(cached_text, _)| cached_text == text) {
            return *size;
        }

        let c_text = bridge.to_c_str(text);
        backend.select_font(face);
        backend.set_font_size(font_size);

        match backend.text_extents(c_text) {
            Ok(extents) => {
                let size = Size::new(extents.width, extents.height);
                if let Some(cache) = self.cache.as_mut() {
                    cache.put(key, (text.to_owned(), size));
                }
                size
            }
            Err(err) => {
                tracing::warn!(%err, len = text.len(), font_size, "text measurement failed, using zero size");
                Size::ZERO
            }
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, LruCache::len)
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

/// Build the measure callback registered with the layout engine.
///
/// The callback borrows the shared render context for the duration of one
/// measurement. If the context is already borrowed (a measurement requested
/// while drawing), the element measures as zero.
pub fn measure_fn<B: Backend + 'static>(
    context: Rc<RefCell<RenderContext<B>>>,
) -> impl FnMut(&str, &TextStyle) -> Size + 'static {
    move |text: &str, style: &TextStyle| match context.try_borrow_mut() {
        Ok(mut context) => context.measure_text(text, style),
        Err(_) => {
            tracing::warn!("render context busy during text measurement");
            Size::ZERO
        }
    }
}
