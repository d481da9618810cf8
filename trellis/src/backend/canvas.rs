//! Software canvas backend.
//!
//! Rasterizes into premultiplied ARGB32 pixmaps on the CPU. Glyphs are
//! shaped with cosmic-text and rasterized through its `SwashCache`, the same
//! way the GPU glyph atlas does it, but blended straight into the target
//! pixmap instead of packed into a texture.

use std::ffi::CStr;

use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache, SwashContent,
    SwashImage, Weight,
};

use crate::primitives::{Color, Point, Rect};
use crate::text::{FontFace, FontSlant, FontWeight};

use super::{Backend, BackendError, TextExtents};

const DEFAULT_FONT_SIZE: f32 = 16.0;
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// A premultiplied color with channels in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Premul {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Premul {
    const CLEAR: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    fn from_straight([r, g, b, a]: [f32; 4]) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    fn from_argb32(pixel: u32) -> Self {
        let channel = |shift: u32| ((pixel >> shift) & 0xff) as f32 / 255.0;
        Self {
            a: channel(24),
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    fn to_argb32(self) -> u32 {
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        quantize(self.a) << 24 | quantize(self.r) << 16 | quantize(self.g) << 8 | quantize(self.b)
    }

    fn scale(self, k: f32) -> Self {
        Self {
            r: self.r * k,
            g: self.g * k,
            b: self.b * k,
            a: self.a * k,
        }
    }

    /// Porter-Duff source-over.
    fn over(self, dst: Self) -> Self {
        let inv = 1.0 - self.a;
        Self {
            r: self.r + dst.r * inv,
            g: self.g + dst.g * inv,
            b: self.b + dst.b * inv,
            a: self.a + dst.a * inv,
        }
    }
}

/// A premultiplied ARGB32 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Pixmap {
    /// A fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    fn premul_at(&self, x: u32, y: u32) -> Premul {
        self.pixel(x, y).map_or(Premul::CLEAR, Premul::from_argb32)
    }

    fn blend(&mut self, x: u32, y: u32, src: Premul) {
        if src.a <= 0.0 || x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = src.over(Premul::from_argb32(*pixel)).to_argb32();
        }
    }
}

/// Half-open pixel range `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PixelBounds {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelBounds {
    /// Pixels whose centers fall inside `rect`, limited to a `width` x `height` target.
    fn of(rect: Rect, width: u32, height: u32) -> Self {
        let snap = |v: f32, limit: u32| v.round().clamp(0.0, limit as f32) as u32;
        Self {
            x0: snap(rect.x, width),
            y0: snap(rect.y, height),
            x1: snap(rect.right(), width),
            y1: snap(rect.bottom(), height),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 as i32 && x < self.x1 as i32 && y >= self.y0 as i32 && y < self.y1 as i32
    }
}

/// What `fill_rectangle` and `paint_with_alpha` draw with.
#[derive(Debug, Clone)]
enum Source {
    Solid(Premul),
    Group(Pixmap),
}

impl Source {
    fn at(&self, x: u32, y: u32) -> Premul {
        match self {
            Source::Solid(color) => *color,
            Source::Group(pixmap) => pixmap.premul_at(x, y),
        }
    }
}

/// A glyph image positioned relative to the first line's baseline origin.
struct PlacedGlyph {
    x: i32,
    y: i32,
    image: SwashImage,
}

/// CPU rasterizer implementing [`Backend`].
pub struct SoftwareCanvas {
    surface: Pixmap,
    groups: Vec<Pixmap>,
    source: Source,
    clip_stack: Vec<Rect>,
    font_system: FontSystem,
    swash_cache: SwashCache,
    face: FontFace,
    font_size: f32,
    cursor: Point,
}

impl SoftwareCanvas {
    /// Create a canvas using the system font collection.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_font_system(width, height, FontSystem::new())
    }

    pub fn with_font_system(width: u32, height: u32, font_system: FontSystem) -> Self {
        Self {
            surface: Pixmap::new(width, height),
            groups: Vec::new(),
            source: Source::Solid(Premul::from_straight([0.0, 0.0, 0.0, 1.0])),
            clip_stack: Vec::new(),
            font_system,
            swash_cache: SwashCache::new(),
            face: FontFace::default(),
            font_size: DEFAULT_FONT_SIZE,
            cursor: Point::ORIGIN,
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width
    }

    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// The painted surface.
    pub fn surface(&self) -> &Pixmap {
        &self.surface
    }

    /// Replace the surface with a transparent one of the new size.
    ///
    /// Open groups and clips are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.groups.is_empty() || !self.clip_stack.is_empty() {
            tracing::debug!(
                groups = self.groups.len(),
                clips = self.clip_stack.len(),
                "discarding canvas state on resize"
            );
        }
        self.surface = Pixmap::new(width, height);
        self.groups.clear();
        self.clip_stack.clear();
        if matches!(self.source, Source::Group(_)) {
            self.source = Source::Solid(Premul::from_straight([0.0, 0.0, 0.0, 1.0]));
        }
    }

    /// Composite the surface over an opaque `background` into `dst` as 0RGB pixels.
    ///
    /// `dst` is filled row-major up to the shorter of the two lengths.
    pub fn copy_to_xrgb(&self, dst: &mut [u32], background: Color) {
        let background = Premul::from_straight(background.with_alpha(255).normalized());
        for (out, &pixel) in dst.iter_mut().zip(&self.surface.pixels) {
            *out = Premul::from_argb32(pixel).over(background).to_argb32() & 0x00ff_ffff;
        }
    }

    /// Effective clip in pixels: the target bounds intersected with every pushed clip.
    fn clip_bounds(&self) -> PixelBounds {
        let full = Rect::new(0.0, 0.0, self.surface.width as f32, self.surface.height as f32);
        let clip = self
            .clip_stack
            .iter()
            .try_fold(full, |acc, rect| acc.intersection(rect))
            .unwrap_or(Rect::ZERO);
        PixelBounds::of(clip, self.surface.width, self.surface.height)
    }

    fn shape(&mut self, text: &str) -> (Vec<PlacedGlyph>, f32) {
        let metrics = Metrics::new(self.font_size, self.font_size * LINE_HEIGHT_RATIO);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(f32::MAX), Some(f32::MAX));
        buffer.set_text(&mut self.font_system, text, attrs_for(&self.face), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut advance: f32 = 0.0;
        let mut first_baseline = None;
        for run in buffer.layout_runs() {
            let baseline = *first_baseline.get_or_insert(run.line_y);
            let line_offset = (run.line_y - baseline).round() as i32;
            advance = advance.max(run.line_w);

            for glyph in run.glyphs {
                let physical = glyph.physical((0., 0.), 1.0);
                // Rasterized once per cache key, then reused across frames.
                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key)
                    .clone()
                else {
                    continue;
                };
                if image.placement.width == 0 || image.placement.height == 0 {
                    continue;
                }
                glyphs.push(PlacedGlyph {
                    x: physical.x + image.placement.left,
                    y: line_offset + physical.y - image.placement.top,
                    image,
                });
            }
        }
        (glyphs, advance)
    }
}

fn attrs_for(face: &FontFace) -> Attrs<'_> {
    let family = match face.family.as_str() {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        name => Family::Name(name),
    };
    let weight = match face.weight {
        FontWeight::Normal => Weight::NORMAL,
        FontWeight::Bold => Weight::BOLD,
    };
    let style = match face.slant {
        FontSlant::Normal => Style::Normal,
        FontSlant::Italic => Style::Italic,
        FontSlant::Oblique => Style::Oblique,
    };
    Attrs::new().family(family).weight(weight).style(style)
}

/// Union of glyph boxes `(x, y, width, height)` as `(min_x, min_y, max_x, max_y)`.
fn ink_bounds(boxes: impl IntoIterator<Item = (i32, i32, u32, u32)>) -> Option<(i32, i32, i32, i32)> {
    boxes.into_iter().fold(None, |acc, (x, y, w, h)| {
        let (right, bottom) = (x + w as i32, y + h as i32);
        Some(match acc {
            None => (x, y, right, bottom),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(right), y1.max(bottom)),
        })
    })
}

fn glyph_pixel(image: &SwashImage, index: usize, color: Premul) -> Premul {
    let data = &image.data;
    let byte = |i: usize| data.get(i).copied().unwrap_or(0) as f32 / 255.0;
    match image.content {
        SwashContent::Mask => color.scale(byte(index)),
        SwashContent::SubpixelMask => {
            let i = index * 3;
            color.scale((byte(i) + byte(i + 1) + byte(i + 2)) / 3.0)
        }
        // Emoji bitmaps carry their own color.
        SwashContent::Color => {
            let i = index * 4;
            Premul::from_straight([byte(i), byte(i + 1), byte(i + 2), byte(i + 3)])
        }
    }
}

impl Backend for SoftwareCanvas {
    fn select_font(&mut self, face: &FontFace) {
        if &self.face != face {
            self.face = face.clone();
        }
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_source_color(&mut self, rgba: [f32; 4]) {
        self.source = Source::Solid(Premul::from_straight(rgba));
    }

    fn fill_rectangle(&mut self, rect: Rect) {
        let clip = self.clip_bounds();
        let area = PixelBounds::of(rect, self.surface.width, self.surface.height);
        let Self {
            surface,
            groups,
            source,
            ..
        } = self;
        let target = groups.last_mut().unwrap_or(surface);

        for y in area.y0.max(clip.y0)..area.y1.min(clip.y1) {
            for x in area.x0.max(clip.x0)..area.x1.min(clip.x1) {
                target.blend(x, y, source.at(x, y));
            }
        }
    }

    fn text_extents(&mut self, text: &CStr) -> Result<TextExtents, BackendError> {
        let text = text.to_str().map_err(|_| BackendError::InvalidText)?;
        let (glyphs, advance) = self.shape(text);

        let bounds = ink_bounds(glyphs.iter().map(|glyph| {
            (glyph.x, glyph.y, glyph.image.placement.width, glyph.image.placement.height)
        }));
        Ok(match bounds {
            Some((x0, y0, x1, y1)) => TextExtents {
                x_bearing: x0 as f32,
                y_bearing: y0 as f32,
                width: (x1 - x0) as f32,
                height: (y1 - y0) as f32,
                x_advance: advance,
            },
            None => TextExtents {
                x_advance: advance,
                ..TextExtents::default()
            },
        })
    }

    fn move_to(&mut self, point: Point) {
        self.cursor = point;
    }

    fn show_text(&mut self, text: &CStr) -> Result<(), BackendError> {
        let text = text.to_str().map_err(|_| BackendError::InvalidText)?;
        let (glyphs, advance) = self.shape(text);
        let clip = self.clip_bounds();
        let color = match &self.source {
            Source::Solid(color) => *color,
            Source::Group(_) => {
                tracing::trace!("group source for text, drawing opaque black");
                Premul::from_straight([0.0, 0.0, 0.0, 1.0])
            }
        };

        let origin_x = self.cursor.x.round() as i32;
        let origin_y = self.cursor.y.round() as i32;
        let target = self.groups.last_mut().unwrap_or(&mut self.surface);

        for glyph in &glyphs {
            let width = glyph.image.placement.width as usize;
            let height = glyph.image.placement.height as usize;
            for row in 0..height {
                for col in 0..width {
                    let px = origin_x + glyph.x + col as i32;
                    let py = origin_y + glyph.y + row as i32;
                    if !clip.contains(px, py) {
                        continue;
                    }
                    let src = glyph_pixel(&glyph.image, row * width + col, color);
                    target.blend(px as u32, py as u32, src);
                }
            }
        }

        self.cursor.x += advance;
        Ok(())
    }

    fn push_group(&mut self) {
        self.groups
            .push(Pixmap::new(self.surface.width, self.surface.height));
    }

    fn pop_group_to_source(&mut self) {
        match self.groups.pop() {
            Some(group) => self.source = Source::Group(group),
            None => tracing::warn!(err = %BackendError::NoGroup, "pop_group_to_source ignored"),
        }
    }

    fn paint_with_alpha(&mut self, alpha: f32) {
        let clip = self.clip_bounds();
        let alpha = alpha.clamp(0.0, 1.0);
        let Self {
            surface,
            groups,
            source,
            ..
        } = self;
        let target = groups.last_mut().unwrap_or(surface);

        for y in clip.y0..clip.y1 {
            for x in clip.x0..clip.x1 {
                target.blend(x, y, source.at(x, y).scale(alpha));
            }
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            tracing::warn!("pop_clip without matching push_clip");
        }
    }

    fn flush_surface(&mut self) -> Result<(), BackendError> {
        if !self.groups.is_empty() {
            return Err(BackendError::Flush(format!(
                "{} group(s) still open",
                self.groups.len()
            )));
        }
        Ok(())
    }
}
