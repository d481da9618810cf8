//! Core primitive types for Trellis.
//!
//! Geometry and color shared by the layout engine, the render commands and
//! the backends.

/// Pen position or element origin, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height. Also what text measurement reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A bounding box: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap of two boxes. Boxes that only touch do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > left && bottom > top).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}

/// RGBA color with 8-bit channels in the 0-255 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from RGB channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether anything would be painted with this color.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.a > 0
    }

    /// Channels scaled into the 0.0-1.0 range expected by drawing backends.
    #[inline]
    pub fn normalized(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Same color with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_overlap() {
        let window = Rect::new(0.0, 0.0, 1280.0, 720.0);
        let sidebar = Rect::new(16.0, 600.0, 300.0, 200.0);
        assert_eq!(window.intersection(&sidebar), Some(Rect::new(16.0, 600.0, 300.0, 120.0)));
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(left.intersection(&right), None);
        assert_eq!(left.intersection(&Rect::ZERO), None);
    }

    #[test]
    fn test_box_from_origin_and_size() {
        let rect = Rect::from_origin_size(Point::new(4.0, 8.0), Size::new(20.0, 10.0));
        assert_eq!(rect, Rect::new(4.0, 8.0, 20.0, 10.0));
        assert_eq!(rect.size(), Size::new(20.0, 10.0));
        assert_eq!((rect.right(), rect.bottom()), (24.0, 18.0));
    }

    #[test]
    fn test_color_normalized() {
        let [r, g, b, a] = Color::rgba(168, 66, 28, 255).normalized();
        assert!((r - 0.659).abs() < 1e-3);
        assert!((g - 0.259).abs() < 1e-3);
        assert!((b - 0.110).abs() < 1e-3);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_transparent_is_invisible() {
        assert!(!Color::TRANSPARENT.is_visible());
        assert!(Color::BLACK.is_visible());
        assert!(!Color::WHITE.with_alpha(0).is_visible());
    }
}
