//! Element declarations: the per-node layout and style configuration.

use crate::primitives::Color;

use super::length::{AlignX, AlignY, LayoutDirection, Padding, Sizing};

/// Border edge widths in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderWidth {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BorderWidth {
    pub fn all(width: f32) -> Self {
        Self {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.left <= 0.0 && self.right <= 0.0 && self.top <= 0.0 && self.bottom <= 0.0
    }
}

/// A border drawn inside the element's bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderConfig {
    pub color: Color,
    pub width: BorderWidth,
}

impl BorderConfig {
    /// Uniform border of `width` on every edge.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width: BorderWidth::all(width),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.color.is_visible() && !self.width.is_zero()
    }
}

/// Layout and style of one element.
///
/// Built with chained setters:
///
/// ```
/// use trellis::layout::{ElementDeclaration, LayoutDirection, Sizing};
/// use trellis::primitives::Color;
///
/// let sidebar = ElementDeclaration::new()
///     .direction(LayoutDirection::TopToBottom)
///     .width(Sizing::fixed(300.0))
///     .height(Sizing::grow())
///     .padding_all(16.0)
///     .child_gap(16.0)
///     .background(Color::rgb(224, 215, 210));
/// assert_eq!(sidebar.child_gap, 16.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementDeclaration {
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Padding,
    /// Space between adjacent children along the flow direction.
    pub child_gap: f32,
    pub direction: LayoutDirection,
    pub align_x: AlignX,
    pub align_y: AlignY,
    /// Fill color; fully transparent emits no rectangle.
    pub background: Color,
    pub border: Option<BorderConfig>,
    /// Clip descendants to this element's box.
    pub clip: bool,
    /// Emit a `Custom` command with this tag.
    pub custom: Option<u32>,
}

impl ElementDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: Sizing) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Sizing) -> Self {
        self.height = height;
        self
    }

    pub fn size(self, width: Sizing, height: Sizing) -> Self {
        self.width(width).height(height)
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn padding_all(self, value: f32) -> Self {
        self.padding(Padding::all(value))
    }

    pub fn child_gap(mut self, gap: f32) -> Self {
        self.child_gap = gap;
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn align_x(mut self, align: AlignX) -> Self {
        self.align_x = align;
        self
    }

    pub fn align_y(mut self, align: AlignY) -> Self {
        self.align_y = align;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn border(mut self, border: BorderConfig) -> Self {
        self.border = Some(border);
        self
    }

    pub fn clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    pub fn custom(mut self, tag: u32) -> Self {
        self.custom = Some(tag);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_declaration() {
        let decl = ElementDeclaration::new();
        assert_eq!(decl.width, Sizing::fit());
        assert_eq!(decl.direction, LayoutDirection::LeftToRight);
        assert!(!decl.background.is_visible());
        assert!(decl.border.is_none());
    }

    #[test]
    fn test_border_visibility() {
        assert!(BorderConfig::new(Color::BLACK, 1.0).is_visible());
        assert!(!BorderConfig::new(Color::BLACK, 0.0).is_visible());
        assert!(!BorderConfig::new(Color::TRANSPARENT, 2.0).is_visible());
    }
}
