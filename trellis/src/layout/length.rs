//! Layout sizing types.
//!
//! Per-axis sizing policies, padding, flow direction and child alignment.

/// Sizing policy for one axis of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Wrap children or content, clamped to `[min, max]`.
    Fit { min: f32, max: f32 },
    /// Expand into the free space left in the parent, clamped to `[min, max]`.
    Grow { min: f32, max: f32 },
    /// Exact pixel size.
    Fixed(f32),
    /// Fraction (0.0-1.0) of the parent's inner extent.
    Percent(f32),
}

impl Default for Sizing {
    fn default() -> Self {
        Self::fit()
    }
}

impl Sizing {
    pub const fn fit() -> Self {
        Self::Fit {
            min: 0.0,
            max: f32::MAX,
        }
    }

    pub const fn fit_range(min: f32, max: f32) -> Self {
        Self::Fit { min, max }
    }

    pub const fn grow() -> Self {
        Self::Grow {
            min: 0.0,
            max: f32::MAX,
        }
    }

    /// Grow, but never below `min`.
    pub const fn grow_min(min: f32) -> Self {
        Self::Grow { min, max: f32::MAX }
    }

    pub const fn grow_range(min: f32, max: f32) -> Self {
        Self::Grow { min, max }
    }

    pub const fn fixed(px: f32) -> Self {
        Self::Fixed(px)
    }

    pub const fn percent(fraction: f32) -> Self {
        Self::Percent(fraction)
    }

    /// Lower bound this policy allows when space is short.
    pub fn min(&self) -> f32 {
        match *self {
            Sizing::Fit { min, .. } | Sizing::Grow { min, .. } => min,
            Sizing::Fixed(px) => px,
            Sizing::Percent(_) => 0.0,
        }
    }

    /// Upper bound this policy allows when space is plentiful.
    pub fn max(&self) -> f32 {
        match *self {
            Sizing::Fit { max, .. } | Sizing::Grow { max, .. } => max,
            Sizing::Fixed(px) => px,
            Sizing::Percent(_) => f32::MAX,
        }
    }

    pub fn is_grow(&self) -> bool {
        matches!(self, Sizing::Grow { .. })
    }

    /// Fit and Grow elements can be compressed when siblings overflow.
    pub fn is_shrinkable(&self) -> bool {
        matches!(self, Sizing::Fit { .. } | Sizing::Grow { .. })
    }
}

/// Space between an element's edges and its children.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `x` on the left and right, `y` on the top and bottom.
    pub const fn xy(x: f32, y: f32) -> Self {
        Self::new(x, x, y, y)
    }

    /// Combined left and right padding.
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top and bottom padding.
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Direction children flow in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    TopToBottom,
}

/// Horizontal placement of children inside the content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignX {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of children inside the content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignY {
    #[default]
    Top,
    Center,
    Bottom,
}

impl AlignX {
    /// Share of the free space placed before the children.
    pub(crate) fn factor(self) -> f32 {
        match self {
            AlignX::Left => 0.0,
            AlignX::Center => 0.5,
            AlignX::Right => 1.0,
        }
    }
}

impl AlignY {
    pub(crate) fn factor(self) -> f32 {
        match self {
            AlignY::Top => 0.0,
            AlignY::Center => 0.5,
            AlignY::Bottom => 1.0,
        }
    }
}
