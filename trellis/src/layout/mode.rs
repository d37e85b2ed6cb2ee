//! Sizing modes and alignment.

use crate::primitives::Size;

/// Per-axis sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Explicit value set by the caller.
    Fixed,
    /// Derived from the element's own content or children.
    #[default]
    Content,
    /// Derived from the parent's resolved size on the same axis.
    Fill,
}

/// 9-way anchor placing a child inside an available cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    /// Horizontal anchor fraction: 0 at the left edge, 0.5 centered,
    /// 1 at the right edge.
    pub fn x_fraction(self) -> f32 {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => 0.0,
            Self::TopCenter | Self::Center | Self::BottomCenter => 0.5,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => 1.0,
        }
    }

    /// Vertical anchor fraction: 0 at the top edge, 0.5 centered,
    /// 1 at the bottom edge.
    pub fn y_fraction(self) -> f32 {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => 0.0,
            Self::MiddleLeft | Self::Center | Self::MiddleRight => 0.5,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => 1.0,
        }
    }
}

/// Selects the width or height lane of the sizing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The component of `size` along this axis.
    pub(crate) fn of(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }
}
