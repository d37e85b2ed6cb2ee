//! Tree-wide configuration.
//!
//! A single explicit options struct passed by value into [`UiTree::new`],
//! instead of per-widget defaults scattered through constructors.
//!
//! [`UiTree::new`]: crate::UiTree::new

use crate::layout::Alignment;
use crate::primitives::Size;

/// Configuration for a [`UiTree`](crate::UiTree).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiOptions {
    /// Size of a bare element with no content of its own.
    pub default_size: Size,

    /// Gap between consecutive children in stacks, rows and the default
    /// vertical line layout.
    pub spacing: f32,

    /// Value returned by a size query that re-enters itself through a
    /// Fill/Content dependency cycle and has no previously cached value.
    /// Must be strictly positive.
    pub min_fallback: f32,

    /// Alignment assigned to newly created elements.
    pub default_alignment: Alignment,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            default_size: Size::new(50.0, 30.0),
            spacing: 4.0,
            min_fallback: 1.0,
            default_alignment: Alignment::TopLeft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = UiOptions::default();
        assert_eq!(opts.default_size, Size::new(50.0, 30.0));
        assert_eq!(opts.spacing, 4.0);
        assert_eq!(opts.min_fallback, 1.0);
        assert_eq!(opts.default_alignment, Alignment::TopLeft);
    }
}
