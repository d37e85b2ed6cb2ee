//! Element node storage.
//!
//! One concrete node type covers every widget kind; kind-specific data
//! lives in the [`WidgetKind`] tagged union. Geometry fields are interior
//! mutable (`Cell`) so size resolution and arrangement work through a
//! shared borrow of the tree, while structural fields (parent, children)
//! are plain and only change under `&mut`.

use std::cell::Cell;

use crate::layout::mode::{Alignment, Axis, SizeMode};
use crate::layout::tree::ElementId;
use crate::layout::widgets::WidgetKind;

pub(crate) struct Element {
    pub(crate) kind: WidgetKind,

    /// Absolute position, assigned by the parent during arrangement.
    pub(crate) x: Cell<f32>,
    pub(crate) y: Cell<f32>,

    pub(crate) width_mode: SizeMode,
    pub(crate) height_mode: SizeMode,

    /// Resolved size per axis. `None` means not resolved since the last
    /// invalidation. Under Fixed mode this slot holds the authoritative
    /// value once set.
    pub(crate) width: Cell<Option<f32>>,
    pub(crate) height: Cell<Option<f32>>,

    /// Last value a cleared cache held, kept for the cycle fallback.
    pub(crate) last_width: Cell<Option<f32>>,
    pub(crate) last_height: Cell<Option<f32>>,

    /// Re-entry markers for the sizing engine, one per axis.
    pub(crate) resolving_w: Cell<bool>,
    pub(crate) resolving_h: Cell<bool>,

    pub(crate) alignment: Alignment,

    pub(crate) parent: Option<ElementId>,
    /// Insertion order doubles as z-order and default layout order.
    pub(crate) children: Vec<ElementId>,
}

impl Element {
    pub(crate) fn new(kind: WidgetKind, alignment: Alignment) -> Self {
        Self {
            kind,
            x: Cell::new(0.0),
            y: Cell::new(0.0),
            width_mode: SizeMode::default(),
            height_mode: SizeMode::default(),
            width: Cell::new(None),
            height: Cell::new(None),
            last_width: Cell::new(None),
            last_height: Cell::new(None),
            resolving_w: Cell::new(false),
            resolving_h: Cell::new(false),
            alignment,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn mode(&self, axis: Axis) -> SizeMode {
        match axis {
            Axis::Horizontal => self.width_mode,
            Axis::Vertical => self.height_mode,
        }
    }

    pub(crate) fn cache(&self, axis: Axis) -> &Cell<Option<f32>> {
        match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        }
    }

    pub(crate) fn last(&self, axis: Axis) -> &Cell<Option<f32>> {
        match axis {
            Axis::Horizontal => &self.last_width,
            Axis::Vertical => &self.last_height,
        }
    }

    pub(crate) fn resolving(&self, axis: Axis) -> &Cell<bool> {
        match axis {
            Axis::Horizontal => &self.resolving_w,
            Axis::Vertical => &self.resolving_h,
        }
    }

    /// Clear the cached value on `axis`, keeping it as the last known good
    /// value for the cycle fallback.
    pub(crate) fn clear_cache(&self, axis: Axis) {
        if let Some(value) = self.cache(axis).take() {
            self.last(axis).set(Some(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_element_is_unresolved() {
        let el = Element::new(WidgetKind::Panel, Alignment::TopLeft);
        assert_eq!(el.width.get(), None);
        assert_eq!(el.height.get(), None);
        assert_eq!(el.width_mode, SizeMode::Content);
        assert!(el.children.is_empty());
        assert!(el.parent.is_none());
    }

    #[test]
    fn clear_cache_keeps_last_known_value() {
        let el = Element::new(WidgetKind::Panel, Alignment::TopLeft);
        el.width.set(Some(120.0));
        el.clear_cache(Axis::Horizontal);
        assert_eq!(el.width.get(), None);
        assert_eq!(el.last_width.get(), Some(120.0));

        // Clearing an already empty cache keeps the previous last value.
        el.clear_cache(Axis::Horizontal);
        assert_eq!(el.last_width.get(), Some(120.0));
    }
}
