//! Scroll state.
//!
//! UI trees are cheap to rebuild, so scroll position lives outside the tree:
//! the host owns a [`ScrollState`] and passes it into the scroll container
//! builder each frame. The offset itself is a [`SharedOffset`], a
//! reference-counted cell, so several containers handed the same handle
//! observe one position. That aliasing is the point, not an accident.

use std::cell::Cell;
use std::rc::Rc;

use crate::layout::{ElementId, UiTree};
use crate::primitives::Point;

/// A scroll offset shared between a [`ScrollState`] and any number of
/// scroll containers.
#[derive(Debug, Clone, Default)]
pub struct SharedOffset(Rc<Cell<Point>>);

impl SharedOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Point {
        self.0.get()
    }

    pub fn set(&self, offset: Point) {
        self.0.set(offset);
    }

    /// Whether two handles observe the same cell.
    pub fn ptr_eq(&self, other: &SharedOffset) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Persistent scroll state for one logical viewport.
///
/// Owned by the host application so the position survives per-frame tree
/// rebuilds. All methods take `&self`; the interior cells make the state
/// usable from view code that only has a shared borrow.
#[derive(Debug)]
pub struct ScrollState {
    offset: SharedOffset,
    /// Maximum scroll offset per axis (set by [`sync_from_tree`]).
    ///
    /// [`sync_from_tree`]: ScrollState::sync_from_tree
    pub max: Cell<Point>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: SharedOffset::new(),
            // Unclamped until the first layout sync.
            max: Cell::new(Point::new(f32::MAX, f32::MAX)),
        }
    }

    /// Handle to the shared offset cell, for building synchronized views.
    pub fn shared(&self) -> SharedOffset {
        self.offset.clone()
    }

    pub fn offset(&self) -> Point {
        self.offset.get()
    }

    /// Set the offset, clamped into `[0, max]` per axis. `max` is
    /// host-writable, so the clamp tolerates negative or NaN limits
    /// instead of panicking.
    pub fn set_offset(&self, offset: Point) {
        let max = self.max.get();
        self.offset.set(Point::new(
            offset.x.min(max.x).max(0.0),
            offset.y.min(max.y).max(0.0),
        ));
    }

    /// Scroll by a delta, clamped into `[0, max]` per axis.
    pub fn scroll_by(&self, dx: f32, dy: f32) {
        let current = self.offset.get();
        self.set_offset(Point::new(current.x + dx, current.y + dy));
    }

    /// Sync scroll limits from the tree after layout.
    ///
    /// Reads the container's view and scroll rects, stores the new maxima
    /// and re-clamps the offset. Content smaller than the viewport yields a
    /// maximum of zero, so such a viewport cannot scroll at all.
    pub fn sync_from_tree(&self, tree: &UiTree, container: ElementId) {
        let (Some(view), Some(scroll)) = (tree.view_rect(container), tree.scroll_rect(container))
        else {
            return;
        };
        let max = Point::new(
            (view.width - scroll.width).max(0.0),
            (view.height - scroll.height).max(0.0),
        );
        self.max.set(max);
        self.set_offset(self.offset.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_by_clamps() {
        let state = ScrollState::new();
        state.max.set(Point::new(100.0, 100.0));

        state.scroll_by(0.0, 50.0);
        assert_eq!(state.offset(), Point::new(0.0, 50.0));

        state.scroll_by(0.0, 200.0); // over-scroll
        assert_eq!(state.offset(), Point::new(0.0, 100.0));

        state.scroll_by(0.0, -300.0); // past 0
        assert_eq!(state.offset(), Point::new(0.0, 0.0));
    }

    #[test]
    fn set_offset_clamps_both_axes() {
        let state = ScrollState::new();
        state.max.set(Point::new(30.0, 40.0));
        state.set_offset(Point::new(100.0, -5.0));
        assert_eq!(state.offset(), Point::new(30.0, 0.0));
    }

    #[test]
    fn set_offset_tolerates_degenerate_max() {
        let state = ScrollState::new();
        state.max.set(Point::new(-10.0, f32::NAN));
        state.set_offset(Point::new(5.0, 5.0));
        assert_eq!(state.offset(), Point::new(0.0, 5.0));
    }

    #[test]
    fn shared_handles_observe_one_value() {
        let a = SharedOffset::new();
        let b = a.clone();
        a.set(Point::new(7.0, 9.0));
        assert_eq!(b.get(), Point::new(7.0, 9.0));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&SharedOffset::new()));
    }
}
