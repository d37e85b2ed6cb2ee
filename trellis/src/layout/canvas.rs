//! Canvas and scroll containers.
//!
//! A canvas binds a host device rectangle to the element tree; it is the
//! usual root. A scroll container is a canvas with a 2D offset, an inset
//! scroll rect and optional scrollbar chrome. Neither arranges children:
//! positions inside them are assigned by the host, and the content
//! bounding box is the union of wherever the children ended up.

use crate::layout::mode::SizeMode;
use crate::layout::tree::{ElementId, UiTree};
use crate::layout::widgets::{CanvasData, ScrollData, WidgetKind};
use crate::paint::Painter;
use crate::primitives::{Point, Rect};
use crate::Result;
use crate::scroll::SharedOffset;

const SCROLLBAR_THICKNESS: f32 = 8.0;
const MIN_THUMB: f32 = 16.0;

/// Interactive viewport of a bound rect: inset by the padding on all
/// sides, with both dimensions kept strictly positive no matter how
/// large the padding is.
pub(crate) fn viewport(rect: Rect, padding: f32) -> Rect {
    let inner = rect.inset(padding);
    Rect::new(inner.x, inner.y, inner.width.max(1.0), inner.height.max(1.0))
}

impl UiTree {
    /// Fixed-size root adapter bound to a device rectangle.
    pub fn canvas(&mut self, rect: Rect) -> ElementId {
        let id = self.spawn(WidgetKind::Canvas(CanvasData { rect }));
        self.bind_rect(id, rect);
        id
    }

    /// A scroll container owning a private offset.
    pub fn scroll_container(&mut self, rect: Rect) -> ElementId {
        self.scroll_container_shared(rect, SharedOffset::new())
    }

    /// A scroll container driven by an external offset cell, so several
    /// views can stay on the same position. Wire a
    /// [`ScrollState`](crate::scroll::ScrollState) in through
    /// [`shared`](crate::scroll::ScrollState::shared).
    pub fn scroll_container_shared(&mut self, rect: Rect, offset: SharedOffset) -> ElementId {
        let id = self.spawn(WidgetKind::Scroll(ScrollData {
            rect,
            padding: 0.0,
            show_scrollbars: true,
            offset,
        }));
        self.bind_rect(id, rect);
        id
    }

    /// Pin an element to `rect`: Fixed on both axes, positioned at the
    /// rect's origin.
    fn bind_rect(&mut self, id: ElementId, rect: Rect) {
        let Some(el) = self.nodes.get_mut(id) else {
            return;
        };
        el.width_mode = SizeMode::Fixed;
        el.height_mode = SizeMode::Fixed;
        el.x.set(rect.x);
        el.y.set(rect.y);
        el.width.set(Some(rect.width));
        el.height.set(Some(rect.height));
    }

    /// Rebind a canvas or scroll container to a new device rectangle.
    /// Fill descendants re-derive from the new dimensions on their next
    /// read.
    pub fn update_rect(&mut self, id: ElementId, rect: Rect) -> Result<()> {
        self.with_kind(id, "canvas", |kind| match kind {
            WidgetKind::Canvas(data) => {
                data.rect = rect;
                Some(())
            }
            WidgetKind::Scroll(data) => {
                data.rect = rect;
                Some(())
            }
            _ => None,
        })?;
        tracing::debug!(width = rect.width, height = rect.height, "rebound canvas rect");
        self.bind_rect(id, rect);
        self.invalidate_layout(id);
        Ok(())
    }

    /// Content bounding box of a canvas or scroll container: the union
    /// of all child rects, in stored coordinates, wherever they sit;
    /// the container's own rect when it has no children. `None` for
    /// other kinds.
    pub fn view_rect(&self, id: ElementId) -> Option<Rect> {
        let el = self.nodes.get(id)?;
        if !matches!(el.kind, WidgetKind::Canvas(_) | WidgetKind::Scroll(_)) {
            return None;
        }
        let mut children = el.children.iter();
        let Some(&first) = children.next() else {
            return Some(self.rect_of(id));
        };
        let mut view = self.rect_of(first);
        for &child in children {
            view = view.union(&self.rect_of(child));
        }
        Some(view)
    }

    /// Interactive viewport of a scroll container, inset by its padding.
    pub fn scroll_rect(&self, id: ElementId) -> Option<Rect> {
        match self.kind_of(id)? {
            WidgetKind::Scroll(data) => Some(viewport(self.rect_of(id), data.padding)),
            _ => None,
        }
    }

    pub fn scroll_offset(&self, id: ElementId) -> Option<Point> {
        match self.kind_of(id)? {
            WidgetKind::Scroll(data) => Some(data.offset.get()),
            _ => None,
        }
    }

    /// Handle to the offset cell behind a scroll container.
    pub fn scroll_offset_handle(&self, id: ElementId) -> Option<SharedOffset> {
        match self.kind_of(id)? {
            WidgetKind::Scroll(data) => Some(data.offset.clone()),
            _ => None,
        }
    }

    pub fn set_scroll_padding(&mut self, id: ElementId, padding: f32) -> Result<()> {
        self.with_kind(id, "scroll container", |kind| match kind {
            WidgetKind::Scroll(data) => {
                data.padding = padding;
                Some(())
            }
            _ => None,
        })
    }

    pub fn set_show_scrollbars(&mut self, id: ElementId, show: bool) -> Result<()> {
        self.with_kind(id, "scroll container", |kind| match kind {
            WidgetKind::Scroll(data) => {
                data.show_scrollbars = show;
                Some(())
            }
            _ => None,
        })
    }

    /// Draw proportional scrollbar thumbs along the viewport edges, one
    /// per axis on which the content overflows. `rect` is the already
    /// translated outer rect of the container.
    pub(crate) fn paint_scrollbars(&self, id: ElementId, rect: Rect, painter: &mut dyn Painter) {
        let Some(WidgetKind::Scroll(data)) = self.kind_of(id) else {
            return;
        };
        if !data.show_scrollbars {
            return;
        }
        let Some(view) = self.view_rect(id) else {
            return;
        };
        let track = viewport(rect, data.padding);
        let offset = data.offset.get();

        if view.height > track.height {
            let thumb = ((track.height * track.height) / view.height)
                .max(MIN_THUMB)
                .min(track.height);
            let range = view.height - track.height;
            let progress = (offset.y / range).clamp(0.0, 1.0);
            painter.draw_rect(Rect::new(
                track.right() - SCROLLBAR_THICKNESS,
                track.y + progress * (track.height - thumb),
                SCROLLBAR_THICKNESS,
                thumb,
            ));
        }
        if view.width > track.width {
            let thumb = ((track.width * track.width) / view.width)
                .max(MIN_THUMB)
                .min(track.width);
            let range = view.width - track.width;
            let progress = (offset.x / range).clamp(0.0, 1.0);
            painter.draw_rect(Rect::new(
                track.x + progress * (track.width - thumb),
                track.bottom() - SCROLLBAR_THICKNESS,
                thumb,
                SCROLLBAR_THICKNESS,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutError;
    use crate::options::UiOptions;
    use crate::paint::{DrawCall, RecordingPainter};
    use crate::primitives::Size;
    use crate::scroll::ScrollState;

    fn tree() -> UiTree {
        UiTree::new(UiOptions::default())
    }

    fn place(ui: &mut UiTree, parent: ElementId, rect: Rect) -> ElementId {
        let id = ui.panel();
        ui.set_width_mode(id, SizeMode::Fixed);
        ui.set_height_mode(id, SizeMode::Fixed);
        ui.set_width(id, rect.width);
        ui.set_height(id, rect.height);
        ui.set_position(id, rect.x, rect.y);
        ui.add_child(parent, id);
        id
    }

    // =========================================================================
    // View rect
    // =========================================================================

    #[test]
    fn view_rect_unions_all_children() {
        let mut ui = tree();
        let sc = ui.scroll_container(Rect::new(0.0, 0.0, 300.0, 200.0));
        place(&mut ui, sc, Rect::new(10.0, 20.0, 100.0, 50.0));
        place(&mut ui, sc, Rect::new(150.0, 100.0, 80.0, 60.0));
        place(&mut ui, sc, Rect::new(50.0, 180.0, 120.0, 40.0));

        assert_eq!(ui.view_rect(sc), Some(Rect::new(10.0, 20.0, 220.0, 200.0)));
    }

    #[test]
    fn childless_view_rect_is_the_bound_rect() {
        let mut ui = tree();
        let canvas = ui.canvas(Rect::new(5.0, 5.0, 300.0, 200.0));
        assert_eq!(ui.view_rect(canvas), Some(Rect::new(5.0, 5.0, 300.0, 200.0)));

        let stack = ui.stack();
        assert_eq!(ui.view_rect(stack), None);
    }

    #[test]
    fn view_rect_covers_negative_coordinates() {
        let mut ui = tree();
        let canvas = ui.canvas(Rect::new(0.0, 0.0, 100.0, 100.0));
        place(&mut ui, canvas, Rect::new(-30.0, -10.0, 50.0, 20.0));

        assert_eq!(ui.view_rect(canvas), Some(Rect::new(-30.0, -10.0, 50.0, 20.0)));
    }

    // =========================================================================
    // Scroll rect and offsets
    // =========================================================================

    #[test]
    fn scroll_rect_shrinks_by_padding() {
        let mut ui = tree();
        let sc = ui.scroll_container(Rect::new(0.0, 0.0, 100.0, 80.0));
        ui.set_scroll_padding(sc, 10.0).unwrap();
        assert_eq!(ui.scroll_rect(sc), Some(Rect::new(10.0, 10.0, 80.0, 60.0)));
    }

    #[test]
    fn extreme_padding_never_collapses_the_scroll_rect() {
        let mut ui = tree();
        let sc = ui.scroll_container(Rect::new(0.0, 0.0, 100.0, 80.0));
        ui.set_scroll_padding(sc, 60.0).unwrap();

        let rect = ui.scroll_rect(sc).unwrap();
        assert!(rect.width > 0.0);
        assert!(rect.height > 0.0);
        assert_eq!(rect, Rect::new(60.0, 60.0, 1.0, 1.0));
    }

    #[test]
    fn sync_computes_maxima_and_clamps() {
        let mut ui = tree();
        let state = ScrollState::new();
        let sc = ui.scroll_container_shared(Rect::new(0.0, 0.0, 300.0, 200.0), state.shared());
        place(&mut ui, sc, Rect::new(0.0, 0.0, 500.0, 600.0));

        state.sync_from_tree(&ui, sc);
        assert_eq!(state.max.get(), Point::new(200.0, 400.0));

        state.set_offset(Point::new(1000.0, 50.0));
        assert_eq!(ui.scroll_offset(sc), Some(Point::new(200.0, 50.0)));
    }

    #[test]
    fn viewport_larger_than_content_cannot_scroll() {
        let mut ui = tree();
        let state = ScrollState::new();
        let sc = ui.scroll_container_shared(Rect::new(0.0, 0.0, 300.0, 200.0), state.shared());
        place(&mut ui, sc, Rect::new(10.0, 10.0, 50.0, 50.0));

        state.sync_from_tree(&ui, sc);
        assert_eq!(state.max.get(), Point::ORIGIN);
        state.set_offset(Point::new(5.0, 5.0));
        assert_eq!(state.offset(), Point::ORIGIN);
    }

    #[test]
    fn two_views_share_one_offset() {
        let mut ui = tree();
        let state = ScrollState::new();
        let left = ui.scroll_container_shared(Rect::new(0.0, 0.0, 100.0, 100.0), state.shared());
        let right = ui.scroll_container_shared(Rect::new(100.0, 0.0, 100.0, 100.0), state.shared());

        state.set_offset(Point::new(30.0, 40.0));
        assert_eq!(ui.scroll_offset(left), Some(Point::new(30.0, 40.0)));
        assert_eq!(ui.scroll_offset(right), Some(Point::new(30.0, 40.0)));

        let handle = ui.scroll_offset_handle(left).unwrap();
        assert!(handle.ptr_eq(&state.shared()));
    }

    // =========================================================================
    // Rebinding
    // =========================================================================

    #[test]
    fn update_rect_rederives_fill_descendants() {
        let mut ui = tree();
        let canvas = ui.canvas(Rect::new(0.0, 0.0, 600.0, 400.0));
        let grid = ui.fill_grid(3).unwrap();
        ui.set_grid_padding(grid, 20.0).unwrap();
        ui.set_grid_spacing(grid, 10.0, 0.0).unwrap();
        ui.add_child(canvas, grid);

        assert_eq!(ui.grid_cell_size(grid).unwrap().width, 180.0);

        ui.update_rect(canvas, Rect::new(0.0, 0.0, 300.0, 400.0)).unwrap();
        assert_eq!(ui.width_of(canvas), 300.0);
        assert_eq!(ui.grid_cell_size(grid).unwrap().width, 80.0);
    }

    #[test]
    fn update_rect_rejects_other_kinds() {
        let mut ui = tree();
        let stack = ui.stack();
        assert_eq!(
            ui.update_rect(stack, Rect::new(0.0, 0.0, 10.0, 10.0)),
            Err(LayoutError::KindMismatch("canvas"))
        );
    }

    // =========================================================================
    // Render pass
    // =========================================================================

    #[test]
    fn scroll_render_clips_and_shifts_children() {
        let mut ui = tree();
        let sc = ui.scroll_container(Rect::new(0.0, 0.0, 200.0, 100.0));
        let button = ui.button("Go");
        ui.set_width_mode(button, SizeMode::Fixed);
        ui.set_height_mode(button, SizeMode::Fixed);
        ui.set_width(button, 50.0);
        ui.set_height(button, 20.0);
        ui.set_position(button, 10.0, 10.0);
        ui.add_child(sc, button);

        ui.scroll_offset_handle(sc)
            .unwrap()
            .set(Point::new(5.0, 30.0));

        let mut painter = RecordingPainter::new();
        ui.render(sc, &mut painter);

        assert_eq!(
            painter.calls[0],
            DrawCall::PushClip(Rect::new(0.0, 0.0, 200.0, 100.0))
        );
        assert!(matches!(
            &painter.calls[1],
            DrawCall::Button { rect, .. } if *rect == Rect::new(5.0, -20.0, 50.0, 20.0)
        ));
        assert_eq!(painter.calls[2], DrawCall::PopClip);
        assert_eq!(painter.clip_depth(), 0);
        // Content fits the viewport on both axes, so no scrollbar chrome.
        assert_eq!(painter.calls.len(), 3);
    }

    #[test]
    fn scrollbars_paint_proportional_thumbs() {
        let mut ui = tree();
        let sc = ui.scroll_container(Rect::new(0.0, 0.0, 100.0, 50.0));
        place(&mut ui, sc, Rect::new(0.0, 0.0, 300.0, 200.0));

        let mut painter = RecordingPainter::new();
        ui.render(sc, &mut painter);

        let thumbs: Vec<&Rect> = painter
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rect(rect) => Some(rect),
                _ => None,
            })
            .collect();
        assert_eq!(thumbs.len(), 2);
        // Vertical thumb hugs the right edge; 50*50/200 is under the
        // minimum, so the thumb is floored at 16.
        assert_eq!(*thumbs[0], Rect::new(92.0, 0.0, 8.0, 16.0));
        // Horizontal thumb sits on the bottom edge.
        assert_eq!(thumbs[1].y, 42.0);
        assert_eq!(thumbs[1].height, 8.0);
        assert!(thumbs[1].width > 16.0);

        ui.set_show_scrollbars(sc, false).unwrap();
        painter.clear();
        ui.render(sc, &mut painter);
        assert!(painter.calls.iter().all(|c| !matches!(c, DrawCall::Rect(_))));
    }

    #[test]
    fn scrollbar_thumb_tracks_the_offset() {
        let mut ui = tree();
        let state = ScrollState::new();
        let sc = ui.scroll_container_shared(Rect::new(0.0, 0.0, 100.0, 50.0), state.shared());
        place(&mut ui, sc, Rect::new(0.0, 0.0, 100.0, 250.0));

        state.sync_from_tree(&ui, sc);
        state.set_offset(Point::new(0.0, 200.0)); // bottom

        let mut painter = RecordingPainter::new();
        ui.render(sc, &mut painter);

        let thumb = painter
            .calls
            .iter()
            .find_map(|call| match call {
                DrawCall::Rect(rect) => Some(*rect),
                _ => None,
            })
            .unwrap();
        // Fully scrolled: the 16-high thumb rests at the track bottom.
        assert_eq!(thumb.y, 34.0);
    }

    #[test]
    fn canvas_renders_children_in_place() {
        let mut ui = tree();
        let canvas = ui.canvas(Rect::new(0.0, 0.0, 200.0, 200.0));
        let label = ui.label("hi");
        ui.set_position(label, 40.0, 60.0);
        ui.add_child(canvas, label);

        let mut painter = RecordingPainter::new();
        ui.render(canvas, &mut painter);

        assert!(matches!(
            &painter.calls[0],
            DrawCall::Label { rect, text } if text == "hi" && rect.x == 40.0 && rect.y == 60.0
        ));
        assert_eq!(ui.size_of(label), Size::new(2.0 * crate::metrics::CHAR_WIDTH, crate::metrics::LINE_HEIGHT));
    }
}
