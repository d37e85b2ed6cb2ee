//! The element tree and its sizing engine.
//!
//! All elements live in one slotmap arena and are addressed by
//! [`ElementId`]. Size queries resolve lazily through the per-axis mode
//! rules (Fixed, Content, Fill) and cache into the element's cells, so
//! queries and rendering work through `&UiTree` while structural edits
//! take `&mut`.
//!
//! The one hazard in the mode rules is mutual dependency: intrinsic
//! aggregation sizes a parent from its children while a Fill child
//! derives from its parent. Every resolution arm carries a per-node,
//! per-axis resolving marker; a query that re-enters itself returns the
//! last known value for that axis, or a positive minimum, instead of
//! recursing.

use slotmap::{SlotMap, new_key_type};

use crate::layout::element::Element;
use crate::layout::mode::{Alignment, Axis, SizeMode};
use crate::layout::widgets::{
    ButtonData, CheckboxData, DropdownData, LabelData, LineData, SliderData, TextEntryData,
    WidgetKind,
};
use crate::metrics::{MonoMetrics, TextMetrics};
use crate::options::UiOptions;
use crate::paint::Painter;
use crate::primitives::{Point, Rect, Size};
use crate::{LayoutError, Result};

new_key_type! {
    /// Stable handle to an element in a [`UiTree`].
    pub struct ElementId;
}

/// A retained tree of UI elements plus the sizing engine that resolves
/// their geometry.
pub struct UiTree {
    pub(crate) nodes: SlotMap<ElementId, Element>,
    pub(crate) options: UiOptions,
    pub(crate) metrics: Box<dyn TextMetrics>,
}

impl UiTree {
    pub fn new(options: UiOptions) -> Self {
        Self::with_metrics(options, Box::new(MonoMetrics))
    }

    /// Build a tree that measures text through a host-provided metrics
    /// implementation instead of the monospace estimator.
    pub fn with_metrics(options: UiOptions, metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            options,
            metrics,
        }
    }

    pub fn options(&self) -> &UiOptions {
        &self.options
    }

    pub(crate) fn spawn(&mut self, kind: WidgetKind) -> ElementId {
        self.nodes.insert(Element::new(kind, self.options.default_alignment))
    }

    // =========================================================================
    // Element constructors (grid, fill grid, canvas and scroll builders
    // live with their layout code)
    // =========================================================================

    /// A bare grouping element. Sizes to the configured default.
    pub fn panel(&mut self) -> ElementId {
        self.spawn(WidgetKind::Panel)
    }

    /// Vertical packing container.
    pub fn stack(&mut self) -> ElementId {
        self.spawn(WidgetKind::Stack)
    }

    /// Horizontal packing container.
    pub fn row(&mut self) -> ElementId {
        self.spawn(WidgetKind::Row)
    }

    pub fn button(&mut self, label: impl Into<String>) -> ElementId {
        self.spawn(WidgetKind::Button(ButtonData {
            label: label.into(),
            tooltip: None,
        }))
    }

    pub fn checkbox(&mut self, label: impl Into<String>, checked: bool) -> ElementId {
        self.spawn(WidgetKind::Checkbox(CheckboxData {
            label: label.into(),
            checked,
            tooltip: None,
        }))
    }

    /// A slider over `[min, max]`; `value` is clamped into the range.
    /// Reversed bounds are stored swapped.
    pub fn slider(&mut self, value: f32, min: f32, max: f32) -> ElementId {
        let (min, max) = (min.min(max), min.max(max));
        self.spawn(WidgetKind::Slider(SliderData {
            value: clamp_value(value, min, max),
            min,
            max,
            tooltip: None,
        }))
    }

    /// A dropdown; `selected` is clamped to the last entry.
    pub fn dropdown(&mut self, entries: Vec<String>, selected: usize) -> ElementId {
        let selected = clamp_index(selected, entries.len());
        self.spawn(WidgetKind::Dropdown(DropdownData {
            entries,
            selected,
            tooltip: None,
        }))
    }

    pub fn text_entry(&mut self, text: impl Into<String>) -> ElementId {
        self.spawn(WidgetKind::TextEntry(TextEntryData {
            text: text.into(),
            tooltip: None,
        }))
    }

    pub fn label(&mut self, text: impl Into<String>) -> ElementId {
        self.spawn(WidgetKind::Label(LabelData {
            text: text.into(),
            wrap_width: None,
        }))
    }

    /// A separator line; `vertical` flips the axis the line runs along.
    pub fn line(&mut self, length: f32, thickness: f32, vertical: bool) -> ElementId {
        self.spawn(WidgetKind::Line(LineData {
            length,
            thickness,
            vertical,
        }))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind_of(&self, id: ElementId) -> Option<&WidgetKind> {
        self.nodes.get(id).map(|el| &el.kind)
    }

    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id).and_then(|el| el.parent)
    }

    /// Children in insertion order. Empty for unknown ids.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.nodes
            .get(id)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child_count(&self, id: ElementId) -> usize {
        self.children_of(id).len()
    }

    pub fn position_of(&self, id: ElementId) -> Point {
        self.nodes
            .get(id)
            .map(|el| Point::new(el.x.get(), el.y.get()))
            .unwrap_or(Point::ORIGIN)
    }

    pub fn size_of(&self, id: ElementId) -> Size {
        Size::new(self.width_of(id), self.height_of(id))
    }

    pub fn rect_of(&self, id: ElementId) -> Rect {
        Rect::from_origin_size(self.position_of(id), self.size_of(id))
    }

    pub fn alignment_of(&self, id: ElementId) -> Alignment {
        self.nodes
            .get(id)
            .map(|el| el.alignment)
            .unwrap_or_default()
    }

    pub fn width_mode_of(&self, id: ElementId) -> SizeMode {
        self.nodes.get(id).map(|el| el.width_mode).unwrap_or_default()
    }

    pub fn height_mode_of(&self, id: ElementId) -> SizeMode {
        self.nodes.get(id).map(|el| el.height_mode).unwrap_or_default()
    }

    // =========================================================================
    // Sizing engine
    // =========================================================================

    /// Resolved width of `id` under its width mode. Unknown ids read as 0.
    pub fn width_of(&self, id: ElementId) -> f32 {
        self.resolve_axis(id, Axis::Horizontal)
    }

    /// Resolved height of `id` under its height mode. Unknown ids read as 0.
    pub fn height_of(&self, id: ElementId) -> f32 {
        self.resolve_axis(id, Axis::Vertical)
    }

    pub(crate) fn resolve_axis(&self, id: ElementId, axis: Axis) -> f32 {
        let Some(el) = self.nodes.get(id) else {
            return 0.0;
        };
        match el.mode(axis) {
            SizeMode::Fixed => match el.cache(axis).get() {
                Some(value) => value,
                None => {
                    if el.resolving(axis).get() {
                        // The intrinsic fallback re-entered through a
                        // Fill child.
                        return el.last(axis).get().unwrap_or(self.options.min_fallback);
                    }
                    // Never explicitly set: fall back to the intrinsic
                    // computation once, then treat the result as fixed.
                    el.resolving(axis).set(true);
                    let value = self.intrinsic_axis(id, axis);
                    el.resolving(axis).set(false);
                    el.cache(axis).set(Some(value));
                    value
                }
            },
            SizeMode::Content => {
                if let Some(value) = el.cache(axis).get() {
                    return value;
                }
                if el.resolving(axis).get() {
                    // Re-entered through a Fill/Content dependency cycle.
                    return el.last(axis).get().unwrap_or(self.options.min_fallback);
                }
                el.resolving(axis).set(true);
                let value = self.intrinsic_axis(id, axis);
                el.resolving(axis).set(false);
                el.cache(axis).set(Some(value));
                value
            }
            SizeMode::Fill => {
                let Some(parent_id) = el.parent else {
                    return 0.0;
                };
                if el.resolving(axis).get() {
                    // Re-entered from an aggregating ancestor's measure
                    // pass, such as a grid deriving its auto cell.
                    return el.last(axis).get().unwrap_or(self.options.min_fallback);
                }
                el.resolving(axis).set(true);
                // Inside a grid the cell is the effective parent box.
                let value = match self.grid_cell_size(parent_id) {
                    Some(cell) => axis.of(cell),
                    None => self.resolve_axis(parent_id, axis),
                };
                el.resolving(axis).set(false);
                value
            }
        }
    }

    /// The size `id` computes from its own nature, ignoring imposed
    /// constraints.
    pub(crate) fn intrinsic_axis(&self, id: ElementId, axis: Axis) -> f32 {
        let Some(el) = self.nodes.get(id) else {
            return 0.0;
        };
        match &el.kind {
            WidgetKind::Stack => self.stack_intrinsic(id, axis),
            WidgetKind::Row => self.row_intrinsic(id, axis),
            WidgetKind::Grid(data) => self.grid_intrinsic(id, data, axis),
            WidgetKind::FillGrid(data) => self.fill_grid_intrinsic(id, data, axis),
            kind => kind
                .base_intrinsic(self.metrics.as_ref(), self.options.default_size)
                .map(|size| axis.of(size))
                .unwrap_or_else(|| axis.of(self.options.default_size)),
        }
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Drop this element's cached Content sizes and walk the invalidation
    /// up through Content-sized ancestors.
    pub fn invalidate_size(&self, id: ElementId) {
        self.invalidate_axis(id, Axis::Horizontal);
        self.invalidate_axis(id, Axis::Vertical);
    }

    /// [`invalidate_size`](UiTree::invalidate_size) for this element and
    /// every descendant, for wholesale changes such as rebinding a canvas.
    pub fn invalidate_layout(&self, id: ElementId) {
        self.invalidate_size(id);
        self.invalidate_descendants(id);
    }

    fn invalidate_axis(&self, id: ElementId, axis: Axis) {
        let Some(el) = self.nodes.get(id) else {
            return;
        };
        if el.mode(axis) == SizeMode::Content {
            el.clear_cache(axis);
        }
        el.kind.clear_cell_cache();
        self.propagate_invalidation(id, axis);
    }

    /// Walk upward from `id`: a parent whose axis is Content-sized has a
    /// stale aggregate and is cleared; Fixed and Fill parents stop the
    /// walk. A grid parent's derived cell size is content-like and is
    /// cleared regardless of the grid's own modes.
    fn propagate_invalidation(&self, id: ElementId, axis: Axis) {
        let mut current = id;
        while let Some(parent_id) = self.nodes.get(current).and_then(|el| el.parent) {
            let Some(parent) = self.nodes.get(parent_id) else {
                return;
            };
            parent.kind.clear_cell_cache();
            if parent.mode(axis) != SizeMode::Content {
                return;
            }
            parent.clear_cache(axis);
            current = parent_id;
        }
    }

    fn invalidate_descendants(&self, id: ElementId) {
        let Some(el) = self.nodes.get(id) else {
            return;
        };
        for &child_id in &el.children {
            if let Some(child) = self.nodes.get(child_id) {
                if child.width_mode == SizeMode::Content {
                    child.clear_cache(Axis::Horizontal);
                }
                if child.height_mode == SizeMode::Content {
                    child.clear_cache(Axis::Vertical);
                }
                child.kind.clear_cell_cache();
            }
            self.invalidate_descendants(child_id);
        }
    }

    // =========================================================================
    // Size and mode setters
    // =========================================================================

    /// Store an explicit width. Authoritative under Fixed mode; under
    /// Content mode it overrides the cache until the next invalidation.
    pub fn set_width(&mut self, id: ElementId, width: f32) {
        self.set_axis(id, Axis::Horizontal, width);
    }

    /// Store an explicit height. See [`set_width`](UiTree::set_width).
    pub fn set_height(&mut self, id: ElementId, height: f32) {
        self.set_axis(id, Axis::Vertical, height);
    }

    fn set_axis(&self, id: ElementId, axis: Axis, value: f32) {
        let Some(el) = self.nodes.get(id) else {
            return;
        };
        el.cache(axis).set(Some(value));
        // Fill children re-derive on their next read; just drop any stale
        // slot value left over from an earlier mode.
        for &child_id in &el.children {
            if let Some(child) = self.nodes.get(child_id) {
                if child.mode(axis) == SizeMode::Fill {
                    child.clear_cache(axis);
                }
            }
        }
        // This node's size changed; Content ancestors must re-aggregate.
        self.propagate_invalidation(id, axis);
    }

    pub fn set_width_mode(&mut self, id: ElementId, mode: SizeMode) {
        self.set_mode(id, Axis::Horizontal, mode);
    }

    pub fn set_height_mode(&mut self, id: ElementId, mode: SizeMode) {
        self.set_mode(id, Axis::Vertical, mode);
    }

    fn set_mode(&mut self, id: ElementId, axis: Axis, mode: SizeMode) {
        let Some(el) = self.nodes.get_mut(id) else {
            return;
        };
        let slot = match axis {
            Axis::Horizontal => &mut el.width_mode,
            Axis::Vertical => &mut el.height_mode,
        };
        if *slot == mode {
            return;
        }
        *slot = mode;
        el.clear_cache(axis);
        self.propagate_invalidation(id, axis);
    }

    /// Place an element, in the same coordinate space its parent assigns
    /// positions in. Mostly useful for children of canvas and scroll
    /// containers, which do not arrange.
    pub fn set_position(&mut self, id: ElementId, x: f32, y: f32) {
        let Some(el) = self.nodes.get(id) else {
            return;
        };
        el.x.set(x);
        el.y.set(y);
    }

    pub fn set_alignment(&mut self, id: ElementId, alignment: Alignment) {
        if let Some(el) = self.nodes.get_mut(id) {
            el.alignment = alignment;
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `child` to `parent`'s children, re-parenting it if it is
    /// attached elsewhere. Attaching an element to itself or to its own
    /// subtree is refused. Stale ids are a no-op.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.insert_child(parent, child, None);
    }

    pub(crate) fn insert_child(&mut self, parent: ElementId, child: ElementId, index: Option<usize>) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            tracing::warn!("add_child with a stale element id is a no-op");
            return;
        }
        if child == parent || self.is_ancestor(child, parent) {
            tracing::warn!("refusing to attach an element inside its own subtree");
            return;
        }
        self.detach(child);
        if let Some(el) = self.nodes.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(parent_el) = self.nodes.get_mut(parent) {
            let at = index
                .unwrap_or(parent_el.children.len())
                .min(parent_el.children.len());
            parent_el.children.insert(at, child);
        }
        // The child set changed, so Content aggregates and derived cell
        // sizes are stale.
        self.invalidate_size(parent);
    }

    /// Detach `child` from `parent`. A no-op (with a log line) when the
    /// element is not currently a child of that parent.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        let actual = self.nodes.get(child).and_then(|el| el.parent);
        if actual != Some(parent) {
            tracing::warn!("remove_child: element is not a child of that parent");
            return;
        }
        self.detach(child);
    }

    /// Remove an element and its whole subtree from the arena.
    pub fn remove(&mut self, id: ElementId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(el) = self.nodes.remove(next) {
                pending.extend(el.children);
            }
        }
    }

    fn detach(&mut self, child: ElementId) {
        let Some(old_parent) = self.nodes.get(child).and_then(|el| el.parent) else {
            return;
        };
        if let Some(parent_el) = self.nodes.get_mut(old_parent) {
            parent_el.children.retain(|&c| c != child);
        }
        if let Some(el) = self.nodes.get_mut(child) {
            el.parent = None;
        }
        self.invalidate_size(old_parent);
    }

    /// Whether `ancestor` appears on `node`'s parent chain.
    fn is_ancestor(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = node;
        while let Some(parent) = self.nodes.get(current).and_then(|el| el.parent) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    // =========================================================================
    // Widget data setters
    // =========================================================================

    pub(crate) fn with_kind<T>(
        &mut self,
        id: ElementId,
        expected: &'static str,
        edit: impl FnOnce(&mut WidgetKind) -> Option<T>,
    ) -> Result<T> {
        let el = self.nodes.get_mut(id).ok_or(LayoutError::UnknownElement)?;
        edit(&mut el.kind).ok_or(LayoutError::KindMismatch(expected))
    }

    pub fn set_button_label(&mut self, id: ElementId, label: impl Into<String>) -> Result<()> {
        self.with_kind(id, "button", |kind| match kind {
            WidgetKind::Button(data) => {
                data.label = label.into();
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }

    pub fn set_checked(&mut self, id: ElementId, checked: bool) -> Result<()> {
        self.with_kind(id, "checkbox", |kind| match kind {
            WidgetKind::Checkbox(data) => {
                data.checked = checked;
                Some(())
            }
            _ => None,
        })
    }

    pub fn is_checked(&self, id: ElementId) -> Option<bool> {
        match self.kind_of(id)? {
            WidgetKind::Checkbox(data) => Some(data.checked),
            _ => None,
        }
    }

    /// Set a slider's value, clamped into its range.
    pub fn set_slider_value(&mut self, id: ElementId, value: f32) -> Result<()> {
        self.with_kind(id, "slider", |kind| match kind {
            WidgetKind::Slider(data) => {
                data.value = clamp_value(value, data.min, data.max);
                Some(())
            }
            _ => None,
        })
    }

    pub fn slider_value(&self, id: ElementId) -> Option<f32> {
        match self.kind_of(id)? {
            WidgetKind::Slider(data) => Some(data.value),
            _ => None,
        }
    }

    /// Select a dropdown entry, clamped to the last entry.
    pub fn set_dropdown_selected(&mut self, id: ElementId, index: usize) -> Result<()> {
        self.with_kind(id, "dropdown", |kind| match kind {
            WidgetKind::Dropdown(data) => {
                data.selected = clamp_index(index, data.entries.len());
                Some(())
            }
            _ => None,
        })
    }

    pub fn dropdown_selected(&self, id: ElementId) -> Option<usize> {
        match self.kind_of(id)? {
            WidgetKind::Dropdown(data) => Some(data.selected),
            _ => None,
        }
    }

    /// Replace a dropdown's entries; the selection is re-clamped.
    pub fn set_dropdown_entries(&mut self, id: ElementId, entries: Vec<String>) -> Result<()> {
        self.with_kind(id, "dropdown", |kind| match kind {
            WidgetKind::Dropdown(data) => {
                data.selected = clamp_index(data.selected, entries.len());
                data.entries = entries;
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }

    pub fn set_entry_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<()> {
        self.with_kind(id, "text entry", |kind| match kind {
            WidgetKind::TextEntry(data) => {
                data.text = text.into();
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }

    pub fn entry_text(&self, id: ElementId) -> Option<&str> {
        match self.kind_of(id)? {
            WidgetKind::TextEntry(data) => Some(&data.text),
            _ => None,
        }
    }

    pub fn set_label_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<()> {
        self.with_kind(id, "label", |kind| match kind {
            WidgetKind::Label(data) => {
                data.text = text.into();
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }

    pub fn label_text(&self, id: ElementId) -> Option<&str> {
        match self.kind_of(id)? {
            WidgetKind::Label(data) => Some(&data.text),
            _ => None,
        }
    }

    /// Wrap a label's text at the given width; `None` disables wrapping.
    pub fn set_label_wrap(&mut self, id: ElementId, wrap_width: Option<f32>) -> Result<()> {
        self.with_kind(id, "label", |kind| match kind {
            WidgetKind::Label(data) => {
                data.wrap_width = wrap_width;
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }

    /// Attach or clear a tooltip on an interactive widget.
    pub fn set_tooltip(&mut self, id: ElementId, tooltip: Option<String>) -> Result<()> {
        self.with_kind(id, "widget with a tooltip", |kind| {
            let slot = match kind {
                WidgetKind::Button(data) => &mut data.tooltip,
                WidgetKind::Checkbox(data) => &mut data.tooltip,
                WidgetKind::Slider(data) => &mut data.tooltip,
                WidgetKind::Dropdown(data) => &mut data.tooltip,
                WidgetKind::TextEntry(data) => &mut data.tooltip,
                _ => return None,
            };
            *slot = tooltip;
            Some(())
        })
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Render the tree rooted at `root`: resolve geometry, paint each
    /// node, arrange children by the node's kind and recurse in insertion
    /// order.
    pub fn render(&self, root: ElementId, painter: &mut dyn Painter) {
        if !self.nodes.contains_key(root) {
            tracing::warn!("render called with an unknown root element");
            return;
        }
        self.render_node(root, painter, Point::ORIGIN);
    }

    fn render_node(&self, id: ElementId, painter: &mut dyn Painter, offset: Point) {
        let Some(el) = self.nodes.get(id) else {
            return;
        };
        let size = Size::new(self.width_of(id), self.height_of(id));
        let rect = Rect::new(
            el.x.get() + offset.x,
            el.y.get() + offset.y,
            size.width,
            size.height,
        );

        el.kind.paint(rect, painter);
        self.arrange_children(id);

        if let WidgetKind::Scroll(data) = &el.kind {
            painter.push_clip(crate::layout::canvas::viewport(rect, data.padding));
            let scrolled = offset - data.offset.get();
            for &child_id in &el.children {
                self.render_node(child_id, painter, scrolled);
            }
            painter.pop_clip();
            self.paint_scrollbars(id, rect, painter);
        } else {
            for &child_id in &el.children {
                self.render_node(child_id, painter, offset);
            }
        }
    }
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new(UiOptions::default())
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

/// `f32::clamp` panics on reversed or NaN bounds; `max`/`min` degrade
/// to one end of the range instead.
fn clamp_value(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
