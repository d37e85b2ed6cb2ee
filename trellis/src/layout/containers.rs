//! Packing and grid containers.
//!
//! Arrangement assigns children absolute positions starting from the
//! container's own coordinates; it runs during every render pass, after
//! the container's geometry has resolved. Stack and Row pack along one
//! axis and hold the cross axis at the container's coordinate. Grids
//! place children row-major into cells and offset each child inside its
//! cell by the child's alignment.
//!
//! A grid's auto cell is the pointwise maximum of its children's sizes,
//! cached and invalidated like a Content axis. Fill children contribute
//! their intrinsic size to that maximum; their resolved size is the cell
//! itself, so measuring them through the normal path would chase the
//! value being derived.

use crate::layout::mode::{Axis, SizeMode};
use crate::layout::tree::{ElementId, UiTree};
use crate::layout::widgets::{FillGridData, GridData, WidgetKind};
use crate::primitives::Size;
use crate::{LayoutError, Result};

/// Length of `count` cells of size `cell` separated by `spacing`, plus
/// padding on both ends.
fn span(count: usize, cell: f32, spacing: f32, padding: f32) -> f32 {
    2.0 * padding + count as f32 * cell + count.saturating_sub(1) as f32 * spacing
}

impl UiTree {
    // =========================================================================
    // Grid constructors
    // =========================================================================

    /// A grid with `columns` columns and a row capacity; `rows == 0`
    /// grows unbounded. The cell size is derived from the children.
    pub fn grid(&mut self, columns: usize, rows: usize) -> Result<ElementId> {
        if columns == 0 {
            return Err(LayoutError::InvalidColumns);
        }
        Ok(self.spawn(WidgetKind::Grid(GridData::new(columns, rows, None))))
    }

    /// A grid with an explicit cell size; auto derivation is disabled.
    pub fn grid_with_cell(&mut self, columns: usize, rows: usize, cell: Size) -> Result<ElementId> {
        if columns == 0 {
            return Err(LayoutError::InvalidColumns);
        }
        Ok(self.spawn(WidgetKind::Grid(GridData::new(columns, rows, Some(cell)))))
    }

    /// A grid whose width always fills its parent; the cell width is the
    /// parent width minus padding and spacing, split evenly across the
    /// columns. Rows grow unbounded.
    pub fn fill_grid(&mut self, columns: usize) -> Result<ElementId> {
        if columns == 0 {
            return Err(LayoutError::InvalidColumns);
        }
        let id = self.spawn(WidgetKind::FillGrid(FillGridData::new(columns)));
        self.set_width_mode(id, SizeMode::Fill);
        Ok(id)
    }

    // =========================================================================
    // Arrangement
    // =========================================================================

    pub(crate) fn arrange_children(&self, id: ElementId) {
        let Some(el) = self.nodes.get(id) else {
            return;
        };
        if el.children.is_empty() {
            return;
        }
        match &el.kind {
            WidgetKind::Row => self.arrange_row(id),
            WidgetKind::Grid(_) | WidgetKind::FillGrid(_) => self.arrange_grid(id),
            // Canvas and scroll children keep host-assigned positions.
            WidgetKind::Canvas(_) | WidgetKind::Scroll(_) => {}
            _ => self.arrange_stack(id),
        }
    }

    fn arrange_stack(&self, id: ElementId) {
        let origin = self.position_of(id);
        let mut y = origin.y;
        for &child_id in self.children_of(id) {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            child.x.set(origin.x);
            child.y.set(y);
            y += self.height_of(child_id) + self.options.spacing;
        }
    }

    fn arrange_row(&self, id: ElementId) {
        let origin = self.position_of(id);
        let mut x = origin.x;
        for &child_id in self.children_of(id) {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            child.x.set(x);
            child.y.set(origin.y);
            x += self.width_of(child_id) + self.options.spacing;
        }
    }

    /// Row-major cell placement. A child smaller than its cell is offset
    /// by its alignment fraction; a child at least as large is pinned to
    /// the cell's leading edge on that axis.
    fn arrange_grid(&self, id: ElementId) {
        let Some(cell) = self.grid_cell_size(id) else {
            return;
        };
        let (columns, padding, col_spacing, row_spacing) = match self.kind_of(id) {
            Some(WidgetKind::Grid(data)) => {
                (data.columns, data.padding, data.col_spacing, data.row_spacing)
            }
            Some(WidgetKind::FillGrid(data)) => {
                (data.columns, data.padding, data.col_spacing, data.row_spacing)
            }
            _ => return,
        };
        let origin = self.position_of(id);
        for (index, &child_id) in self.children_of(id).iter().enumerate() {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            let col = index % columns;
            let row = index / columns;
            let cell_x = origin.x + padding + col as f32 * (cell.width + col_spacing);
            let cell_y = origin.y + padding + row as f32 * (cell.height + row_spacing);
            let child_size = self.size_of(child_id);
            let dx = if child_size.width < cell.width {
                (cell.width - child_size.width) * child.alignment.x_fraction()
            } else {
                0.0
            };
            let dy = if child_size.height < cell.height {
                (cell.height - child_size.height) * child.alignment.y_fraction()
            } else {
                0.0
            };
            child.x.set(cell_x + dx);
            child.y.set(cell_y + dy);
        }
    }

    // =========================================================================
    // Container intrinsics
    // =========================================================================

    pub(crate) fn stack_intrinsic(&self, id: ElementId, axis: Axis) -> f32 {
        let children = self.children_of(id);
        if children.is_empty() {
            return axis.of(self.options.default_size);
        }
        match axis {
            Axis::Horizontal => children
                .iter()
                .fold(0.0f32, |acc, &c| acc.max(self.resolve_axis(c, axis))),
            Axis::Vertical => {
                let total: f32 = children.iter().map(|&c| self.resolve_axis(c, axis)).sum();
                total + self.options.spacing * (children.len() - 1) as f32
            }
        }
    }

    pub(crate) fn row_intrinsic(&self, id: ElementId, axis: Axis) -> f32 {
        let children = self.children_of(id);
        if children.is_empty() {
            return axis.of(self.options.default_size);
        }
        match axis {
            Axis::Horizontal => {
                let total: f32 = children.iter().map(|&c| self.resolve_axis(c, axis)).sum();
                total + self.options.spacing * (children.len() - 1) as f32
            }
            Axis::Vertical => children
                .iter()
                .fold(0.0f32, |acc, &c| acc.max(self.resolve_axis(c, axis))),
        }
    }

    pub(crate) fn grid_intrinsic(&self, id: ElementId, data: &GridData, axis: Axis) -> f32 {
        let cell = match data.cell {
            Some(cell) => cell,
            None => self.grid_auto_cell(id, &data.auto_cell),
        };
        match axis {
            Axis::Horizontal => span(data.columns, cell.width, data.col_spacing, data.padding),
            Axis::Vertical => {
                // A bounded grid reserves its capacity even when sparse;
                // overflow children still extend the span.
                let rows = self.grid_actual_rows(id).max(data.rows);
                span(rows, cell.height, data.row_spacing, data.padding)
            }
        }
    }

    pub(crate) fn fill_grid_intrinsic(&self, id: ElementId, data: &FillGridData, axis: Axis) -> f32 {
        let cell = self.fill_grid_cell(id, data);
        match axis {
            Axis::Horizontal => span(data.columns, cell.width, data.col_spacing, data.padding),
            Axis::Vertical => span(
                self.grid_actual_rows(id),
                cell.height,
                data.row_spacing,
                data.padding,
            ),
        }
    }

    // =========================================================================
    // Cell derivation
    // =========================================================================

    /// The cell rectangle a grid allots each child: the explicit size
    /// when one was given, otherwise the derived one. `None` for
    /// non-grid elements.
    pub fn grid_cell_size(&self, id: ElementId) -> Option<Size> {
        match self.kind_of(id)? {
            WidgetKind::Grid(data) => Some(match data.cell {
                Some(cell) => cell,
                None => self.grid_auto_cell(id, &data.auto_cell),
            }),
            WidgetKind::FillGrid(data) => Some(self.fill_grid_cell(id, data)),
            _ => None,
        }
    }

    fn grid_auto_cell(&self, id: ElementId, slot: &std::cell::Cell<Option<Size>>) -> Size {
        if let Some(cell) = slot.get() {
            return cell;
        }
        let cell = Size::new(
            self.cell_basis_axis(id, Axis::Horizontal),
            self.cell_basis_axis(id, Axis::Vertical),
        );
        slot.set(Some(cell));
        cell
    }

    fn fill_grid_cell(&self, id: ElementId, data: &FillGridData) -> Size {
        let inner = self.width_of(id)
            - 2.0 * data.padding
            - (data.columns - 1) as f32 * data.col_spacing;
        let width = (inner / data.columns as f32).max(0.0);
        // Only the height half of the cached cell is read back; the width
        // follows the current parent width on every call.
        let height = match data.auto_cell.get() {
            Some(cached) => cached.height,
            None => {
                let height = self.cell_basis_axis(id, Axis::Vertical);
                data.auto_cell.set(Some(Size::new(width, height)));
                height
            }
        };
        Size::new(width, height)
    }

    /// Largest child extent on `axis`, the auto-cell basis. Fill children
    /// are measured by their intrinsic size; everything else resolves
    /// normally.
    fn cell_basis_axis(&self, id: ElementId, axis: Axis) -> f32 {
        let children = self.children_of(id);
        if children.is_empty() {
            return axis.of(self.options.default_size);
        }
        let mut largest: f32 = 0.0;
        for &child_id in children {
            let Some(child) = self.nodes.get(child_id) else {
                continue;
            };
            let value = if child.mode(axis) == SizeMode::Fill {
                self.intrinsic_axis(child_id, axis)
            } else {
                self.resolve_axis(child_id, axis)
            };
            largest = largest.max(value);
        }
        largest
    }

    // =========================================================================
    // Grid queries
    // =========================================================================

    pub fn grid_columns(&self, id: ElementId) -> Option<usize> {
        match self.kind_of(id)? {
            WidgetKind::Grid(data) => Some(data.columns),
            WidgetKind::FillGrid(data) => Some(data.columns),
            _ => None,
        }
    }

    /// Total slot capacity. `None` for unbounded grids and for non-grid
    /// elements.
    pub fn grid_max_capacity(&self, id: ElementId) -> Option<usize> {
        match self.kind_of(id)? {
            WidgetKind::Grid(data) if data.rows > 0 => Some(data.columns * data.rows),
            _ => None,
        }
    }

    /// Rows occupied by the current children.
    pub fn grid_actual_rows(&self, id: ElementId) -> usize {
        match self.grid_columns(id) {
            Some(columns) => self.child_count(id).div_ceil(columns),
            None => 0,
        }
    }

    /// The child occupying `(column, row)`, if that slot is filled.
    pub fn grid_child_at(&self, id: ElementId, column: usize, row: usize) -> Option<ElementId> {
        let columns = self.grid_columns(id)?;
        if column >= columns {
            return None;
        }
        self.children_of(id).get(row * columns + column).copied()
    }

    /// The `(column, row)` a grid child occupies.
    pub fn grid_position_of(&self, id: ElementId, child: ElementId) -> Option<(usize, usize)> {
        let columns = self.grid_columns(id)?;
        let index = self.children_of(id).iter().position(|&c| c == child)?;
        Some((index % columns, index / columns))
    }

    // =========================================================================
    // Grid mutation
    // =========================================================================

    /// Insert `child` at `(column, row)`, shifting later children one
    /// slot back. Out-of-range coordinates clamp into the grid.
    pub fn grid_insert_at(
        &mut self,
        id: ElementId,
        child: ElementId,
        column: usize,
        row: usize,
    ) -> Result<()> {
        let (columns, rows) = match self.kind_of(id).ok_or(LayoutError::UnknownElement)? {
            WidgetKind::Grid(data) => (data.columns, data.rows),
            WidgetKind::FillGrid(data) => (data.columns, 0),
            _ => return Err(LayoutError::KindMismatch("grid")),
        };
        if !self.contains(child) {
            return Err(LayoutError::UnknownElement);
        }
        let column = column.min(columns - 1);
        let row_limit = if rows > 0 {
            rows - 1
        } else {
            self.grid_actual_rows(id)
        };
        let row = row.min(row_limit);
        self.insert_child(id, child, Some(row * columns + column));
        Ok(())
    }

    /// Fix or unfix a grid's cell size. `None` returns the grid to
    /// auto-derived cells. Fill grids always compute their cell.
    pub fn set_grid_cell_size(&mut self, id: ElementId, cell: Option<Size>) -> Result<()> {
        self.with_kind(id, "grid with a configurable cell", |kind| match kind {
            WidgetKind::Grid(data) => {
                data.cell = cell;
                Some(())
            }
            _ => None,
        })?;
        // Fill children take their dimensions from the cell, so the whole
        // subtree remeasures.
        self.invalidate_layout(id);
        Ok(())
    }

    pub fn set_grid_spacing(&mut self, id: ElementId, col_spacing: f32, row_spacing: f32) -> Result<()> {
        self.with_kind(id, "grid", |kind| match kind {
            WidgetKind::Grid(data) => {
                data.col_spacing = col_spacing;
                data.row_spacing = row_spacing;
                Some(())
            }
            WidgetKind::FillGrid(data) => {
                data.col_spacing = col_spacing;
                data.row_spacing = row_spacing;
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }

    pub fn set_grid_padding(&mut self, id: ElementId, padding: f32) -> Result<()> {
        self.with_kind(id, "grid", |kind| match kind {
            WidgetKind::Grid(data) => {
                data.padding = padding;
                Some(())
            }
            WidgetKind::FillGrid(data) => {
                data.padding = padding;
                Some(())
            }
            _ => None,
        })?;
        self.invalidate_size(id);
        Ok(())
    }
}
