//! Widget kinds.
//!
//! Every element carries one [`WidgetKind`]: a tagged union of the
//! kind-specific data that in a class hierarchy would live on subclasses.
//! The sizing engine stays kind-agnostic and reaches widget behavior only
//! through the dispatch points here (intrinsic size, paint) and the
//! arrangement dispatch in the container module.

use std::cell::Cell;

use crate::metrics::{LINE_HEIGHT, TextMetrics};
use crate::paint::Painter;
use crate::primitives::{Point, Rect, Size};
use crate::scroll::SharedOffset;

// =========================================================================
// Control metrics
// =========================================================================

pub const BUTTON_PADDING_X: f32 = 12.0;
pub const BUTTON_PADDING_Y: f32 = 6.0;
pub const CHECKBOX_BOX: f32 = 16.0;
pub const CHECKBOX_GAP: f32 = 6.0;
pub const SLIDER_WIDTH: f32 = 160.0;
pub const DROPDOWN_PADDING_X: f32 = 8.0;
pub const DROPDOWN_ARROW_WIDTH: f32 = 16.0;
pub const ENTRY_MIN_WIDTH: f32 = 120.0;
pub const ENTRY_PADDING_X: f32 = 6.0;
pub const ENTRY_PADDING_Y: f32 = 4.0;

// =========================================================================
// Kind data
// =========================================================================

#[derive(Debug, Clone, Default)]
pub struct ButtonData {
    pub label: String,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckboxData {
    pub label: String,
    pub checked: bool,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SliderData {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DropdownData {
    pub entries: Vec<String>,
    pub selected: usize,
    pub tooltip: Option<String>,
}

/// Single-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextEntryData {
    pub text: String,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LabelData {
    pub text: String,
    pub wrap_width: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct LineData {
    pub length: f32,
    pub thickness: f32,
    pub vertical: bool,
}

#[derive(Debug, Clone)]
pub struct GridData {
    pub columns: usize,
    /// Row capacity; 0 means unbounded growth.
    pub rows: usize,
    /// Explicit cell size. `None` derives the cell from the children.
    pub cell: Option<Size>,
    /// Cached auto-derived cell size, cleared like a Content axis cache
    /// whenever the children change.
    pub(crate) auto_cell: Cell<Option<Size>>,
    pub padding: f32,
    pub col_spacing: f32,
    pub row_spacing: f32,
}

impl GridData {
    pub(crate) fn new(columns: usize, rows: usize, cell: Option<Size>) -> Self {
        Self {
            columns,
            rows,
            cell,
            auto_cell: Cell::new(None),
            padding: 0.0,
            col_spacing: 0.0,
            row_spacing: 0.0,
        }
    }
}

/// Grid whose width always fills the parent; rows grow unbounded and the
/// cell width is carved out of the parent width.
#[derive(Debug, Clone)]
pub struct FillGridData {
    pub columns: usize,
    pub(crate) auto_cell: Cell<Option<Size>>,
    pub padding: f32,
    pub col_spacing: f32,
    pub row_spacing: f32,
}

impl FillGridData {
    pub(crate) fn new(columns: usize) -> Self {
        Self {
            columns,
            auto_cell: Cell::new(None),
            padding: 0.0,
            col_spacing: 0.0,
            row_spacing: 0.0,
        }
    }
}

/// Root adapter binding a device rectangle to the element tree.
#[derive(Debug, Clone)]
pub struct CanvasData {
    pub rect: Rect,
}

/// Scrollable viewport. Children keep host-assigned positions in content
/// coordinates; painting shifts them by the shared offset.
#[derive(Debug, Clone)]
pub struct ScrollData {
    pub rect: Rect,
    pub padding: f32,
    pub show_scrollbars: bool,
    pub(crate) offset: SharedOffset,
}

// =========================================================================
// The switchboard
// =========================================================================

#[derive(Debug, Clone)]
pub enum WidgetKind {
    /// Invisible grouping element with no content of its own.
    Panel,
    Stack,
    Row,
    Grid(GridData),
    FillGrid(FillGridData),
    Canvas(CanvasData),
    Scroll(ScrollData),
    Button(ButtonData),
    Checkbox(CheckboxData),
    Slider(SliderData),
    Dropdown(DropdownData),
    TextEntry(TextEntryData),
    Label(LabelData),
    Line(LineData),
}

impl WidgetKind {
    /// Kind name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Stack => "stack",
            Self::Row => "row",
            Self::Grid(_) => "grid",
            Self::FillGrid(_) => "fill grid",
            Self::Canvas(_) => "canvas",
            Self::Scroll(_) => "scroll container",
            Self::Button(_) => "button",
            Self::Checkbox(_) => "checkbox",
            Self::Slider(_) => "slider",
            Self::Dropdown(_) => "dropdown",
            Self::TextEntry(_) => "text entry",
            Self::Label(_) => "label",
            Self::Line(_) => "line",
        }
    }

    /// Drop a grid's derived cell size so the next arrangement remeasures
    /// it. No-op for every other kind.
    pub(crate) fn clear_cell_cache(&self) {
        match self {
            Self::Grid(data) => data.auto_cell.set(None),
            Self::FillGrid(data) => data.auto_cell.set(None),
            _ => {}
        }
    }

    /// Intrinsic size for kinds that can size themselves without looking
    /// at their children. Packing and grid kinds return `None`; the tree
    /// aggregates their children instead.
    pub(crate) fn base_intrinsic(&self, metrics: &dyn TextMetrics, default_size: Size) -> Option<Size> {
        match self {
            Self::Panel => Some(default_size),
            Self::Stack | Self::Row | Self::Grid(_) | Self::FillGrid(_) => None,
            Self::Canvas(data) => Some(data.rect.size()),
            Self::Scroll(data) => Some(data.rect.size()),
            Self::Button(data) => {
                let text = metrics.measure(&data.label, None);
                Some(Size::new(
                    text.width + 2.0 * BUTTON_PADDING_X,
                    text.height + 2.0 * BUTTON_PADDING_Y,
                ))
            }
            Self::Checkbox(data) => {
                let text = metrics.measure(&data.label, None);
                Some(Size::new(
                    CHECKBOX_BOX + CHECKBOX_GAP + text.width,
                    text.height.max(CHECKBOX_BOX),
                ))
            }
            Self::Slider(_) => Some(Size::new(SLIDER_WIDTH, LINE_HEIGHT)),
            Self::Dropdown(data) => {
                let widest = data
                    .entries
                    .iter()
                    .map(|entry| metrics.measure(entry, None).width)
                    .fold(0.0f32, f32::max);
                Some(Size::new(
                    widest + 2.0 * DROPDOWN_PADDING_X + DROPDOWN_ARROW_WIDTH,
                    LINE_HEIGHT + 2.0 * ENTRY_PADDING_Y,
                ))
            }
            Self::TextEntry(data) => {
                let text = metrics.measure(&data.text, None);
                Some(Size::new(
                    (text.width + 2.0 * ENTRY_PADDING_X).max(ENTRY_MIN_WIDTH),
                    LINE_HEIGHT + 2.0 * ENTRY_PADDING_Y,
                ))
            }
            Self::Label(data) => Some(metrics.measure(&data.text, data.wrap_width)),
            Self::Line(data) => Some(if data.vertical {
                Size::new(data.thickness, data.length)
            } else {
                Size::new(data.length, data.thickness)
            }),
        }
    }

    /// Paint a leaf into its resolved rectangle. Containers paint nothing
    /// here; scroll chrome is emitted by the render walk, which knows the
    /// content bounds.
    pub(crate) fn paint(&self, rect: Rect, painter: &mut dyn Painter) {
        match self {
            Self::Panel
            | Self::Stack
            | Self::Row
            | Self::Grid(_)
            | Self::FillGrid(_)
            | Self::Canvas(_)
            | Self::Scroll(_) => {}
            Self::Button(data) => {
                painter.draw_button(rect, &data.label);
                offer_tooltip(painter, rect, &data.tooltip);
            }
            Self::Checkbox(data) => {
                painter.draw_checkbox(rect, &data.label, data.checked);
                offer_tooltip(painter, rect, &data.tooltip);
            }
            Self::Slider(data) => {
                painter.draw_slider(rect, data.value, data.min, data.max);
                offer_tooltip(painter, rect, &data.tooltip);
            }
            Self::Dropdown(data) => {
                painter.draw_dropdown(rect, &data.entries, data.selected);
                offer_tooltip(painter, rect, &data.tooltip);
            }
            Self::TextEntry(data) => {
                painter.draw_text_entry(rect, &data.text);
                offer_tooltip(painter, rect, &data.tooltip);
            }
            Self::Label(data) => painter.draw_label(rect, &data.text),
            Self::Line(data) => {
                let (from, to) = if data.vertical {
                    let x = rect.x + rect.width / 2.0;
                    (Point::new(x, rect.y), Point::new(x, rect.bottom()))
                } else {
                    let y = rect.y + rect.height / 2.0;
                    (Point::new(rect.x, y), Point::new(rect.right(), y))
                };
                painter.draw_line(from, to, data.thickness);
            }
        }
    }
}

fn offer_tooltip(painter: &mut dyn Painter, rect: Rect, tooltip: &Option<String>) {
    if let Some(text) = tooltip {
        painter.show_tooltip(rect, text);
    }
}
