//! Paint surface.
//!
//! The layout core never draws anything itself. Each render pass hands the
//! final resolved rectangle of every leaf to a [`Painter`], which bridges to
//! the host's immediate-mode widget API. Interaction state (clicked, value
//! changed) flows back through [`Response`] values; the layout engine
//! ignores them, hosts read them off their own painter.
//!
//! [`RecordingPainter`] is the built-in headless implementation: it records
//! every call as a [`DrawCall`] for tests and tooling.

use crate::primitives::{Point, Rect};

/// Interaction result of painting one interactive widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The widget was clicked this pass.
    pub clicked: bool,
    /// The widget's value changed this pass.
    pub changed: bool,
}

/// Host-side drawing surface invoked once per leaf per render pass.
pub trait Painter {
    /// Fill a rectangle. Used for container chrome such as scrollbars.
    fn draw_rect(&mut self, rect: Rect);

    /// Stroke a line segment.
    fn draw_line(&mut self, from: Point, to: Point, thickness: f32);

    fn draw_button(&mut self, rect: Rect, label: &str) -> Response;

    fn draw_checkbox(&mut self, rect: Rect, label: &str, checked: bool) -> Response;

    fn draw_slider(&mut self, rect: Rect, value: f32, min: f32, max: f32) -> Response;

    fn draw_dropdown(&mut self, rect: Rect, entries: &[String], selected: usize) -> Response;

    fn draw_text_entry(&mut self, rect: Rect, text: &str) -> Response;

    fn draw_label(&mut self, rect: Rect, text: &str);

    /// Offer a tooltip for the widget occupying `rect`. Hosts decide
    /// whether hover state warrants showing it.
    fn show_tooltip(&mut self, rect: Rect, text: &str);

    /// Restrict subsequent drawing to `rect` until the matching
    /// [`pop_clip`](Painter::pop_clip).
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);
}

/// One recorded [`Painter`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect(Rect),
    Line { from: Point, to: Point, thickness: f32 },
    Button { rect: Rect, label: String },
    Checkbox { rect: Rect, label: String, checked: bool },
    Slider { rect: Rect, value: f32, min: f32, max: f32 },
    Dropdown { rect: Rect, entries: Vec<String>, selected: usize },
    TextEntry { rect: Rect, text: String },
    Label { rect: Rect, text: String },
    Tooltip { rect: Rect, text: String },
    PushClip(Rect),
    PopClip,
}

/// Painter that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Current clip nesting depth; zero once every push has been popped.
    pub fn clip_depth(&self) -> usize {
        let mut depth = 0usize;
        for call in &self.calls {
            match call {
                DrawCall::PushClip(_) => depth += 1,
                DrawCall::PopClip => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        depth
    }
}

impl Painter for RecordingPainter {
    fn draw_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::Rect(rect));
    }

    fn draw_line(&mut self, from: Point, to: Point, thickness: f32) {
        self.calls.push(DrawCall::Line { from, to, thickness });
    }

    fn draw_button(&mut self, rect: Rect, label: &str) -> Response {
        self.calls.push(DrawCall::Button {
            rect,
            label: label.to_string(),
        });
        Response::default()
    }

    fn draw_checkbox(&mut self, rect: Rect, label: &str, checked: bool) -> Response {
        self.calls.push(DrawCall::Checkbox {
            rect,
            label: label.to_string(),
            checked,
        });
        Response::default()
    }

    fn draw_slider(&mut self, rect: Rect, value: f32, min: f32, max: f32) -> Response {
        self.calls.push(DrawCall::Slider { rect, value, min, max });
        Response::default()
    }

    fn draw_dropdown(&mut self, rect: Rect, entries: &[String], selected: usize) -> Response {
        self.calls.push(DrawCall::Dropdown {
            rect,
            entries: entries.to_vec(),
            selected,
        });
        Response::default()
    }

    fn draw_text_entry(&mut self, rect: Rect, text: &str) -> Response {
        self.calls.push(DrawCall::TextEntry {
            rect,
            text: text.to_string(),
        });
        Response::default()
    }

    fn draw_label(&mut self, rect: Rect, text: &str) {
        self.calls.push(DrawCall::Label {
            rect,
            text: text.to_string(),
        });
    }

    fn show_tooltip(&mut self, rect: Rect, text: &str) {
        self.calls.push(DrawCall::Tooltip {
            rect,
            text: text.to_string(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.calls.push(DrawCall::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.calls.push(DrawCall::PopClip);
    }
}
