//! Trellis: Declarative Widget Layout Engine
//!
//! Trellis keeps a retained tree of UI elements over an immediate-mode
//! paint surface and resolves every element's geometry from three
//! per-axis sizing modes:
//! - Fixed: explicit dimensions stored by the caller
//! - Content: derived from text or children, cached until invalidated
//! - Fill: follows the parent (or the enclosing grid cell) on each read
//!
//! # Architecture
//!
//! The core primitive is [`UiTree`], an arena of elements addressed by
//! [`ElementId`]. Size queries resolve lazily and cache per axis;
//! mutations invalidate upward through Content-sized ancestors, and a
//! re-entry guard keeps mutual Fill/Content dependencies finite.
//! Rendering hands each leaf's final rectangle to a [`Painter`], which
//! bridges to the host's widget calls.
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{Rect, ScrollState, UiOptions, UiTree};
//!
//! let mut ui = UiTree::new(UiOptions::default());
//! let state = ScrollState::new();
//! let view = ui.scroll_container_shared(Rect::new(0.0, 0.0, 640.0, 480.0), state.shared());
//!
//! let form = ui.stack();
//! ui.add_child(view, form);
//! let name = ui.text_entry("");
//! ui.add_child(form, name);
//!
//! // Each frame, with a painter backed by the host toolkit:
//! ui.render(view, &mut painter);
//! state.sync_from_tree(&ui, view);
//! ```

// Geometry primitives
pub mod primitives;

// Layout system (sizing modes, element tree, containers)
pub mod layout;

// Text measurement
pub mod metrics;

// Paint surface
pub mod paint;

// State helpers
pub mod scroll;

// Configuration
pub mod options;

// Errors
pub mod error;

// Demo tree
pub mod demo;

// Re-export core types
pub use error::{LayoutError, Result};
pub use layout::{Alignment, ElementId, SizeMode, UiTree, WidgetKind};
pub use metrics::{CHAR_WIDTH, LINE_HEIGHT, MonoMetrics, TextMetrics};
pub use options::UiOptions;
pub use paint::{DrawCall, Painter, RecordingPainter, Response};
pub use primitives::{Point, Rect, Size};
pub use scroll::{ScrollState, SharedOffset};
