//! Constraint-based layout.
//!
//! Every element resolves each axis independently through a [`SizeMode`];
//! containers arrange children and aggregate their extents. Everything
//! hangs off [`UiTree`], which owns the element arena.

// Sizing modes and alignment
pub mod mode;

// The element arena and sizing engine
pub mod tree;

// Widget kinds and their payloads
pub mod widgets;

// Container behavior
mod canvas;
mod containers;
mod element;

// Re-export core types
pub use mode::{Alignment, SizeMode};
pub use tree::{ElementId, UiTree};
pub use widgets::WidgetKind;
