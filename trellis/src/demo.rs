//! Demo tree: a settings form inside a scrollable viewport.
//!
//! Exercises every widget kind and both grid flavors; useful as living
//! documentation and as an integration fixture.

use crate::Result;
use crate::layout::{ElementId, UiTree};
use crate::options::UiOptions;
use crate::primitives::Rect;
use crate::scroll::ScrollState;

/// Build the demo tree. Returns the tree and the scroll container to
/// render from; scroll position lives in the caller's `state`.
pub fn build_demo(state: &ScrollState) -> Result<(UiTree, ElementId)> {
    let mut ui = UiTree::new(UiOptions::default());
    let view = ui.scroll_container_shared(Rect::new(0.0, 0.0, 600.0, 440.0), state.shared());

    let form = ui.stack();
    ui.set_position(form, 10.0, 10.0);
    ui.add_child(view, form);

    let title = ui.label("Render settings");
    ui.add_child(form, title);
    let divider = ui.line(260.0, 1.0, false);
    ui.add_child(form, divider);

    let vsync = ui.checkbox("Vertical sync", true);
    ui.set_tooltip(vsync, Some("Present in step with the display".into()))?;
    ui.add_child(form, vsync);

    let gamma_row = ui.row();
    let gamma_label = ui.label("Gamma");
    let gamma = ui.slider(2.2, 1.0, 3.0);
    ui.add_child(gamma_row, gamma_label);
    ui.add_child(gamma_row, gamma);
    ui.add_child(form, gamma_row);

    let quality = ui.dropdown(
        vec!["Low".into(), "Medium".into(), "High".into(), "Ultra".into()],
        2,
    );
    ui.add_child(form, quality);

    let profile = ui.text_entry("default");
    ui.set_tooltip(profile, Some("Profile name".into()))?;
    ui.add_child(form, profile);

    // Action buttons ride in a fill grid pinned under the form, so they
    // share the viewport width evenly.
    let actions = ui.fill_grid(3)?;
    ui.set_grid_padding(actions, 4.0)?;
    ui.set_grid_spacing(actions, 8.0, 8.0)?;
    ui.set_position(actions, 10.0, 340.0);
    ui.add_child(view, actions);
    for label in ["Apply", "Revert", "Save"] {
        let button = ui.button(label);
        ui.add_child(actions, button);
    }

    Ok((ui, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCall, RecordingPainter};

    #[test]
    fn demo_renders_every_widget_kind() {
        let state = ScrollState::new();
        let (ui, view) = build_demo(&state).unwrap();

        let mut painter = RecordingPainter::new();
        ui.render(view, &mut painter);

        assert_eq!(painter.clip_depth(), 0);
        let buttons = painter
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Button { .. }))
            .count();
        assert_eq!(buttons, 3);
        assert!(painter.calls.iter().any(|c| matches!(c, DrawCall::Checkbox { .. })));
        assert!(painter.calls.iter().any(|c| matches!(c, DrawCall::Slider { .. })));
        assert!(painter.calls.iter().any(|c| matches!(c, DrawCall::Dropdown { .. })));
        assert!(painter.calls.iter().any(|c| matches!(c, DrawCall::TextEntry { .. })));
        assert!(painter.calls.iter().any(|c| matches!(c, DrawCall::Line { .. })));
        let tooltips = painter
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Tooltip { .. }))
            .count();
        assert_eq!(tooltips, 2);
    }

    #[test]
    fn demo_buttons_land_in_fill_grid_cells() {
        let state = ScrollState::new();
        let (ui, view) = build_demo(&state).unwrap();

        let mut painter = RecordingPainter::new();
        ui.render(view, &mut painter);

        // Cell width (600 - 2*4 - 2*8) / 3 = 192; the first button sits at
        // the grid origin plus padding.
        let apply = painter
            .calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Button { rect, label } if label == "Apply" => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(apply.x, 14.0);
        assert_eq!(apply.y, 344.0);

        let revert = painter
            .calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Button { rect, label } if label == "Revert" => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(revert.x, 14.0 + 192.0 + 8.0);
    }

    #[test]
    fn demo_scroll_sync_is_stable() {
        let state = ScrollState::new();
        let (ui, view) = build_demo(&state).unwrap();

        let mut painter = RecordingPainter::new();
        ui.render(view, &mut painter);
        state.sync_from_tree(&ui, view);
        let first = state.max.get();

        painter.clear();
        ui.render(view, &mut painter);
        state.sync_from_tree(&ui, view);
        assert_eq!(state.max.get(), first);
    }
}
