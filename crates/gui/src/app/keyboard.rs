//! Keyboard shortcut handling

use eframe::egui;

use crate::interaction::PartEvent;
use crate::state::AppState;

/// Degrees per Q/E press
const ROTATE_STEP: f64 = 15.0;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.wants_keyboard_input() {
        return;
    }

    let (toggle, clear, save, rotate) = ctx.input(|i| {
        let rotate = if i.key_pressed(egui::Key::Q) && !i.modifiers.command {
            Some(-ROTATE_STEP)
        } else if i.key_pressed(egui::Key::E) && !i.modifiers.command {
            Some(ROTATE_STEP)
        } else {
            None
        };
        (
            // M: toggle select/manipulate
            i.key_pressed(egui::Key::M) && !i.modifiers.command,
            // Escape: clear selections
            i.key_pressed(egui::Key::Escape),
            // Ctrl+S: save
            i.modifiers.command && i.key_pressed(egui::Key::S),
            rotate,
        )
    });

    if toggle {
        state.chart.toggle_mode();
    }
    if clear {
        state.chart.clear_selections();
    }
    if save {
        state.chart.save_all();
    }
    // Q/E rotate the part under the pointer
    if let Some(degrees) = rotate {
        if let Some(key) = state.chart.hovered_part() {
            state.chart.handle_part_event(key, PartEvent::Rotate(degrees));
        }
    }
}
