//! Application menu bar and settings window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::{AppState, ChartSettings};
use crate::ui::toolbar;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.save")).clicked() {
            state.chart.save_all();
            ui.close_menu();
        }
        if ui.button(t("menu.export_layout")).clicked() {
            ui.close_menu();
            export_layout(state);
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Write the working positions/transforms to a JSON file
fn export_layout(state: &AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.export_title"))
        .add_filter("JSON", &["json"])
        .set_file_name("layout.json")
        .save_file()
    else {
        return;
    };
    match serde_json::to_string_pretty(&state.chart.layout().snapshot()) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                tracing::error!("Failed to write layout: {e}");
            } else {
                tracing::info!("Exported layout to {}", path.display());
            }
        }
        Err(e) => tracing::error!("Failed to serialize layout: {e}"),
    }
}

/// Show the chart menu
pub fn chart_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.chart"), |ui| {
        if ui.button(t("menu.toggle_mode")).clicked() {
            state.chart.toggle_mode();
            ui.close_menu();
        }
        if ui.button(t("menu.clear_selections")).clicked() {
            state.chart.clear_selections();
            ui.close_menu();
        }
        ui.separator();
        toolbar::layout_actions(ui, state);
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.summary, t("menu.summary"));
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for l in Lang::all() {
                if ui.selectable_label(lang() == *l, l.native_name()).clicked() {
                    set_lang(*l);
                    state.settings.ui.language = *l;
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(false)
        .default_width(360.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(t("settings.server"));
                ui.text_edit_singleline(&mut state.settings.server_url);
            });
            ui.weak(t("settings.restart"));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label(t("settings.font_size"));
                ui.add(
                    egui::DragValue::new(&mut state.settings.ui.font_size)
                        .speed(0.5)
                        .range(8.0..=24.0)
                        .suffix(" pt"),
                );
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button(t("settings.reset")).clicked() {
                    state.settings = ChartSettings::default();
                    set_lang(state.settings.ui.language);
                }
                if ui.button(t("settings.close")).clicked() {
                    state.settings.save();
                    state.show_settings_window = false;
                }
            });
        });
    // Closing via the title bar also saves
    if state.show_settings_window && !open {
        state.settings.save();
    }
    state.show_settings_window = open && state.show_settings_window;
}
