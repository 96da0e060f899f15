use egui::Ui;

use crate::i18n::t;
use crate::interaction::ChartMode;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;
    ui.horizontal(|ui| {
        let (mode, color) = match chart.mode() {
            ChartMode::Select => (t("mode.select"), egui::Color32::from_rgb(0x3B, 0x82, 0xF6)),
            ChartMode::Manipulate => (t("mode.manipulate"), egui::Color32::from_rgb(0xD9, 0x77, 0x06)),
        };
        ui.colored_label(color, format!("{}: {mode}", t("tb.mode")));
        ui.separator();

        if chart.is_loading() {
            ui.spinner();
            ui.weak(t("status.loading"));
            return;
        }

        let sel = chart.selection().selected_count();
        if sel > 0 {
            ui.label(format!("{}: {sel}", t("status.selected")));
        } else {
            ui.weak(t("status.ready"));
        }

        let modified = chart.layout().modified_parts();
        if modified > 0 {
            ui.separator();
            ui.weak(format!("{}: {modified}", t("status.modified")));
        }

        if chart.is_saving() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(0x25, 0x63, 0xEB), t("status.saving"));
        }
        if chart.is_promoting() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(0x05, 0x96, 0x69), t("status.promoting"));
        }
    });
}
