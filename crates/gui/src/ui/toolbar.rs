//! Toolbar actions and UI

use egui::Ui;

use crate::i18n::t;
use crate::interaction::ChartMode;
use crate::state::AppState;

/// Reset / set-as-default entries, shared by the overflow and chart menus
pub fn layout_actions(ui: &mut Ui, state: &mut AppState) {
    let ready = !state.chart.is_loading();
    if ui
        .add_enabled(ready, egui::Button::new(t("menu.reset_positions")))
        .clicked()
    {
        state.chart.reset_positions();
        ui.close_menu();
    }
    if ui
        .add_enabled(ready && !state.chart.is_promoting(), egui::Button::new(t("menu.set_default")))
        .clicked()
    {
        state.chart.promote_current_to_default();
        ui.close_menu();
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let manipulate = state.chart.mode() == ChartMode::Manipulate;
        let label = if manipulate { t("mode.manipulate") } else { t("mode.select") };
        if ui
            .selectable_label(manipulate, format!("{}: {label}", t("tb.mode")))
            .on_hover_text(t("menu.toggle_mode"))
            .clicked()
        {
            state.chart.toggle_mode();
        }

        ui.separator();

        let ready = !state.chart.is_loading();
        if ui
            .add_enabled(ready && !state.chart.is_saving(), egui::Button::new(t("tb.save")))
            .on_hover_text(t("menu.save"))
            .clicked()
        {
            state.chart.save_all();
        }
        let any_selected = state.chart.selection().selected_count() > 0;
        if ui
            .add_enabled(any_selected, egui::Button::new(t("tb.clear")))
            .on_hover_text(t("menu.clear_selections"))
            .clicked()
        {
            state.chart.clear_selections();
        }

        ui.separator();

        ui.menu_button("⋯", |ui| {
            if ui.button(t("menu.toggle_mode")).clicked() {
                state.chart.toggle_mode();
                ui.close_menu();
            }
            layout_actions(ui, state);
        })
        .response
        .on_hover_text(t("tb.more_tip"));
    });
}
