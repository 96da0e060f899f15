//! Right panel listing selected parts per tooth

use egui::Ui;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("summary.title"));
    ui.separator();

    let summary = state.chart.selection_summary();
    if summary.is_empty() {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| ui.weak(t("summary.empty")));
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("selection_summary_scroll")
        .show(ui, |ui| {
            for (tooth, kinds) in &summary {
                let parts: Vec<&str> = kinds
                    .iter()
                    .map(|kind| match kind {
                        shared::PartKind::Crown => t("part.crown"),
                        shared::PartKind::Root => t("part.root"),
                    })
                    .collect();
                ui.horizontal(|ui| {
                    ui.strong(format!("{} {tooth}", t("part.tooth")));
                    ui.label(parts.join(", "));
                });
            }
        });

    ui.separator();
    if ui.button(t("tb.clear")).clicked() {
        state.chart.clear_selections();
    }
}
