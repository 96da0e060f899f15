//! Tooth-level menu: mark parts missing or restore them

use egui::Ui;
use shared::{MissingFlag, ToothId};

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState, tooth: ToothId) {
    let current = state.chart.missing(tooth);
    if current != MissingFlag::None {
        ui.weak(format!("{}: {}", t("missing.badge"), current.as_str()));
        ui.separator();
    }
    for &flag in current.menu_options() {
        if ui.button(t(option_key(flag))).clicked() {
            state.chart.set_missing(tooth, flag);
            ui.close_menu();
        }
    }
}

fn option_key(flag: MissingFlag) -> &'static str {
    match flag {
        MissingFlag::None => "missing.none",
        MissingFlag::Crown => "missing.crown",
        MissingFlag::Root => "missing.root",
        MissingFlag::Entire => "missing.entire",
    }
}
