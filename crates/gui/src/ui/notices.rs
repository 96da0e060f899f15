//! Outcome toasts and the promote-failure fallback window

use std::time::{Duration, Instant};

use egui::{Color32, Context};

use crate::i18n::t;
use crate::state::{AppState, Notice};

pub fn show(ctx: &Context, state: &mut AppState) {
    state.chart.expire_notices(Instant::now());
    if state.chart.notices().has_expiring() {
        ctx.request_repaint_after(Duration::from_millis(500));
    }

    let notices: Vec<(u64, Notice)> = state
        .chart
        .notices()
        .iter()
        .map(|(id, n)| (id, n.clone()))
        .collect();
    if notices.is_empty() {
        return;
    }

    let mut dismissed = Vec::new();

    egui::Area::new(egui::Id::new("notice_toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -32.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (id, notice) in &notices {
                if matches!(notice, Notice::PromoteFailed { .. }) {
                    continue;
                }
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.horizontal(|ui| {
                        let color = if notice.is_error() {
                            Color32::from_rgb(0xDC, 0x26, 0x26)
                        } else {
                            Color32::from_rgb(0x05, 0x96, 0x69)
                        };
                        ui.colored_label(color, toast_text(notice));
                        if ui.small_button("✕").on_hover_text(t("notice.dismiss")).clicked() {
                            dismissed.push(*id);
                        }
                    });
                });
            }
        });

    for (id, notice) in &notices {
        if let Notice::PromoteFailed {
            error,
            positions_json,
            transforms_json,
        } = notice
        {
            if !promote_failed_window(ctx, *id, error, positions_json, transforms_json) {
                dismissed.push(*id);
            }
        }
    }

    for id in dismissed {
        state.chart.dismiss_notice(id);
    }
}

fn toast_text(notice: &Notice) -> String {
    match notice {
        Notice::Saved => t("notice.saved").to_string(),
        Notice::SaveFailed(error) => format!("{}: {}", t("notice.save_failed"), error.user_message()),
        Notice::DefaultsUpdated => t("notice.defaults_updated").to_string(),
        Notice::PromoteFailed { error, .. } => {
            format!("{}: {}", t("notice.promote_failed"), error.user_message())
        }
        Notice::LoadFailed { what, error } => {
            format!("{} {what}: {}", t("notice.load_failed"), error.user_message())
        }
    }
}

/// Returns false once the user closes the window
fn promote_failed_window(
    ctx: &Context,
    id: u64,
    error: &crate::backend::ApiError,
    positions_json: &str,
    transforms_json: &str,
) -> bool {
    let mut open = true;
    egui::Window::new(t("promote.title"))
        .id(egui::Id::new(("promote_failed", id)))
        .open(&mut open)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.colored_label(Color32::from_rgb(0xDC, 0x26, 0x26), error.user_message());
            ui.label(t("promote.help"));
            json_block(ui, id, t("promote.positions"), positions_json, "default-positions.json");
            json_block(ui, id, t("promote.transforms"), transforms_json, "default-transforms.json");
        });
    open
}

fn json_block(ui: &mut egui::Ui, id: u64, title: &str, json: &str, file_name: &str) {
    ui.separator();
    ui.horizontal(|ui| {
        ui.strong(title);
        if ui.small_button(t("promote.copy")).clicked() {
            ui.ctx().copy_text(json.to_string());
        }
        if ui.small_button(t("promote.save_file")).clicked() {
            save_json(json, file_name);
        }
    });
    egui::ScrollArea::vertical()
        .id_salt(("promote_json", id, file_name))
        .max_height(140.0)
        .show(ui, |ui| {
            let mut text = json;
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
}

fn save_json(json: &str, file_name: &str) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_file_name(file_name)
        .save_file()
    else {
        return;
    };
    if let Err(e) = std::fs::write(&path, json) {
        tracing::error!("Failed to write {}: {e}", path.display());
    }
}
