//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::state::{AppState, ChartSettings};
use crate::ui::chart_view::ChartView;
use crate::ui::{notices, selection_summary, status_bar, toolbar};

/// Main application
pub struct DentalApp {
    state: AppState,
    chart_view: ChartView,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl DentalApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: ChartSettings,
    ) -> Result<Self, crate::backend::ApiError> {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);

        let last_font_size = settings.ui.font_size;
        let state = AppState::connect(settings, &cc.egui_ctx)?;

        Ok(Self {
            state,
            chart_view: ChartView::default(),
            last_font_size,
        })
    }
}

impl eframe::App for DentalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        self.state.chart.poll();

        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::chart_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Right panel: current selections ──────────────────
        if self.state.panels.summary {
            egui::SidePanel::right("selection_summary")
                .default_width(220.0)
                .width_range(160.0..=360.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    selection_summary::show(ui, &mut self.state);
                });
        }

        // ── Notices and the promote fallback window ──────────
        notices::show(ctx, &mut self.state);

        // ── Central panel: the chart ─────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_view.show(ui, &mut self.state);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.settings.save();
    }
}
