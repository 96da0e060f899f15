//! Aggregate chart maps owned by the coordinator, plus client settings

pub mod layout;
pub mod missing;
pub mod notices;
pub mod selection;
pub mod settings;

pub use layout::LayoutState;
pub use missing::MissingState;
pub use notices::{Notice, NoticeLog};
pub use selection::SelectionState;
pub use settings::{ChartSettings, UiSettings};

use crate::backend::{ApiResult, HttpBackend};
use crate::chart::ChartCoordinator;

/// Panel visibility flags
pub struct PanelVisibility {
    pub summary: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { summary: true }
    }
}

/// Combined application state
pub struct AppState {
    pub chart: ChartCoordinator<HttpBackend>,
    pub settings: ChartSettings,
    pub panels: PanelVisibility,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    /// Connect to the configured server and start loading the chart
    pub fn connect(settings: ChartSettings, ctx: &egui::Context) -> ApiResult<Self> {
        let backend = HttpBackend::new(settings.server_url.clone())?.with_repaint(ctx.clone());
        tracing::info!("Chart server: {}", backend.base_url());
        Ok(Self {
            chart: ChartCoordinator::new(backend),
            settings,
            panels: PanelVisibility::default(),
            show_settings_window: false,
        })
    }
}
