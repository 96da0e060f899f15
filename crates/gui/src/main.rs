mod app;
mod ui;

// Re-export library modules so that `crate::chart`, `crate::state`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use dental_gui_lib::artwork;
pub use dental_gui_lib::backend;
pub use dental_gui_lib::chart;
pub use dental_gui_lib::i18n;
pub use dental_gui_lib::interaction;
pub use dental_gui_lib::state;

use app::DentalApp;
use state::ChartSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dental_gui=info,dental_gui_lib=info".into()),
        )
        .init();

    let mut settings = ChartSettings::load();
    // --server <url> overrides the saved server for this run
    if let Some(url) = parse_server_arg() {
        tracing::info!("Using server from command line: {url}");
        settings.server_url = url;
    }
    i18n::set_lang(settings.ui.language);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dental Chart")
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([960.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "dental-gui",
        native_options,
        Box::new(move |cc| {
            let app = DentalApp::new(cc, settings)?;
            Ok(Box::new(app))
        }),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_server_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--server" && i + 1 < args.len() {
            let url = args[i + 1].trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                return Some(url.to_string());
            }
            tracing::error!("Ignoring --server {url}: expected an http(s) URL");
            break;
        }
        i += 1;
    }
    None
}
