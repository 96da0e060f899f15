use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;

/// Server settings, read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the `teeth <N> <part>.svg` files
    pub dental_dir: PathBuf,
    /// JSON file backing the default layout
    pub defaults_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let dental_dir = std::env::var("DENTAL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("dental"));
        let defaults_path = std::env::var("DEFAULTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("defaults.json"));

        Self {
            port,
            dental_dir,
            defaults_path,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
