//! Configuration management: defaults, validation, loading from environment.

pub mod app_config;
pub mod defaults;
pub mod validation;

use std::path::PathBuf;

pub use app_config::AppConfig;

/// Default data directory: `~/.bump-calculator`, or the working directory
/// when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bump-calculator")
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}
