pub mod schema;

pub use schema::{ApiConfig, ClustoryConfig, ExportConfig, PollingConfig, ThemeConfig, WindowConfig};

use clustory_core::{ClustoryError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `ClustoryConfig::default()`
/// if the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<ClustoryConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(ClustoryConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| ClustoryError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config: ClustoryConfig =
        toml::from_str(&raw).map_err(|e| ClustoryError::Config(format!("TOML parse error: {e}")))?;

    if config.api.base_url.trim().is_empty() {
        return Err(ClustoryError::Config("api.base_url must not be empty".into()));
    }

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clustory").join("clustory.toml")
}
