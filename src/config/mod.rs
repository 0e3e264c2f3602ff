pub mod schema;

pub use schema::NimboConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default nimbo home directory (~/.nimbo).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".nimbo"))
        .unwrap_or_else(|| PathBuf::from(".nimbo"))
}

/// Default config file location (~/.nimbo/nimbo.toml).
pub fn default_config_path() -> PathBuf {
    default_home_dir().join("nimbo.toml")
}

/// Expand a leading `~` in a user-supplied config path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<NimboConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read nimbo config file")?;
        let config: NimboConfig =
            toml::from_str(&contents).context("Failed to parse nimbo config (TOML)")?;
        Ok(config)
    } else {
        Ok(NimboConfig::default())
    }
}
