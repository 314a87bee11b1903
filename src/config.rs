use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Timezone recorded on events when --timezone is not given
    #[serde(default = "default_timezone")]
    pub default_timezone: String,

    /// utm_source applied by the tracking tool when --source is not given
    #[serde(default)]
    pub default_utm_source: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_timezone: default_timezone(),
            default_utm_source: None,
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Get the config directory path (~/.config/relay)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("relay");
    Ok(config_dir)
}

/// Get the config file path (~/.config/relay/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from ~/.config/relay/config.toml; a missing file means defaults
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}
