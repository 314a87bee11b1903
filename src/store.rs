//! History persistence for the CLI.
//!
//! The whole [`History`] store round-trips through a single JSON file; every
//! successful generate command records one entry and rewrites it.

use anyhow::{Context, Result};
use relay_core::history::{History, Tool};
use std::path::PathBuf;

use crate::config;

/// Get the history file path (~/.config/relay/history.json)
pub fn history_path() -> Result<PathBuf> {
    Ok(config::config_dir()?.join("history.json"))
}

/// Load history, or an empty store when the file does not exist yet
pub fn load() -> Result<History> {
    let path = history_path()?;

    if !path.exists() {
        return Ok(History::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read history file at {}", path.display()))?;

    let history: History = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse history file at {}", path.display()))?;

    Ok(history)
}

/// Save history to ~/.config/relay/history.json
pub fn save(history: &History) -> Result<()> {
    let path = history_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(history).context("Failed to serialize history")?;

    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write history file at {}", path.display()))?;

    Ok(())
}

/// Record one submission and persist the store
pub fn record(tool: Tool, label: &str, payload: serde_json::Value) -> Result<()> {
    let mut history = load()?;
    history.record(tool, label, payload);
    save(&history)
}
