use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use relay_core::history::{History, HistoryEntry, Tool};

/// Shared application state: the history store and where it is persisted.
///
/// The server and the CLI share one file, so links generated through either
/// front end show up in the same recent list.
#[derive(Clone)]
pub struct AppState {
    history: Arc<Mutex<History>>,
    path: PathBuf,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let path = history_path()?;
        let history = load_history(&path)?;
        Ok(AppState {
            history: Arc::new(Mutex::new(history)),
            path,
        })
    }

    /// Record one submission and persist the store.
    pub fn record(&self, tool: Tool, label: &str, payload: serde_json::Value) -> Result<()> {
        let mut history = self.history.lock().unwrap();
        history.record(tool, label, payload);
        save_history(&self.path, &history)
    }

    /// Recent submissions for one tool, newest first.
    pub fn recent(&self, tool: Tool) -> Vec<HistoryEntry> {
        self.history.lock().unwrap().recent(tool).cloned().collect()
    }

    /// A snapshot of the whole store.
    pub fn snapshot(&self) -> History {
        self.history.lock().unwrap().clone()
    }
}

/// Get the history file path (~/.config/relay/history.json)
fn history_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("relay");
    Ok(dir.join("history.json"))
}

fn load_history(path: &Path) -> Result<History> {
    if !path.exists() {
        return Ok(History::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file at {}", path.display()))?;

    let history: History = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse history file at {}", path.display()))?;

    Ok(history)
}

fn save_history(path: &Path, history: &History) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(history).context("Failed to serialize history")?;

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write history file at {}", path.display()))?;

    Ok(())
}
