//! Bounded per-tool history of generated links.
//!
//! The dashboard keeps the last few submissions per tool so a user can
//! replay them. The structure lives here; where it is persisted (a JSON
//! file, nothing at all) is the front end's decision.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum entries kept per tool.
pub const HISTORY_CAPACITY: usize = 10;

/// The tool a history entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Event,
    Tracking,
    Woo,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Event => "event",
            Tool::Tracking => "tracking",
            Tool::Woo => "woo",
        }
    }

    pub const ALL: [Tool; 3] = [Tool::Event, Tool::Tracking, Tool::Woo];
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "event" => Ok(Tool::Event),
            "tracking" => Ok(Tool::Tracking),
            "woo" => Ok(Tool::Woo),
            other => Err(format!(
                "Unknown tool '{}' (expected event, tracking, or woo)",
                other
            )),
        }
    }
}

/// One recorded submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    /// Short human label (event title, destination URL, store URL)
    pub label: String,
    pub timestamp: DateTime<Utc>,
    /// Full input record for the tool, kept so a submission can be replayed
    pub payload: serde_json::Value,
}

/// Recent submissions, newest first, at most [`HISTORY_CAPACITY`] per tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    event: VecDeque<HistoryEntry>,
    #[serde(default)]
    tracking: VecDeque<HistoryEntry>,
    #[serde(default)]
    woo: VecDeque<HistoryEntry>,
}

impl History {
    fn entries(&self, tool: Tool) -> &VecDeque<HistoryEntry> {
        match tool {
            Tool::Event => &self.event,
            Tool::Tracking => &self.tracking,
            Tool::Woo => &self.woo,
        }
    }

    fn entries_mut(&mut self, tool: Tool) -> &mut VecDeque<HistoryEntry> {
        match tool {
            Tool::Event => &mut self.event,
            Tool::Tracking => &mut self.tracking,
            Tool::Woo => &mut self.woo,
        }
    }

    /// Record a submission; the oldest entry falls off past capacity.
    pub fn record(&mut self, tool: Tool, label: impl Into<String>, payload: serde_json::Value) {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            label: label.into(),
            timestamp: Utc::now(),
            payload,
        };
        let entries = self.entries_mut(tool);
        entries.push_front(entry);
        entries.truncate(HISTORY_CAPACITY);
    }

    /// Recent submissions for one tool, newest first.
    pub fn recent(&self, tool: Tool) -> impl Iterator<Item = &HistoryEntry> {
        self.entries(tool).iter()
    }

    pub fn is_empty(&self, tool: Tool) -> bool {
        self.entries(tool).is_empty()
    }

    pub fn len(&self, tool: Tool) -> usize {
        self.entries(tool).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capacity_bounded_newest_first() {
        let mut history = History::default();
        for i in 0..15 {
            history.record(Tool::Event, format!("event {}", i), json!({ "i": i }));
        }

        assert_eq!(history.len(Tool::Event), HISTORY_CAPACITY);
        let labels: Vec<&str> = history
            .recent(Tool::Event)
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels[0], "event 14");
        assert_eq!(labels[9], "event 5");
    }

    #[test]
    fn test_tools_are_isolated() {
        let mut history = History::default();
        history.record(Tool::Event, "an event", json!({}));
        history.record(Tool::Woo, "a cart", json!({}));

        assert_eq!(history.len(Tool::Event), 1);
        assert_eq!(history.len(Tool::Woo), 1);
        assert!(history.is_empty(Tool::Tracking));
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let mut history = History::default();
        history.record(Tool::Tracking, "first", json!({ "n": 1 }));
        history.record(Tool::Tracking, "second", json!({ "n": 2 }));

        let serialized = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&serialized).unwrap();

        let labels: Vec<&str> = restored
            .recent(Tool::Tracking)
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels, vec!["second", "first"]);
    }

    #[test]
    fn test_tool_from_str() {
        assert_eq!("woo".parse::<Tool>().unwrap(), Tool::Woo);
        assert!("forge".parse::<Tool>().is_err());
    }
}
