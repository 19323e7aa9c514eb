//! Configuration for sessions and their history

use serde::Deserialize;

use crate::error::{ActionError, ActionResult};

/// Configuration for the action history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of records kept, sentinels included
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

impl HistoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Configuration for a session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub history: HistoryConfig,
    /// Append recorded actions to the history
    pub record_history: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            record_history: true,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }

    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ActionResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ActionError::invalid_config(e.to_string()))?;
        if config.history.capacity == 0 {
            return Err(ActionError::invalid_config("history capacity must be at least 1"));
        }
        Ok(config)
    }
}
