//! Action error types.
//!
//! These never cross the action boundary: built-in actions log them and report
//! `ActionOutcome::Failed`.

use plexus_core::{CoreError, NodeGuid};
use thiserror::Error;

/// Result type for action internals.
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors that can occur inside an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeGuid),

    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Undo data error: {0}")]
    UndoData(#[from] CoreError),
}

impl ActionError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
