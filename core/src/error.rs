//! Common error types for Plexus.

use crate::{NodeGuid, PinGuid};
use thiserror::Error;

/// Errors raised by the core data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeGuid),

    /// Pin not found on a node.
    #[error("Pin not found: {pin} on node {node}")]
    PinNotFound { node: NodeGuid, pin: PinGuid },

    /// A memento could not be produced.
    #[error("Memento encode failed: {message}")]
    Encode { message: String },

    /// A memento could not be read back.
    #[error("Memento decode failed: {message}")]
    Decode { message: String },

    /// Undo data did not contain the named entry.
    #[error("Missing undo entry: {name}")]
    MissingEntry { name: String },
}

impl CoreError {
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn missing_entry(name: impl Into<String>) -> Self {
        Self::MissingEntry { name: name.into() }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
