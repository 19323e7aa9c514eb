//! Error types for the scenario framework.

use thiserror::Error;

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur when running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A node name was never declared.
    #[error("unknown node '{name}'")]
    UnknownNode { name: String },

    /// A pin path did not resolve.
    #[error("unknown pin '{path}'")]
    UnknownPin { path: String },

    /// A node name was declared twice.
    #[error("node '{name}' declared twice")]
    DuplicateNode { name: String },

    /// A step could not be run.
    #[error("step '{step}' failed: {message}")]
    StepExecution { step: String, message: String },

    /// Assertion failed.
    #[error("assertion failed for step '{step}': {message}")]
    AssertionFailed { step: String, message: String },
}

impl ScenarioError {
    pub fn unknown_node(name: impl Into<String>) -> Self {
        Self::UnknownNode { name: name.into() }
    }

    pub fn unknown_pin(path: impl Into<String>) -> Self {
        Self::UnknownPin { path: path.into() }
    }

    pub fn duplicate_node(name: impl Into<String>) -> Self {
        Self::DuplicateNode { name: name.into() }
    }

    pub fn step_execution(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepExecution {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }
}
