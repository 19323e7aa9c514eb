//! Plexus Action
//!
//! Undoable commands over a graph.
//!
//! Responsibilities:
//! - Dispatch actions to their graph, node or pin target (`GraphAction`)
//! - Track nested invocations in an explicit context so only the outermost loggable one
//!   is recorded (`ActionContext`)
//! - Keep a bounded undo/redo history with grouped steps (`ActionHistory`)
//! - Provide the built-in editing actions (`ops`)
//! - Own a graph and its history behind one facade (`Session`)

mod action;
mod config;
mod context;
mod error;
mod history;
pub mod ops;
mod record;
mod session;

pub use action::{ActionArgs, ActionOutcome, ActionTarget, Activation, ExecFlags, GraphAction};
pub use config::{HistoryConfig, SessionConfig};
pub use context::ActionContext;
pub use error::{ActionError, ActionResult};
pub use history::ActionHistory;
pub use record::{ActionRecord, RecordKind};
pub use session::{MultiUndoScope, Session};
