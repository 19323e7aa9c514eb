//! Built-in graph actions.
//!
//! Each action keeps its fallible work in a helper returning [`ActionResult`] and maps it
//! onto the tri-state outcome with [`finish`], so errors stop at the action boundary as a
//! log line.

mod connect_pins;
mod create_node;
mod delete_node;
mod disconnect_pins;
mod move_nodes;
mod pins_edit_proxy;

pub use connect_pins::{ConnectPins, ConnectPinsPayload};
pub use create_node::{CreateNode, CreateNodePayload};
pub use delete_node::DeleteNode;
pub use disconnect_pins::DisconnectPins;
pub use move_nodes::{MoveNodes, MoveNodesPayload};
pub use pins_edit_proxy::PinsEditProxy;

use crate::action::ActionOutcome;
use crate::error::ActionResult;

/// Undo data entry holding connection mementos taken before the edit.
pub(crate) const LINKS_BEFORE: &str = "links_before";
/// Undo data entry holding connection mementos taken after the edit.
pub(crate) const LINKS_AFTER: &str = "links_after";

pub(crate) fn finish(action: &'static str, result: ActionResult<ActionOutcome>) -> ActionOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(action, error = %err, "action failed");
            ActionOutcome::Failed
        }
    }
}

/// Undo helper: log and report a failed restore.
pub(crate) fn undone(action: &'static str, result: ActionResult<bool>) -> bool {
    match result {
        Ok(done) => done,
        Err(err) => {
            tracing::warn!(action, error = %err, "cannot read undo data");
            false
        }
    }
}
