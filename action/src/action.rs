//! The command interface.

use bitflags::bitflags;
use plexus_core::{NodeGuid, PinReference, UndoData};
use plexus_graph::Graph;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::context::ActionContext;
use crate::error::{ActionError, ActionResult};

/// Result of executing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action does not apply to this target at all.
    Invalid,
    /// The action applied but did not succeed.
    Failed,
    /// The action succeeded. Only this outcome can be recorded.
    Handled,
}

impl ActionOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, ActionOutcome::Handled)
    }
}

/// What an action is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTarget {
    Graph,
    Node(NodeGuid),
    Pin(PinReference),
}

impl ActionTarget {
    pub fn node(&self) -> Option<NodeGuid> {
        match self {
            ActionTarget::Graph => None,
            ActionTarget::Node(node) => Some(*node),
            ActionTarget::Pin(pin) => Some(pin.node),
        }
    }
}

bitflags! {
    /// Flags passed along with an invocation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExecFlags: u8 {
        /// The invocation replays a recorded action.
        const IS_REDO = 0b001;
        /// Never record this invocation.
        const DISALLOW_RECORD = 0b010;
        /// Record even if the action cannot undo on its own.
        const FORCE_RECORD = 0b100;
    }
}

/// What triggered an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Manual,
    /// A named input binding (key chord, menu entry, ...).
    Input(String),
    /// Replayed by the history.
    Redo,
}

/// Arguments of one invocation, kept verbatim in history records.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionArgs {
    pub target: ActionTarget,
    pub activation: Activation,
    /// Optional context object.
    pub payload: Option<serde_json::Value>,
    pub flags: ExecFlags,
}

impl ActionArgs {
    pub fn new(target: ActionTarget) -> Self {
        Self {
            target,
            activation: Activation::Manual,
            payload: None,
            flags: ExecFlags::empty(),
        }
    }

    pub fn graph() -> Self {
        Self::new(ActionTarget::Graph)
    }

    pub fn node(node: NodeGuid) -> Self {
        Self::new(ActionTarget::Node(node))
    }

    pub fn pin(pin: PinReference) -> Self {
        Self::new(ActionTarget::Pin(pin))
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_flags(mut self, flags: ExecFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_redo(&self) -> bool {
        self.flags.contains(ExecFlags::IS_REDO)
    }

    /// Copy of these arguments marked as a replay.
    pub fn for_redo(&self) -> Self {
        let mut args = self.clone();
        args.activation = Activation::Redo;
        args.flags |= ExecFlags::IS_REDO;
        args
    }

    /// Decode the payload.
    pub fn payload_as<T: DeserializeOwned>(&self) -> ActionResult<T> {
        let payload = self
            .payload
            .as_ref()
            .ok_or_else(|| ActionError::invalid_payload("missing payload"))?;
        serde_json::from_value(payload.clone())
            .map_err(|e| ActionError::invalid_payload(e.to_string()))
    }
}

/// A command executed against a graph, a node, or a pin.
///
/// Implementors override the `execute_on_*` methods for the targets they support; the
/// others report [`ActionOutcome::Invalid`]. When [`ActionContext::is_undoable`] is true
/// the action should capture what it needs into `undo`.
pub trait GraphAction: Debug + Send + Sync {
    /// Stable kind name, used in logs.
    fn name(&self) -> &'static str;

    fn description(&self, _target: &ActionTarget) -> String {
        self.name().to_string()
    }

    fn can_execute(&self, _graph: &Graph, _target: &ActionTarget) -> bool {
        true
    }

    fn can_undo(&self, _graph: &Graph, _target: &ActionTarget) -> bool {
        false
    }

    fn execute_on_graph(
        &self,
        _ctx: &mut ActionContext<'_>,
        _args: &ActionArgs,
        _undo: &mut UndoData,
    ) -> ActionOutcome {
        ActionOutcome::Invalid
    }

    fn execute_on_node(
        &self,
        _ctx: &mut ActionContext<'_>,
        _node: NodeGuid,
        _args: &ActionArgs,
        _undo: &mut UndoData,
    ) -> ActionOutcome {
        ActionOutcome::Invalid
    }

    fn execute_on_pin(
        &self,
        _ctx: &mut ActionContext<'_>,
        _pin: PinReference,
        _args: &ActionArgs,
        _undo: &mut UndoData,
    ) -> ActionOutcome {
        ActionOutcome::Invalid
    }

    /// Reverse a recorded execution from its undo data. Never re-runs forward logic.
    fn undo(&self, _graph: &mut Graph, _target: &ActionTarget, _undo: &UndoData) -> bool {
        false
    }
}
