//! Named graph fixture.
//!
//! Scenarios refer to nodes by name and to pins by `"Node.Pin"` paths. The fixture owns
//! the session and resolves those names to guids.

use plexus_action::ops::{
    ConnectPins, ConnectPinsPayload, CreateNode, CreateNodePayload, DeleteNode, DisconnectPins,
    MoveNodes, MoveNodesPayload,
};
use plexus_action::{ActionArgs, ActionOutcome, GraphAction, Session};
use plexus_core::{NodeGuid, PinDesc, PinReference};
use plexus_graph::{Graph, GraphNodeClass, Location, Node, ObjectClass};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::{ScenarioError, ScenarioResult};

/// What a step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutput {
    /// An action ran.
    Outcome(ActionOutcome),
    /// A boolean operation (undo, redo, direct graph edit) ran.
    Done(bool),
}

impl From<ActionOutcome> for StepOutput {
    fn from(outcome: ActionOutcome) -> Self {
        StepOutput::Outcome(outcome)
    }
}

impl From<bool> for StepOutput {
    fn from(done: bool) -> Self {
        StepOutput::Done(done)
    }
}

/// Session plus a name table.
#[derive(Debug, Default)]
pub struct Fixture {
    session: Session,
    names: BTreeMap<String, NodeGuid>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            names: BTreeMap::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn graph(&self) -> &Graph {
        self.session.graph()
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        self.session.graph_mut()
    }

    // ==================== Names ====================

    /// Add a node directly, outside the history.
    pub fn add_node(&mut self, name: &str, pins: &[PinDesc]) -> ScenarioResult<NodeGuid> {
        if self.names.contains_key(name) {
            return Err(ScenarioError::duplicate_node(name));
        }
        let add_pins = |node: &mut Node| {
            for desc in pins {
                node.add_pin(desc.clone());
            }
        };
        let guid = {
            let mut edit = self.session.graph_mut().edit_nodes();
            let id = edit.create_instanced(
                GraphNodeClass::new("Basic"),
                &ObjectClass::new(name),
                Location::default(),
                Some(&add_pins),
            );
            let guid = edit.pending_node(id).map(|n| n.guid());
            edit.run_now();
            guid
        };
        let guid = guid.ok_or_else(|| ScenarioError::unknown_node(name))?;
        self.names.insert(name.to_string(), guid);
        Ok(guid)
    }

    pub fn node(&self, name: &str) -> ScenarioResult<NodeGuid> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::unknown_node(name))
    }

    /// Resolve `"Node.Pin"`. The node must currently be in the graph.
    pub fn pin(&self, path: &str) -> ScenarioResult<PinReference> {
        let (node_name, pin_name) = path
            .split_once('.')
            .ok_or_else(|| ScenarioError::unknown_pin(path))?;
        let node = self.node(node_name)?;
        let pin = self
            .graph()
            .node(node)
            .and_then(|n| n.pins().find_by_name(pin_name))
            .ok_or_else(|| ScenarioError::unknown_pin(path))?;
        Ok(PinReference::new(node, pin))
    }

    // ==================== Actions ====================

    pub fn execute(&mut self, action: impl GraphAction + 'static, args: ActionArgs) -> StepOutput {
        self.session.execute(Arc::new(action), args).into()
    }

    pub fn connect(&mut self, from: &str, to: &str) -> ScenarioResult<StepOutput> {
        let payload = ConnectPinsPayload {
            other: self.pin(to)?,
        };
        let args = ActionArgs::pin(self.pin(from)?).with_payload(to_value(&payload)?);
        Ok(self.execute(ConnectPins, args))
    }

    pub fn disconnect_pin(&mut self, path: &str) -> ScenarioResult<StepOutput> {
        let args = ActionArgs::pin(self.pin(path)?);
        Ok(self.execute(DisconnectPins, args))
    }

    pub fn disconnect_node(&mut self, name: &str) -> ScenarioResult<StepOutput> {
        let args = ActionArgs::node(self.node(name)?);
        Ok(self.execute(DisconnectPins, args))
    }

    pub fn delete(&mut self, name: &str) -> ScenarioResult<StepOutput> {
        let args = ActionArgs::node(self.node(name)?);
        Ok(self.execute(DeleteNode, args))
    }

    pub fn move_node(&mut self, name: &str, x: f64, y: f64) -> ScenarioResult<StepOutput> {
        let payload = MoveNodesPayload {
            locations: [(self.node(name)?, Location::new(x, y))].into_iter().collect(),
            in_progress: false,
        };
        let args = ActionArgs::graph().with_payload(to_value(&payload)?);
        Ok(self.execute(MoveNodes, args))
    }

    /// Create a node through the history and register it under `name`.
    pub fn create(&mut self, name: &str, pins: &[PinDesc]) -> ScenarioResult<StepOutput> {
        if self.names.contains_key(name) {
            return Err(ScenarioError::duplicate_node(name));
        }
        let payload = CreateNodePayload {
            graph_node_class: "Basic".into(),
            object_class: name.into(),
            location: Location::default(),
            pins: pins.to_vec(),
        };
        let args = ActionArgs::graph().with_payload(to_value(&payload)?);

        let before: BTreeSet<NodeGuid> = self.graph().node_guids().into_iter().collect();
        let output = self.execute(CreateNode, args);
        if let Some(guid) = self
            .graph()
            .node_guids()
            .into_iter()
            .find(|g| !before.contains(g))
        {
            self.names.insert(name.to_string(), guid);
        }
        Ok(output)
    }

    // ==================== History ====================

    pub fn undo(&mut self) -> ScenarioResult<StepOutput> {
        Ok(self.session.undo().into())
    }

    pub fn redo(&mut self) -> ScenarioResult<StepOutput> {
        Ok(self.session.redo().into())
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> ScenarioResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ScenarioError::step_execution("payload", e.to_string()))
}
