//! Create a node from a class name.

use plexus_core::{NodeGuid, PinDesc, UndoData};
use plexus_graph::{Graph, GraphNodeClass, Location, Node, ObjectClass};
use serde::{Deserialize, Serialize};

use super::{finish, undone};
use crate::action::{ActionArgs, ActionOutcome, ActionTarget, GraphAction};
use crate::context::ActionContext;
use crate::error::{ActionError, ActionResult};

const NODE: &str = "node";

/// Payload of [`CreateNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNodePayload {
    pub graph_node_class: String,
    pub object_class: String,
    #[serde(default)]
    pub location: Location,
    /// Pins added to the node before it is attached.
    #[serde(default)]
    pub pins: Vec<PinDesc>,
}

/// Creates an instanced node.
///
/// The created node is captured so a redo brings back the same guid instead of minting a
/// new one; later records that refer to the node stay valid.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateNode;

impl CreateNode {
    fn create(
        ctx: &mut ActionContext<'_>,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionResult<ActionOutcome> {
        if args.is_redo() && undo.contains(NODE) {
            let node: Node = undo.load(NODE)?;
            let guid = node.guid();
            let summary = {
                let mut edit = ctx.graph_mut().edit_nodes();
                edit.restore(node);
                edit.run_now()
            };
            return Ok(Self::outcome(summary.added.contains(&guid)));
        }

        let payload: CreateNodePayload = args.payload_as()?;
        let add_pins = |node: &mut Node| {
            for desc in &payload.pins {
                node.add_pin(desc.clone());
            }
        };

        let (guid, summary) = {
            let mut edit = ctx.graph_mut().edit_nodes();
            let id = edit.create_instanced(
                GraphNodeClass::new(payload.graph_node_class.as_str()),
                &ObjectClass::new(payload.object_class.as_str()),
                payload.location,
                Some(&add_pins),
            );
            let guid = edit.pending_node(id).map(|n| n.guid());
            (guid, edit.run_now())
        };
        let Some(guid) = guid.filter(|g| summary.added.contains(g)) else {
            return Ok(ActionOutcome::Failed);
        };

        if ctx.is_undoable() {
            let node = ctx
                .graph()
                .node(guid)
                .ok_or(ActionError::NodeNotFound(guid))?;
            undo.store(NODE, node)?;
        }
        tracing::debug!(node = %guid, "node created");
        Ok(ActionOutcome::Handled)
    }

    fn outcome(created: bool) -> ActionOutcome {
        if created {
            ActionOutcome::Handled
        } else {
            ActionOutcome::Failed
        }
    }

    fn remove(graph: &mut Graph, undo: &UndoData) -> ActionResult<bool> {
        let node: Node = undo.load(NODE)?;
        let guid: NodeGuid = node.guid();
        let summary = {
            let mut edit = graph.edit_nodes();
            edit.delete(guid);
            edit.run_now()
        };
        Ok(summary.removed.contains(&guid))
    }
}

impl GraphAction for CreateNode {
    fn name(&self) -> &'static str {
        "create_node"
    }

    fn can_undo(&self, _graph: &Graph, _target: &ActionTarget) -> bool {
        true
    }

    fn execute_on_graph(
        &self,
        ctx: &mut ActionContext<'_>,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionOutcome {
        finish(self.name(), Self::create(ctx, args, undo))
    }

    fn undo(&self, graph: &mut Graph, _target: &ActionTarget, undo: &UndoData) -> bool {
        undone(self.name(), Self::remove(graph, undo))
    }
}
