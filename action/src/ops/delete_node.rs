//! Delete a node, keeping enough to bring it back with its links.

use plexus_core::{NodeGuid, UndoData};
use plexus_graph::{ConnectionMementos, Graph, Node, NodeObject};

use super::{finish, undone, LINKS_BEFORE};
use crate::action::{ActionArgs, ActionOutcome, ActionTarget, GraphAction};
use crate::context::ActionContext;
use crate::error::{ActionError, ActionResult};

const NODE: &str = "node";
/// Externally owned payload of a reference node, kept by identity.
const SHARED_OBJECT: &str = "shared_object";

/// Removes the target node.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteNode;

impl DeleteNode {
    fn delete(
        ctx: &mut ActionContext<'_>,
        node: NodeGuid,
        undo: &mut UndoData,
    ) -> ActionResult<ActionOutcome> {
        if ctx.is_undoable() {
            let snapshot = ctx
                .graph()
                .node(node)
                .ok_or(ActionError::NodeNotFound(node))?;
            undo.store(NODE, snapshot)?;
            if let Some(object) = snapshot.shared_object() {
                undo.keep(SHARED_OBJECT, object.clone());
            }
            undo.store(LINKS_BEFORE, &ctx.graph().create_all_mementos(node))?;
        }

        let summary = {
            let mut edit = ctx.graph_mut().edit_nodes();
            edit.delete(node);
            edit.run_now()
        };
        if summary.removed.contains(&node) {
            Ok(ActionOutcome::Handled)
        } else {
            Ok(ActionOutcome::Failed)
        }
    }

    fn restore(graph: &mut Graph, undo: &UndoData) -> ActionResult<bool> {
        let mut node: Node = undo.load(NODE)?;
        if let Some(object) = undo.kept::<NodeObject>(SHARED_OBJECT) {
            node.rebind_reference(object);
        }
        let links: ConnectionMementos = undo.load(LINKS_BEFORE)?;
        let guid = node.guid();

        graph.edit_nodes().restore(node);
        if !graph.contains_node(guid) {
            return Ok(false);
        }
        graph.edit_connections().restore_mementos(&links);
        Ok(true)
    }
}

impl GraphAction for DeleteNode {
    fn name(&self) -> &'static str {
        "delete_node"
    }

    fn description(&self, target: &ActionTarget) -> String {
        match target.node() {
            Some(node) => format!("Delete node {node}"),
            None => "Delete node".to_string(),
        }
    }

    fn can_execute(&self, graph: &Graph, target: &ActionTarget) -> bool {
        matches!(target, ActionTarget::Node(node) if graph.contains_node(*node))
    }

    fn can_undo(&self, _graph: &Graph, _target: &ActionTarget) -> bool {
        true
    }

    fn execute_on_node(
        &self,
        ctx: &mut ActionContext<'_>,
        node: NodeGuid,
        _args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionOutcome {
        finish(self.name(), Self::delete(ctx, node, undo))
    }

    fn undo(&self, graph: &mut Graph, _target: &ActionTarget, undo: &UndoData) -> bool {
        undone(self.name(), Self::restore(graph, undo))
    }
}
