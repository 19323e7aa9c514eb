//! Break every link of a pin or of a whole node.

use plexus_core::{NodeGuid, PinReference, UndoData};
use plexus_graph::{ConnectionMementos, Graph};

use super::{finish, undone, LINKS_BEFORE};
use crate::action::{ActionArgs, ActionOutcome, ActionTarget, GraphAction};
use crate::context::ActionContext;
use crate::error::ActionResult;

/// Disconnects all links of the target pin, or of every pin on the target node.
///
/// Reports `Failed` when there was nothing to disconnect.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectPins;

impl DisconnectPins {
    fn on_pin(
        ctx: &mut ActionContext<'_>,
        pin: PinReference,
        undo: &mut UndoData,
    ) -> ActionResult<ActionOutcome> {
        if ctx.graph().connections(pin).is_none() {
            return Ok(ActionOutcome::Failed);
        }
        if ctx.is_undoable() {
            undo.store(LINKS_BEFORE, &ctx.graph().create_mementos(pin))?;
        }
        Ok(outcome(ctx.graph_mut().disconnect_all_pins(pin)))
    }

    fn on_node(
        ctx: &mut ActionContext<'_>,
        node: NodeGuid,
        undo: &mut UndoData,
    ) -> ActionResult<ActionOutcome> {
        if ctx.is_undoable() {
            undo.store(LINKS_BEFORE, &ctx.graph().create_all_mementos(node))?;
        }
        let changed = ctx.graph_mut().edit_connections().disconnect_all_node(node);
        Ok(outcome(changed))
    }

    fn restore(graph: &mut Graph, undo: &UndoData) -> ActionResult<bool> {
        let links: ConnectionMementos = undo.load(LINKS_BEFORE)?;
        Ok(graph.edit_connections().restore_mementos(&links))
    }
}

fn outcome(changed: bool) -> ActionOutcome {
    if changed {
        ActionOutcome::Handled
    } else {
        ActionOutcome::Failed
    }
}

impl GraphAction for DisconnectPins {
    fn name(&self) -> &'static str {
        "disconnect_pins"
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
        finish(self.name(), Self::on_node(ctx, node, undo))
    }

    fn execute_on_pin(
        &self,
        ctx: &mut ActionContext<'_>,
        pin: PinReference,
        _args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionOutcome {
        finish(self.name(), Self::on_pin(ctx, pin, undo))
    }

    fn undo(&self, graph: &mut Graph, _target: &ActionTarget, undo: &UndoData) -> bool {
        undone(self.name(), Self::restore(graph, undo))
    }
}
