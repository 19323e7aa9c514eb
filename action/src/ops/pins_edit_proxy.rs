//! History entry for connection edits made outside the action pipeline.

use plexus_core::UndoData;
use plexus_graph::{ConnectionMementos, Graph};

use super::{finish, undone, LINKS_AFTER, LINKS_BEFORE};
use crate::action::{ActionArgs, ActionOutcome, ActionTarget, GraphAction};
use crate::context::ActionContext;
use crate::error::{ActionError, ActionResult};

/// Replays a recorded connection edit.
///
/// Never executed directly: [`crate::Session::record_pins_edit`] builds its record from
/// the before and after mementos, and only undo and redo ever run it.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinsEditProxy;

impl PinsEditProxy {
    /// Undo data for a record of this action.
    pub fn undo_data(
        original: &ConnectionMementos,
        new: &ConnectionMementos,
    ) -> ActionResult<UndoData> {
        let mut undo = UndoData::new();
        undo.store(LINKS_BEFORE, original)?;
        undo.store(LINKS_AFTER, new)?;
        Ok(undo)
    }

    fn replay(ctx: &mut ActionContext<'_>, undo: &UndoData) -> ActionResult<ActionOutcome> {
        let links: ConnectionMementos = undo.load(LINKS_AFTER)?;
        ctx.graph_mut().edit_connections().restore_mementos(&links);
        Ok(ActionOutcome::Handled)
    }

    fn restore(graph: &mut Graph, undo: &UndoData) -> ActionResult<bool> {
        let links: ConnectionMementos = undo.load(LINKS_BEFORE)?;
        Ok(graph.edit_connections().restore_mementos(&links))
    }
}

impl GraphAction for PinsEditProxy {
    fn name(&self) -> &'static str {
        "pins_edit_proxy"
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
        if !args.is_redo() {
            return finish(
                self.name(),
                Err(ActionError::invalid_payload("pins edit proxy only runs as a redo")),
            );
        }
        finish(self.name(), Self::replay(ctx, undo))
    }

    fn undo(&self, graph: &mut Graph, _target: &ActionTarget, undo: &UndoData) -> bool {
        undone(self.name(), Self::restore(graph, undo))
    }
}
