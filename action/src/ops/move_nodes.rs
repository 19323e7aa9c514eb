//! Move nodes on the canvas.

use plexus_core::{NodeGuid, UndoData};
use plexus_graph::{Graph, Location};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{finish, undone};
use crate::action::{ActionArgs, ActionOutcome, ActionTarget, GraphAction};
use crate::context::ActionContext;
use crate::error::ActionResult;

const ORIGINAL: &str = "original_locations";
const MOVED: &str = "new_locations";

/// Payload of [`MoveNodes`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveNodesPayload {
    pub locations: BTreeMap<NodeGuid, Location>,
    /// True while a drag is still running.
    #[serde(default)]
    pub in_progress: bool,
}

/// Moves nodes to the locations in the payload with one notification.
///
/// A redo reapplies the locations captured on first execution.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveNodes;

impl MoveNodes {
    fn apply(
        ctx: &mut ActionContext<'_>,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionResult<ActionOutcome> {
        let payload: MoveNodesPayload = args.payload_as()?;
        let locations = if args.is_redo() && undo.contains(MOVED) {
            undo.load(MOVED)?
        } else {
            payload.locations
        };

        if ctx.is_undoable() && !args.is_redo() {
            let original: BTreeMap<NodeGuid, Location> = locations
                .keys()
                .filter_map(|guid| Some((*guid, ctx.graph().node(*guid)?.location())))
                .collect();
            undo.store(ORIGINAL, &original)?;
            undo.store(MOVED, &locations)?;
        }

        let moved = ctx
            .graph_mut()
            .set_node_locations(locations, payload.in_progress);
        if moved == 0 {
            return Ok(ActionOutcome::Failed);
        }
        Ok(ActionOutcome::Handled)
    }

    fn restore(graph: &mut Graph, undo: &UndoData) -> ActionResult<bool> {
        let original: BTreeMap<NodeGuid, Location> = undo.load(ORIGINAL)?;
        Ok(graph.set_node_locations(original, false) > 0)
    }
}

impl GraphAction for MoveNodes {
    fn name(&self) -> &'static str {
        "move_nodes"
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
        finish(self.name(), Self::apply(ctx, args, undo))
    }

    fn undo(&self, graph: &mut Graph, _target: &ActionTarget, undo: &UndoData) -> bool {
        undone(self.name(), Self::restore(graph, undo))
    }
}
