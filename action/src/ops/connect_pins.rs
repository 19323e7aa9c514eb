//! Link two pins.

use plexus_core::{PinReference, UndoData};
use plexus_graph::{ConnectionMementos, Graph};
use serde::{Deserialize, Serialize};

use super::{finish, undone, LINKS_BEFORE};
use crate::action::{ActionArgs, ActionOutcome, ActionTarget, GraphAction};
use crate::context::ActionContext;
use crate::error::ActionResult;

/// Payload of [`ConnectPins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectPinsPayload {
    /// The pin to link the target pin to.
    pub other: PinReference,
}

/// Connects the target pin to the pin named in the payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectPins;

impl ConnectPins {
    fn connect(
        ctx: &mut ActionContext<'_>,
        pin: PinReference,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionResult<ActionOutcome> {
        let ConnectPinsPayload { other } = args.payload_as()?;
        if ctx.graph().are_connected(pin, other) {
            return Ok(ActionOutcome::Failed);
        }
        if ctx.is_undoable() {
            let mut links = ctx.graph().create_mementos(pin);
            links.extend(ctx.graph().create_mementos(other));
            undo.store(LINKS_BEFORE, &links)?;
        }
        if ctx.graph_mut().connect_pins(pin, other) {
            Ok(ActionOutcome::Handled)
        } else {
            Ok(ActionOutcome::Failed)
        }
    }

    fn restore(graph: &mut Graph, undo: &UndoData) -> ActionResult<bool> {
        let links: ConnectionMementos = undo.load(LINKS_BEFORE)?;
        Ok(graph.edit_connections().restore_mementos(&links))
    }
}

impl GraphAction for ConnectPins {
    fn name(&self) -> &'static str {
        "connect_pins"
    }

    fn can_undo(&self, _graph: &Graph, _target: &ActionTarget) -> bool {
        true
    }

    fn execute_on_pin(
        &self,
        ctx: &mut ActionContext<'_>,
        pin: PinReference,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionOutcome {
        finish(self.name(), Self::connect(ctx, pin, args, undo))
    }

    fn undo(&self, graph: &mut Graph, _target: &ActionTarget, undo: &UndoData) -> bool {
        undone(self.name(), Self::restore(graph, undo))
    }
}
