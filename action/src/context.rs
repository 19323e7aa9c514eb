//! Execution context for action invocations.
//!
//! The context is threaded through every `execute_on_*` call. It keeps a stack of frames,
//! one per running action, each marking whether that invocation is being recorded. Nested
//! invocations consult the stack so only the outermost loggable action produces a record,
//! and so any action can ask whether the current execution is undoable before paying for
//! a snapshot.

use plexus_core::UndoData;
use plexus_graph::Graph;
use std::sync::Arc;

use crate::action::{ActionArgs, ActionOutcome, ActionTarget, ExecFlags, GraphAction};
use crate::record::ActionRecord;

/// Explicit execution context for one top-level invocation.
#[derive(Debug)]
pub struct ActionContext<'g> {
    graph: &'g mut Graph,
    /// One entry per running action: true if it will be recorded.
    frames: Vec<bool>,
    /// Set while the history replays a record.
    replaying: bool,
    records: Vec<ActionRecord>,
}

impl<'g> ActionContext<'g> {
    pub fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            frames: Vec::new(),
            replaying: false,
            records: Vec::new(),
        }
    }

    pub(crate) fn replaying(graph: &'g mut Graph) -> Self {
        Self {
            replaying: true,
            ..Self::new(graph)
        }
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut *self.graph
    }

    /// Number of actions currently running in this context.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True if the running action should capture undo data.
    ///
    /// Nested actions inherit this from the outermost recorded frame. A redo is undoable
    /// too, since the record it replays will be undone again later.
    pub fn is_undoable(&self) -> bool {
        self.replaying || self.frames.iter().any(|logged| *logged)
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Run an action, possibly from inside another one.
    ///
    /// Undo data the action captures is dropped unless it is recorded. Composite actions
    /// that undo through their children use [`ActionContext::execute_capturing`].
    pub fn execute(&mut self, action: Arc<dyn GraphAction>, args: ActionArgs) -> ActionOutcome {
        self.execute_capturing(action, args).0
    }

    /// Run a child action and hand back the undo data it captured.
    ///
    /// The caller stores it with [`UndoData::insert_child`] and passes it to the child's
    /// [`GraphAction::undo`] later. If the child was recorded on its own (no enclosing
    /// frame is logged) its data went to that record and an empty set is returned.
    pub fn execute_capturing(
        &mut self,
        action: Arc<dyn GraphAction>,
        args: ActionArgs,
    ) -> (ActionOutcome, UndoData) {
        let mut undo = UndoData::new();
        let outcome = self.execute_with(&action, &args, &mut undo);
        (outcome, undo)
    }

    pub(crate) fn execute_with(
        &mut self,
        action: &Arc<dyn GraphAction>,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionOutcome {
        if !action.can_execute(self.graph(), &args.target) {
            tracing::debug!(action = action.name(), "action cannot execute on target");
            return ActionOutcome::Invalid;
        }

        let logged = self.should_log(action.as_ref(), args);
        self.frames.push(logged);
        let outcome = self.dispatch(action.as_ref(), args, undo);
        self.frames.pop();

        if logged && outcome.is_handled() {
            tracing::debug!(action = action.name(), "action recorded");
            self.records.push(ActionRecord::action(
                action.clone(),
                args.clone(),
                std::mem::take(undo),
            ));
        }
        outcome
    }

    fn should_log(&self, action: &dyn GraphAction, args: &ActionArgs) -> bool {
        if self.replaying || self.frames.iter().any(|logged| *logged) {
            return false;
        }
        if args
            .flags
            .intersects(ExecFlags::DISALLOW_RECORD | ExecFlags::IS_REDO)
        {
            return false;
        }
        args.flags.contains(ExecFlags::FORCE_RECORD) || action.can_undo(self.graph(), &args.target)
    }

    fn dispatch(
        &mut self,
        action: &dyn GraphAction,
        args: &ActionArgs,
        undo: &mut UndoData,
    ) -> ActionOutcome {
        match args.target {
            ActionTarget::Graph => action.execute_on_graph(self, args, undo),
            ActionTarget::Node(node) => {
                if !self.graph.contains_node(node) {
                    tracing::warn!(
                        action = action.name(),
                        %node,
                        "action target node not in graph"
                    );
                    return ActionOutcome::Invalid;
                }
                action.execute_on_node(self, node, args, undo)
            }
            ActionTarget::Pin(pin) => {
                if self.graph.pin_desc(pin).is_none() {
                    tracing::warn!(action = action.name(), %pin, "action target pin not in graph");
                    return ActionOutcome::Invalid;
                }
                action.execute_on_pin(self, pin, args, undo)
            }
        }
    }

    /// Records produced by this context, oldest first.
    pub(crate) fn into_records(self) -> Vec<ActionRecord> {
        self.records
    }
}
