//! History records.

use plexus_core::UndoData;
use std::sync::Arc;

use crate::action::{ActionArgs, GraphAction};

/// What a history record holds.
#[derive(Debug, Clone)]
pub enum RecordKind {
    Action(Arc<dyn GraphAction>),
    /// Opens a group undone and redone as one step.
    MultiUndoStart,
    /// Closes a group.
    MultiUndoEnd,
}

/// One entry in the action history.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub kind: RecordKind,
    /// Arguments of the original invocation.
    pub args: ActionArgs,
    /// Snapshot captured by the action for its undo.
    pub undo_data: UndoData,
}

impl ActionRecord {
    pub fn action(action: Arc<dyn GraphAction>, args: ActionArgs, undo_data: UndoData) -> Self {
        Self {
            kind: RecordKind::Action(action),
            args,
            undo_data,
        }
    }

    pub fn start() -> Self {
        Self::sentinel(RecordKind::MultiUndoStart)
    }

    pub fn end() -> Self {
        Self::sentinel(RecordKind::MultiUndoEnd)
    }

    fn sentinel(kind: RecordKind) -> Self {
        Self {
            kind,
            args: ActionArgs::graph(),
            undo_data: UndoData::new(),
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self.kind, RecordKind::MultiUndoStart)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, RecordKind::MultiUndoEnd)
    }

    pub fn name(&self) -> &'static str {
        match &self.kind {
            RecordKind::Action(action) => action.name(),
            RecordKind::MultiUndoStart => "multi_undo_start",
            RecordKind::MultiUndoEnd => "multi_undo_end",
        }
    }
}
