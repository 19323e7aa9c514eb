//! Session management.
//!
//! A session owns a graph and its undo history. Every action runs through
//! [`Session::execute`], which collects the records produced by the invocation and
//! appends them to the history.

use plexus_graph::{ConnectionMementos, Graph};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::action::{ActionArgs, ActionOutcome, GraphAction};
use crate::config::SessionConfig;
use crate::context::ActionContext;
use crate::history::ActionHistory;
use crate::ops::PinsEditProxy;
use crate::record::ActionRecord;

/// A graph editing session.
#[derive(Debug)]
pub struct Session {
    graph: Graph,
    history: ActionHistory,
    config: SessionConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session over a new empty graph.
    pub fn new() -> Self {
        Self::with_graph(Graph::new())
    }

    pub fn with_graph(graph: Graph) -> Self {
        Self::with_config(graph, SessionConfig::default())
    }

    pub fn with_config(graph: Graph, config: SessionConfig) -> Self {
        Self {
            graph,
            history: ActionHistory::new(&config.history),
            config,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    // ==================== Execution ====================

    /// Execute an action and record it if it is loggable and handled.
    pub fn execute(&mut self, action: Arc<dyn GraphAction>, args: ActionArgs) -> ActionOutcome {
        let name = action.name();
        let mut ctx = ActionContext::new(&mut self.graph);
        let outcome = ctx.execute(action, args);
        let records = ctx.into_records();

        tracing::debug!(action = name, ?outcome, recorded = records.len(), "action executed");
        if self.config.record_history {
            for record in records {
                self.history.add_record(record);
            }
        }
        outcome
    }

    /// Record a connection edit made directly on the graph so it can be undone.
    pub fn record_pins_edit(
        &mut self,
        original: &ConnectionMementos,
        new: &ConnectionMementos,
    ) -> bool {
        if !self.config.record_history {
            return false;
        }
        match PinsEditProxy::undo_data(original, new) {
            Ok(undo) => {
                self.history.add_record(ActionRecord::action(
                    Arc::new(PinsEditProxy),
                    ActionArgs::graph(),
                    undo,
                ));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot record pins edit");
                false
            }
        }
    }

    // ==================== History ====================

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.graph)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.graph)
    }

    pub fn undo_many(&mut self, count: usize) -> usize {
        self.history.undo_many(&mut self.graph, count)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn begin_multi_undo(&mut self) {
        self.history.begin_multi_undo();
    }

    pub fn end_multi_undo(&mut self) {
        self.history.end_multi_undo();
    }

    /// Group everything executed through the returned guard into one undo step.
    pub fn multi_undo(&mut self) -> MultiUndoScope<'_> {
        self.begin_multi_undo();
        MultiUndoScope { session: self }
    }
}

/// Records a multi-undo start on creation and the matching end on drop.
#[derive(Debug)]
pub struct MultiUndoScope<'s> {
    session: &'s mut Session,
}

impl Deref for MultiUndoScope<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for MultiUndoScope<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for MultiUndoScope<'_> {
    fn drop(&mut self) {
        self.session.end_multi_undo();
    }
}
