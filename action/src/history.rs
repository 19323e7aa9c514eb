//! Bounded undo/redo history.
//!
//! Records live in a ring buffer with a cursor on the last applied record. Appending
//! drops any redo tail; undo walks the cursor back and replays the action's inverse from
//! its undo data; redo walks forward and re-executes with the `IS_REDO` flag.
//!
//! `MultiUndoStart`/`MultiUndoEnd` sentinels group records so they undo and redo as one
//! step. Groups may nest.

use plexus_graph::Graph;
use std::collections::VecDeque;

use crate::action::ActionOutcome;
use crate::config::HistoryConfig;
use crate::context::ActionContext;
use crate::record::{ActionRecord, RecordKind};

/// Undo/redo buffer.
#[derive(Debug)]
pub struct ActionHistory {
    records: VecDeque<ActionRecord>,
    /// Index of the last applied record, `None` when nothing can be undone.
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl ActionHistory {
    pub fn new(config: &HistoryConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    // ==================== Recording ====================

    /// Append a record, discarding anything that could still be redone.
    pub fn add_record(&mut self, record: ActionRecord) {
        match self.cursor {
            Some(cursor) => self.records.truncate(cursor + 1),
            None => self.records.clear(),
        }
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        tracing::debug!(record = record.name(), "history record added");
        self.records.push_back(record);
        self.cursor = Some(self.records.len() - 1);
    }

    pub fn begin_multi_undo(&mut self) {
        self.add_record(ActionRecord::start());
    }

    pub fn end_multi_undo(&mut self) {
        self.add_record(ActionRecord::end());
    }

    // ==================== Undo ====================

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Undo one step. An end sentinel undoes its whole group.
    pub fn undo(&mut self, graph: &mut Graph) -> bool {
        let Some(index) = self.step_back() else {
            return false;
        };
        let record = &self.records[index];
        if record.is_end() {
            self.undo_group(graph);
            true
        } else if record.is_start() {
            true
        } else {
            self.undo_one(graph, index)
        }
    }

    /// Undo up to `count` steps. Returns how many were undone.
    pub fn undo_many(&mut self, graph: &mut Graph, count: usize) -> usize {
        (0..count).take_while(|_| self.undo(graph)).count()
    }

    fn undo_group(&mut self, graph: &mut Graph) {
        let mut depth = 1usize;
        loop {
            let Some(index) = self.step_back() else {
                tracing::warn!("multi-undo start not found");
                return;
            };
            let record = &self.records[index];
            if record.is_end() {
                depth += 1;
            } else if record.is_start() {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else {
                self.undo_one(graph, index);
            }
        }
    }

    fn undo_one(&self, graph: &mut Graph, index: usize) -> bool {
        let record = &self.records[index];
        let RecordKind::Action(action) = &record.kind else {
            return false;
        };
        let undone = action.undo(graph, &record.args.target, &record.undo_data);
        if undone {
            tracing::debug!(action = action.name(), "undo");
        } else {
            tracing::warn!(action = action.name(), "undo failed");
        }
        undone
    }

    /// Move the cursor back one record, returning the record it was on.
    fn step_back(&mut self) -> Option<usize> {
        let index = self.cursor?;
        self.cursor = index.checked_sub(1);
        Some(index)
    }

    // ==================== Redo ====================

    pub fn can_redo(&self) -> bool {
        self.next_index() < self.records.len()
    }

    /// Redo one step. A start sentinel redoes its whole group.
    pub fn redo(&mut self, graph: &mut Graph) -> bool {
        let Some(index) = self.step_forward() else {
            return false;
        };
        let record = &self.records[index];
        if record.is_start() {
            self.redo_group(graph);
            true
        } else if record.is_end() {
            true
        } else {
            self.redo_one(graph, index)
        }
    }

    fn redo_group(&mut self, graph: &mut Graph) {
        let mut depth = 1usize;
        loop {
            let Some(index) = self.step_forward() else {
                tracing::warn!("multi-undo end not found");
                return;
            };
            let record = &self.records[index];
            if record.is_start() {
                depth += 1;
            } else if record.is_end() {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            } else {
                self.redo_one(graph, index);
            }
        }
    }

    /// Re-execute a record with its original arguments and its own undo data.
    fn redo_one(&mut self, graph: &mut Graph, index: usize) -> bool {
        let record = &mut self.records[index];
        let RecordKind::Action(action) = &record.kind else {
            return false;
        };
        let action = action.clone();
        let args = record.args.for_redo();

        let mut ctx = ActionContext::replaying(graph);
        let outcome = ctx.execute_with(&action, &args, &mut record.undo_data);
        if outcome == ActionOutcome::Handled {
            tracing::debug!(action = action.name(), "redo");
            true
        } else {
            tracing::warn!(action = action.name(), ?outcome, "redo failed");
            false
        }
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |cursor| cursor + 1)
    }

    fn step_forward(&mut self) -> Option<usize> {
        let index = self.next_index();
        if index >= self.records.len() {
            return None;
        }
        self.cursor = Some(index);
        Some(index)
    }

    // ==================== Inspection ====================

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn records(&self) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.records.iter()
    }

    /// The record the next undo would start from.
    pub fn peek(&self) -> Option<&ActionRecord> {
        self.records.get(self.cursor?)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = None;
    }
}
