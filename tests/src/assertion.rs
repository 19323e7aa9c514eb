//! Assertion types and builders for verifying step results.

use plexus_action::ActionOutcome;
use plexus_graph::GraphEvent;

use crate::fixture::{Fixture, StepOutput};

/// A complete assertion for a step result.
#[derive(Debug, Default)]
pub struct Assertion {
    // Result assertions
    pub outcome: Option<ActionOutcome>,
    pub done: Option<bool>,

    // Event assertions
    pub added: Option<usize>,
    pub removed: Option<usize>,
    pub moved: Option<usize>,
    pub connection_events: Option<usize>,

    // Graph assertions
    pub node_count: Option<usize>,
    pub exists: Vec<String>,
    pub missing: Vec<String>,
    pub connected: Vec<(String, String)>,
    pub not_connected: Vec<(String, String)>,
    pub linkless: Vec<String>,
    pub location: Vec<(String, f64, f64)>,

    // History assertions
    pub can_undo: Option<bool>,
    pub can_redo: Option<bool>,
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify a step. Link symmetry is always checked.
    pub fn verify(
        &self,
        output: StepOutput,
        events: &[GraphEvent],
        fixture: &Fixture,
    ) -> Result<(), String> {
        match (self.outcome, output) {
            (Some(expected), StepOutput::Outcome(actual)) if expected != actual => {
                return Err(format!("expected outcome {expected:?}, got {actual:?}"));
            }
            (Some(expected), StepOutput::Done(_)) => {
                return Err(format!("expected outcome {expected:?}, step ran no action"));
            }
            _ => {}
        }
        match (self.done, output) {
            (Some(expected), StepOutput::Done(actual)) if expected != actual => {
                return Err(format!("expected done={expected}, got {actual}"));
            }
            (Some(_), StepOutput::Outcome(actual)) => {
                return Err(format!("expected a boolean step, got outcome {actual:?}"));
            }
            _ => {}
        }

        check_count("node added events", self.added, events, GraphEvent::is_node_added)?;
        check_count("node removed events", self.removed, events, GraphEvent::is_node_removed)?;
        check_count("connection events", self.connection_events, events, |e| {
            e.is_connections_changed()
        })?;
        check_count("move events", self.moved, events, |e| {
            matches!(e, GraphEvent::NodesMoved(_))
        })?;

        let graph = fixture.graph();
        if let Some(expected) = self.node_count {
            if graph.node_count() != expected {
                return Err(format!(
                    "expected {expected} nodes, got {}",
                    graph.node_count()
                ));
            }
        }
        for name in &self.exists {
            let guid = fixture.node(name).map_err(|e| e.to_string())?;
            if !graph.contains_node(guid) {
                return Err(format!("expected node '{name}' in graph"));
            }
        }
        for name in &self.missing {
            let guid = fixture.node(name).map_err(|e| e.to_string())?;
            if graph.contains_node(guid) {
                return Err(format!("expected node '{name}' not in graph"));
            }
        }
        for (a, b) in &self.connected {
            let (pa, pb) = (pin(fixture, a)?, pin(fixture, b)?);
            if !graph.are_connected(pa, pb) || !graph.are_connected(pb, pa) {
                return Err(format!("expected '{a}' connected to '{b}'"));
            }
        }
        for (a, b) in &self.not_connected {
            let (pa, pb) = (pin(fixture, a)?, pin(fixture, b)?);
            if graph.are_connected(pa, pb) || graph.are_connected(pb, pa) {
                return Err(format!("expected '{a}' not connected to '{b}'"));
            }
        }
        for path in &self.linkless {
            let p = pin(fixture, path)?;
            if let Some(links) = graph.connections(p) {
                return Err(format!("expected '{path}' unlinked, has {} links", links.len()));
            }
        }
        for (name, x, y) in &self.location {
            let guid = fixture.node(name).map_err(|e| e.to_string())?;
            let actual = graph.node(guid).map(|n| (n.location().x, n.location().y));
            if actual != Some((*x, *y)) {
                return Err(format!("expected '{name}' at ({x}, {y}), got {actual:?}"));
            }
        }

        let history = fixture.session();
        if let Some(expected) = self.can_undo {
            if history.can_undo() != expected {
                return Err(format!("expected can_undo={expected}"));
            }
        }
        if let Some(expected) = self.can_redo {
            if history.can_redo() != expected {
                return Err(format!("expected can_redo={expected}"));
            }
        }

        let broken = graph.broken_links();
        if !broken.is_empty() {
            return Err(format!("asymmetric links: {broken:?}"));
        }
        Ok(())
    }
}

fn pin(fixture: &Fixture, path: &str) -> Result<plexus_core::PinReference, String> {
    fixture.pin(path).map_err(|e| e.to_string())
}

fn check_count(
    what: &str,
    expected: Option<usize>,
    events: &[GraphEvent],
    pred: impl Fn(&GraphEvent) -> bool,
) -> Result<(), String> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let actual = events.iter().filter(|e| pred(*e)).count();
    if actual != expected {
        return Err(format!("expected {expected} {what}, got {actual}"));
    }
    Ok(())
}

/// Builder for [`Assertion`].
#[derive(Debug, Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ==================== Results ====================

    pub fn outcome(mut self, outcome: ActionOutcome) -> Self {
        self.assertion.outcome = Some(outcome);
        self
    }

    pub fn handled(self) -> Self {
        self.outcome(ActionOutcome::Handled)
    }

    pub fn failed(self) -> Self {
        self.outcome(ActionOutcome::Failed)
    }

    pub fn invalid(self) -> Self {
        self.outcome(ActionOutcome::Invalid)
    }

    pub fn done(mut self) -> Self {
        self.assertion.done = Some(true);
        self
    }

    pub fn not_done(mut self) -> Self {
        self.assertion.done = Some(false);
        self
    }

    // ==================== Events ====================

    pub fn added(mut self, n: usize) -> Self {
        self.assertion.added = Some(n);
        self
    }

    pub fn removed(mut self, n: usize) -> Self {
        self.assertion.removed = Some(n);
        self
    }

    pub fn moved(mut self, n: usize) -> Self {
        self.assertion.moved = Some(n);
        self
    }

    pub fn connection_events(mut self, n: usize) -> Self {
        self.assertion.connection_events = Some(n);
        self
    }

    /// No notification of any kind.
    pub fn quiet(self) -> Self {
        self.added(0).removed(0).moved(0).connection_events(0)
    }

    // ==================== Graph ====================

    pub fn nodes(mut self, n: usize) -> Self {
        self.assertion.node_count = Some(n);
        self
    }

    pub fn exists(mut self, name: &str) -> Self {
        self.assertion.exists.push(name.to_string());
        self
    }

    pub fn missing(mut self, name: &str) -> Self {
        self.assertion.missing.push(name.to_string());
        self
    }

    pub fn connected(mut self, a: &str, b: &str) -> Self {
        self.assertion.connected.push((a.to_string(), b.to_string()));
        self
    }

    pub fn not_connected(mut self, a: &str, b: &str) -> Self {
        self.assertion
            .not_connected
            .push((a.to_string(), b.to_string()));
        self
    }

    pub fn linkless(mut self, path: &str) -> Self {
        self.assertion.linkless.push(path.to_string());
        self
    }

    pub fn at(mut self, name: &str, x: f64, y: f64) -> Self {
        self.assertion.location.push((name.to_string(), x, y));
        self
    }

    // ==================== History ====================

    pub fn can_undo(mut self, expected: bool) -> Self {
        self.assertion.can_undo = Some(expected);
        self
    }

    pub fn can_redo(mut self, expected: bool) -> Self {
        self.assertion.can_redo = Some(expected);
        self
    }
}
