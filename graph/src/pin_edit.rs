//! Connection transactions.
//!
//! A [`PinEdit`] batches link changes on one graph. When it is dropped (or committed) it
//! emits one `PinConnectionsChanged` per touched pin and exactly one aggregated
//! `ConnectionsChanged`, or nothing at all if no link changed.

use plexus_core::{NodeGuid, PinConnections, PinGuid, PinReference};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::event::{ConnectionEvent, GraphEvent};
use crate::graph::Graph;

/// Saved links of every pin of one node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionMemento {
    pub connections: HashMap<PinGuid, PinConnections>,
}

/// Connection mementos keyed by node.
pub type ConnectionMementos = BTreeMap<NodeGuid, ConnectionMemento>;

fn capture_into(graph: &Graph, node: NodeGuid, out: &mut ConnectionMementos) {
    if out.contains_key(&node) {
        return;
    }
    if let Some(n) = graph.node(node) {
        out.insert(
            node,
            ConnectionMemento {
                connections: n.pins().snapshot_connections(),
            },
        );
    }
}

pub(crate) fn create_mementos(graph: &Graph, pin: PinReference) -> ConnectionMementos {
    let mut out = ConnectionMementos::new();
    capture_into(graph, pin.node, &mut out);
    if let Some(links) = graph.connections(pin) {
        for link in links {
            capture_into(graph, link.node, &mut out);
        }
    }
    out
}

pub(crate) fn create_all_mementos(graph: &Graph, node: NodeGuid) -> ConnectionMementos {
    let mut out = ConnectionMementos::new();
    capture_into(graph, node, &mut out);
    if let Some(n) = graph.node(node) {
        for (_, links) in n.pins().connected_pins() {
            for link in links {
                capture_into(graph, link.node, &mut out);
            }
        }
    }
    out
}

/// Scoped batch of link edits against one graph.
#[derive(Debug)]
pub struct PinEdit<'g> {
    graph: &'g mut Graph,
    changed: BTreeSet<PinReference>,
}

impl<'g> PinEdit<'g> {
    pub(crate) fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            changed: BTreeSet::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    /// Returns true if any pin has been marked changed.
    pub fn modified(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Pins marked changed so far.
    pub fn changed_pins(&self) -> &BTreeSet<PinReference> {
        &self.changed
    }

    fn resolve(&self, pin: PinReference) -> bool {
        match self.graph.node(pin.node) {
            None => {
                tracing::error!(node = %pin.node, "connection refers to a node not in the graph");
                false
            }
            Some(node) if !node.pins().contains(pin.pin) => {
                tracing::error!(%pin, "connection refers to an unknown pin");
                false
            }
            Some(_) => true,
        }
    }

    /// Link two pins on both sides.
    pub fn connect(&mut self, a: PinReference, b: PinReference) -> bool {
        if a == b {
            tracing::error!(pin = %a, "cannot connect a pin to itself");
            return false;
        }
        if !self.resolve(a) || !self.resolve(b) {
            return false;
        }
        if let Some(node) = self.graph.node_mut(a.node) {
            node.pins_mut().add_connection(a.pin, b);
        }
        if let Some(node) = self.graph.node_mut(b.node) {
            node.pins_mut().add_connection(b.pin, a);
        }
        self.changed.insert(a);
        self.changed.insert(b);
        true
    }

    fn remove_side(&mut self, from: PinReference, to: &PinReference) -> bool {
        let removed = self
            .graph
            .node_mut(from.node)
            .is_some_and(|n| n.pins_mut().remove_connection(from.pin, to));
        if removed {
            self.changed.insert(from);
        }
        removed
    }

    /// Unlink two pins. Returns false if neither side had the link.
    pub fn disconnect(&mut self, a: PinReference, b: PinReference) -> bool {
        let removed_a = self.remove_side(a, &b);
        let removed_b = self.remove_side(b, &a);
        removed_a || removed_b
    }

    /// Unlink a pin from everything it is connected to.
    pub fn disconnect_all_pin(&mut self, pin: PinReference) -> bool {
        let links: Vec<PinReference> = match self.graph.connections(pin) {
            Some(links) => links.iter().copied().collect(),
            None => return false,
        };
        let mut any = false;
        for link in links {
            any |= self.disconnect(pin, link);
        }
        any
    }

    /// Unlink every pin of a node.
    pub fn disconnect_all_node(&mut self, node: NodeGuid) -> bool {
        let pins = match self.graph.node(node) {
            Some(n) => n.pins().ordered_pins(),
            None => {
                tracing::warn!(%node, "cannot disconnect missing node");
                return false;
            }
        };
        let mut any = false;
        for pin in pins {
            any |= self.disconnect_all_pin(PinReference::new(node, pin));
        }
        any
    }

    /// Replace one pin's links without touching the far sides.
    ///
    /// This can break link symmetry. Trusted callers only (undo replay, replication),
    /// which restore the far sides themselves.
    pub fn override_unchecked(&mut self, pin: PinReference, links: PinConnections) -> bool {
        let Some(node) = self.graph.node_mut(pin.node) else {
            tracing::warn!(%pin, "cannot override links of missing node");
            return false;
        };
        if !node.pins_mut().set_connections(pin.pin, links) {
            tracing::warn!(%pin, "cannot override links of unknown pin");
            return false;
        }
        self.changed.insert(pin);
        true
    }

    // ==================== Mementos ====================

    /// Save the links of a pin's node and of every node it is linked to.
    pub fn create_mementos(&self, pin: PinReference) -> ConnectionMementos {
        create_mementos(&*self.graph, pin)
    }

    /// Save the links of a node and of every node linked to any of its pins.
    pub fn create_all_mementos(&self, node: NodeGuid) -> ConnectionMementos {
        create_all_mementos(&*self.graph, node)
    }

    /// Put saved links back. Mementos for nodes no longer in the graph are skipped.
    pub fn restore_mementos(&mut self, mementos: &ConnectionMementos) -> bool {
        let mut any = false;
        for (node, memento) in mementos {
            let Some(n) = self.graph.node_mut(*node) else {
                tracing::warn!(%node, "skipping memento of missing node");
                continue;
            };
            let before: Vec<PinGuid> = n.pins().connected_pins().map(|(pin, _)| pin).collect();
            n.pins_mut().replace_connections(memento.connections.clone());
            let after: Vec<PinGuid> = n.pins().connected_pins().map(|(pin, _)| pin).collect();
            for pin in before.into_iter().chain(after) {
                self.changed.insert(PinReference::new(*node, pin));
            }
            any = true;
        }
        any
    }

    /// Commit now. Equivalent to dropping the edit.
    pub fn commit(self) {}

    fn flush(&mut self) {
        if self.changed.is_empty() {
            return;
        }
        let mut event = ConnectionEvent::default();
        for pin in std::mem::take(&mut self.changed) {
            event.nodes.insert(pin.node);
            event.pins.entry(pin.node).or_default().insert(pin.pin);
            if self.graph.contains_node(pin.node) {
                self.graph.emit(GraphEvent::PinConnectionsChanged {
                    node: pin.node,
                    pin: pin.pin,
                });
            }
        }
        tracing::debug!(
            nodes = event.nodes.len(),
            pins = event.pin_count(),
            "connection edit committed"
        );
        self.graph.emit(GraphEvent::ConnectionsChanged(event));
    }
}

impl Drop for PinEdit<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}
