//! Notifications emitted by a graph.
//!
//! Events are queued on the graph and drained by whoever presents it.

use plexus_core::{ExtensionGuid, NodeGuid, PinGuid};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregated result of one connection transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionEvent {
    pub nodes: BTreeSet<NodeGuid>,
    /// Changed pins, grouped by node.
    pub pins: BTreeMap<NodeGuid, BTreeSet<PinGuid>>,
}

impl ConnectionEvent {
    pub fn pin_count(&self) -> usize {
        self.pins.values().map(BTreeSet::len).sum()
    }
}

/// Nodes whose location changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeMoveEvent {
    pub nodes: BTreeSet<NodeGuid>,
    /// True while a drag is still running.
    pub in_progress: bool,
}

/// Everything a graph reports to the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    NodeAdded { node: NodeGuid },
    NodeRemoved { node: NodeGuid },
    NodesMoved(NodeMoveEvent),
    /// One pin of one node had its links changed.
    PinConnectionsChanged { node: NodeGuid, pin: PinGuid },
    /// Sent once per connection transaction, after the per-pin events.
    ConnectionsChanged(ConnectionEvent),
    ExtensionAdded { extension: ExtensionGuid },
    ExtensionRemoved { extension: ExtensionGuid },
}

impl GraphEvent {
    pub fn is_connections_changed(&self) -> bool {
        matches!(self, GraphEvent::ConnectionsChanged(_))
    }

    pub fn is_node_added(&self) -> bool {
        matches!(self, GraphEvent::NodeAdded { .. })
    }

    pub fn is_node_removed(&self) -> bool {
        matches!(self, GraphEvent::NodeRemoved { .. })
    }
}
