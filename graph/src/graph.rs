//! Core graph storage implementation.

use plexus_core::{
    ExtensionGuid, GraphGuid, MapQuery, NodeGuid, PinConnections, PinDesc, PinGuid, PinReference,
};
use std::collections::{BTreeSet, HashMap};

use crate::event::{GraphEvent, NodeMoveEvent};
use crate::extension::GraphExtension;
use crate::node::{Location, Node};
use crate::node_edit::NodeEdit;
use crate::pin_edit::{self, ConnectionMementos, PinEdit};

/// The in-memory graph.
///
/// Nodes are added and removed only through [`NodeEdit`], and links only through
/// [`PinEdit`], so every change produces its notification.
#[derive(Debug)]
pub struct Graph {
    guid: GraphGuid,
    /// Node storage
    nodes: HashMap<NodeGuid, Node>,
    /// Extension storage
    extensions: HashMap<ExtensionGuid, Box<dyn GraphExtension>>,
    /// Undrained notifications
    events: Vec<GraphEvent>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_guid(GraphGuid::new())
    }

    pub fn with_guid(guid: GraphGuid) -> Self {
        Self {
            guid,
            nodes: HashMap::new(),
            extensions: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn guid(&self) -> GraphGuid {
        self.guid
    }

    // ==================== Transactions ====================

    /// Open a connection transaction. It commits when dropped.
    pub fn edit_connections(&mut self) -> PinEdit<'_> {
        PinEdit::new(self)
    }

    /// Open a node create/delete transaction. It commits when dropped.
    pub fn edit_nodes(&mut self) -> NodeEdit<'_> {
        NodeEdit::new(self)
    }

    // ==================== Node Operations ====================

    /// Get a node by guid.
    pub fn node(&self, guid: NodeGuid) -> Option<&Node> {
        self.nodes.get(&guid)
    }

    pub(crate) fn node_mut(&mut self, guid: NodeGuid) -> Option<&mut Node> {
        self.nodes.get_mut(&guid)
    }

    pub fn contains_node(&self, guid: NodeGuid) -> bool {
        self.nodes.contains_key(&guid)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// All node guids, sorted.
    pub fn node_guids(&self) -> Vec<NodeGuid> {
        let mut guids: Vec<NodeGuid> = self.nodes.keys().copied().collect();
        guids.sort();
        guids
    }

    pub fn for_each_node(&self, mut f: impl FnMut(&Node)) {
        for node in self.nodes.values() {
            f(node);
        }
    }

    pub fn query_nodes(&self) -> MapQuery<'_, NodeGuid, Node> {
        MapQuery::new(&self.nodes)
    }

    /// Insert a node. Refuses duplicates.
    pub(crate) fn add_node(&mut self, mut node: Node) -> bool {
        let guid = node.guid();
        if self.nodes.contains_key(&guid) {
            tracing::error!(node = %guid, graph = %self.guid, "tried to add node already in graph");
            return false;
        }
        node.attach(self.guid);
        self.nodes.insert(guid, node);
        self.emit(GraphEvent::NodeAdded { node: guid });
        true
    }

    /// Remove a node. Callers disconnect it first.
    pub(crate) fn remove_node(&mut self, guid: NodeGuid) -> Option<Node> {
        let mut node = self.nodes.remove(&guid)?;
        node.detach();
        self.emit(GraphEvent::NodeRemoved { node: guid });
        Some(node)
    }

    /// Move one node.
    pub fn set_node_location(
        &mut self,
        guid: NodeGuid,
        location: Location,
        in_progress: bool,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&guid) else {
            tracing::warn!(node = %guid, "cannot move missing node");
            return false;
        };
        node.set_location(location);
        self.notify_node_locations_changed([guid].into_iter().collect(), in_progress);
        true
    }

    /// Move several nodes with one notification. Returns how many were moved.
    pub fn set_node_locations(
        &mut self,
        locations: impl IntoIterator<Item = (NodeGuid, Location)>,
        in_progress: bool,
    ) -> usize {
        let mut moved = BTreeSet::new();
        for (guid, location) in locations {
            match self.nodes.get_mut(&guid) {
                Some(node) => {
                    node.set_location(location);
                    moved.insert(guid);
                }
                None => tracing::warn!(node = %guid, "cannot move missing node"),
            }
        }
        let count = moved.len();
        if count > 0 {
            self.notify_node_locations_changed(moved, in_progress);
        }
        count
    }

    pub fn notify_node_locations_changed(&mut self, nodes: BTreeSet<NodeGuid>, in_progress: bool) {
        self.emit(GraphEvent::NodesMoved(NodeMoveEvent { nodes, in_progress }));
    }

    // ==================== Pin Operations ====================

    /// Add a pin to an attached node.
    pub fn add_pin(&mut self, node: NodeGuid, desc: PinDesc) -> Option<PinGuid> {
        match self.nodes.get_mut(&node) {
            Some(n) => Some(n.add_pin(desc)),
            None => {
                tracing::warn!(%node, "cannot add pin to missing node");
                None
            }
        }
    }

    /// Disconnect and remove a pin.
    pub fn remove_pin(&mut self, pin: PinReference) -> bool {
        if self.pin_desc(pin).is_none() {
            return false;
        }
        self.edit_connections().disconnect_all_pin(pin);
        self.nodes
            .get_mut(&pin.node)
            .and_then(|n| n.pins_mut().remove_pin(pin.pin))
            .is_some()
    }

    pub fn pin_desc(&self, pin: PinReference) -> Option<&PinDesc> {
        self.nodes.get(&pin.node)?.pins().pin_desc(pin.pin)
    }

    pub fn connections(&self, pin: PinReference) -> Option<&PinConnections> {
        self.nodes.get(&pin.node)?.pins().connections(pin.pin)
    }

    /// True if `a` lists `b` among its links.
    pub fn are_connected(&self, a: PinReference, b: PinReference) -> bool {
        self.connections(a).is_some_and(|c| c.contains(&b))
    }

    /// Connect two pins in a single-operation transaction.
    pub fn connect_pins(&mut self, a: PinReference, b: PinReference) -> bool {
        self.edit_connections().connect(a, b)
    }

    pub fn disconnect_pins(&mut self, a: PinReference, b: PinReference) -> bool {
        self.edit_connections().disconnect(a, b)
    }

    pub fn disconnect_all_pins(&mut self, pin: PinReference) -> bool {
        self.edit_connections().disconnect_all_pin(pin)
    }

    /// Connection mementos of a pin's node and its linked nodes.
    pub fn create_mementos(&self, pin: PinReference) -> ConnectionMementos {
        pin_edit::create_mementos(self, pin)
    }

    /// Connection mementos of a node and every node linked to it.
    pub fn create_all_mementos(&self, node: NodeGuid) -> ConnectionMementos {
        pin_edit::create_all_mementos(self, node)
    }

    /// Links that point at a missing node or are not mirrored on the far side.
    pub fn broken_links(&self) -> Vec<(PinReference, PinReference)> {
        let mut broken = Vec::new();
        for node in self.nodes.values() {
            for (pin, links) in node.pins().connected_pins() {
                let from = PinReference::new(node.guid(), pin);
                for to in links {
                    if !self.are_connected(*to, from) {
                        broken.push((from, *to));
                    }
                }
            }
        }
        broken
    }

    // ==================== Extensions ====================

    pub fn add_extension(&mut self, extension: Box<dyn GraphExtension>) -> ExtensionGuid {
        let guid = ExtensionGuid::new();
        tracing::debug!(extension = %guid, name = extension.name(), "extension added");
        self.extensions.insert(guid, extension);
        self.emit(GraphEvent::ExtensionAdded { extension: guid });
        guid
    }

    pub fn remove_extension(&mut self, guid: ExtensionGuid) -> Option<Box<dyn GraphExtension>> {
        let extension = self.extensions.remove(&guid)?;
        self.emit(GraphEvent::ExtensionRemoved { extension: guid });
        Some(extension)
    }

    pub fn extension(&self, guid: ExtensionGuid) -> Option<&dyn GraphExtension> {
        self.extensions.get(&guid).map(|e| e.as_ref())
    }

    /// First extension of type `T`.
    pub fn extension_of<T: GraphExtension>(&self) -> Option<&T> {
        self.extensions.values().find_map(|e| e.downcast_ref::<T>())
    }

    pub fn extension_of_mut<T: GraphExtension>(&mut self) -> Option<&mut T> {
        self.extensions.values_mut().find_map(|e| e.downcast_mut::<T>())
    }

    pub fn extensions_of<T: GraphExtension>(&self) -> Vec<&T> {
        self.extensions
            .values()
            .filter_map(|e| e.downcast_ref::<T>())
            .collect()
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn query_extensions(&self) -> MapQuery<'_, ExtensionGuid, Box<dyn GraphExtension>> {
        MapQuery::new(&self.extensions)
    }

    // ==================== Events ====================

    pub(crate) fn emit(&mut self, event: GraphEvent) {
        self.events.push(event);
    }

    /// Undrained events, oldest first.
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }
}
