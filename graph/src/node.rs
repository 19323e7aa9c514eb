//! Graph nodes and their payloads.

use plexus_core::{GraphGuid, NodeGuid, PinDesc, PinGuid, PinStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Position of a node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Class descriptor for node payload objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectClass(pub String);

impl ObjectClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    /// Create a fresh, empty object of this class.
    pub fn instantiate(&self) -> NodeObject {
        NodeObject::new(self.clone())
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque data object represented by a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeObject {
    pub class: ObjectClass,
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl NodeObject {
    pub fn new(class: ObjectClass) -> Self {
        Self {
            class,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    pub fn is_valid(&self) -> bool {
        self.class.is_valid()
    }
}

/// Already-resolved graph node class (what the registry picked to represent the object).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphNodeClass(pub String);

impl GraphNodeClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

/// What a node is created from.
#[derive(Debug, Clone)]
pub enum NodeSource {
    /// Instance a new object of this class, owned by the node.
    Class(ObjectClass),
    /// Reference an object owned elsewhere.
    Object(Arc<NodeObject>),
}

/// Payload carried by a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodePayload {
    /// Owned exclusively by the node.
    Instanced(NodeObject),
    /// Shared with an external owner.
    Reference(Arc<NodeObject>),
}

impl NodePayload {
    pub fn object(&self) -> &NodeObject {
        match self {
            NodePayload::Instanced(object) => object,
            NodePayload::Reference(object) => object,
        }
    }

    /// Mutable access; only instanced payloads can be edited through the node.
    pub fn object_mut(&mut self) -> Option<&mut NodeObject> {
        match self {
            NodePayload::Instanced(object) => Some(object),
            NodePayload::Reference(_) => None,
        }
    }

    pub fn is_instanced(&self) -> bool {
        matches!(self, NodePayload::Instanced(_))
    }

    pub fn is_valid(&self) -> bool {
        self.object().is_valid()
    }
}

impl PartialEq for NodePayload {
    fn eq(&self, other: &Self) -> bool {
        self.is_instanced() == other.is_instanced() && self.object() == other.object()
    }
}

/// A node in a graph.
///
/// Nodes are created detached through a node edit and attached to their graph when the
/// edit commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    guid: NodeGuid,
    /// Owning graph, set on attach.
    graph: Option<GraphGuid>,
    class: GraphNodeClass,
    location: Location,
    payload: NodePayload,
    pins: PinStore,
}

impl Node {
    /// Create a detached node with a fresh guid.
    pub fn new(class: GraphNodeClass, payload: NodePayload, location: Location) -> Self {
        Self {
            guid: NodeGuid::new(),
            graph: None,
            class,
            location,
            payload,
            pins: PinStore::new(),
        }
    }

    pub fn guid(&self) -> NodeGuid {
        self.guid
    }

    /// Owning graph, `None` until the node is attached.
    pub fn graph(&self) -> Option<GraphGuid> {
        self.graph
    }

    pub fn class(&self) -> &GraphNodeClass {
        &self.class
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn object(&self) -> &NodeObject {
        self.payload.object()
    }

    pub fn object_mut(&mut self) -> Option<&mut NodeObject> {
        self.payload.object_mut()
    }

    /// The shared object of a reference payload.
    pub fn shared_object(&self) -> Option<&Arc<NodeObject>> {
        match &self.payload {
            NodePayload::Reference(object) => Some(object),
            NodePayload::Instanced(_) => None,
        }
    }

    /// Point a reference payload back at `object`. Instanced payloads are left alone.
    pub fn rebind_reference(&mut self, object: Arc<NodeObject>) -> bool {
        match &mut self.payload {
            NodePayload::Reference(current) => {
                *current = object;
                true
            }
            NodePayload::Instanced(_) => false,
        }
    }

    pub fn pins(&self) -> &PinStore {
        &self.pins
    }

    /// Add a pin. On attached nodes prefer `Graph::add_pin`.
    pub fn add_pin(&mut self, desc: PinDesc) -> PinGuid {
        let pin = PinGuid::new();
        self.pins.add_pin(pin, desc);
        pin
    }

    pub fn is_valid(&self) -> bool {
        self.guid.is_valid() && self.class.is_valid() && self.payload.is_valid()
    }

    pub(crate) fn pins_mut(&mut self) -> &mut PinStore {
        &mut self.pins
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub(crate) fn attach(&mut self, graph: GraphGuid) {
        self.graph = Some(graph);
    }

    pub(crate) fn detach(&mut self) {
        self.graph = None;
    }
}

/// Hook run once on a freshly constructed node before it is queued for insertion.
///
/// This is the creation "context": typically it declares the node's pins.
pub trait NodeInitializer {
    fn on_create(&self, node: &mut Node);
}

impl<F> NodeInitializer for F
where
    F: Fn(&mut Node),
{
    fn on_create(&self, node: &mut Node) {
        self(node)
    }
}
