//! Node create/delete transactions.
//!
//! A [`NodeEdit`] queues creations and deletions and applies them in two passes when it
//! is dropped or [`NodeEdit::run_now`] is called:
//! 1. deletes: every doomed node is disconnected inside one connection edit, then removed
//! 2. creates: queued nodes are attached
//!
//! Deletes always run first, so a queued create can never be removed by the same edit.

use plexus_core::NodeGuid;
use std::sync::Arc;

use crate::graph::Graph;
use crate::node::{
    GraphNodeClass, Location, Node, NodeInitializer, NodeObject, NodePayload, NodeSource,
    ObjectClass,
};

/// Handle to a node queued for creation.
///
/// Handles are never reused within one edit, so a handle to a node that has since been
/// committed resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingNodeId(usize);

/// What a commit did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEditSummary {
    pub removed: Vec<NodeGuid>,
    pub added: Vec<NodeGuid>,
}

impl NodeEditSummary {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Scoped batch of node creations and deletions against one graph.
#[derive(Debug)]
pub struct NodeEdit<'g> {
    graph: &'g mut Graph,
    pending_creates: Vec<(PendingNodeId, Node)>,
    pending_deletes: Vec<NodeGuid>,
    next_pending: usize,
}

impl<'g> NodeEdit<'g> {
    pub(crate) fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            pending_creates: Vec::new(),
            pending_deletes: Vec::new(),
            next_pending: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    // ==================== Creation ====================

    /// Create a node from a source: classes are instanced, objects are referenced.
    pub fn create(
        &mut self,
        class: GraphNodeClass,
        source: NodeSource,
        location: Location,
        context: Option<&dyn NodeInitializer>,
    ) -> PendingNodeId {
        match source {
            NodeSource::Class(object_class) => {
                self.create_instanced(class, &object_class, location, context)
            }
            NodeSource::Object(object) => self.create_reference(class, object, location, context),
        }
    }

    /// Create a node owning a fresh object of `object_class`.
    pub fn create_instanced(
        &mut self,
        class: GraphNodeClass,
        object_class: &ObjectClass,
        location: Location,
        context: Option<&dyn NodeInitializer>,
    ) -> PendingNodeId {
        let payload = NodePayload::Instanced(object_class.instantiate());
        self.queue(Node::new(class, payload, location), context)
    }

    /// Create a node referencing an externally owned object.
    pub fn create_reference(
        &mut self,
        class: GraphNodeClass,
        object: Arc<NodeObject>,
        location: Location,
        context: Option<&dyn NodeInitializer>,
    ) -> PendingNodeId {
        self.queue(Node::new(class, NodePayload::Reference(object), location), context)
    }

    /// Create a node owning a copy of `template`.
    pub fn create_duplicate(
        &mut self,
        class: GraphNodeClass,
        template: &NodeObject,
        location: Location,
        context: Option<&dyn NodeInitializer>,
    ) -> PendingNodeId {
        let payload = NodePayload::Instanced(template.clone());
        self.queue(Node::new(class, payload, location), context)
    }

    /// Queue a previously removed node, keeping its guid and pins.
    ///
    /// Its links are dropped; restore them afterwards with connection mementos.
    pub fn restore(&mut self, mut node: Node) -> PendingNodeId {
        node.detach();
        node.pins_mut().replace_connections(Default::default());
        self.queue(node, None)
    }

    fn queue(&mut self, mut node: Node, context: Option<&dyn NodeInitializer>) -> PendingNodeId {
        if let Some(context) = context {
            context.on_create(&mut node);
        }
        let id = PendingNodeId(self.next_pending);
        self.next_pending += 1;
        self.pending_creates.push((id, node));
        id
    }

    /// A queued node, before it is attached.
    pub fn pending_node(&self, id: PendingNodeId) -> Option<&Node> {
        self.pending_creates
            .iter()
            .find(|(pending, _)| *pending == id)
            .map(|(_, node)| node)
    }

    pub fn pending_node_mut(&mut self, id: PendingNodeId) -> Option<&mut Node> {
        self.pending_creates
            .iter_mut()
            .find(|(pending, _)| *pending == id)
            .map(|(_, node)| node)
    }

    // ==================== Deletion ====================

    /// Queue a node for deletion. Returns false if it was already queued.
    pub fn delete(&mut self, guid: NodeGuid) -> bool {
        if self.pending_deletes.contains(&guid) {
            return false;
        }
        self.pending_deletes.push(guid);
        true
    }

    // ==================== Commit ====================

    /// Apply everything queued so far. The edit stays usable.
    pub fn run_now(&mut self) -> NodeEditSummary {
        self.handle_pending()
    }

    fn handle_pending(&mut self) -> NodeEditSummary {
        let mut summary = NodeEditSummary::default();

        let deletes: Vec<NodeGuid> = std::mem::take(&mut self.pending_deletes)
            .into_iter()
            .filter(|guid| {
                let present = guid.is_valid() && self.graph.contains_node(*guid);
                if !present {
                    tracing::warn!(node = %guid, "dropping delete of node not in graph");
                }
                present
            })
            .collect();

        if !deletes.is_empty() {
            let mut links = self.graph.edit_connections();
            for guid in &deletes {
                links.disconnect_all_node(*guid);
            }
        }
        for guid in deletes {
            if self.graph.remove_node(guid).is_some() {
                summary.removed.push(guid);
            }
        }

        for (_, node) in std::mem::take(&mut self.pending_creates) {
            if !node.is_valid() {
                tracing::error!(node = %node.guid(), "skipping invalid node or payload");
                continue;
            }
            let guid = node.guid();
            if self.graph.add_node(node) {
                summary.added.push(guid);
            }
        }

        if !summary.is_empty() {
            tracing::debug!(
                removed = summary.removed.len(),
                added = summary.added.len(),
                "node edit committed"
            );
        }
        summary
    }
}

impl Drop for NodeEdit<'_> {
    fn drop(&mut self) {
        self.handle_pending();
    }
}
