//! Plexus Graph
//!
//! In-memory node graph and its two transaction kinds.
//!
//! Responsibilities:
//! - Own nodes keyed by guid, each with its own pin store
//! - Own graph extensions
//! - Batch link edits into one notification (`PinEdit`)
//! - Batch node creation and deletion, disconnecting before removal (`NodeEdit`)
//! - Queue the notifications the presentation layer consumes

mod event;
mod extension;
mod graph;
mod node;
mod node_edit;
mod pin_edit;

pub use event::{ConnectionEvent, GraphEvent, NodeMoveEvent};
pub use extension::GraphExtension;
pub use graph::Graph;
pub use node::{
    GraphNodeClass, Location, Node, NodeInitializer, NodeObject, NodePayload, NodeSource,
    ObjectClass,
};
pub use node_edit::{NodeEdit, NodeEditSummary, PendingNodeId};
pub use pin_edit::{ConnectionMemento, ConnectionMementos, PinEdit};
