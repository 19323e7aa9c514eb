//! Plexus Core Types
//!
//! This crate provides the foundational types used throughout Plexus:
//! - Identity types (GraphGuid, NodeGuid, PinGuid, ExtensionGuid)
//! - Pin data model (descriptors, references, connection sets, the per-node pin store)
//! - Opaque mementos and the codec capability that produces them
//! - The lazy map query builder
//! - Common error types

mod error;
mod id;
mod memento;
mod pin;
mod query;

pub use error::*;
pub use id::*;
pub use memento::*;
pub use pin::*;
pub use query::*;
