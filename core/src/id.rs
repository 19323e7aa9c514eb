//! Identity types for Plexus entities.
//!
//! All identifiers are random 128-bit GUIDs that are:
//! - Unique across the process
//! - Immutable once assigned
//! - Opaque to external users (equality and hashing only)

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! guid_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The nil identifier. Never refers to a live entity.
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the raw value.
            pub fn raw(&self) -> Uuid {
                self.0
            }

            /// Returns true unless this is the nil identifier.
            pub fn is_valid(&self) -> bool {
                !self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0.simple())
            }
        }
    };
}

guid_type!(
    /// Unique identifier for a graph.
    GraphGuid,
    "g"
);

guid_type!(
    /// Unique identifier for a node.
    NodeGuid,
    "n"
);

guid_type!(
    /// Unique identifier for a pin, scoped to its node.
    PinGuid,
    "p"
);

guid_type!(
    /// Unique identifier for a graph extension.
    ExtensionGuid,
    "x"
);
