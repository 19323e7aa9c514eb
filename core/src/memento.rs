//! Opaque state snapshots.
//!
//! A [`Memento`] is a byte blob produced from some serializable state. The engine never
//! looks inside one; it only hands them back to the same codec that produced them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};

/// Encoder used to turn state into memento bytes and back.
///
/// The embedding application may provide its own (binary, network, ...). [`JsonCodec`]
/// is used when none is specified.
pub trait MementoCodec {
    fn encode<T: Serialize>(value: &T) -> CoreResult<Vec<u8>>;

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CoreResult<T>;
}

/// JSON memento codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl MementoCodec for JsonCodec {
    fn encode<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| CoreError::encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CoreResult<T> {
        serde_json::from_slice(bytes).map_err(|e| CoreError::decode(e.to_string()))
    }
}

/// An opaque snapshot blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Memento {
    bytes: Vec<u8>,
}

impl Memento {
    /// Capture a value with the default codec.
    pub fn capture<T: Serialize>(value: &T) -> CoreResult<Self> {
        Self::capture_with::<JsonCodec, T>(value)
    }

    /// Capture a value with a specific codec.
    pub fn capture_with<C: MementoCodec, T: Serialize>(value: &T) -> CoreResult<Self> {
        Ok(Self {
            bytes: C::encode(value)?,
        })
    }

    /// Restore a value captured with the default codec.
    pub fn restore<T: DeserializeOwned>(&self) -> CoreResult<T> {
        self.restore_with::<JsonCodec, T>()
    }

    /// Restore a value captured with a specific codec.
    pub fn restore_with<C: MementoCodec, T: DeserializeOwned>(&self) -> CoreResult<T> {
        C::decode(&self.bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Named mementos captured by an action so it can later be undone.
///
/// Besides encoded mementos it holds two in-memory slots:
/// - shared handles, kept as the same `Arc` so identity survives undo
/// - the undo data of child actions run from inside the capturing one
#[derive(Clone, Default)]
pub struct UndoData {
    entries: BTreeMap<String, Memento>,
    shared: BTreeMap<String, Arc<dyn Any + Send + Sync>>,
    children: BTreeMap<String, UndoData>,
}

impl UndoData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a memento under a name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, memento: Memento) {
        self.entries.insert(name.into(), memento);
    }

    /// Capture a value and store it under a name.
    pub fn store<T: Serialize>(&mut self, name: impl Into<String>, value: &T) -> CoreResult<()> {
        self.insert(name, Memento::capture(value)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Memento> {
        self.entries.get(name)
    }

    /// Decode the named entry.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> CoreResult<T> {
        self.entries
            .get(name)
            .ok_or_else(|| CoreError::missing_entry(name))?
            .restore()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Memento> {
        self.entries.remove(name)
    }

    // ==================== Shared handles ====================

    /// Keep a shared object as-is, without encoding it.
    pub fn keep<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: Arc<T>) {
        self.shared.insert(name.into(), value);
    }

    /// The handle kept under `name`, if present and of type `T`.
    pub fn kept<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.shared.get(name).cloned()?.downcast::<T>().ok()
    }

    // ==================== Children ====================

    /// Store the undo data of a nested action.
    pub fn insert_child(&mut self, name: impl Into<String>, child: UndoData) {
        self.children.insert(name.into(), child);
    }

    pub fn child(&self, name: &str) -> Option<&UndoData> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &UndoData)> {
        self.children.iter().map(|(name, child)| (name.as_str(), child))
    }

    /// Number of entries across mementos, handles and children.
    pub fn len(&self) -> usize {
        self.entries.len() + self.shared.len() + self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for UndoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoData")
            .field("entries", &self.entries)
            .field("shared", &self.shared.keys().collect::<Vec<_>>())
            .field("children", &self.children)
            .finish()
    }
}

/// Handles compare by identity.
impl PartialEq for UndoData {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
            && self.children == other.children
            && self.shared.len() == other.shared.len()
            && self
                .shared
                .iter()
                .zip(&other.shared)
                .all(|((a, x), (b, y))| a == b && Arc::ptr_eq(x, y))
    }
}

impl Eq for UndoData {}
