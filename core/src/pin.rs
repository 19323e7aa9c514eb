//! Pin data model.
//!
//! Each node owns one [`PinStore`]: pin descriptors, per-pin connection sets, and an
//! explicit insertion-order index that survives removals without gaps.

use serde::{Deserialize, Serialize};
use std::collections::{btree_set, BTreeSet, HashMap};

use crate::query::MapQuery;
use crate::{NodeGuid, PinGuid};

/// Direction of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    Input,
    Output,
    Bidirectional,
}

impl PinDirection {
    /// Returns true if the pin accepts incoming links.
    pub fn is_input(&self) -> bool {
        matches!(self, PinDirection::Input | PinDirection::Bidirectional)
    }

    /// Returns true if the pin produces outgoing links.
    pub fn is_output(&self) -> bool {
        matches!(self, PinDirection::Output | PinDirection::Bidirectional)
    }
}

/// Type tag of a pin (for example `"exec"` or `"float"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PinTag(pub String);

impl PinTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

/// One metadata entry attached to a pin descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMetadata {
    pub key: String,
    pub value: String,
}

/// Describes a single pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinDesc {
    /// Name, unique per node by convention.
    pub name: String,
    /// Display name, falls back to `name` when empty.
    pub friendly_name: String,
    pub tooltip: String,
    pub tag: PinTag,
    pub direction: PinDirection,
    pub metadata: Vec<PinMetadata>,
}

impl PinDesc {
    pub fn new(name: impl Into<String>, tag: PinTag, direction: PinDirection) -> Self {
        Self {
            name: name.into(),
            friendly_name: String::new(),
            tooltip: String::new(),
            tag,
            direction,
            metadata: Vec::new(),
        }
    }

    pub fn input(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(name, PinTag::new(tag), PinDirection::Input)
    }

    pub fn output(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(name, PinTag::new(tag), PinDirection::Output)
    }

    pub fn with_friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = friendly_name.into();
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push(PinMetadata {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Name shown to users.
    pub fn display_name(&self) -> &str {
        if self.friendly_name.is_empty() {
            &self.name
        } else {
            &self.friendly_name
        }
    }

    pub fn has_metadata(&self, key: &str) -> bool {
        self.metadata.iter().any(|m| m.key == key)
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.tag.is_valid()
    }
}

/// Address of a pin anywhere in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PinReference {
    pub node: NodeGuid,
    pub pin: PinGuid,
}

impl PinReference {
    pub fn new(node: NodeGuid, pin: PinGuid) -> Self {
        Self { node, pin }
    }

    pub fn is_valid(&self) -> bool {
        self.node.is_valid() && self.pin.is_valid()
    }
}

impl std::fmt::Display for PinReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.node, self.pin)
    }
}

/// Deduplicated set of pins one pin is linked to.
///
/// Links iterate in [`PinReference`] order (node guid, then pin guid), not in the order they
/// were made. The order is stable across edits and mementos, so equal sets always list
/// their links identically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinConnections {
    links: BTreeSet<PinReference>,
}

impl PinConnections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the link was not already present.
    pub fn insert(&mut self, link: PinReference) -> bool {
        self.links.insert(link)
    }

    /// Returns true if the link was present.
    pub fn remove(&mut self, link: &PinReference) -> bool {
        self.links.remove(link)
    }

    pub fn contains(&self, link: &PinReference) -> bool {
        self.links.contains(link)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, PinReference> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<PinReference> for PinConnections {
    fn from_iter<I: IntoIterator<Item = PinReference>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PinConnections {
    type Item = &'a PinReference;
    type IntoIter = btree_set::Iter<'a, PinReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Pins of one node.
///
/// Connection sets are only kept for known pins, and an empty set is never stored, so two
/// stores with the same links compare equal regardless of edit history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PinStore {
    descriptions: HashMap<PinGuid, PinDesc>,
    connections: HashMap<PinGuid, PinConnections>,
    order: HashMap<PinGuid, usize>,
}

impl PinStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Pins ====================

    /// Add a pin at the end of the insertion order.
    pub fn add_pin(&mut self, pin: PinGuid, desc: PinDesc) -> bool {
        if self.descriptions.contains_key(&pin) {
            tracing::warn!(%pin, "pin already present, not added");
            return false;
        }
        self.order.insert(pin, self.descriptions.len());
        self.descriptions.insert(pin, desc);
        true
    }

    /// Remove a pin, shifting every later pin down one place.
    ///
    /// Far-side links are not touched; disconnect the pin first.
    pub fn remove_pin(&mut self, pin: PinGuid) -> Option<PinDesc> {
        let desc = self.descriptions.remove(&pin)?;
        self.connections.remove(&pin);
        if let Some(removed) = self.order.remove(&pin) {
            for index in self.order.values_mut() {
                if *index > removed {
                    *index -= 1;
                }
            }
        }
        Some(desc)
    }

    pub fn contains(&self, pin: PinGuid) -> bool {
        self.descriptions.contains_key(&pin)
    }

    pub fn pin_index(&self, pin: PinGuid) -> Option<usize> {
        self.order.get(&pin).copied()
    }

    pub fn pin_desc(&self, pin: PinGuid) -> Option<&PinDesc> {
        self.descriptions.get(&pin)
    }

    /// Pin guids sorted by insertion order.
    pub fn ordered_pins(&self) -> Vec<PinGuid> {
        let mut pins: Vec<PinGuid> = self.descriptions.keys().copied().collect();
        pins.sort_by_key(|pin| self.order.get(pin).copied().unwrap_or(usize::MAX));
        pins
    }

    /// First pin whose descriptor matches.
    pub fn find(&self, mut pred: impl FnMut(PinGuid, &PinDesc) -> bool) -> Option<PinGuid> {
        self.ordered_pins()
            .into_iter()
            .find(|pin| self.descriptions.get(pin).is_some_and(|d| pred(*pin, d)))
    }

    /// Find a pin by name.
    pub fn find_by_name(&self, name: &str) -> Option<PinGuid> {
        self.find(|_, desc| desc.name == name)
    }

    /// Lazy query over the pin descriptors. `sort()` uses insertion order.
    pub fn query(&self) -> MapQuery<'_, PinGuid, PinDesc> {
        MapQuery::new(&self.descriptions).with_order(&self.order)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    // ==================== Connections ====================

    pub fn has_connections(&self, pin: PinGuid) -> bool {
        self.connections.get(&pin).is_some_and(|c| !c.is_empty())
    }

    pub fn connections(&self, pin: PinGuid) -> Option<&PinConnections> {
        self.connections.get(&pin)
    }

    /// Every pin with at least one link.
    pub fn connected_pins(&self) -> impl Iterator<Item = (PinGuid, &PinConnections)> + '_ {
        self.connections.iter().map(|(pin, c)| (*pin, c))
    }

    /// Add one side of a link. Fails for unknown pins.
    pub fn add_connection(&mut self, pin: PinGuid, link: PinReference) -> bool {
        if !self.contains(pin) {
            return false;
        }
        self.connections.entry(pin).or_default().insert(link)
    }

    /// Remove one side of a link. Returns true if it was present.
    pub fn remove_connection(&mut self, pin: PinGuid, link: &PinReference) -> bool {
        let Some(set) = self.connections.get_mut(&pin) else {
            return false;
        };
        let removed = set.remove(link);
        if set.is_empty() {
            self.connections.remove(&pin);
        }
        removed
    }

    /// Replace one pin's links without touching far sides.
    ///
    /// Trusted callers only: the caller restores symmetry elsewhere.
    pub fn set_connections(&mut self, pin: PinGuid, links: PinConnections) -> bool {
        if !self.contains(pin) {
            return false;
        }
        if links.is_empty() {
            self.connections.remove(&pin);
        } else {
            self.connections.insert(pin, links);
        }
        true
    }

    /// Copy of every pin's links.
    pub fn snapshot_connections(&self) -> HashMap<PinGuid, PinConnections> {
        self.connections.clone()
    }

    /// Replace all links wholesale, dropping entries for unknown pins.
    ///
    /// Trusted callers only, see [`PinStore::set_connections`].
    pub fn replace_connections(&mut self, connections: HashMap<PinGuid, PinConnections>) {
        self.connections = connections
            .into_iter()
            .filter(|(pin, links)| {
                let known = self.descriptions.contains_key(pin);
                if !known {
                    tracing::warn!(%pin, "dropping links of unknown pin");
                }
                known && !links.is_empty()
            })
            .collect();
    }
}
