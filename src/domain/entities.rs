//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a category.
///
/// Assigned once at creation and immutable thereafter. Ids are stable across
/// serialization, which makes them usable as foreign keys by external stores
/// (e.g. the per-category dynamic-field map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Issue a fresh identifier, unique among all ids issued in this session.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One endpoint of a symmetric cross-link between two categories.
///
/// If category A holds `CategoryLink { id: B, name: N }`, then B holds the
/// mirror entry `{ id: A, name: N }` with the same label. The label is stored
/// denormalized on both sides and does not track later category renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    /// Id of the category at the other end of the link
    pub id: CategoryId,
    /// Display label, identical on both endpoints
    pub name: String,
}

/// Node payload stored in the category arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    /// Display name, mutable via rename
    pub name: String,
    /// Parent id, None for roots; set at creation, never changed
    pub parent: Option<CategoryId>,
    /// Child ids in insertion order
    pub children: Vec<CategoryId>,
    /// Cross-link entries, one per linked category
    pub links: Vec<CategoryLink>,
}

impl CategoryNode {
    pub fn new(name: impl Into<String>, parent: Option<CategoryId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Look up the link entry pointing at `target`, if any.
    pub fn link_to(&self, target: CategoryId) -> Option<&CategoryLink> {
        self.links.iter().find(|l| l.id == target)
    }
}

impl fmt::Display for CategoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
