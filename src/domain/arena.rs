//! Arena-based storage for the category hierarchy.
//!
//! Nodes are stored flat, keyed by their public `CategoryId`, with children
//! held as ordered id lists. Mutations touch only the affected node and its
//! parent's child list, so no part of the tree is ever rebuilt. The arena
//! derives `Clone`; callers that want per-mutation snapshots clone the store.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::domain::entities::{CategoryId, CategoryNode};
use crate::domain::error::{DomainError, DomainResult};

/// Arena holding one category forest.
///
/// Invariants maintained by construction:
/// - every id is unique across roots and descendants;
/// - a node's `parent` equals the id of the node whose `children` contains
///   it, or `None` iff the id is in the root sequence;
/// - acyclic and single-parent: nodes are only ever created under an existing
///   parent (or as a root) and never reparented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryArena {
    /// Flat node storage keyed by category id
    nodes: HashMap<CategoryId, CategoryNode>,
    /// Root ids in insertion order
    roots: Vec<CategoryId>,
}

impl CategoryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node under `parent` (or as a root) and return its fresh id.
    ///
    /// Fails with `NotFound` when `parent` is given but absent; the arena is
    /// left untouched in that case.
    #[instrument(level = "trace", skip(self, name))]
    pub fn insert_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<CategoryId>,
    ) -> DomainResult<CategoryId> {
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(&parent_id) {
                return Err(DomainError::NotFound(parent_id));
            }
        }

        let id = CategoryId::new();
        self.nodes.insert(id, CategoryNode::new(name, parent));

        match parent {
            Some(parent_id) => {
                // Presence checked above
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    parent_node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        Ok(id)
    }

    /// Replace the display name of `id` in place.
    ///
    /// Link labels on either side are untouched: labels are denormalized at
    /// link time and do not track renames.
    #[instrument(level = "trace", skip(self, new_name))]
    pub fn rename_node(&mut self, id: CategoryId, new_name: impl Into<String>) -> DomainResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(DomainError::NotFound(id))?;
        node.name = new_name.into();
        Ok(())
    }

    /// Remove `id` and its entire subtree as one unit.
    ///
    /// Behaves identically for roots and nested nodes. Returns the removed
    /// ids in pre-order (the deleted node first); callers use the set to
    /// strip dangling links and to prune external id-keyed stores. Sibling
    /// order of the remaining nodes is preserved.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, id: CategoryId) -> DomainResult<Vec<CategoryId>> {
        let parent = self.nodes.get(&id).ok_or(DomainError::NotFound(id))?.parent;

        // Detach from the parent's child list or the root sequence
        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    parent_node.children.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        // Collect the subtree in pre-order, then drop the nodes
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            removed.push(current);
            if let Some(node) = self.nodes.get(&current) {
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }

        Ok(removed)
    }

    /// Insert a node under a caller-supplied id while rebuilding from a
    /// snapshot. The importer validates id uniqueness and parent agreement
    /// before calling; child lists arrive pre-populated.
    pub(crate) fn restore_node(&mut self, id: CategoryId, node: CategoryNode) {
        if node.parent.is_none() {
            self.roots.push(id);
        }
        self.nodes.insert(id, node);
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: CategoryId) -> Option<&mut CategoryNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Root ids in insertion order.
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal of the whole forest with depth annotations.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Collect the pre-order traversal: parent before children, children in
    /// stored order, depth 0 for roots.
    pub fn flatten(&self) -> Vec<(CategoryId, usize)> {
        self.iter().map(|(id, _, depth)| (id, depth)).collect()
    }

    /// Ids of all ancestors of `id`, walking parent pointers to the root.
    ///
    /// Empty for roots and for unknown ids. Never contains `id` itself.
    pub fn ancestors_of(&self, id: CategoryId) -> HashSet<CategoryId> {
        let mut ancestors = HashSet::new();
        let mut current = self.nodes.get(&id).and_then(|node| node.parent);
        while let Some(ancestor) = current {
            ancestors.insert(ancestor);
            current = self.nodes.get(&ancestor).and_then(|node| node.parent);
        }
        ancestors
    }

    /// Ids of all transitive children of `id`. Never contains `id` itself.
    pub fn descendants_of(&self, id: CategoryId) -> HashSet<CategoryId> {
        let mut descendants = HashSet::new();
        let mut stack: Vec<CategoryId> = match self.nodes.get(&id) {
            Some(node) => node.children.clone(),
            None => return descendants,
        };
        while let Some(current) = stack.pop() {
            descendants.insert(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().copied());
            }
        }
        descendants
    }

    /// Maximum node depth plus one; 0 for an empty arena.
    pub fn depth(&self) -> usize {
        self.iter()
            .map(|(_, _, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Depth-annotated pre-order iterator over a `CategoryArena`.
pub struct PreOrderIter<'a> {
    arena: &'a CategoryArena,
    stack: Vec<(CategoryId, usize)>,
}

impl<'a> PreOrderIter<'a> {
    fn new(arena: &'a CategoryArena) -> Self {
        // Push roots in reverse for left-to-right traversal
        let stack = arena
            .roots
            .iter()
            .rev()
            .map(|&root| (root, 0))
            .collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (CategoryId, &'a CategoryNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, node, depth));
            }
        }
        None
    }
}
