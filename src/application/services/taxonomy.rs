//! Category taxonomy service
//!
//! The single entry point consumers hold: owns the arena, orchestrates the
//! tree, cross-link, and import operations, and keeps the cross-cutting
//! guarantees (no dangling links after delete, atomic bulk import). An
//! explicit, passed-by-reference service object — never an ambient singleton.

use std::collections::HashSet;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{outline, snapshot};
use crate::domain::{CategoryArena, CategoryId, CategoryNode, CategorySnapshot, DomainError};

/// Owns one category forest and its cross-link relation.
///
/// All operations are synchronous and single-writer; the service derives
/// `Clone`, so a caller that wants immutable per-mutation snapshots clones
/// the store before mutating.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyService {
    arena: CategoryArena,
}

impl TaxonomyService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing arena (e.g. one rebuilt from a snapshot).
    pub fn with_arena(arena: CategoryArena) -> Self {
        Self { arena }
    }

    /// Read access to the underlying arena for the query layer.
    pub fn arena(&self) -> &CategoryArena {
        &self.arena
    }

    /// Create a category under `parent`, or as a root when `parent` is None.
    ///
    /// The new node starts with no children and no links. Fails with
    /// `NotFound` when the parent id does not exist and with `EmptyName` when
    /// the trimmed name is empty; the tree is untouched on failure.
    pub fn add_category(
        &mut self,
        parent: Option<CategoryId>,
        name: &str,
    ) -> ApplicationResult<CategoryId> {
        debug!("add_category: parent={:?} name={:?}", parent, name);
        if name.trim().is_empty() {
            return Err(ApplicationError::EmptyName);
        }
        Ok(self.arena.insert_node(name, parent)?)
    }

    /// Replace a category's display name in place.
    ///
    /// Existing link labels on either side are left as they are, including
    /// labels that were auto-derived from the old name.
    pub fn rename_category(&mut self, id: CategoryId, new_name: &str) -> ApplicationResult<()> {
        debug!("rename_category: id={} new_name={:?}", id, new_name);
        if new_name.trim().is_empty() {
            return Err(ApplicationError::EmptyName);
        }
        Ok(self.arena.rename_node(id, new_name)?)
    }

    /// Delete a category and its entire subtree as one unit.
    ///
    /// Every link entry elsewhere in the tree that points into the removed
    /// subtree is stripped, so no dangling links survive. Returns the removed
    /// ids (deleted node first, then descendants in pre-order); consumers
    /// that keep id-keyed side stores, such as the dynamic-field map, prune
    /// them with this set.
    pub fn delete_category(&mut self, id: CategoryId) -> ApplicationResult<Vec<CategoryId>> {
        debug!("delete_category: id={}", id);
        let removed = self.arena.remove_subtree(id)?;
        let removed_set: HashSet<CategoryId> = removed.iter().copied().collect();
        self.arena.strip_links_to(&removed_set);
        Ok(removed)
    }

    /// Import indentation-formatted text as a subtree under `anchor`.
    ///
    /// The whole batch is atomic from the caller's point of view: an
    /// unresolvable anchor aborts the import before any insertion. Blank and
    /// whitespace-only lines are skipped without affecting the hierarchy.
    /// Returns the created ids in input order.
    pub fn bulk_upload(
        &mut self,
        text: &str,
        anchor: Option<CategoryId>,
    ) -> ApplicationResult<Vec<CategoryId>> {
        debug!("bulk_upload: anchor={:?} bytes={}", anchor, text.len());
        if let Some(anchor_id) = anchor {
            if !self.arena.contains(anchor_id) {
                return Err(DomainError::NotFound(anchor_id).into());
            }
        }

        let plan = outline::plan(text);
        let mut created: Vec<CategoryId> = Vec::with_capacity(plan.len());
        for insertion in &plan {
            let parent = match insertion.parent {
                Some(index) => Some(created[index]),
                None => anchor,
            };
            created.push(self.arena.insert_node(insertion.name.clone(), parent)?);
        }
        debug!("bulk_upload: created {} categories", created.len());
        Ok(created)
    }

    /// Pre-order, depth-annotated listing of the whole forest.
    pub fn flatten(&self) -> Vec<(CategoryId, usize)> {
        self.arena.flatten()
    }

    pub fn find(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.arena.get(id)
    }

    pub fn ancestors_of(&self, id: CategoryId) -> HashSet<CategoryId> {
        self.arena.ancestors_of(id)
    }

    pub fn descendants_of(&self, id: CategoryId) -> HashSet<CategoryId> {
        self.arena.descendants_of(id)
    }

    /// Link two categories with a shared label; see `CategoryArena::link`.
    pub fn link(
        &mut self,
        source: CategoryId,
        target: CategoryId,
        name: Option<&str>,
    ) -> ApplicationResult<()> {
        debug!("link: {} <-> {} name={:?}", source, target, name);
        Ok(self.arena.link(source, target, name)?)
    }

    pub fn unlink(&mut self, source: CategoryId, target: CategoryId) -> ApplicationResult<()> {
        debug!("unlink: {} <-> {}", source, target);
        Ok(self.arena.unlink(source, target)?)
    }

    pub fn rename_link(
        &mut self,
        source: CategoryId,
        target: CategoryId,
        new_name: &str,
    ) -> ApplicationResult<()> {
        debug!("rename_link: {} <-> {} new_name={:?}", source, target, new_name);
        Ok(self.arena.rename_link(source, target, new_name)?)
    }

    /// Legal link targets for `source`: everything except the source itself,
    /// its ancestors, and its descendants.
    pub fn link_candidates(&self, source: CategoryId) -> ApplicationResult<Vec<CategoryId>> {
        Ok(self.arena.link_candidates(source)?)
    }

    /// Export the forest in the external nested representation.
    pub fn snapshot(&self) -> Vec<CategorySnapshot> {
        snapshot::export(&self.arena)
    }

    /// Rebuild a service from the external representation, validating the
    /// structural invariants of the imported data.
    pub fn from_snapshot(snapshots: &[CategorySnapshot]) -> ApplicationResult<Self> {
        Ok(Self::with_arena(snapshot::import(snapshots)?))
    }
}
