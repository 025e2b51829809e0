//! Cross-link operations over the category arena.
//!
//! Links form a symmetric, named, non-hierarchical relation between two
//! categories: both endpoints carry a `CategoryLink` entry with the same
//! label. The operations here keep that symmetry — every write touches both
//! endpoints — and enforce the validity invariant (no self-links, no links
//! that duplicate tree containment) at the data layer rather than relying on
//! caller discipline.

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::arena::CategoryArena;
use crate::domain::entities::{CategoryId, CategoryLink};
use crate::domain::error::{DomainError, DomainResult};

impl CategoryArena {
    /// Link `source` and `target` with a shared label.
    ///
    /// With `name` omitted, the label is derived from the two display names
    /// current at call time. Linking an already-linked pair is an idempotent
    /// success: the existing entry is kept even when a different name is
    /// supplied. Self-links and links to an ancestor or descendant are
    /// rejected.
    #[instrument(level = "debug", skip(self, name))]
    pub fn link(
        &mut self,
        source: CategoryId,
        target: CategoryId,
        name: Option<&str>,
    ) -> DomainResult<()> {
        if source == target {
            return Err(DomainError::SelfLink(source));
        }
        let source_node = self.get(source).ok_or(DomainError::NotFound(source))?;
        let target_node = self.get(target).ok_or(DomainError::NotFound(target))?;

        if self.ancestors_of(source).contains(&target)
            || self.descendants_of(source).contains(&target)
        {
            return Err(DomainError::RedundantLink {
                source_id: source,
                target_id: target,
            });
        }

        if source_node.link_to(target).is_some() {
            return Ok(());
        }

        let label = match name {
            Some(name) => name.to_string(),
            None => format!("{} - {}", source_node.name, target_node.name),
        };

        self.push_link(source, target, &label);
        self.push_link(target, source, &label);
        Ok(())
    }

    /// Remove the link between `source` and `target` from both endpoints.
    ///
    /// Idempotent: unlinking a pair that is not linked is a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn unlink(&mut self, source: CategoryId, target: CategoryId) -> DomainResult<()> {
        if !self.contains(source) {
            return Err(DomainError::NotFound(source));
        }
        if !self.contains(target) {
            return Err(DomainError::NotFound(target));
        }
        self.drop_link(source, target);
        self.drop_link(target, source);
        Ok(())
    }

    /// Rewrite the label of an existing link on both endpoints.
    ///
    /// No-op when the pair is not linked.
    #[instrument(level = "debug", skip(self, new_name))]
    pub fn rename_link(
        &mut self,
        source: CategoryId,
        target: CategoryId,
        new_name: &str,
    ) -> DomainResult<()> {
        let source_node = self.get(source).ok_or(DomainError::NotFound(source))?;
        if !self.contains(target) {
            return Err(DomainError::NotFound(target));
        }
        if source_node.link_to(target).is_none() {
            return Ok(());
        }
        self.set_link_name(source, target, new_name);
        self.set_link_name(target, source, new_name);
        Ok(())
    }

    /// Categories that `source` may legally be linked to, in pre-order.
    ///
    /// Excludes the source itself, its ancestors, and its descendants, since
    /// linking along the containment axis is redundant with the tree.
    pub fn link_candidates(&self, source: CategoryId) -> DomainResult<Vec<CategoryId>> {
        if !self.contains(source) {
            return Err(DomainError::NotFound(source));
        }
        let mut excluded = self.ancestors_of(source);
        excluded.extend(self.descendants_of(source));
        excluded.insert(source);

        Ok(self
            .iter()
            .map(|(id, _, _)| id)
            .filter(|id| !excluded.contains(id))
            .collect())
    }

    /// Strip every link entry in the arena whose target is in `removed`.
    ///
    /// Called after a subtree removal so that no surviving node keeps a link
    /// pointing at a deleted id.
    #[instrument(level = "debug", skip(self, removed))]
    pub fn strip_links_to(&mut self, removed: &HashSet<CategoryId>) {
        for id in self.flatten().iter().map(|&(id, _)| id) {
            if let Some(node) = self.get_mut(id) {
                node.links.retain(|link| !removed.contains(&link.id));
            }
        }
    }

    fn push_link(&mut self, on: CategoryId, to: CategoryId, label: &str) {
        if let Some(node) = self.get_mut(on) {
            node.links.push(CategoryLink {
                id: to,
                name: label.to_string(),
            });
        }
    }

    fn drop_link(&mut self, on: CategoryId, to: CategoryId) {
        if let Some(node) = self.get_mut(on) {
            node.links.retain(|link| link.id != to);
        }
    }

    fn set_link_name(&mut self, on: CategoryId, to: CategoryId, name: &str) {
        if let Some(node) = self.get_mut(on) {
            if let Some(link) = node.links.iter_mut().find(|link| link.id == to) {
                link.name = name.to_string();
            }
        }
    }
}
