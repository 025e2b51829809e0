//! External representation of a category forest.
//!
//! Persistence is a collaborator's concern; this module only defines the
//! shape that must round-trip exactly (`id`, `name`, `parentId`, `children`,
//! `linkedIds` per node) and the conversion to and from the arena. Import
//! validates the structural invariants the arena normally guarantees by
//! construction, since serialized data comes from outside the engine.

use serde::{Deserialize, Serialize};

use crate::domain::arena::CategoryArena;
use crate::domain::entities::{CategoryId, CategoryLink, CategoryNode};
use crate::domain::error::{DomainError, DomainResult};

/// One category in the external, ownership-nested form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub children: Vec<CategorySnapshot>,
    pub linked_ids: Vec<CategoryLink>,
}

/// Export the arena as one nested snapshot per root, in root order.
pub fn export(arena: &CategoryArena) -> Vec<CategorySnapshot> {
    arena
        .roots()
        .iter()
        .map(|&root| export_node(arena, root))
        .collect()
}

fn export_node(arena: &CategoryArena, id: CategoryId) -> CategorySnapshot {
    // Ids handed out by the arena are always present in it
    let node = arena.get(id).expect("arena child list holds a missing id");
    CategorySnapshot {
        id,
        name: node.name.clone(),
        parent_id: node.parent,
        children: node
            .children
            .iter()
            .map(|&child| export_node(arena, child))
            .collect(),
        linked_ids: node.links.clone(),
    }
}

/// Rebuild an arena from nested snapshots.
///
/// Fails with `DuplicateId` when an id occurs twice anywhere in the forest,
/// with `ParentMismatch` when a node's declared `parentId` disagrees with the
/// position it is nested at, and with a link error when the imported
/// `linkedIds` violate what the link operations themselves enforce (see
/// `validate_links`).
pub fn import(snapshots: &[CategorySnapshot]) -> DomainResult<CategoryArena> {
    let mut arena = CategoryArena::new();
    for snapshot in snapshots {
        import_node(&mut arena, snapshot, None)?;
    }
    validate_links(&arena)?;
    Ok(arena)
}

/// Check that imported link entries satisfy the cross-link invariants:
/// every target exists, carries the mirror entry with the same label, and is
/// neither the node itself nor one of its ancestors or descendants.
fn validate_links(arena: &CategoryArena) -> DomainResult<()> {
    for (id, node, _) in arena.iter() {
        for link in &node.links {
            if link.id == id {
                return Err(DomainError::SelfLink(id));
            }
            let other = arena.get(link.id).ok_or(DomainError::NotFound(link.id))?;
            if arena.ancestors_of(id).contains(&link.id)
                || arena.descendants_of(id).contains(&link.id)
            {
                return Err(DomainError::RedundantLink {
                    source_id: id,
                    target_id: link.id,
                });
            }
            match other.link_to(id) {
                Some(mirror) if mirror.name == link.name => {}
                _ => {
                    return Err(DomainError::AsymmetricLink {
                        id,
                        target: link.id,
                    })
                }
            }
        }
    }
    Ok(())
}

fn import_node(
    arena: &mut CategoryArena,
    snapshot: &CategorySnapshot,
    actual_parent: Option<CategoryId>,
) -> DomainResult<()> {
    if arena.contains(snapshot.id) {
        return Err(DomainError::DuplicateId(snapshot.id));
    }
    if snapshot.parent_id != actual_parent {
        return Err(DomainError::ParentMismatch {
            id: snapshot.id,
            declared: snapshot.parent_id,
            actual: actual_parent,
        });
    }

    let mut node = CategoryNode::new(snapshot.name.clone(), actual_parent);
    node.children = snapshot.children.iter().map(|child| child.id).collect();
    node.links = snapshot.linked_ids.clone();
    arena.restore_node(snapshot.id, node);

    for child in &snapshot.children {
        import_node(arena, child, Some(snapshot.id))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_flatten_and_links() {
        let mut arena = CategoryArena::new();
        let root = arena.insert_node("root", None).unwrap();
        let child = arena.insert_node("child", Some(root)).unwrap();
        let other = arena.insert_node("other", None).unwrap();
        arena.link(child, other, Some("see also")).unwrap();

        let restored = import(&export(&arena)).unwrap();
        assert_eq!(restored.flatten(), arena.flatten());
        for (id, _) in arena.flatten() {
            assert_eq!(restored.get(id).unwrap(), arena.get(id).unwrap());
        }
    }

    #[test]
    fn test_import_rejects_duplicate_id() {
        let mut arena = CategoryArena::new();
        arena.insert_node("a", None).unwrap();
        let mut snapshots = export(&arena);
        snapshots.push(snapshots[0].clone());

        assert!(matches!(
            import(&snapshots),
            Err(DomainError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_import_rejects_one_sided_link() {
        let mut arena = CategoryArena::new();
        let a = arena.insert_node("a", None).unwrap();
        let b = arena.insert_node("b", None).unwrap();
        arena.link(a, b, Some("pair")).unwrap();

        let mut snapshots = export(&arena);
        // Keep a -> b but drop the mirror entry on b
        snapshots[1].linked_ids.clear();

        assert_eq!(
            import(&snapshots),
            Err(DomainError::AsymmetricLink { id: a, target: b })
        );
    }

    #[test]
    fn test_import_rejects_mirror_with_different_label() {
        let mut arena = CategoryArena::new();
        let a = arena.insert_node("a", None).unwrap();
        let b = arena.insert_node("b", None).unwrap();
        arena.link(a, b, Some("pair")).unwrap();

        let mut snapshots = export(&arena);
        snapshots[1].linked_ids[0].name = "other".to_string();

        assert_eq!(
            import(&snapshots),
            Err(DomainError::AsymmetricLink { id: a, target: b })
        );
    }

    #[test]
    fn test_import_rejects_link_to_absent_id() {
        let mut arena = CategoryArena::new();
        arena.insert_node("a", None).unwrap();

        let mut snapshots = export(&arena);
        let ghost = CategoryId::new();
        snapshots[0].linked_ids.push(CategoryLink {
            id: ghost,
            name: "dangling".to_string(),
        });

        assert_eq!(import(&snapshots), Err(DomainError::NotFound(ghost)));
    }

    #[test]
    fn test_import_rejects_self_link() {
        let mut arena = CategoryArena::new();
        let a = arena.insert_node("a", None).unwrap();

        let mut snapshots = export(&arena);
        snapshots[0].linked_ids.push(CategoryLink {
            id: a,
            name: "loop".to_string(),
        });

        assert_eq!(import(&snapshots), Err(DomainError::SelfLink(a)));
    }

    #[test]
    fn test_import_rejects_link_along_containment_axis() {
        let mut arena = CategoryArena::new();
        let root = arena.insert_node("root", None).unwrap();
        let child = arena.insert_node("child", Some(root)).unwrap();

        let mut snapshots = export(&arena);
        snapshots[0].linked_ids.push(CategoryLink {
            id: child,
            name: "contained".to_string(),
        });
        snapshots[0].children[0].linked_ids.push(CategoryLink {
            id: root,
            name: "contained".to_string(),
        });

        assert!(matches!(
            import(&snapshots),
            Err(DomainError::RedundantLink { .. })
        ));
    }

    #[test]
    fn test_import_rejects_inconsistent_parent_pointer() {
        let mut arena = CategoryArena::new();
        let root = arena.insert_node("root", None).unwrap();
        arena.insert_node("child", Some(root)).unwrap();

        let mut snapshots = export(&arena);
        snapshots[0].children[0].parent_id = None;

        assert!(matches!(
            import(&snapshots),
            Err(DomainError::ParentMismatch { .. })
        ));
    }
}
