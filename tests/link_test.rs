//! Tests for the cross-link relation through the service surface

use rstest::{fixture, rstest};

use catree::util::testing::init_test_setup;
use catree::{ApplicationError, CategoryId, DomainError, TaxonomyService};

struct Fixture {
    taxonomy: TaxonomyService,
    root: CategoryId,
    child: CategoryId,
    other_root: CategoryId,
    other_child: CategoryId,
}

#[fixture]
fn forest() -> Fixture {
    init_test_setup();
    let mut taxonomy = TaxonomyService::new();
    let root = taxonomy.add_category(None, "Demographics").unwrap();
    let child = taxonomy.add_category(Some(root), "Age").unwrap();
    let other_root = taxonomy.add_category(None, "Geography").unwrap();
    let other_child = taxonomy.add_category(Some(other_root), "District").unwrap();
    Fixture {
        taxonomy,
        root,
        child,
        other_root,
        other_child,
    }
}

// ============================================================
// Symmetry
// ============================================================

#[rstest]
fn given_two_branches_when_linking_then_both_endpoints_carry_the_entry(mut forest: Fixture) {
    forest
        .taxonomy
        .link(forest.child, forest.other_child, Some("correlated"))
        .unwrap();

    let a = forest.taxonomy.find(forest.child).unwrap();
    let b = forest.taxonomy.find(forest.other_child).unwrap();
    assert_eq!(a.link_to(forest.other_child).unwrap().name, "correlated");
    assert_eq!(b.link_to(forest.child).unwrap().name, "correlated");
}

#[rstest]
fn given_no_explicit_name_when_linking_then_label_derives_from_current_names(mut forest: Fixture) {
    forest
        .taxonomy
        .link(forest.child, forest.other_child, None)
        .unwrap();
    let label = &forest
        .taxonomy
        .find(forest.child)
        .unwrap()
        .link_to(forest.other_child)
        .unwrap()
        .name;
    assert_eq!(label, "Age - District");
}

#[rstest]
fn given_rename_after_linking_then_auto_derived_label_stays_stale(mut forest: Fixture) {
    forest
        .taxonomy
        .link(forest.child, forest.other_child, None)
        .unwrap();
    forest.taxonomy.rename_category(forest.child, "Cohort").unwrap();

    let label = &forest
        .taxonomy
        .find(forest.other_child)
        .unwrap()
        .link_to(forest.child)
        .unwrap()
        .name;
    assert_eq!(label, "Age - District");
}

// ============================================================
// Idempotence
// ============================================================

#[rstest]
fn given_existing_link_when_linking_again_then_single_entry_pair_remains(mut forest: Fixture) {
    forest
        .taxonomy
        .link(forest.child, forest.other_child, Some("x"))
        .unwrap();
    forest
        .taxonomy
        .link(forest.child, forest.other_child, Some("y"))
        .unwrap();

    let a = forest.taxonomy.find(forest.child).unwrap();
    assert_eq!(a.links.len(), 1);
    assert_eq!(a.link_to(forest.other_child).unwrap().name, "x");
}

#[rstest]
fn given_double_link_when_unlinking_once_then_relation_fully_removed(mut forest: Fixture) {
    forest
        .taxonomy
        .link(forest.child, forest.other_child, Some("x"))
        .unwrap();
    forest
        .taxonomy
        .link(forest.other_child, forest.child, Some("x"))
        .unwrap();
    forest
        .taxonomy
        .unlink(forest.child, forest.other_child)
        .unwrap();

    assert!(forest.taxonomy.find(forest.child).unwrap().links.is_empty());
    assert!(forest
        .taxonomy
        .find(forest.other_child)
        .unwrap()
        .links
        .is_empty());
}

// ============================================================
// Rename-link
// ============================================================

#[rstest]
fn given_linked_pair_when_renaming_link_then_both_labels_update(mut forest: Fixture) {
    forest
        .taxonomy
        .link(forest.root, forest.other_root, Some("old"))
        .unwrap();
    forest
        .taxonomy
        .rename_link(forest.other_root, forest.root, "new")
        .unwrap();

    let a = forest.taxonomy.find(forest.root).unwrap();
    let b = forest.taxonomy.find(forest.other_root).unwrap();
    assert_eq!(a.link_to(forest.other_root).unwrap().name, "new");
    assert_eq!(b.link_to(forest.root).unwrap().name, "new");
}

#[rstest]
fn given_unlinked_pair_when_renaming_link_then_noop(mut forest: Fixture) {
    forest
        .taxonomy
        .rename_link(forest.root, forest.other_root, "new")
        .unwrap();
    assert!(forest.taxonomy.find(forest.root).unwrap().links.is_empty());
}

// ============================================================
// Invariant enforcement
// ============================================================

#[rstest]
fn given_same_category_when_linking_to_itself_then_rejected(mut forest: Fixture) {
    assert_eq!(
        forest.taxonomy.link(forest.root, forest.root, None),
        Err(ApplicationError::Domain(DomainError::SelfLink(forest.root)))
    );
}

#[rstest]
fn given_ancestor_and_descendant_when_linking_then_rejected(mut forest: Fixture) {
    assert!(matches!(
        forest.taxonomy.link(forest.root, forest.child, None),
        Err(ApplicationError::Domain(DomainError::RedundantLink { .. }))
    ));
    assert!(matches!(
        forest.taxonomy.link(forest.child, forest.root, None),
        Err(ApplicationError::Domain(DomainError::RedundantLink { .. }))
    ));
}

#[rstest]
fn given_missing_endpoint_when_linking_then_not_found(mut forest: Fixture) {
    let ghost = CategoryId::new();
    assert_eq!(
        forest.taxonomy.link(forest.root, ghost, None),
        Err(ApplicationError::Domain(DomainError::NotFound(ghost)))
    );
}

#[rstest]
fn given_source_when_enumerating_candidates_then_containment_axis_is_excluded(forest: Fixture) {
    let candidates = forest.taxonomy.link_candidates(forest.child).unwrap();
    assert_eq!(candidates, vec![forest.other_root, forest.other_child]);
}
