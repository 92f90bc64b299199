//! Tests for the element arena: attributes, parent links, structural edits

use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use xmlmodel::domain::{DomainError, ElementId, ElementTree};
use xmlmodel::util::testing;

#[fixture]
fn plan() -> (ElementTree, ElementId) {
    testing::init_test_setup();
    let mut tree = ElementTree::with_root("plano").unwrap();
    let root = tree.root().unwrap();
    let curso = tree.append_child(root, "curso").unwrap();
    tree.get_mut(curso)
        .unwrap()
        .add_attribute("value", "Mestrado em Engenharia Informática");
    tree.append_child(curso, "curso2").unwrap();
    tree.append_child(curso, "curso3").unwrap();
    let fuc = tree.append_child(root, "fuc").unwrap();
    tree.get_mut(fuc).unwrap().add_attribute("codigo", "M4310");
    (tree, root)
}

// ============================================================
// Attributes
// ============================================================

#[test]
fn given_existing_key_when_adding_attribute_then_value_replaced_in_place() {
    let mut tree = ElementTree::new();
    let id = tree.create_element("componente").unwrap();
    let element = tree.get_mut(id).unwrap();
    element.add_attributes([("nome", "Quizzes"), ("peso", "20%")]);

    element.add_attribute("nome", "Projeto");

    let pairs: Vec<_> = element
        .attributes()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(pairs, vec![("nome", "Projeto"), ("peso", "20%")]);
}

#[test]
fn given_missing_key_when_renaming_attribute_then_nothing_changes() {
    let mut tree = ElementTree::new();
    let id = tree.create_element("curso").unwrap();
    let element = tree.get_mut(id).unwrap();
    element.add_attribute("value", "V");

    assert!(!element.rename_attribute("missing", "other"));
    assert_eq!(element.attributes().len(), 1);
    assert_eq!(element.attribute("value"), Some("V"));
}

#[test]
fn given_empty_name_when_renaming_element_then_rejected() {
    let mut tree = ElementTree::new();
    let id = tree.create_element("curso").unwrap();
    let result = tree.get_mut(id).unwrap().rename("");
    assert!(matches!(result, Err(DomainError::EmptyName)));
    assert_eq!(tree.get(id).unwrap().name(), "curso");
}

// ============================================================
// Parent / child links
// ============================================================

#[rstest]
fn given_plan_when_adding_child_then_parent_points_back(plan: (ElementTree, ElementId)) {
    let (mut tree, root) = plan;
    let extra = tree.create_element("extra").unwrap();
    assert_eq!(tree.parent(extra), None);

    tree.add_child(root, extra).unwrap();

    assert_eq!(tree.parent(extra), Some(root));
    assert_eq!(
        tree.children(root).iter().filter(|&&c| c == extra).count(),
        1
    );
    assert_eq!(tree.children(root).last(), Some(&extra));
}

#[rstest]
fn given_attached_child_when_adding_to_other_parent_then_moved(plan: (ElementTree, ElementId)) {
    let (mut tree, root) = plan;
    let curso = tree.children(root)[0];
    let fuc = tree.children(root)[1];
    let curso2 = tree.children(curso)[0];

    tree.add_child(fuc, curso2).unwrap();

    assert_eq!(tree.children(curso).len(), 1);
    assert_eq!(tree.children(fuc), &[curso2]);
    assert_eq!(tree.parent(curso2), Some(fuc));
    assert_eq!(tree.deep_element_count(root), 5);
}

#[rstest]
fn given_root_when_adding_under_descendant_then_cycle_rejected(plan: (ElementTree, ElementId)) {
    let (mut tree, root) = plan;
    let curso = tree.children(root)[0];

    let result = tree.add_child(curso, root);

    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    assert_eq!(tree.parent(root), None);
    assert_eq!(tree.root(), Some(root));
}

#[rstest]
fn given_removed_element_when_adding_child_then_unknown_element(plan: (ElementTree, ElementId)) {
    let (mut tree, root) = plan;
    let fuc = tree.children(root)[1];
    tree.remove(fuc);
    let orphan = tree.create_element("orphan").unwrap();

    let result = tree.add_child(fuc, orphan);

    assert!(matches!(result, Err(DomainError::UnknownElement(id)) if id == fuc));
}

// ============================================================
// Subtree-scoped edits
// ============================================================

#[rstest]
fn given_plan_when_removing_entities_by_name_then_subtrees_dropped(
    plan: (ElementTree, ElementId),
) {
    let (mut tree, root) = plan;
    let before = tree.len();

    let removed = tree.remove_entities_by_name(root, "curso");

    assert_eq!(removed, 1);
    assert_eq!(tree.len(), before - 3);
    assert!(tree.iter().all(|(_, e)| !e.name().starts_with("curso")));
}

#[rstest]
fn given_plan_when_renaming_entities_then_scoped_to_subtree(plan: (ElementTree, ElementId)) {
    let (mut tree, root) = plan;
    let curso = tree.children(root)[0];
    let extra = tree.append_child(root, "curso2").unwrap();

    let renamed = tree.rename_entities_by_name(curso, "curso2", "x").unwrap();

    assert_eq!(renamed, 1);
    assert_eq!(tree.get(extra).unwrap().name(), "curso2");
}

#[rstest]
fn given_plan_when_measuring_then_depth_and_count_match(plan: (ElementTree, ElementId)) {
    let (tree, root) = plan;
    assert_eq!(tree.depth(root), 3);
    assert_eq!(tree.deep_element_count(root), 5);
    assert_eq!(tree.iter().count(), tree.deep_element_count(root));
}

#[test]
fn given_deep_chain_when_traversing_then_no_stack_exhaustion() {
    let mut tree = ElementTree::with_root("n").unwrap();
    let mut current = tree.root().unwrap();
    for _ in 0..100_000 {
        current = tree.append_child(current, "n").unwrap();
    }
    let root = tree.root().unwrap();

    assert_eq!(tree.depth(root), 100_001);
    assert_eq!(tree.deep_element_count(root), 100_001);
    assert_eq!(tree.remove_entities_by_name(root, "n"), 1);
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_deep_chain_when_appending_then_each_link_is_constant_time() {
    let mut tree = ElementTree::with_root("n").unwrap();
    let mut current = tree.root().unwrap();
    let started = Instant::now();

    for _ in 0..200_000 {
        current = tree.append_child(current, "n").unwrap();
    }

    assert!(
        started.elapsed() < Duration::from_secs(10),
        "building took {:?}",
        started.elapsed()
    );
    assert_eq!(tree.len(), 200_001);
}

#[test]
fn given_leaf_when_adding_under_itself_then_cycle_rejected() {
    let mut tree = ElementTree::with_root("plano").unwrap();
    let root = tree.root().unwrap();
    let leaf = tree.append_child(root, "curso").unwrap();

    let result = tree.add_child(leaf, leaf);

    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    assert_eq!(tree.parent(leaf), Some(root));
}

#[test]
fn given_inner_element_when_adding_under_own_descendant_then_cycle_rejected() {
    let mut tree = ElementTree::with_root("plano").unwrap();
    let root = tree.root().unwrap();
    let curso = tree.append_child(root, "curso").unwrap();
    let deep = tree.append_child(curso, "curso2").unwrap();
    let deeper = tree.append_child(deep, "curso3").unwrap();

    let result = tree.add_child(deeper, curso);

    assert!(matches!(result, Err(DomainError::CycleDetected { .. })));
    assert_eq!(tree.parent(curso), Some(root));
}
