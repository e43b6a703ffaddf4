// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use preorder_tree::{Error, NodeId, Tree};

/// Builds the reference tree used throughout these tests:
///
/// ```text
/// r
/// ├── a
/// │   └── a1
/// └── b
/// ```
fn sample_tree() -> (Tree<&'static str>, NodeId, NodeId, NodeId, NodeId) {
	let mut tree = Tree::new();

	let r = tree.insert_root("r").expect("the tree starts out empty");
	let a = tree.insert(r, "a").expect("r is live");
	let b = tree.insert(r, "b").expect("r is live");
	let a1 = tree.insert(a, "a1").expect("a is live");

	(tree, r, a, b, a1)
}

fn preorder_values<'tree>(tree: &'tree Tree<&'static str>) -> Vec<&'static str> {
	tree.values().copied().collect()
}

#[test]
fn preorder_visits_parents_before_descendants() {
	let (tree, r, a, _, _) = sample_tree();

	assert_eq!(preorder_values(&tree), ["r", "a", "a1", "b"]);

	assert_eq!(tree.len(), 4);
	assert_eq!(tree.count(r), 4);
	assert_eq!(tree.count(a), 2);
	assert_eq!(tree.child_count(r), 2);
}

#[test]
fn preorder_visits_each_node_exactly_once() {
	let (tree, ..) = sample_tree();

	let visited: Vec<NodeId> = tree.iter().collect();
	assert_eq!(visited.len(), tree.len());

	let unique: std::collections::HashSet<NodeId> = visited.iter().copied().collect();
	assert_eq!(unique.len(), tree.len());
}

#[test]
fn empty_tree_iterates_nothing() {
	let tree: Tree<&str> = Tree::new();

	assert!(tree.is_empty());
	assert_eq!(tree.len(), 0);
	assert_eq!(tree.iter().count(), 0);
	assert_eq!(tree.root(), None);
}

#[test]
fn removal_resumes_at_the_next_preorder_node() {
	let (mut tree, _, a, b, a1) = sample_tree();

	let resume = tree.remove(a);
	assert_eq!(resume, Some(b));
	assert_eq!(tree[b], "b");

	assert_eq!(tree.len(), 2);
	assert_eq!(preorder_values(&tree), ["r", "b"]);

	// The whole subtree went stale.
	assert!(!tree.contains(a));
	assert!(!tree.contains(a1));
	assert_eq!(tree.get(a), None);
	assert_eq!(tree.count(a), 0);
}

#[test]
fn removing_the_last_preorder_node_exhausts_the_traversal() {
	let (mut tree, _, _, b, _) = sample_tree();

	assert_eq!(tree.remove(b), None);
	assert_eq!(preorder_values(&tree), ["r", "a", "a1"]);
}

#[test]
fn removing_the_root_clears_the_tree() {
	let (mut tree, r, ..) = sample_tree();

	assert_eq!(tree.remove(r), None);

	assert!(tree.is_empty());
	assert_eq!(tree.len(), 0);
	assert!(!tree.contains(r));
}

#[test]
fn removing_a_stale_handle_is_a_noop_that_returns_the_root() {
	let (mut tree, r, a, _, _) = sample_tree();

	tree.remove(a);
	let len = tree.len();

	assert_eq!(tree.remove(a), Some(r));
	assert_eq!(tree.len(), len);
}

#[test]
fn removal_by_value_erases_the_first_preorder_match() {
	let (mut tree, _, _, b, _) = sample_tree();

	assert_eq!(tree.remove_value(&"a"), Some(b));
	assert_eq!(preorder_values(&tree), ["r", "b"]);

	assert_eq!(tree.remove_value(&"zzz"), None);
	assert_eq!(tree.len(), 2);
}

#[test]
fn find_scans_in_preorder() {
	let (tree, _, _, _, a1) = sample_tree();

	let found = tree.find(&"a1").expect("a1 is in the tree");
	assert_eq!(found, a1);
	assert_eq!(tree[found], "a1");

	assert_eq!(tree.find(&"zzz"), None);
}

#[test]
fn find_from_is_bounded_to_the_subtree() {
	let (tree, _, a, _, a1) = sample_tree();

	// "b" is outside a's subtree, so the bounded scan must not see it.
	assert_eq!(tree.find_from(&"b", a), None);
	assert_eq!(tree.find_from(&"a1", a), Some(a1));
	// The scan includes the starting node itself.
	assert_eq!(tree.find_from(&"a", a), Some(a));
}

#[test]
fn child_lookup_round_trips_with_index_of() {
	let (tree, r, a, b, a1) = sample_tree();

	assert_eq!(tree.child_at(r, 1), Ok(b));
	assert_eq!(tree.index_of(b), Some(1));

	assert_eq!(tree.child_at(r, 0), Ok(a));
	assert_eq!(tree.index_of(a), Some(0));
	assert_eq!(tree.index_of(a1), Some(0));

	// The root has no position within any child sequence.
	assert_eq!(tree.index_of(r), None);
}

#[test]
fn child_lookup_reports_contract_violations() {
	let (mut tree, r, a, _, _) = sample_tree();

	assert_eq!(tree.child_at(r, 2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));

	tree.remove(a);
	assert_eq!(tree.child_at(a, 0), Err(Error::StaleHandle));
	assert_eq!(tree.index_of(a), None);
}

#[test]
fn emplacing_a_second_root_is_a_reported_noop() {
	let mut tree = Tree::new();

	let root = tree.insert_root("r").expect("the tree starts out empty");

	assert_eq!(tree.insert_root("imposter"), Err(Error::RootOccupied { existing: root }));

	// The existing tree is untouched.
	assert_eq!(tree.len(), 1);
	assert_eq!(tree[root], "r");
}

#[test]
fn inserting_under_a_stale_parent_fails_without_effect() {
	let (mut tree, _, a, _, _) = sample_tree();

	tree.remove(a);
	let len = tree.len();

	assert_eq!(tree.insert(a, "orphan"), Err(Error::StaleHandle));
	assert_eq!(tree.len(), len);

	let mut empty: Tree<&str> = Tree::new();
	assert_eq!(empty.insert(a, "orphan"), Err(Error::StaleHandle));
	assert!(empty.is_empty());
}

#[test]
fn positional_insertion_shifts_following_siblings() {
	let (mut tree, r, a, b, _) = sample_tree();

	let front = tree.insert_at(r, 0, "front").expect("position 0 is in range");
	let middle = tree.insert_at(r, 2, "middle").expect("position 2 is in range");

	let children: Vec<NodeId> = tree.children(r).collect();
	assert_eq!(children, [front, a, middle, b]);
	assert_eq!(tree.index_of(middle), Some(2));
	assert_eq!(tree.index_of(b), Some(3));

	// One-past-the-end appends; further than that is out of range.
	let back = tree.insert_at(r, 4, "back").expect("one past the end appends");
	assert_eq!(tree.index_of(back), Some(4));
	assert_eq!(
		tree.insert_at(r, 7, "beyond"),
		Err(Error::IndexOutOfBounds { index: 7, len: 5 })
	);

	assert_eq!(tree.count(r), 7);
}

#[test]
fn insertion_raises_every_ancestor_count_once() {
	let (mut tree, r, a, _, a1) = sample_tree();

	tree.insert(a1, "a1x").expect("a1 is live");

	assert_eq!(tree.count(a1), 2);
	assert_eq!(tree.count(a), 3);
	assert_eq!(tree.count(r), 5);
}

#[test]
fn removal_lowers_every_ancestor_count_once() {
	let (mut tree, r, a, b, a1) = sample_tree();

	tree.insert(a1, "a1x").expect("a1 is live");
	tree.remove(a1);

	assert_eq!(tree.count(a), 1);
	assert_eq!(tree.count(r), 3);
	assert_eq!(tree.count(b), 1);
}

#[test]
fn children_iterates_in_sibling_order_without_descending() {
	let (tree, r, a, b, a1) = sample_tree();

	let children: Vec<NodeId> = tree.children(r).collect();
	assert_eq!(children, [a, b]);

	// a1 is a grandchild of r; the child iterator must not reach it.
	assert!(!children.contains(&a1));

	assert_eq!(tree.children(r).len(), 2);
	assert_eq!(tree.children(r).rev().collect::<Vec<_>>(), [b, a]);

	// Leaves and stale handles yield empty iterators.
	assert_eq!(tree.children(a1).count(), 0);
}

#[test]
fn children_of_a_stale_handle_is_empty() {
	let (mut tree, _, a, _, _) = sample_tree();

	tree.remove(a);
	assert_eq!(tree.children(a).count(), 0);
}

#[test]
fn handles_outside_an_edited_subtree_stay_valid() {
	let (mut tree, r, a, b, a1) = sample_tree();

	let b1 = tree.insert(b, "b1").expect("b is live");
	tree.remove(a);

	// Everything outside a's subtree keeps its identity and value.
	assert_eq!(tree[r], "r");
	assert_eq!(tree[b], "b");
	assert_eq!(tree[b1], "b1");
	assert_eq!(tree.index_of(b), Some(0));
	assert_eq!(tree.parent(b1), Some(b));

	assert!(!tree.contains(a));
	assert!(!tree.contains(a1));
}

#[test]
fn deep_copy_matches_structure_but_not_identity() {
	let (tree, ..) = sample_tree();
	let copy = tree.clone();

	assert_eq!(preorder_values(&copy), preorder_values(&tree));
	assert_eq!(copy.len(), tree.len());

	for (original, copied) in tree.iter().zip(copy.iter()) {
		assert_eq!(tree[original], copy[copied]);
		assert_eq!(tree.count(original), copy.count(copied));
		assert_eq!(tree.child_count(original), copy.child_count(copied));
		assert_eq!(tree.index_of(original), copy.index_of(copied));
	}
}

#[test]
fn mutating_a_deep_copy_never_affects_the_original() {
	let (tree, ..) = sample_tree();
	let mut copy = tree.clone();

	let copied_a = copy.find(&"a").expect("the copy contains a");
	copy.remove(copied_a);
	let copied_b = copy.find(&"b").expect("the copy contains b");
	copy[copied_b] = "mutated";

	assert_eq!(preorder_values(&tree), ["r", "a", "a1", "b"]);
	assert_eq!(preorder_values(&copy), ["r", "mutated"]);
}

#[test]
fn cloning_an_empty_tree_yields_an_empty_tree() {
	let tree: Tree<&str> = Tree::new();

	assert!(tree.clone().is_empty());
}

#[test]
fn payloads_are_mutable_through_handles() {
	let (mut tree, _, a, _, _) = sample_tree();

	*tree.get_mut(a).expect("a is live") = "renamed";
	assert_eq!(tree[a], "renamed");

	tree[a] = "renamed again";
	assert_eq!(tree.get(a), Some(&"renamed again"));
}

#[test]
fn clear_empties_the_tree_and_stales_every_handle() {
	let (mut tree, r, a, b, a1) = sample_tree();

	tree.clear();

	assert!(tree.is_empty());
	assert_eq!(tree.len(), 0);
	for node in [r, a, b, a1] {
		assert!(!tree.contains(node));
	}

	// A fresh root can be emplaced after clearing.
	tree.insert_root("again").expect("the tree was cleared");
	assert_eq!(tree.len(), 1);
}

#[test]
fn preorder_from_a_subtree_never_leaves_it() {
	let (tree, _, a, b, a1) = sample_tree();

	let subtree: Vec<NodeId> = tree.preorder(a).collect();
	assert_eq!(subtree, [a, a1]);
	assert!(!subtree.contains(&b));
}
