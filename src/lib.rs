// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An ordered k-ary tree with counted subtrees and pre-order traversal,
//! backed by a generational arena.
//!
//! The tree is unbounded in arity and depth, and never reorders siblings:
//! the child sequence of every node is insertion (or positional-insertion)
//! order, which makes the container suitable for backing hierarchical
//! displays where row order is meaningful. Every node carries the size of
//! its own subtree, kept up to date incrementally, so the total size of the
//! tree and of any subtree is available in constant time.
//!
//! Nodes are addressed through [`NodeId`] handles: small, [`Copy`],
//! generation-checked indexes into the [arena] that stay valid across
//! unrelated edits and go stale when the node they refer to is removed.
//!
//! # Examples
//! ```
//! use preorder_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! let root = tree.insert_root("suite").unwrap();
//! let case = tree.insert(root, "case").unwrap();
//! tree.insert(case, "assertion").unwrap();
//! tree.insert(root, "fixture").unwrap();
//!
//! let values: Vec<_> = tree.values().copied().collect();
//! assert_eq!(values, ["suite", "case", "assertion", "fixture"]);
//!
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.count(case), 2);
//! assert_eq!(tree.child_count(root), 2);
//! ```
//!
//! [arena]: generational_arena::Arena

#![warn(clippy::missing_const_for_fn)]

pub mod iter;

mod node;

use std::ops::{Index, IndexMut};

use generational_arena::Arena;
use thiserror::Error;

use crate::node::Node;

pub type ArenaIndex = generational_arena::Index;

/// A stable, opaque handle to a node in a [tree].
///
/// Handles are cheap to copy and compare, and stay valid across every edit
/// that does not remove the node they refer to (or one of its ancestors).
/// Because the underlying [arena] is generational, a handle whose node has
/// been removed does not silently resolve to whatever node reuses the slot:
/// it goes *stale*, and the tree's lookup operations report it as such.
///
/// A handle may only be used with the tree that issued it. Using it with
/// another tree is a caller error; the generation check catches this in
/// most, but not all, cases.
///
/// [tree]: Tree
/// [arena]: generational_arena::Arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(ArenaIndex);

impl NodeId {
	#[inline(always)]
	pub(crate) const fn new(idx: ArenaIndex) -> Self {
		Self(idx)
	}

	#[inline(always)]
	pub(crate) const fn idx(self) -> ArenaIndex {
		self.0
	}
}

/// The ways a structural edit or lookup can fail.
///
/// None of these are fatal: they report either a no-op condition the caller
/// is expected to branch on ([`RootOccupied`], [`StaleHandle`]) or a caller
/// contract violation ([`IndexOutOfBounds`]).
///
/// [`RootOccupied`]: Error::RootOccupied
/// [`StaleHandle`]: Error::StaleHandle
/// [`IndexOutOfBounds`]: Error::IndexOutOfBounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
	/// A root was emplaced into a tree that already has one.
	///
	/// The existing root is untouched; its handle is carried here so the
	/// caller can keep using it.
	#[error("the tree already has a root node")]
	RootOccupied {
		/// The handle of the root that was already in place.
		existing: NodeId,
	},

	/// A handle did not resolve to a live node in this tree.
	///
	/// Either the node (or an ancestor of it) has since been removed, or the
	/// handle was issued by a different tree.
	#[error("the handle does not refer to a live node in this tree")]
	StaleHandle,

	/// A child index was outside the parent's child sequence.
	#[error("index {index} is out of bounds for {len} children")]
	IndexOutOfBounds { index: usize, len: usize },
}

/// An ordered k-ary tree addressed through stable [`NodeId`] handles.
///
/// The tree owns all of its nodes, transitively through the root: removing
/// a node removes its entire subtree, and dropping or [clearing] the tree
/// destroys everything. Each node records the inclusive size of its subtree,
/// maintained by walking the ownership chain to the root on every edit, so
/// [`len`] and [`count`] are constant time.
///
/// A tree is a plain single-owner value: moving it is `O(1)` and transfers
/// every node with handles intact, while [cloning] it deep-copies the whole
/// structure into fresh handles. It is not internally synchronized; shared
/// references permit concurrent reads, and mutation requires exclusive
/// access, exactly as the borrow checker enforces.
///
/// [clearing]: Self::clear
/// [cloning]: Clone::clone
/// [`len`]: Self::len
/// [`count`]: Self::count
#[derive(Debug)]
pub struct Tree<T> {
	arena: Arena<Node<T>>,

	root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
	#[inline(always)]
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Tree<T> {
	/// Creates a new, empty tree.
	pub fn new() -> Self {
		Self {
			arena: Arena::new(),

			root: None,
		}
	}

	/// Creates a new, empty tree with the given initial `capacity`.
	///
	/// A number of nodes equal to the `capacity` may be inserted without
	/// allocating further memory for the arena itself.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			arena: Arena::with_capacity(capacity),

			root: None,
		}
	}

	/// Returns whether the tree has no nodes.
	#[inline(always)]
	pub const fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the total number of nodes in the tree.
	///
	/// This is the root's inclusive subtree count, so it is `O(1)`.
	#[inline]
	pub fn len(&self) -> usize {
		match self.root {
			Some(root) => self.arena[root.idx()].count,
			None => 0,
		}
	}

	/// Returns the handle of the root node, or [`None`] if the tree is
	/// empty.
	#[inline(always)]
	pub const fn root(&self) -> Option<NodeId> {
		self.root
	}

	/// Returns whether the given handle resolves to a live node in this
	/// tree.
	#[inline(always)]
	pub fn contains(&self, node: NodeId) -> bool {
		self.arena.contains(node.idx())
	}

	/// Removes every node from the tree, leaving it empty.
	///
	/// All outstanding handles into this tree go stale.
	pub fn clear(&mut self) {
		self.arena.clear();
		self.root = None;
	}

	/// Returns a reference to the payload of the given node, or [`None`] if
	/// the handle is stale.
	#[inline]
	pub fn get(&self, node: NodeId) -> Option<&T> {
		self.arena.get(node.idx()).map(|node| &node.data)
	}

	/// Returns a mutable reference to the payload of the given node, or
	/// [`None`] if the handle is stale.
	#[inline]
	pub fn get_mut(&mut self, node: NodeId) -> Option<&mut T> {
		self.arena.get_mut(node.idx()).map(|node| &mut node.data)
	}

	/// Returns the handle of the given node's parent.
	///
	/// [`None`] is returned for the root node, which has no parent, and for
	/// stale handles.
	#[inline]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.node(node)?.parent
	}

	/// Returns the number of nodes in the subtree rooted at the given node,
	/// inclusive of the node itself.
	///
	/// This is the amount [`len`] would shrink by if the node were
	/// [removed]. Stale handles count as `0`.
	///
	/// [`len`]: Self::len
	/// [removed]: Self::remove
	#[inline]
	pub fn count(&self, node: NodeId) -> usize {
		self.node(node).map_or(0, |node| node.count)
	}

	/// Returns the number of direct children of the given node.
	///
	/// Descendants further down are not counted; see [`count`] for the
	/// inclusive subtree size. Stale handles count as `0`.
	///
	/// [`count`]: Self::count
	#[inline]
	pub fn child_count(&self, parent: NodeId) -> usize {
		self.node(parent).map_or(0, |node| node.children.len())
	}

	/// Returns the handle of the child of `parent` at the given `index`.
	///
	/// This is the `(parent, row)` to handle direction of the mapping that
	/// hierarchical display layers need; [`parent`] and [`index_of`] recover
	/// the opposite direction. The mapping is computed from the current
	/// structure on every call, so it is always consistent with the most
	/// recent edit.
	///
	/// # Errors
	/// [`Error::StaleHandle`] if `parent` does not resolve;
	/// [`Error::IndexOutOfBounds`] if `index` is not within the parent's
	/// child sequence.
	///
	/// [`parent`]: Self::parent
	/// [`index_of`]: Self::index_of
	pub fn child_at(&self, parent: NodeId, index: usize) -> Result<NodeId, Error> {
		let node = self.node(parent).ok_or(Error::StaleHandle)?;

		node.children
			.get(index)
			.copied()
			.ok_or(Error::IndexOutOfBounds {
				index,
				len: node.children.len(),
			})
	}

	/// Returns the position of the given node within its parent's child
	/// sequence, found by linear scan of its siblings.
	///
	/// [`None`] is returned for the root node, which has no position, and
	/// for stale handles.
	pub fn index_of(&self, node: NodeId) -> Option<usize> {
		let parent = self.parent(node)?;

		self.arena[parent.idx()]
			.children
			.iter()
			.position(|&child| child == node)
	}

	/// Emplaces the root node, constructed from `data`.
	///
	/// The root can only be emplaced once: if the tree already has one, the
	/// tree is left untouched and [`Error::RootOccupied`] reports the
	/// existing root's handle. This is a reported condition, not a fatal
	/// one.
	///
	/// # Errors
	/// [`Error::RootOccupied`] if the tree already has a root.
	pub fn insert_root(&mut self, data: T) -> Result<NodeId, Error> {
		match self.root {
			Some(existing) => Err(Error::RootOccupied { existing }),

			None => {
				let root = NodeId::new(self.arena.insert(Node::new(data, None)));
				self.root = Some(root);

				Ok(root)
			},
		}
	}

	/// Inserts `data` as the last child of `parent`.
	///
	/// On success the new node's handle is returned, and the inclusive
	/// subtree count of `parent` and of every ancestor up to the root grows
	/// by one. On failure the tree is left exactly as it was.
	///
	/// # Errors
	/// [`Error::StaleHandle`] if the tree is empty or `parent` does not
	/// resolve to a live node in this tree.
	///
	/// # See also
	/// [`insert_at`] inserts at a specific sibling position instead of
	/// appending.
	///
	/// [`insert_at`]: Self::insert_at
	pub fn insert(&mut self, parent: NodeId, data: T) -> Result<NodeId, Error> {
		let len = self.node(parent).ok_or(Error::StaleHandle)?.children.len();

		self.insert_at(parent, len, data)
	}

	/// Inserts `data` as a child of `parent` at the given sibling position.
	///
	/// `index` may be anywhere in `[0, child_count(parent)]`; existing
	/// children at and after it shift one position towards the back. On
	/// failure the tree is left exactly as it was.
	///
	/// # Errors
	/// [`Error::StaleHandle`] if `parent` does not resolve;
	/// [`Error::IndexOutOfBounds`] if `index > child_count(parent)`, which
	/// is a caller error rather than a runtime condition.
	pub fn insert_at(&mut self, parent: NodeId, index: usize, data: T) -> Result<NodeId, Error> {
		let len = self.node(parent).ok_or(Error::StaleHandle)?.children.len();

		if index > len {
			return Err(Error::IndexOutOfBounds { index, len });
		}

		let child = NodeId::new(self.arena.insert(Node::new(data, Some(parent))));
		self.arena[parent.idx()].children.insert(index, child);

		self.raise_counts(parent, 1);

		Ok(child)
	}

	/// Removes the subtree rooted at the given node, including the node
	/// itself.
	///
	/// Every handle into the removed subtree goes stale; all other handles
	/// keep their validity. The inclusive subtree counts of the removed
	/// node's ancestors shrink by the subtree's [`count`], exactly once.
	///
	/// The returned handle is the node that would have been visited next in
	/// pre-order after the removed subtree, so a caller walking the tree can
	/// resume meaningfully after a removal. [`None`] is returned when the
	/// traversal would be exhausted.
	///
	/// Removing the root [clears] the whole tree and returns [`None`].
	/// Removing a stale handle is a no-op that returns the root's handle.
	///
	/// [`count`]: Self::count
	/// [clears]: Self::clear
	pub fn remove(&mut self, node: NodeId) -> Option<NodeId> {
		if !self.contains(node) {
			return self.root;
		}

		if self.root == Some(node) {
			self.clear();
			return None;
		}

		// The resume point has to be found before unlinking: afterwards
		// there is no longer enough structure left to compute it.
		let resume = self.next_outside(node);

		let parent = self.arena[node.idx()]
			.parent
			.expect("non-root nodes always have a parent");
		let amount = self.arena[node.idx()].count;

		let position = self
			.index_of(node)
			.expect("a live non-root node appears in its parent's children");
		self.arena[parent.idx()].children.remove(position);

		self.lower_counts(parent, amount);
		self.free_subtree(node);

		resume
	}

	/// Removes the subtree rooted at the first node, in pre-order, whose
	/// payload compares equal to `value`.
	///
	/// If no node matches, nothing is removed and [`None`] is returned.
	/// Otherwise this behaves exactly like [`remove`].
	///
	/// [`remove`]: Self::remove
	pub fn remove_value(&mut self, value: &T) -> Option<NodeId>
	where
		T: PartialEq,
	{
		let node = self.find(value)?;

		self.remove(node)
	}

	/// Returns the handle of the first node, in pre-order, whose payload
	/// compares equal to `value`.
	///
	/// The scan is linear in the size of the tree. [`None`] is returned when
	/// no node matches or the tree is empty.
	///
	/// # See also
	/// [`find_from`] restricts the scan to a subtree.
	///
	/// [`find_from`]: Self::find_from
	pub fn find(&self, value: &T) -> Option<NodeId>
	where
		T: PartialEq,
	{
		let root = self.root?;

		self.find_from(value, root)
	}

	/// Returns the handle of the first node, in pre-order, within the
	/// subtree rooted at `start` (inclusive) whose payload compares equal to
	/// `value`.
	///
	/// The scan is linear in the size of that subtree. [`None`] is returned
	/// when no node matches or `start` is stale.
	pub fn find_from(&self, value: &T, start: NodeId) -> Option<NodeId>
	where
		T: PartialEq,
	{
		self.preorder(start).find(|&node| self.arena[node.idx()].data == *value)
	}

	/// Returns a pre-order iterator over the handles of every node in the
	/// tree, starting at the root.
	///
	/// Constructing the iterator is `O(1)`; a fresh one can be made at any
	/// time, since the iterator is a forward-only cursor and cannot be
	/// restarted in place.
	#[inline]
	pub fn iter(&self) -> iter::PreOrder<'_, T> {
		iter::PreOrder::new(self, self.root)
	}

	/// Returns a pre-order iterator over the handles of the subtree rooted
	/// at `start`, inclusive of `start` itself.
	///
	/// The traversal never leaves the subtree. A stale `start` yields an
	/// empty iterator.
	#[inline]
	pub fn preorder(&self, start: NodeId) -> iter::PreOrder<'_, T> {
		iter::PreOrder::new(self, self.contains(start).then_some(start))
	}

	/// Returns a pre-order iterator over references to every payload in the
	/// tree.
	#[inline]
	pub fn values(&self) -> iter::Values<'_, T> {
		iter::Values::new(self.iter())
	}

	/// Returns an iterator over the handles of the direct children of
	/// `parent`, in child-sequence order.
	///
	/// The iterator never descends past the direct children. A stale
	/// `parent` yields an empty iterator.
	#[inline]
	pub fn children(&self, parent: NodeId) -> iter::Children<'_> {
		iter::Children::new(self.node(parent).map(|node| node.children.iter()))
	}

	#[inline(always)]
	pub(crate) fn node(&self, node: NodeId) -> Option<&Node<T>> {
		self.arena.get(node.idx())
	}

	/// Walks the ownership chain from `from` up to the root, growing each
	/// node's inclusive subtree count by `amount`.
	fn raise_counts(&mut self, from: NodeId, amount: usize) {
		let mut cursor = Some(from);

		while let Some(node) = cursor {
			let node = &mut self.arena[node.idx()];

			node.count += amount;
			cursor = node.parent;
		}
	}

	/// Walks the ownership chain from `from` up to the root, shrinking each
	/// node's inclusive subtree count by `amount`.
	fn lower_counts(&mut self, from: NodeId, amount: usize) {
		let mut cursor = Some(from);

		while let Some(node) = cursor {
			let node = &mut self.arena[node.idx()];

			node.count -= amount;
			cursor = node.parent;
		}
	}

	/// Returns the next node in pre-order after the whole subtree rooted at
	/// `node`: the nearest following sibling of `node` or of one of its
	/// ancestors.
	fn next_outside(&self, node: NodeId) -> Option<NodeId> {
		let mut cursor = node;

		while let Some(parent) = self.arena[cursor.idx()].parent {
			let position = self.index_of(cursor)?;

			if let Some(&sibling) = self.arena[parent.idx()].children.get(position + 1) {
				return Some(sibling);
			}

			cursor = parent;
		}

		None
	}

	/// Frees every arena slot in the subtree rooted at `node`.
	///
	/// The node must already be unlinked from its parent. Uses an explicit
	/// stack so that deep subtrees cannot overflow the call stack.
	fn free_subtree(&mut self, node: NodeId) {
		let mut stack = vec![node];

		while let Some(next) = stack.pop() {
			let node = self
				.arena
				.remove(next.idx())
				.expect("subtree nodes are live until freed here");

			stack.extend(node.children);
		}
	}
}

impl<T> Index<NodeId> for Tree<T> {
	type Output = T;

	/// Returns a reference to the payload of the given node.
	///
	/// # Panics
	/// This method will panic if the handle is stale.
	///
	/// # See also
	/// For a fallible version, see [`get`].
	///
	/// [`get`]: Tree::get
	#[inline(always)]
	fn index(&self, node: NodeId) -> &Self::Output {
		&self.arena[node.idx()].data
	}
}

impl<T> IndexMut<NodeId> for Tree<T> {
	/// Returns a mutable reference to the payload of the given node.
	///
	/// # Panics
	/// This method will panic if the handle is stale.
	///
	/// # See also
	/// For a fallible version, see [`get_mut`].
	///
	/// [`get_mut`]: Tree::get_mut
	#[inline(always)]
	fn index_mut(&mut self, node: NodeId) -> &mut Self::Output {
		&mut self.arena[node.idx()].data
	}
}

impl<T: Clone> Clone for Tree<T> {
	/// Deep-copies the tree.
	///
	/// The copy has the same structure, payloads, and subtree counts, but
	/// entirely new node identities: handles are only meaningful with the
	/// tree that issued them, and mutating either tree never affects the
	/// other. Linear in the size of the tree.
	fn clone(&self) -> Self {
		let mut clone = Self::with_capacity(self.len());

		let Some(root) = self.root else {
			return clone;
		};

		let new_root = clone
			.insert_root(self.arena[root.idx()].data.clone())
			.expect("the clone starts out empty");

		// Pairs of (source node, already-copied counterpart) still awaiting
		// their children. An explicit stack, so that deep trees cannot
		// overflow the call stack.
		let mut stack = vec![(root, new_root)];

		while let Some((source, target)) = stack.pop() {
			for &child in &self.arena[source.idx()].children {
				let copied = clone
					.insert(target, self.arena[child.idx()].data.clone())
					.expect("the copied counterpart is live");

				stack.push((child, copied));
			}
		}

		clone
	}
}
