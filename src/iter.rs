// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
	collections::vec_deque,
	iter::{Copied, FusedIterator},
};

use crate::{NodeId, Tree};

/// An iterator over the [handles] of a subtree's nodes, in pre-order.
///
/// Pre-order means every node is yielded strictly before any of its
/// descendants, siblings in child-sequence order. The traversal keeps an
/// explicit path stack of child cursors, one per level currently being
/// descended, instead of recursing: a full traversal is `O(n)` with `O(1)`
/// amortized cost per step, and arbitrarily deep trees cannot overflow the
/// call stack.
///
/// This iterator is returned by [`Tree::iter`] and [`Tree::preorder`].
///
/// [handles]: NodeId
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PreOrder<'tree, T> {
	pub(crate) tree: &'tree Tree<T>,

	/// The node the cursor currently references; `None` once the traversal
	/// is exhausted.
	next: Option<NodeId>,
	/// One child cursor per ancestor level between the starting node and
	/// `next`, each parked just past the child it most recently yielded.
	stack: Vec<vec_deque::Iter<'tree, NodeId>>,
}

/// An iterator over the [handles] of one parent's direct children.
///
/// The children are yielded in child-sequence order. Unlike [`PreOrder`],
/// this iterator never descends: grandchildren are not visited.
///
/// This iterator is returned by [`Tree::children`].
///
/// [handles]: NodeId
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Children<'tree> {
	/// `None` when the parent handle was stale, which makes the iterator
	/// empty rather than an error.
	cursor: Option<Copied<vec_deque::Iter<'tree, NodeId>>>,
}

/// An iterator over references to every payload in a [tree], in pre-order.
///
/// This iterator is returned by [`Tree::values`].
///
/// [tree]: Tree
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'tree, T> {
	inner: PreOrder<'tree, T>,
}

impl<'tree, T> PreOrder<'tree, T> {
	#[inline(always)]
	pub(crate) const fn new(tree: &'tree Tree<T>, start: Option<NodeId>) -> Self {
		Self {
			tree,

			next: start,
			stack: Vec::new(),
		}
	}
}

impl<'tree, T> Iterator for PreOrder<'tree, T> {
	type Item = NodeId;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;

		let node = self
			.tree
			.node(current)
			.expect("the traversal only ever references live nodes");

		self.next = if node.children.is_empty() {
			// Backtrack: pop fully-consumed levels off the path stack until
			// one of them still has a sibling to yield. An empty stack means
			// the starting node's subtree is exhausted.
			loop {
				match self.stack.last_mut() {
					None => break None,

					Some(cursor) => match cursor.next() {
						Some(&sibling) => break Some(sibling),
						None => {
							self.stack.pop();
						},
					},
				}
			}
		} else {
			// Descend: push a cursor over the current node's children and
			// move to the first of them. The cursor is left parked one past
			// that child, ready for the next backtrack.
			let mut cursor = node.children.iter();
			let first = cursor.next().copied();
			self.stack.push(cursor);

			first
		};

		Some(current)
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		match &self.next {
			None => (0, Some(0)),
			Some(_) => (1, None),
		}
	}
}

// Once `next` is `None` the path stack is empty, so the iterator keeps
// returning `None`.
impl<'tree, T> FusedIterator for PreOrder<'tree, T> {}

impl<'tree> Children<'tree> {
	#[inline(always)]
	pub(crate) fn new(cursor: Option<vec_deque::Iter<'tree, NodeId>>) -> Self {
		Self {
			cursor: cursor.map(|cursor| cursor.copied()),
		}
	}
}

impl<'tree> Iterator for Children<'tree> {
	type Item = NodeId;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		self.cursor.as_mut()?.next()
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		match &self.cursor {
			None => (0, Some(0)),
			Some(cursor) => cursor.size_hint(),
		}
	}
}

impl<'tree> DoubleEndedIterator for Children<'tree> {
	#[inline]
	fn next_back(&mut self) -> Option<Self::Item> {
		self.cursor.as_mut()?.next_back()
	}
}

impl<'tree> ExactSizeIterator for Children<'tree> {}

impl<'tree> FusedIterator for Children<'tree> {}

impl<'tree, T> Values<'tree, T> {
	#[inline(always)]
	pub(crate) const fn new(inner: PreOrder<'tree, T>) -> Self {
		Self { inner }
	}
}

impl<'tree, T> Iterator for Values<'tree, T> {
	type Item = &'tree T;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		let tree = self.inner.tree;
		let node = self.inner.next()?;

		Some(&tree[node])
	}

	#[inline(always)]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<'tree, T> FusedIterator for Values<'tree, T> {}
