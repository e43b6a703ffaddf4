// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use crate::NodeId;

/// A single record in the [tree]'s arena.
///
/// Nodes are an implementation detail of the tree: they are never handed out
/// directly. External code addresses them through [`NodeId`] handles only.
///
/// [tree]: crate::Tree
#[derive(Debug)]
pub(crate) struct Node<T> {
	pub(crate) data: T,

	/// The owning parent; `None` only for the root node.
	pub(crate) parent: Option<NodeId>,
	/// Direct children, in insertion (or positional-insertion) order.
	pub(crate) children: VecDeque<NodeId>,

	/// The number of nodes in the subtree rooted at this node, inclusive of
	/// the node itself.
	pub(crate) count: usize,
}

impl<T> Node<T> {
	pub(crate) const fn new(data: T, parent: Option<NodeId>) -> Self {
		Self {
			data,

			parent,
			children: VecDeque::new(),

			count: 1,
		}
	}
}
