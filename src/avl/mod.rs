mod event;
mod insert;
mod iter;
mod node;

pub use self::{
    event::{AvlInsert, Rotation, NO_ROTATION_SENTINEL},
    iter::{Inorder, Preorder},
    node::AvlNode,
};

use self::node::Link;
use std::fmt::{self, Debug};

/// Insert-only AVL tree over `i64` values.
///
/// Every insertion leaves each node's balance factor in `-1..=1` and is recorded
/// in [`history`](AvlTree::history).
pub struct AvlTree {
    root: Option<Link>,
    len: usize,
    history: Vec<AvlInsert>,
}

impl AvlTree {
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            history: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root, or 0 for an empty tree.
    pub fn height(&self) -> usize {
        node::height(self.root)
    }

    pub fn root(&self) -> Option<&AvlNode> {
        self.root.map(|root| unsafe { &*root.as_ptr() })
    }

    /// One record per insertion, oldest first.
    pub fn history(&self) -> &[AvlInsert] {
        &self.history
    }

    pub fn last_insert(&self) -> Option<&AvlInsert> {
        self.history.last()
    }
}

impl Drop for AvlTree {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            unsafe { node::free(root) }
        }
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{:?}", root),
            None => write!(f, "(empty)"),
        }
    }
}

impl Extend<i64> for AvlTree {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<i64> for AvlTree {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
