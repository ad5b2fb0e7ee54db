use super::{node::AvlNode, AvlTree};
use std::vec;

impl AvlTree {
    /// Ascending values, captured when the iterator is created.
    pub fn inorder(&self) -> Inorder {
        let mut values = Vec::with_capacity(self.len);
        collect_inorder(self.root(), &mut values);
        Inorder(values.into_iter())
    }

    /// Root-first values, captured when the iterator is created.
    pub fn preorder(&self) -> Preorder {
        let mut values = Vec::with_capacity(self.len);
        collect_preorder(self.root(), &mut values);
        Preorder(values.into_iter())
    }

    pub fn iter(&self) -> Inorder {
        self.inorder()
    }
}

fn collect_inorder(node: Option<&AvlNode>, values: &mut Vec<i64>) {
    if let Some(node) = node {
        collect_inorder(node.left(), values);
        values.push(node.value);
        collect_inorder(node.right(), values);
    }
}

fn collect_preorder(node: Option<&AvlNode>, values: &mut Vec<i64>) {
    if let Some(node) = node {
        values.push(node.value);
        collect_preorder(node.left(), values);
        collect_preorder(node.right(), values);
    }
}

pub struct Inorder(vec::IntoIter<i64>);

impl<'a> IntoIterator for &'a AvlTree {
    type IntoIter = Inorder;
    type Item = i64;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

impl Iterator for Inorder {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Inorder {
    fn len(&self) -> usize {
        self.0.len()
    }
}

pub struct Preorder(vec::IntoIter<i64>);

impl Iterator for Preorder {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Preorder {
    fn len(&self) -> usize {
        self.0.len()
    }
}
