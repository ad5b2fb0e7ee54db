use super::{
    node::{Link, Node},
    BTree,
};
use std::marker::PhantomData;

impl<T> BTree<T> {
    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            len: self.len,
            _lifetime: PhantomData,
        };

        if let Some(root) = self.root {
            iter.descend(root);
        }

        iter
    }
}

pub struct Iter<'a, T> {
    // Nodes on the path to the next key, with the next key index in each.
    pub(crate) stack: Vec<(Link<T>, usize)>,
    pub(crate) len: usize,
    pub(crate) _lifetime: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    fn descend(&mut self, mut cursor: Link<T>) {
        loop {
            self.stack.push((cursor, 0));

            let node = unsafe { &*cursor.as_ptr() };
            match node.children.first() {
                Some(child) => cursor = *child,
                None => break,
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a BTree<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((cursor, index)) = self.stack.pop() {
            let node: &'a Node<T> = unsafe { &*cursor.as_ptr() };

            if index < node.keys.len() {
                self.stack.push((cursor, index + 1));
                if let Some(child) = node.children.get(index + 1) {
                    self.descend(*child);
                }

                self.len -= 1;
                return Some(&node.keys[index]);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}
