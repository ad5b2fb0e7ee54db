use super::{
    node::{Link, NodeRef},
    BTree,
};
use std::borrow::Borrow;

impl<T> BTree<T> {
    // Finds the node holding `value` and the key's index in it.
    fn locate<Q>(&self, value: &Q) -> Option<(Link<T>, usize)>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        unsafe {
            let mut cursor = self.root?;

            loop {
                let node = &*cursor.as_ptr();
                let index = node.position(value);

                match node.keys.get(index) {
                    Some(key) if Borrow::<Q>::borrow(key) == value => {
                        return Some((cursor, index))
                    }
                    _ if node.is_leaf() => return None,
                    _ => cursor = node.children[index],
                }
            }
        }
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value).is_some()
    }

    /// The stored key equal to `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value)
            .map(|(link, index)| unsafe { &(&(*link.as_ptr()).keys)[index] })
    }

    /// The node holding a key equal to `value`, if any.
    pub fn node_of<Q>(&self, value: &Q) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value)
            .map(|(link, _)| NodeRef::new(link, self.max_keys()))
    }
}
