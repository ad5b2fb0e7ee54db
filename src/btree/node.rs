use std::{
    borrow::Borrow,
    fmt::{self, Debug},
    marker::PhantomData,
    ptr::NonNull,
};

pub(crate) type Link<T> = NonNull<Node<T>>;

pub(crate) struct Node<T> {
    pub(crate) keys: Vec<T>,
    pub(crate) children: Vec<Link<T>>,
    pub(crate) parent: Option<Link<T>>,
}

impl<T> Node<T> {
    pub(crate) fn new(keys: Vec<T>, children: Vec<Link<T>>, parent: Option<Link<T>>) -> Self {
        Self {
            keys,
            children,
            parent,
        }
    }

    pub(crate) fn alloc(node: Node<T>) -> Link<T> {
        unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(node))) }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_full(&self, max_keys: usize) -> bool {
        self.keys.len() >= max_keys
    }

    /// Index of the first key `>= value`, or the key count.
    ///
    /// This is both where `value` would be inserted and which child to descend
    /// into to find it.
    pub fn position<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys
            .partition_point(|probe| Borrow::<Q>::borrow(probe) < value)
    }
}

/// Read-only view of a node inside a [`BTree`](super::BTree).
pub struct NodeRef<'a, T> {
    pub(crate) link: Link<T>,
    pub(crate) max_keys: usize,
    pub(crate) _lifetime: PhantomData<&'a T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(link: Link<T>, max_keys: usize) -> Self {
        Self {
            link,
            max_keys,
            _lifetime: PhantomData,
        }
    }

    fn node(&self) -> &'a Node<T> {
        unsafe { &*self.link.as_ptr() }
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> &'a [T] {
        &self.node().keys
    }

    pub fn len(&self) -> usize {
        self.node().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node().keys.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn is_full(&self) -> bool {
        self.node().is_full(self.max_keys)
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a, T>> {
        self.node()
            .children
            .get(index)
            .map(|child| NodeRef::new(*child, self.max_keys))
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a, T>> + 'a {
        let max_keys = self.max_keys;
        self.node()
            .children
            .iter()
            .map(move |child| NodeRef::new(*child, max_keys))
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node()
            .parent
            .map(|parent| NodeRef::new(parent, self.max_keys))
    }

    /// Whether both views point at the same node.
    pub fn same_node(&self, other: &NodeRef<'_, T>) -> bool {
        self.link == other.link
    }
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> Debug for NodeRef<'a, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn recursive_fmt<T: Debug>(
            node: NodeRef<'_, T>,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            writeln!(f, "{}{:?}", "    ".repeat(depth), node.keys())?;
            for child in node.children() {
                recursive_fmt(child, f, depth + 1)?;
            }

            Ok(())
        }

        recursive_fmt(*self, f, 0)
    }
}
