use super::{
    event::BTreeInsert,
    node::{Link, Node},
    BTree,
};

impl<T> BTree<T> {
    /// Inserts `value`, splitting every full node met on the way down.
    ///
    /// Duplicates are kept. Always succeeds and appends exactly one record to
    /// the history.
    pub fn insert(&mut self, value: T) -> BTreeInsert<T>
    where
        T: Ord + Clone,
    {
        let mut promoted = Vec::new();

        unsafe {
            match self.root {
                None => {
                    self.root = Some(Node::alloc(Node::new(
                        vec![value.clone()],
                        Vec::new(),
                        None,
                    )));
                }
                Some(root) => {
                    let max_keys = self.max_keys();
                    let mut cursor = root;

                    loop {
                        if (*cursor.as_ptr()).is_full(max_keys) {
                            let (median, parent) = self.split(cursor);
                            promoted.push(median);

                            // Step back up and take one step toward the value. This
                            // lands on one of the two halves, which are never full.
                            let parent = &*parent.as_ptr();
                            cursor = parent.children[parent.position(&value)];
                        }

                        let node = &mut *cursor.as_ptr();
                        let index = node.position(&value);

                        if node.is_leaf() {
                            node.keys.insert(index, value.clone());
                            break;
                        }

                        cursor = node.children[index];
                    }
                }
            }
        }

        self.len += 1;

        let record = BTreeInsert {
            value,
            splits: promoted.len(),
            promoted,
        };

        tracing::trace!(splits = record.splits, len = self.len, "btree insert");
        self.history.push(record.clone());
        record
    }

    // Splits a full node around its median. The halves replace it in its parent
    // (or under a new root) and the median moves up. Returns the median and the
    // parent that received it.
    unsafe fn split(&mut self, link: Link<T>) -> (T, Link<T>)
    where
        T: Ord + Clone,
    {
        let Node {
            mut keys,
            mut children,
            parent,
        } = *Box::from_raw(link.as_ptr());

        let median_index = keys.len() / 2;
        let right_keys = keys.split_off(median_index + 1);
        let median = keys.remove(median_index);
        let right_children = if children.is_empty() {
            Vec::new()
        } else {
            children.split_off(median_index + 1)
        };

        let left = Node::alloc(Node::new(keys, children, parent));
        let right = Node::alloc(Node::new(right_keys, right_children, parent));

        // The halves take over the split node's subtrees.
        for half in [left, right] {
            for child in &(*half.as_ptr()).children {
                (*child.as_ptr()).parent = Some(half);
            }
        }

        tracing::debug!(
            median_index,
            root_split = parent.is_none(),
            "split full node"
        );

        match parent {
            None => {
                // We need a new root since we split it.
                let new_root = Node::alloc(Node::new(
                    vec![median.clone()],
                    vec![left, right],
                    None,
                ));

                (*left.as_ptr()).parent = Some(new_root);
                (*right.as_ptr()).parent = Some(new_root);
                self.root = Some(new_root);

                (median, new_root)
            }
            Some(parent) => {
                let node = &mut *parent.as_ptr();
                let index = node
                    .children
                    .iter()
                    .position(|child| *child == link)
                    .unwrap_or_else(|| node.position(&median));

                // Same slot as the split node, so children stay ordered by first key.
                node.children[index] = left;
                node.children.insert(index + 1, right);
                node.keys.insert(index, median.clone());

                (median, parent)
            }
        }
    }
}
