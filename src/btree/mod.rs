pub mod error;
mod event;
mod get;
mod insert;
mod iter;
mod node;

pub use self::{
    error::{Error, Result},
    event::BTreeInsert,
    iter::Iter,
    node::NodeRef,
};

use self::node::Link;
use std::fmt::{self, Debug};

/// Order used by [`BTree::new`]: nodes hold at most three keys.
pub const DEFAULT_ORDER: usize = 2;

/// Insert-only B-tree that splits full nodes eagerly while descending.
///
/// With order `t`, every node holds at most `2t - 1` keys and an internal node
/// with `k` keys has exactly `k + 1` children.
pub struct BTree<T> {
    root: Option<Link<T>>,
    order: usize,
    len: usize,
    history: Vec<BTreeInsert<T>>,
}

impl<T> BTree<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            order: DEFAULT_ORDER,
            len: 0,
            history: Vec::new(),
        }
    }

    /// Fails with [`Error::InvalidOrder`] when `order < 2`.
    pub fn with_order(order: usize) -> Result<Self> {
        if order < 2 {
            return Err(Error::InvalidOrder(order));
        }

        Ok(Self {
            root: None,
            order,
            len: 0,
            history: Vec::new(),
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn max_keys(&self) -> usize {
        2 * self.order - 1
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of inserted keys, duplicates included.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels; 0 for an empty tree. All leaves share one depth.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cursor = self.root;

        while let Some(link) = cursor {
            height += 1;
            cursor = unsafe { (&(*link.as_ptr()).children).first().copied() };
        }

        height
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|root| NodeRef::new(root, self.max_keys()))
    }

    /// One record per insertion, oldest first.
    pub fn history(&self) -> &[BTreeInsert<T>] {
        &self.history
    }

    pub fn last_insert(&self) -> Option<&BTreeInsert<T>> {
        self.history.last()
    }
}

impl<T> Drop for BTree<T> {
    fn drop(&mut self) {
        fn recursive_drop<T>(node: Link<T>) {
            unsafe {
                let boxed_node = Box::from_raw(node.as_ptr());
                for child in boxed_node.children {
                    recursive_drop(child);
                }
            }
        }

        if let Some(root) = self.root.take() {
            recursive_drop(root);
        }
    }
}

impl<T> Default for BTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for BTree<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{:?}", root),
            None => write!(f, "(empty)"),
        }
    }
}

impl<T> Extend<T> for BTree<T>
where
    T: Ord + Clone,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Checks every structural invariant below `node` and returns its depth.
    fn check_node<T: Ord + Debug>(
        node: NodeRef<'_, T>,
        lower: Option<&T>,
        upper: Option<&T>,
    ) -> usize {
        let keys = node.keys();

        assert!(!keys.is_empty());
        assert!(keys.len() <= node.max_keys, "overfull node {:?}", keys);
        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", keys);
        if let Some(lower) = lower {
            assert!(keys.iter().all(|key| key >= lower), "{:?} below {:?}", keys, lower);
        }
        if let Some(upper) = upper {
            assert!(keys.iter().all(|key| key <= upper), "{:?} above {:?}", keys, upper);
        }

        if node.is_leaf() {
            return 1;
        }

        assert_eq!(node.children().len(), keys.len() + 1);

        let depths = node
            .children()
            .enumerate()
            .map(|(i, child)| {
                assert!(child.parent().unwrap().same_node(&node));
                let lower = if i == 0 { lower } else { keys.get(i - 1) };
                let upper = keys.get(i).or(upper);
                check_node(child, lower, upper)
            })
            .collect::<Vec<_>>();

        assert!(depths.windows(2).all(|pair| pair[0] == pair[1]));
        depths[0] + 1
    }

    fn check<T: Ord + Debug>(tree: &BTree<T>) {
        if let Some(root) = tree.root() {
            assert!(root.parent().is_none());
            assert_eq!(check_node(root, None, None), tree.height());
        }
    }

    fn keys_of<T: Clone>(node: NodeRef<'_, T>) -> Vec<T> {
        node.keys().to_vec()
    }

    fn splits(tree: &BTree<i32>) -> Vec<usize> {
        tree.history().iter().map(|record| record.splits).collect()
    }

    #[test]
    fn rejects_small_orders() {
        assert_eq!(BTree::<i32>::with_order(0).err(), Some(Error::InvalidOrder(0)));
        assert_eq!(BTree::<i32>::with_order(1).err(), Some(Error::InvalidOrder(1)));
        assert_eq!(
            Error::InvalidOrder(1).to_string(),
            "invalid B-tree order 1: order must be at least 2"
        );

        let tree = BTree::<i32>::with_order(2).unwrap();
        assert_eq!(tree.order(), 2);
        assert_eq!(tree.max_keys(), 3);
        assert_eq!(BTree::<i32>::with_order(5).unwrap().max_keys(), 9);
    }

    #[test]
    fn empty_tree() {
        let tree = BTree::<i32>::new();

        assert_eq!(tree.order(), DEFAULT_ORDER);
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
        assert!(!tree.contains(&1));
        assert!(tree.get(&1).is_none());
        assert!(tree.root().is_none());
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(format!("{:?}", tree), "(empty)");
    }

    #[test]
    fn fourth_key_splits_full_root() {
        let mut tree = BTree::new();

        for value in [10, 20, 30] {
            let record = tree.insert(value);
            assert_eq!(record.splits, 0);
            assert!(record.promoted.is_empty());
        }
        assert_eq!(keys_of(tree.root().unwrap()), [10, 20, 30]);
        assert!(tree.root().unwrap().is_full());

        let record = tree.insert(40);
        assert_eq!(record.splits, 1);
        assert_eq!(record.promoted, [20]);

        let root = tree.root().unwrap();
        assert_eq!(keys_of(root), [20]);
        assert_eq!(keys_of(root.child(0).unwrap()), [10]);
        assert_eq!(keys_of(root.child(1).unwrap()), [30, 40]);
        assert!(root.child(2).is_none());
        check(&tree);
    }

    #[test]
    fn ascending_inserts_grow_height() {
        let mut tree = BTree::new();
        tree.extend(1..=10);

        assert_eq!(splits(&tree), [0, 0, 0, 1, 0, 1, 0, 1, 1, 1]);
        let promoted = tree
            .history()
            .iter()
            .flat_map(|record| record.promoted.iter().copied())
            .collect::<Vec<_>>();
        assert_eq!(promoted, [2, 4, 6, 4, 8]);

        assert_eq!(tree.height(), 3);
        assert_eq!(
            format!("{:?}", tree),
            "[4]\n    [2]\n        [1]\n        [3]\n    [6, 8]\n        [5]\n        [7]\n        [9, 10]\n"
        );
        check(&tree);
    }

    #[test]
    fn one_insert_can_split_several_nodes() {
        let mut tree = BTree::new();
        tree.extend([10, 20, 30, 40, 1, 2, 50, 5, 6, 60]);
        assert_eq!(keys_of(tree.root().unwrap()), [2, 20, 40]);

        // Both the root and the child on the path to 7 are full.
        let record = tree.insert(7);
        assert_eq!(record.splits, 2);
        assert_eq!(record.promoted, [20, 6]);

        let root = tree.root().unwrap();
        assert_eq!(keys_of(root), [20]);
        let left = root.child(0).unwrap();
        assert_eq!(keys_of(left), [2, 6]);
        assert_eq!(
            left.children().map(keys_of).collect::<Vec<_>>(),
            [vec![1], vec![5], vec![7, 10]]
        );
        let right = root.child(1).unwrap();
        assert_eq!(keys_of(right), [40]);
        assert_eq!(
            right.children().map(keys_of).collect::<Vec<_>>(),
            [vec![30], vec![50, 60]]
        );
        check(&tree);
    }

    #[test]
    fn larger_order_splits_at_median() {
        let mut tree = BTree::with_order(3).unwrap();
        tree.extend(1..=5);
        assert!(splits(&tree).iter().all(|count| *count == 0));

        let record = tree.insert(6);
        assert_eq!(record.promoted, [3]);

        let root = tree.root().unwrap();
        assert_eq!(keys_of(root), [3]);
        assert_eq!(keys_of(root.child(0).unwrap()), [1, 2]);
        assert_eq!(keys_of(root.child(1).unwrap()), [4, 5, 6]);
        check(&tree);
    }

    #[test]
    fn lookup_compares_by_value() {
        let mut tree = BTree::new();
        for word in ["pear", "apple", "fig", "kiwi", "plum", "date"] {
            tree.insert(word.to_string());
        }

        assert!(tree.contains("fig"));
        assert!(tree.contains(&String::from("plum")));
        assert!(!tree.contains("grape"));
        assert_eq!(tree.get("kiwi").map(String::as_str), Some("kiwi"));

        let node = tree.node_of("apple").unwrap();
        assert!(node.keys().iter().any(|key| key == "apple"));
        assert!(tree.node_of("banana").is_none());
        check(&tree);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut tree = BTree::new();
        for _ in 0..10 {
            tree.insert(5);
            check(&tree);
        }
        tree.insert(3);
        tree.insert(7);

        assert_eq!(tree.size(), 12);
        assert!(tree.contains(&5));
        assert_eq!(tree.iter().filter(|value| **value == 5).count(), 10);
        assert_eq!(tree.iter().next(), Some(&3));
        assert_eq!(tree.iter().last(), Some(&7));
        check(&tree);
    }

    #[test]
    fn history_exports() {
        let mut tree = BTree::new();
        tree.extend(["d", "a", "c", "b", "e"].map(String::from));

        let bytes = bincode::serialize(tree.history()).unwrap();
        let decoded: Vec<BTreeInsert<String>> = bincode::deserialize(&bytes).unwrap();

        assert_eq!(decoded, tree.history());
        assert_eq!(tree.last_insert().unwrap().value, "e");
        assert!(tree.history()[3].did_split());
    }

    proptest! {
        /// Key counts, child counts, ordering and parent links hold after every insert.
        #[test]
        fn prop_invariants_hold(
            order in 2usize..6,
            values in proptest::collection::vec(-100i32..100, 0..300),
        ) {
            let mut tree = BTree::with_order(order).unwrap();

            for value in &values {
                tree.insert(*value);
                check(&tree);
            }

            prop_assert_eq!(tree.size(), values.len());
            prop_assert_eq!(tree.history().len(), values.len());

            let mut sorted = values.clone();
            sorted.sort();
            prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), sorted);
            prop_assert_eq!(tree.iter().len(), values.len());
        }

        /// Every inserted value is found, and records describe their own calls.
        #[test]
        fn prop_inserted_values_found(values in proptest::collection::vec(any::<i32>(), 1..200)) {
            let mut tree = BTree::new();

            for value in &values {
                let record = tree.insert(*value);
                prop_assert_eq!(record.value, *value);
                prop_assert_eq!(record.splits, record.promoted.len());
                prop_assert_eq!(Some(&record), tree.last_insert());
            }

            for value in &values {
                prop_assert!(tree.contains(value));
                prop_assert_eq!(tree.get(value), Some(value));
                prop_assert!(tree.node_of(value).unwrap().keys().contains(value));
            }

            // A split adds one node, or two when it grows a new root.
            let total_splits: usize = tree.history().iter().map(|record| record.splits).sum();
            let mut nodes = 0;
            let mut pending = vec![tree.root().unwrap()];
            while let Some(node) = pending.pop() {
                nodes += 1;
                pending.extend(node.children());
            }
            prop_assert_eq!(nodes, total_splits + tree.height());
        }
    }
}
