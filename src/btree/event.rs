use serde::{Deserialize, Serialize};

/// What one call to [`BTree::insert`](super::BTree::insert) did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BTreeInsert<T> {
    pub value: T,
    /// Full nodes split while descending for this insertion.
    pub splits: usize,
    /// Medians pushed up to parents, in the order they were promoted.
    pub promoted: Vec<T>,
}

impl<T> BTreeInsert<T> {
    pub fn did_split(&self) -> bool {
        self.splits > 0
    }
}
