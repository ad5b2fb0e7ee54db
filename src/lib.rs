//! Two insert-only balanced search trees that report the structural work each
//! insertion performed.
//!
//! - [`AvlTree`]: height-balanced binary tree over `i64`, rebalanced by rotations.
//! - [`BTree`]: multiway tree over any `Ord` key, kept balanced by splitting full
//!   nodes on the way down.

pub mod avl;
pub mod btree;

pub use avl::{AvlInsert, AvlTree, Rotation};
pub use btree::{BTree, BTreeInsert};
