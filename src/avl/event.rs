use serde::{Deserialize, Serialize};

/// Value recorded as the rotated node when an insertion did not rotate.
pub const NO_ROTATION_SENTINEL: i64 = 0;

/// The rebalancing an AVL insertion performed.
///
/// Positive kinds rotate right, negative kinds rotate left, and a magnitude of
/// two means the child was rotated first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    /// Left-left case: one right rotation.
    Right,
    /// Left-right case: left rotation of the left child, then a right rotation.
    LeftRight,
    /// Right-right case: one left rotation.
    Left,
    /// Right-left case: right rotation of the right child, then a left rotation.
    RightLeft,
}

impl Rotation {
    pub fn kind(self) -> i8 {
        match self {
            Rotation::None => 0,
            Rotation::Right => 1,
            Rotation::LeftRight => 2,
            Rotation::Left => -1,
            Rotation::RightLeft => -2,
        }
    }

    /// Number of rotation primitives applied.
    pub fn primitives(self) -> usize {
        self.kind().unsigned_abs() as usize
    }
}

/// What one call to [`AvlTree::insert`](super::AvlTree::insert) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlInsert {
    pub value: i64,
    pub rotation: Rotation,
    /// Value of the node that became the rebalanced subtree's root.
    pub pivot: Option<i64>,
}

impl AvlInsert {
    pub fn rotation_kind(&self) -> i8 {
        self.rotation.kind()
    }

    pub fn rotated_value(&self) -> i64 {
        self.pivot.unwrap_or(NO_ROTATION_SENTINEL)
    }
}
