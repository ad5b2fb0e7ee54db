use super::{
    event::{AvlInsert, Rotation},
    node::{self, AvlNode, Link},
    AvlTree,
};

impl AvlTree {
    /// Inserts `value` and rebalances. Equal values go to the right.
    ///
    /// Always succeeds and appends exactly one record to the history.
    pub fn insert(&mut self, value: i64) -> AvlInsert {
        let mut outcome = None;

        unsafe {
            let root = insert_node(self.root, value, &mut outcome);
            (*root.as_ptr()).parent = None;
            self.root = Some(root);
        }
        self.len += 1;

        let record = match outcome {
            Some((rotation, pivot)) => AvlInsert {
                value,
                rotation,
                pivot: Some(pivot),
            },
            None => AvlInsert {
                value,
                rotation: Rotation::None,
                pivot: None,
            },
        };

        tracing::trace!(value, kind = record.rotation_kind(), "avl insert");
        self.history.push(record);
        record
    }
}

// Inserts below `link` and returns the root of the rebalanced subtree. The
// caller sets the returned node's parent.
unsafe fn insert_node(
    link: Option<Link>,
    value: i64,
    outcome: &mut Option<(Rotation, i64)>,
) -> Link {
    let mut link = match link {
        Some(link) => link,
        None => return AvlNode::alloc(value),
    };
    let raw = link.as_ptr();

    // Standard BST descent.
    if value < (*raw).value {
        let child = insert_node((*raw).left, value, outcome);
        (*child.as_ptr()).parent = Some(link);
        (*raw).left = Some(child);
    } else {
        let child = insert_node((*raw).right, value, outcome);
        (*child.as_ptr()).parent = Some(link);
        (*raw).right = Some(child);
    }

    node::update_height(link);
    let balance = node::balance(link);

    let rotation = if balance > 1 {
        // Left heavy. A right-heavy left child needs the double rotation.
        let double = match (*raw).left {
            Some(left) if node::balance(left) < 0 => {
                (*raw).left = Some(rotate_left(left));
                true
            }
            _ => false,
        };
        link = rotate_right(link);
        if double {
            Rotation::LeftRight
        } else {
            Rotation::Right
        }
    } else if balance < -1 {
        let double = match (*raw).right {
            Some(right) if node::balance(right) > 0 => {
                (*raw).right = Some(rotate_right(right));
                true
            }
            _ => false,
        };
        link = rotate_left(link);
        if double {
            Rotation::RightLeft
        } else {
            Rotation::Left
        }
    } else {
        return link;
    };

    let pivot = (*link.as_ptr()).value;
    tracing::debug!(value, kind = rotation.kind(), pivot, "rebalanced subtree");

    // A single insertion unbalances at most one ancestor.
    debug_assert!(outcome.is_none());
    if outcome.is_none() {
        *outcome = Some((rotation, pivot));
    }

    link
}

/// Rotates `y` right around its left child and returns the new subtree root.
///
/// The caller relinks the returned node into its own parent.
pub(crate) unsafe fn rotate_right(y: Link) -> Link {
    let y_node = y.as_ptr();
    let x = match (*y_node).left {
        Some(x) => x,
        None => return y,
    };
    let x_node = x.as_ptr();

    let t2 = (*x_node).right;
    (*y_node).left = t2;
    if let Some(t2) = t2 {
        (*t2.as_ptr()).parent = Some(y);
    }

    (*x_node).right = Some(y);
    (*x_node).parent = (*y_node).parent;
    (*y_node).parent = Some(x);

    node::update_height(y);
    node::update_height(x);

    x
}

/// Mirror of [`rotate_right`].
pub(crate) unsafe fn rotate_left(x: Link) -> Link {
    let x_node = x.as_ptr();
    let y = match (*x_node).right {
        Some(y) => y,
        None => return x,
    };
    let y_node = y.as_ptr();

    let t2 = (*y_node).left;
    (*x_node).right = t2;
    if let Some(t2) = t2 {
        (*t2.as_ptr()).parent = Some(x);
    }

    (*y_node).left = Some(x);
    (*y_node).parent = (*x_node).parent;
    (*x_node).parent = Some(y);

    node::update_height(x);
    node::update_height(y);

    y
}
