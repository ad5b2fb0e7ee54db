use std::{
    fmt::{self, Debug},
    ptr::NonNull,
};

pub(crate) type Link = NonNull<AvlNode>;

/// A node of an [`AvlTree`](super::AvlTree).
///
/// `left` and `right` own their subtrees. `parent` only navigates and never
/// owns or frees anything.
pub struct AvlNode {
    pub(crate) value: i64,
    pub(crate) height: usize,
    pub(crate) left: Option<Link>,
    pub(crate) right: Option<Link>,
    pub(crate) parent: Option<Link>,
}

impl AvlNode {
    pub(crate) fn alloc(value: i64) -> Link {
        unsafe {
            NonNull::new_unchecked(Box::into_raw(Box::new(Self {
                value,
                height: 1,
                left: None,
                right: None,
                parent: None,
            })))
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn left(&self) -> Option<&AvlNode> {
        self.left.map(|left| unsafe { &*left.as_ptr() })
    }

    pub fn right(&self) -> Option<&AvlNode> {
        self.right.map(|right| unsafe { &*right.as_ptr() })
    }

    pub fn parent(&self) -> Option<&AvlNode> {
        self.parent.map(|parent| unsafe { &*parent.as_ptr() })
    }

    /// Left subtree height minus right subtree height.
    pub fn balance(&self) -> isize {
        height(self.left) as isize - height(self.right) as isize
    }
}

pub(crate) fn height(link: Option<Link>) -> usize {
    link.map_or(0, |node| unsafe { (*node.as_ptr()).height })
}

pub(crate) unsafe fn balance(link: Link) -> isize {
    (*link.as_ptr()).balance()
}

pub(crate) unsafe fn update_height(link: Link) {
    let node = link.as_ptr();
    (*node).height = 1 + height((*node).left).max(height((*node).right));
}

// Frees `link` and everything below it.
pub(crate) unsafe fn free(link: Link) {
    let node = Box::from_raw(link.as_ptr());
    if let Some(left) = node.left {
        free(left);
    }
    if let Some(right) = node.right {
        free(right);
    }
}

impl Debug for AvlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn recursive_fmt(
            node: &AvlNode,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
            side: &str,
        ) -> fmt::Result {
            writeln!(
                f,
                "{}{}{} (h={})",
                "    ".repeat(depth),
                side,
                node.value,
                node.height
            )?;

            if let Some(left) = node.left() {
                recursive_fmt(left, f, depth + 1, "L: ")?;
            }
            if let Some(right) = node.right() {
                recursive_fmt(right, f, depth + 1, "R: ")?;
            }

            Ok(())
        }

        recursive_fmt(self, f, 0, "")
    }
}
