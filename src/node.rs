use tracing::trace;

/// The direction a descent takes from a [`Node`] to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Child nodes pointers.
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0, and an empty subtree is considered to have a
    /// height of -1 (see [`height()`]).
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of far more entries than are addressable.
    height: u8,

    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    /// The height of the left subtree minus the height of the right subtree.
    ///
    /// Positive when left heavy, negative when right heavy.
    pub(crate) fn balance_factor(&self) -> i16 {
        height(self.left()) - height(self.right())
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> Option<&mut Self> {
        match side {
            Side::Left => self.left.as_deref_mut(),
            Side::Right => self.right.as_deref_mut(),
        }
    }

    /// Unlink and return the child subtree on `side`, if any.
    pub(crate) fn take_child(&mut self, side: Side) -> Option<Box<Self>> {
        match side {
            Side::Left => self.left.take(),
            Side::Right => self.right.take(),
        }
    }

    /// Link `subtree` as the child on `side`.
    ///
    /// The slot must be empty: linking over an existing subtree would drop it.
    pub(crate) fn set_child(&mut self, side: Side, subtree: Option<Box<Self>>) {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        debug_assert!(slot.is_none());
        *slot = subtree;
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Height of the (possibly empty) subtree `n`, where an empty subtree has a
/// height of -1.
pub(crate) fn height<K, V>(n: Option<&Node<K, V>>) -> i16 {
    n.map(|v| i16::from(v.height())).unwrap_or(-1)
}

fn update_height<K, V>(n: &mut Node<K, V>) {
    let h = height(n.left()).max(height(n.right())) + 1;
    debug_assert!(h >= 0);
    n.height = h as u8;
}

/// Recompute the height of `v` from its children and restore the AVL balance
/// of the subtree rooted at `v`, rotating if the balance factor has reached
/// ±2.
///
/// The children of `v` must already be balanced with correct heights.
pub(crate) fn rebalance<K, V>(v: &mut Box<Node<K, V>>) {
    update_height(v);

    match v.balance_factor() {
        // Left-heavy, with a left child leaning right: double rotation.
        (2..) if v.left().map(Node::balance_factor).unwrap_or_default() < 0 => {
            if let Some(l) = v.left.as_mut() {
                rotate_left(l);
            }
            rotate_right(v);
        }
        (2..) => rotate_right(v),
        // Right-heavy, with a right child leaning left: double rotation.
        (..=-2) if v.right().map(Node::balance_factor).unwrap_or_default() > 0 => {
            if let Some(r) = v.right.as_mut() {
                rotate_right(r);
            }
            rotate_left(v);
        }
        (..=-2) => rotate_left(v),

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(v.balance_factor().abs() <= 1);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
pub(crate) fn rotate_left<K, V>(x: &mut Box<Node<K, V>>) {
    let Some(mut p) = x.right.take() else {
        unreachable!("left rotation of a node without a right child");
    };
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);

    trace!(height = x.height, "rotated left");
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
pub(crate) fn rotate_right<K, V>(y: &mut Box<Node<K, V>>) {
    let Some(mut p) = y.left.take() else {
        unreachable!("right rotation of a node without a left child");
    };
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);

    trace!(height = y.height, "rotated right");
}
