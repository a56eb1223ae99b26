use crate::node::{rebalance, Node, Side};

/// The ancestors visited during a top-down descent of the tree.
///
/// Each ancestor is detached from its parent as the descent moves past it
/// (its [`Box`] is taken out of the parent's child slot), and recorded with
/// the [`Side`] the descent took. Unwinding the path pops the ancestors in
/// reverse order, relinking the subtree below into the recorded slot and
/// restoring the height and balance of each ancestor in turn.
///
/// This keeps every structural operation iterative, bounded by the tree
/// height, and free of parent pointers.
#[derive(Debug)]
pub(crate) struct Path<K, V> {
    stack: Vec<(Box<Node<K, V>>, Side)>,
}

impl<K, V> Path<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
        }
    }

    /// Record `node` as an ancestor, returning its (now detached) child on
    /// `side` to continue the descent with.
    pub(crate) fn descend(
        &mut self,
        mut node: Box<Node<K, V>>,
        side: Side,
    ) -> Option<Box<Node<K, V>>> {
        let child = node.take_child(side);
        self.stack.push((node, side));
        child
    }

    /// Record `node`, whose left child has already been detached, as a left
    /// step of the descent.
    fn push_left(&mut self, node: Box<Node<K, V>>) {
        self.stack.push((node, Side::Left));
    }

    /// Relink `subtree` into the recorded ancestors, rebalancing each of them
    /// from the bottom up, and return the root of the rebuilt tree.
    pub(crate) fn unwind(mut self, mut subtree: Option<Box<Node<K, V>>>) -> Option<Box<Node<K, V>>> {
        while let Some((mut parent, side)) = self.stack.pop() {
            parent.set_child(side, subtree);
            // Removal may need a rotation at any level, so every ancestor is
            // checked, not just the first one found to be out of balance.
            rebalance(&mut parent);
            subtree = Some(parent);
        }
        subtree
    }

    /// Relink `subtree` into the recorded ancestors without touching heights
    /// or balance.
    ///
    /// Only valid when the descent did not change the shape of the tree.
    pub(crate) fn restore(mut self, mut subtree: Option<Box<Node<K, V>>>) -> Option<Box<Node<K, V>>> {
        while let Some((mut parent, side)) = self.stack.pop() {
            parent.set_child(side, subtree);
            subtree = Some(parent);
        }
        subtree
    }
}

/// Detach the node holding the minimum key of the subtree rooted at `root`.
///
/// Returns the extracted node, with its children unlinked, and the rebalanced
/// remainder of the subtree (if any). The right subtree of the minimum node
/// takes its place under its former parent.
pub(crate) fn extract_min<K, V>(root: Box<Node<K, V>>) -> (Box<Node<K, V>>, Option<Box<Node<K, V>>>) {
    let mut path = Path::with_capacity(usize::from(root.height()));

    // Descend the left-most edge, moving the candidate down one level each
    // step.
    let mut min = root;
    while let Some(left) = min.take_child(Side::Left) {
        path.push_left(min);
        min = left;
    }

    // Link the parent's left pointer to the right child of the minimum node.
    let rest = path.unwind(min.take_child(Side::Right));
    (min, rest)
}
