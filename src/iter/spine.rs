use crate::node::{Node, Side};

/// An in-order walk of the tree driven by an explicit stack of spine nodes.
///
/// Walking the left spines yields keys in ascending order, and walking the
/// right spines (the mirror image) yields them in descending order.
#[derive(Debug)]
pub(crate) struct Spine<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    side: Side,
}

impl<'a, K, V> Spine<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, side: Side) -> Self {
        let mut this = Self {
            stack: Vec::with_capacity(root.map(|v| usize::from(v.height()) + 1).unwrap_or_default()),
            side,
        };

        // Descend down the chosen side of the tree.
        if let Some(root) = root {
            this.push_spine(root);
        }

        this
    }

    fn push_spine(&mut self, subtree_root: &'a Node<K, V>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.child(self.side);
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<K, V>> {
        let v = self.stack.pop()?;

        // Descend down the spine of the opposite hand child of this node, if
        // any.
        if let Some(child) = v.child(self.side.opposite()) {
            self.push_spine(child);
        }

        Some(v)
    }

    /// Drop any remaining traversal state.
    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }
}
