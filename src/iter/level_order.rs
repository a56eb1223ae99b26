use std::collections::VecDeque;

use crate::node::Node;

/// A breadth-first walk of the tree: every node at depth `d` is visited
/// before any node at depth `d + 1`, left to right within a level.
///
/// Inserting the yielded keys into an empty tree, in the order they are
/// yielded, rebuilds a tree of the same shape without a single rotation.
#[derive(Debug)]
pub(crate) struct LevelOrder<'a, K, V> {
    queue: VecDeque<&'a Node<K, V>>,
}

impl<'a, K, V> LevelOrder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<K, V>> {
        let v = self.queue.pop_front()?;
        self.queue.extend(v.left());
        self.queue.extend(v.right());
        Some(v)
    }

    /// Drop any remaining traversal state.
    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }
}
