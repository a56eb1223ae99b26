use std::iter::FusedIterator;

use crate::node::{Node, Side};

/// An iterator of owned `(key, value)` tuples in ascending key order,
/// returned by the [`AvlTree`](crate::AvlTree) `into_iter()` impl.
///
/// Each node is detached from its subtree as the walk reaches it, so the
/// tree is dismantled without recursion.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Option<Box<Node<K, V>>>, len: usize) -> Self {
        let mut this = Self {
            stack: vec![],
            remaining: len,
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<K, V>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_child(Side::Left);
            self.stack.push(v);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.take_child(Side::Right) {
            self.push_subtree(right);
        }

        self.remaining -= 1;
        Some(v.into_tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
