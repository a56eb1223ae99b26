use std::{borrow::Borrow, cmp::Ordering, ops::Index};

use tracing::{debug, trace};

use crate::{
    error::Error,
    iter::{IntoIter, Iter, TraversalOrder},
    node::{height, rebalance, Node, Side},
    path::{extract_min, Path},
};

/// An ordered map of unique keys to values, backed by an AVL tree.
///
/// Lookups, insertions and removals run in `O(log n)` time, and none of them
/// recurse: structural changes record the path they descend and repair the
/// tree bottom-up along it.
#[derive(Debug, Clone)]
pub struct AvlTree<K, V> {
    root: Option<Box<Node<K, V>>>,
    len: usize,

    /// The order used by [`AvlTree::iter()`].
    order: TraversalOrder,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self {
            root: None,
            len: 0,
            order: TraversalOrder::default(),
        }
    }
}

impl<K, V> AvlTree<K, V> {
    /// Construct an empty tree that iterates in ascending key order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty tree that iterates in `order` by default.
    pub fn with_traversal_order(order: TraversalOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// The order used by [`AvlTree::iter()`].
    pub fn traversal_order(&self) -> TraversalOrder {
        self.order
    }

    /// Change the order used by subsequent calls to [`AvlTree::iter()`].
    pub fn set_traversal_order(&mut self, order: TraversalOrder) {
        self.order = order;
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The height of the tree.
    ///
    /// A tree with a single entry has a height of 0, and an empty tree has a
    /// height of -1.
    pub fn height(&self) -> i16 {
        height(self.root.as_deref())
    }

    /// The balance factor of the root: the height of its left subtree minus
    /// the height of its right subtree.
    ///
    /// Always one of -1, 0 or 1. An empty tree has a balance factor of 0.
    pub fn balance_factor(&self) -> i16 {
        self.root
            .as_deref()
            .map(Node::balance_factor)
            .unwrap_or_default()
    }

    /// Remove all entries from the tree.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        self.root = None;
        self.len = 0;
    }

    /// The smallest key in the tree, if any.
    pub fn min_key(&self) -> Option<&K> {
        self.spine_end(Side::Left)
    }

    /// The largest key in the tree, if any.
    pub fn max_key(&self) -> Option<&K> {
        self.spine_end(Side::Right)
    }

    /// Follow the children on `side` from the root down to the last node.
    fn spine_end(&self, side: Side) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(v) = node.child(side) {
            node = v;
        }
        Some(node.key())
    }

    /// Iterate over the entries in the tree, in the order configured for
    /// this tree (ascending unless changed).
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.iter_ordered(self.order)
    }

    /// Iterate over the entries in the tree in `order`.
    pub fn iter_ordered(&self, order: TraversalOrder) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.len, order)
    }

    /// Iterate over the entries in the tree in ascending key order.
    pub fn iter_asc(&self) -> Iter<'_, K, V> {
        self.iter_ordered(TraversalOrder::Ascending)
    }

    /// Iterate over the entries in the tree in descending key order.
    pub fn iter_desc(&self) -> Iter<'_, K, V> {
        self.iter_ordered(TraversalOrder::Descending)
    }

    /// Iterate over the entries in the tree breadth-first.
    ///
    /// See [`TraversalOrder::LevelOrder`].
    pub fn iter_level_order(&self) -> Iter<'_, K, V> {
        self.iter_ordered(TraversalOrder::LevelOrder)
    }
}

impl<K, V> AvlTree<K, V>
where
    K: Ord,
{
    /// Insert `key` and its `value` into the tree.
    ///
    /// This is a strict insert: if `key` is already present,
    /// [`Error::DuplicateKey`] is returned and the tree is left unchanged. To
    /// update an existing entry, mutate it in place through
    /// [`AvlTree::get_mut()`], or remove it first.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), Error> {
        let mut path = Path::with_capacity(self.path_capacity());

        // Descend to the empty slot the new key belongs in, detaching each
        // ancestor along the way.
        let mut cursor = self.root.take();
        while let Some(node) = cursor {
            let side = match key.cmp(node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    // Nothing was modified: relink the path as it was.
                    self.root = path.restore(Some(node));
                    return Err(Error::DuplicateKey);
                }
            };
            cursor = path.descend(node, side);
        }

        // Attach the new leaf and repair the tree along the path back to the
        // root.
        self.len += 1;
        self.root = path.unwind(Some(Box::new(Node::new(key, value))));

        trace!(len = self.len, height = self.height(), "inserted key");

        Ok(())
    }

    /// Remove `key` from the tree, returning the removed key and value.
    ///
    /// Returns [`None`] if `key` is not present, leaving the tree unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = Path::with_capacity(self.path_capacity());

        // Descend to the node holding "key", detaching each ancestor along
        // the way.
        let mut cursor = self.root.take();
        let mut target = loop {
            let node = match cursor {
                Some(v) => v,
                None => {
                    // Not found: the descent ran off the bottom of the tree
                    // without modifying it.
                    self.root = path.restore(None);
                    return None;
                }
            };

            let side = match key.cmp(node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break node,
            };
            cursor = path.descend(node, side);
        };

        // The node to remove may have 0, 1 or 2 children:
        //
        //                          +----------+
        //                          |  parent  |
        //                          +----------+
        //                                |
        //                                v
        //                          +----------+
        //                     +----|  target  |----+
        //                     |    +----------+    |
        //                     |                    |
        //                     v                    v
        //               +-----------+       +------------+
        //               |   left    |       |   right    |
        //               +-----------+       +------------+
        //
        // The replacement for "target" is chosen by the shape of its right
        // subtree.
        let left = target.take_child(Side::Left);
        let replacement = match target.take_child(Side::Right) {
            // No right child: the left subtree (if any) replaces "target".
            None => left,

            // The right child has no left child, so it is the in-order
            // successor of "target" and replaces it directly, adopting the
            // left subtree.
            Some(mut right) if right.left().is_none() => {
                right.set_child(Side::Left, left);
                rebalance(&mut right);
                Some(right)
            }

            // Otherwise the successor is the left-most descendant of "right".
            // Unlink it (linking its right subtree to its parent in its
            // place) and install it in the position of "target".
            Some(right) => {
                let (mut min, rest) = extract_min(right);
                debug_assert!(min.left().is_none());
                debug_assert!(min.right().is_none());

                min.set_child(Side::Left, left);
                min.set_child(Side::Right, rest);
                rebalance(&mut min);
                Some(min)
            }
        };

        self.len -= 1;
        self.root = path.unwind(replacement);

        trace!(len = self.len, height = self.height(), "removed key");

        Some(target.into_tuple())
    }

    /// Return a reference to the value stored for `key`.
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(Node::value)
    }

    /// Return the stored key and value for `key`.
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present.
    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V), Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|v| (v.key(), v.value()))
    }

    /// Return a mutable reference to the value stored for `key`, allowing it
    /// to be updated in place.
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(v) = node {
            match key.cmp(v.key().borrow()) {
                Ordering::Less => node = v.child_mut(Side::Left),
                Ordering::Greater => node = v.child_mut(Side::Right),
                Ordering::Equal => return Ok(v.value_mut()),
            }
        }
        Err(Error::KeyNotFound)
    }

    /// Returns true if `key` is present in the tree.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_ok()
    }

    fn find<Q>(&self, key: &Q) -> Result<&Node<K, V>, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(v) = node {
            node = match key.cmp(v.key().borrow()) {
                Ordering::Less => v.left(),
                Ordering::Greater => v.right(),
                Ordering::Equal => return Ok(v),
            };
        }
        Err(Error::KeyNotFound)
    }

    /// An upper bound on the number of ancestors a descent visits.
    fn path_capacity(&self) -> usize {
        usize::try_from(self.height() + 1).unwrap_or_default()
    }
}

impl<K, V, Q> Index<&Q> for AvlTree<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the tree.
    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for AvlTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consume the tree, yielding the owned entries in ascending key order.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.len)
    }
}
