mod level_order;
mod owned_iter;
mod spine;

use std::iter::FusedIterator;

pub use owned_iter::*;

use crate::node::{Node, Side};
use level_order::LevelOrder;
use spine::Spine;

/// The order in which an [`Iter`] visits the entries of an
/// [`AvlTree`](crate::AvlTree).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit entries in increasing key order.
    #[default]
    Ascending,

    /// Visit entries in decreasing key order.
    Descending,

    /// Visit entries breadth-first, from the root downwards and left to right
    /// within each level.
    ///
    /// Inserting the yielded entries into an empty tree in this order
    /// reproduces the shape of the source tree, with no rebalancing needed.
    LevelOrder,
}

/// The lifecycle of an [`Iter`] cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The cursor has not yet been advanced onto the first element.
    BeforeFirst,
    /// The cursor points at an element that has not been yielded.
    Active,
    /// Every element has been yielded (terminal).
    AfterLast,
}

#[derive(Debug)]
enum Walk<'a, K, V> {
    Spine(Spine<'a, K, V>),
    LevelOrder(LevelOrder<'a, K, V>),
}

impl<'a, K, V> Walk<'a, K, V> {
    fn next_node(&mut self) -> Option<&'a Node<K, V>> {
        match self {
            Self::Spine(v) => v.next_node(),
            Self::LevelOrder(v) => v.next_node(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Spine(v) => v.clear(),
            Self::LevelOrder(v) => v.clear(),
        }
    }
}

/// A lazy cursor over the `(key, value)` entries of an
/// [`AvlTree`](crate::AvlTree), in the [`TraversalOrder`] it was created
/// with.
///
/// The cursor runs one element ahead: the next element to be yielded is
/// located when the previous one is handed out (or when the cursor is
/// created), and can be inspected with [`Iter::peek()`].
///
/// An [`Iter`] borrows the tree it walks, so the tree cannot be modified
/// while the iterator is alive. To walk the tree again, create a new
/// iterator.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    state: State,
    current: Option<&'a Node<K, V>>,
    walk: Walk<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, len: usize, order: TraversalOrder) -> Self {
        let walk = match order {
            TraversalOrder::Ascending => Walk::Spine(Spine::new(root, Side::Left)),
            TraversalOrder::Descending => Walk::Spine(Spine::new(root, Side::Right)),
            TraversalOrder::LevelOrder => Walk::LevelOrder(LevelOrder::new(root)),
        };

        let mut this = Self {
            state: State::BeforeFirst,
            current: None,
            walk,
            remaining: len,
        };

        // Prime the cursor so the first element is ready.
        this.advance();

        this
    }

    /// Move the cursor onto the next element of the walk, if any.
    fn advance(&mut self) {
        if self.state == State::AfterLast {
            return;
        }

        self.current = self.walk.next_node();
        self.state = match self.current {
            Some(_) => State::Active,
            None => {
                self.walk.clear();
                State::AfterLast
            }
        };
    }

    /// Return the element the next call to [`Iterator::next()`] will yield,
    /// without advancing the cursor.
    pub fn peek(&self) -> Option<(&'a K, &'a V)> {
        match self.state {
            State::Active => self.current.map(|v| (v.key(), v.value())),
            State::BeforeFirst | State::AfterLast => None,
        }
    }

    /// Returns true once every element has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.state == State::AfterLast
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        debug_assert_ne!(self.state, State::BeforeFirst);

        let v = match self.state {
            State::Active => self.current?,
            State::BeforeFirst | State::AfterLast => return None,
        };

        self.advance();
        self.remaining -= 1;

        Some((v.key(), v.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}
