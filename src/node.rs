//! Node-level AVL algorithms.
//!
//! Every mutating operation consumes ownership of a subtree and hands back
//! ownership of the (possibly rotated) new subtree root. The caller stores the
//! result in the child slot it took the subtree from.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

use log::trace;

/// A child slot: either an empty subtree or an owned node.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) height: usize,
}

/// Returns the cached height of a subtree, 0 for an empty one.
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Height of the right subtree minus height of the left subtree.
    fn balance_factor(&self) -> isize {
        height(&self.right) as isize - height(&self.left) as isize
    }

    fn fix_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        debug_assert!(self.left.is_some());
        let Some(mut left) = self.left.take() else {
            return self;
        };
        self.left = left.right.take();
        self.fix_height();
        left.right = Some(self);
        left.fix_height();
        trace!("rotated right, subtree height now {}", left.height);
        left
    }

    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        debug_assert!(self.right.is_some());
        let Some(mut right) = self.right.take() else {
            return self;
        };
        self.right = right.left.take();
        self.fix_height();
        right.left = Some(self);
        right.fix_height();
        trace!("rotated left, subtree height now {}", right.height);
        right
    }

    /// Restores the AVL condition at this node after exactly one of its
    /// subtrees changed height by at most one.
    fn balance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let factor = self.balance_factor();
        debug_assert!((-2..=2).contains(&factor));

        if factor == 2 {
            // Right-left case needs the right child turned first
            if let Some(right) = self.right.take() {
                self.right = Some(if right.balance_factor() < 0 {
                    right.rotate_right()
                } else {
                    right
                });
            }
            return self.rotate_left();
        }

        if factor == -2 {
            if let Some(left) = self.left.take() {
                self.left = Some(if left.balance_factor() > 0 {
                    left.rotate_left()
                } else {
                    left
                });
            }
            return self.rotate_right();
        }

        self
    }

    pub(crate) fn find_min(&self) -> &Self {
        match &self.left {
            Some(left) => left.find_min(),
            None => self,
        }
    }

    pub(crate) fn find_max(&self) -> &Self {
        match &self.right {
            Some(right) => right.find_max(),
            None => self,
        }
    }

    /// Detaches the minimum node of this subtree.
    /// Returns the detached node (children cleared) and the rebalanced remainder.
    fn remove_min(mut self: Box<Self>) -> (Box<Self>, Link<K, V>) {
        match self.left.take() {
            None => {
                let right = self.right.take();
                (self, right)
            }
            Some(left) => {
                let (min, rest) = left.remove_min();
                self.left = rest;
                (min, Some(self.balance()))
            }
        }
    }
}

/// Inserts `key` into the subtree, overwriting the value of an equal key.
/// Returns the new subtree root and the previous value, if any.
pub(crate) fn insert<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
) -> (Box<Node<K, V>>, Option<V>) {
    let mut node = match link {
        None => return (Node::leaf(key, value), None),
        Some(node) => node,
    };

    let previous = match key.cmp(&node.key) {
        Ordering::Equal => {
            let previous = mem::replace(&mut node.value, value);
            return (node, Some(previous));
        }
        Ordering::Less => {
            let (left, previous) = insert(node.left.take(), key, value);
            node.left = Some(left);
            previous
        }
        Ordering::Greater => {
            let (right, previous) = insert(node.right.take(), key, value);
            node.right = Some(right);
            previous
        }
    };
    (node.balance(), previous)
}

pub(crate) fn search<'a, K, V, Q>(link: &'a Link<K, V>, key: &Q) -> Option<&'a V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let node = link.as_deref()?;
    match key.cmp(node.key.borrow()) {
        Ordering::Equal => Some(&node.value),
        Ordering::Less => search(&node.left, key),
        Ordering::Greater => search(&node.right, key),
    }
}

pub(crate) fn search_mut<'a, K, V, Q>(link: &'a mut Link<K, V>, key: &Q) -> Option<&'a mut V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let node = link.as_deref_mut()?;
    match key.cmp(node.key.borrow()) {
        Ordering::Equal => Some(&mut node.value),
        Ordering::Less => search_mut(&mut node.left, key),
        Ordering::Greater => search_mut(&mut node.right, key),
    }
}

/// Removes `key` from the subtree.
/// Returns the new subtree root and the removed value. An absent key leaves
/// the subtree as it was.
pub(crate) fn remove<K, V, Q>(link: Link<K, V>, key: &Q) -> (Link<K, V>, Option<V>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = match link {
        None => return (None, None),
        Some(node) => node,
    };

    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => {
            let Node {
                value, left, right, ..
            } = *node;
            let replacement = match right {
                None => left,
                Some(right) => {
                    // Promote the minimum of the right subtree
                    let (mut min, rest) = right.remove_min();
                    min.left = left;
                    min.right = rest;
                    Some(min.balance())
                }
            };
            return (replacement, Some(value));
        }
    };
    (Some(node.balance()), removed)
}

/// In-order walk. The first `Err` returned by `visit` stops the walk and is
/// handed back unchanged.
pub(crate) fn traverse<'a, K, V, E, F>(link: &'a Link<K, V>, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&'a K, &'a V) -> Result<(), E>,
{
    if let Some(node) = link {
        traverse(&node.left, visit)?;
        visit(&node.key, &node.value)?;
        traverse(&node.right, visit)?;
    }
    Ok(())
}
