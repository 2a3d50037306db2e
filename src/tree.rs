//! An ordered map implemented with an AVL tree.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;

use log::debug;

use crate::node::{self, Link};

/// An ordered map implemented with an AVL tree.
///
/// Each tree exclusively owns its nodes. There is no internal locking:
/// mutation goes through `&mut Tree`, so sharing a tree between threads that
/// mutate it requires external synchronization (e.g. a `Mutex`).
///
/// ```
/// use avl_tree::Tree;
/// let mut tree = Tree::new();
/// tree.insert(0, "zero");
/// tree.insert(1, "one");
/// tree.insert(2, "two");
/// assert_eq!(tree.search(&1), Some(&"one"));
/// tree.remove(&1);
/// assert!(tree.search(&1).is_none());
/// ```
#[derive(Clone)]
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K: Ord, V> Tree<K, V> {
    /// Creates an empty tree.
    /// No memory is allocated until the first entry is inserted.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts a key-value pair into the tree.
    ///
    /// If the key was already present its value is overwritten in place and
    /// the old value is returned; the number of entries does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, previous) = node::insert(self.root.take(), key, value);
        self.root = Some(root);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::search(&self.root, key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::search_mut(&mut self.root, key)
    }

    /// Returns true if the tree contains a value for the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Removes a key from the tree.
    /// Returns the value at the key if the key was previously in the tree.
    /// Removing an absent key leaves the tree untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = node::remove(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            debug_assert!(self.len >= 1);
            self.len -= 1;
            debug!("removed entry, {} left", self.len);
        }
        removed
    }

    /// Validates key order, cached heights, the AVL condition and the entry count.
    /// Panics on the first violation found.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check_node<K: Ord, V>(link: &Link<K, V>) -> (usize, usize) {
            match link {
                None => (0, 0),
                Some(node) => {
                    let (left_height, left_count) = check_node(&node.left);
                    let (right_height, right_count) = check_node(&node.right);

                    // Check height
                    assert_eq!(node.height, 1 + std::cmp::max(left_height, right_height));

                    // Check AVL condition (nearly balance)
                    assert!(left_height <= right_height + 1);
                    assert!(right_height <= left_height + 1);

                    (node.height, left_count + right_count + 1)
                }
            }
        }

        let (_, num_nodes) = check_node(&self.root);
        assert_eq!(num_nodes, self.len);

        // Check key order
        let mut previous: Option<&K> = None;
        self.for_each(|key, _| {
            if let Some(previous) = previous {
                assert!(previous < key);
            }
            previous = Some(key);
        });
    }
}

impl<K, V> Tree<K, V> {
    /// Returns true if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        debug!("tree cleared");
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let min = self.root.as_deref()?.find_min();
        Some((&min.key, &min.value))
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let max = self.root.as_deref()?.find_max();
        Some((&max.key, &max.value))
    }

    /// Visits all entries in ascending key order.
    ///
    /// The walk stops at the first `Err` returned by `visit`; that error is
    /// returned as is and no further entries are visited.
    ///
    /// ```
    /// use avl_tree::Tree;
    /// let tree: Tree<_, _> = (0..10).map(|k| (k, k * k)).collect();
    /// let mut seen = Vec::new();
    /// let result = tree.traverse(|&key, _| {
    ///     if key == 3 {
    ///         return Err("stop");
    ///     }
    ///     seen.push(key);
    ///     Ok(())
    /// });
    /// assert_eq!(result, Err("stop"));
    /// assert_eq!(seen, [0, 1, 2]);
    /// ```
    pub fn traverse<'a, E, F>(&'a self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&'a K, &'a V) -> Result<(), E>,
    {
        node::traverse(&self.root, &mut visit)
    }

    /// Visits all entries in ascending key order.
    pub fn for_each<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        let result = self.traverse(|key, value| {
            visit(key, value);
            Ok::<(), Infallible>(())
        });
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.len);
        self.for_each(|key, value| entries.push((key, value)));
        entries
    }
}

impl<K: Ord, V> Default for Tree<K, V> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Tree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.entries() == other.entries()
    }
}

impl<K: Eq, V: Eq> Eq for Tree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        self.for_each(|key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}
