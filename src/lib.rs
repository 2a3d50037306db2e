//! An ordered map backed by a self-balancing AVL tree.
//!
//! Nodes are owned recursively: every insert and remove descends to the
//! affected position, then rebalances each node on the way back up to the
//! root. Lookups never mutate.
//!
//! The crate logs through the [`log`] facade (rotations at `trace`, removals
//! at `debug`) and never installs a logger itself.

mod node;
mod tree;

pub use tree::Tree;

#[cfg(test)]
mod proptests;
