//! # Change Propagation
//!
//! Bounded-depth, cycle-free path search over the likelihood graph and
//! bottom-up noisy-OR aggregation of probability and risk.
//!
//! The search materializes one [`Leaf`] per node visit in a flat
//! [`LeafArena`]; completed start-to-target paths are folded backward
//! into a DAG whose `children` maps enumerate every next hop some
//! surviving path used. The aggregation queries walk that DAG.

pub mod leaf;
pub mod tree;

pub use leaf::{Leaf, LeafArena, LeafId};
pub use tree::{ChangePropagationTree, Propagation, DEFAULT_SEARCH_DEPTH};
