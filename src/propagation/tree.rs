//! Bounded-depth path search and noisy-OR aggregation.

use std::collections::VecDeque;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::model::{Dsm, Instigator};
use crate::{Error, Result};
use super::leaf::{LeafArena, LeafId};

/// Default maximum number of edges traversed between start and target.
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Ordered node indices visited along one search branch. Inline
/// capacity covers typical search depths without allocating.
type VisitedPath = SmallVec<[usize; 8]>;

// ============================================================================
// ChangePropagationTree
// ============================================================================

/// Computes how a change in the start sub-system affects the target
/// sub-system, given a likelihood DSM and an impact DSM.
///
/// Construction validates the DSM pair; [`propagate`] runs the search
/// and returns a [`Propagation`] that answers the aggregation queries.
///
/// [`propagate`]: ChangePropagationTree::propagate
pub struct ChangePropagationTree {
    start_index: usize,
    target_index: usize,
    dsm_impact: Arc<Dsm>,
    dsm_likelihood: Arc<Dsm>,
}

impl ChangePropagationTree {
    /// Bind a (start, target) pair to a DSM pair.
    ///
    /// Fails with [`Error::InconsistentDsmPair`] if the DSMs disagree
    /// on instigator or dimension, and [`Error::IndexOutOfBounds`] if
    /// either index is outside the node range. Both checks run before
    /// any traversal work.
    pub fn new(
        start_index: usize,
        target_index: usize,
        dsm_impact: Arc<Dsm>,
        dsm_likelihood: Arc<Dsm>,
    ) -> Result<Self> {
        if dsm_impact.instigator() != dsm_likelihood.instigator() {
            return Err(Error::InconsistentDsmPair(format!(
                "impact instigator \"{}\" does not match likelihood instigator \"{}\"",
                dsm_impact.instigator(),
                dsm_likelihood.instigator(),
            )));
        }
        if dsm_impact.len() != dsm_likelihood.len() {
            return Err(Error::InconsistentDsmPair(format!(
                "impact DSM has {} nodes but likelihood DSM has {}",
                dsm_impact.len(),
                dsm_likelihood.len(),
            )));
        }

        let nodes = dsm_impact.len();
        for index in [start_index, target_index] {
            if index >= nodes {
                return Err(Error::IndexOutOfBounds { index, nodes });
            }
        }

        // Each DSM transposes its matrix when rows instigate; swapping
        // the endpoints compensates, keeping the logical (start, target)
        // pair intact under either convention.
        let (start_index, target_index) = match dsm_impact.instigator() {
            Instigator::Column => (start_index, target_index),
            Instigator::Row => (target_index, start_index),
        };

        Ok(Self {
            start_index,
            target_index,
            dsm_impact,
            dsm_likelihood,
        })
    }

    pub fn dsm_impact(&self) -> &Arc<Dsm> {
        &self.dsm_impact
    }

    pub fn dsm_likelihood(&self) -> &Arc<Dsm> {
        &self.dsm_likelihood
    }

    /// Enumerate cycle-free paths of at most `search_depth` edges from
    /// start to target over the likelihood graph, folding completed
    /// paths into a DAG rooted at the start leaf.
    ///
    /// Breadth-first. A popped leaf sitting on the target node is
    /// registered backward and never expanded; expansion rejects
    /// neighbors already visited on the branch. A `search_depth` of 0
    /// traverses no edges at all.
    pub fn propagate(&self, search_depth: usize) -> Propagation<'_> {
        let likelihood = self.dsm_likelihood.graph();
        let mut arena = LeafArena::new();
        let root = arena.push_root(self.start_index);

        let mut frontier: VecDeque<(LeafId, VisitedPath)> = VecDeque::new();
        frontier.push_back((root, SmallVec::from_slice(&[self.start_index])));

        let mut completed = 0usize;
        while let Some((leaf_id, visited)) = frontier.pop_front() {
            let (node_index, depth) = {
                let leaf = &arena[leaf_id];
                (leaf.node_index, leaf.depth)
            };

            if node_index == self.target_index {
                arena.register_path(leaf_id);
                completed += 1;
                trace!(depth, "registered completed path");
                continue;
            }
            if depth >= search_depth {
                continue;
            }

            // Sort for a reproducible expansion order.
            let mut edges: Vec<(usize, f64)> = likelihood[node_index].edges().collect();
            edges.sort_unstable_by_key(|&(index, _)| index);

            for (next, _) in edges {
                if visited.contains(&next) {
                    continue;
                }
                let child = arena.push_child(next, leaf_id, depth + 1);
                let mut path = visited.clone();
                path.push(next);
                frontier.push_back((child, path));
            }
        }

        debug!(
            start = self.start_index,
            target = self.target_index,
            search_depth,
            leaves = arena.len(),
            paths = completed,
            "propagation search finished"
        );

        Propagation {
            tree: self,
            arena,
            root,
        }
    }
}

// ============================================================================
// Propagation
// ============================================================================

/// The registered path DAG produced by [`ChangePropagationTree::propagate`].
///
/// Owning the arena here, rather than mutating the tree, means the
/// aggregation queries cannot be called before a search has run.
pub struct Propagation<'a> {
    tree: &'a ChangePropagationTree,
    arena: LeafArena,
    root: LeafId,
}

impl Propagation<'_> {
    /// Probability that a change at the start node reaches the target
    /// node along at least one registered path.
    ///
    /// Independent downstream routes combine as noisy-OR: with channel
    /// probabilities `p_k`, at least one succeeds with
    /// `1 - prod(1 - p_k)`.
    pub fn probability(&self) -> f64 {
        self.probability_of(self.root)
    }

    fn probability_of(&self, id: LeafId) -> f64 {
        let leaf = &self.arena[id];
        if leaf.children.is_empty() {
            // Childless root: no path reached the target. Any other
            // childless leaf on the DAG is a path terminal — arrival
            // is certain once there.
            return if leaf.parent.is_none() { 0.0 } else { 1.0 };
        }

        let mut no_channel = 1.0;
        for (&next, &child) in &leaf.children {
            let weight = self.likelihood_weight(leaf.node_index, next);
            no_channel *= 1.0 - weight * self.probability_of(child);
        }
        1.0 - no_channel
    }

    /// Risk that a change at the start node propagates to the target:
    /// likelihood weights chain every hop, and the final hop before the
    /// target contributes its *impact* weight.
    ///
    /// Fails with [`Error::MissingImpactValue`] when a final-hop edge
    /// exists in the likelihood graph but not in the impact graph —
    /// mismatched topologies are a data-integrity error, never a
    /// zero-impact assumption.
    pub fn risk(&self) -> Result<f64> {
        self.risk_of(self.root)
    }

    fn risk_of(&self, id: LeafId) -> Result<f64> {
        let leaf = &self.arena[id];
        if leaf.children.is_empty() {
            return match leaf.parent {
                None => Ok(0.0),
                Some(parent) => {
                    let impact = self.tree.dsm_impact.graph();
                    let parent = &self.arena[parent];
                    impact[parent.node_index]
                        .edge_weight(leaf.node_index)
                        .ok_or_else(|| Error::MissingImpactValue {
                            from: impact[parent.node_index].name.clone(),
                            to: impact[leaf.node_index].name.clone(),
                        })
                }
            };
        }

        let mut no_channel = 1.0;
        for (&next, &child) in &leaf.children {
            let weight = self.likelihood_weight(leaf.node_index, next);
            no_channel *= 1.0 - weight * self.risk_of(child)?;
        }
        Ok(1.0 - no_channel)
    }

    /// Number of leaves materialized by the search.
    pub fn leaf_count(&self) -> usize {
        self.arena.len()
    }

    fn likelihood_weight(&self, from: usize, to: usize) -> f64 {
        // Children are registered strictly from likelihood edges, so
        // the lookup cannot miss.
        self.tree.dsm_likelihood.graph()[from]
            .edge_weight(to)
            .unwrap_or(0.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
