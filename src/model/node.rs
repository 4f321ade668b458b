//! Node in a DSM dependency graph.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A vertex of the directed weighted graph derived from a DSM.
///
/// Outgoing edges map neighbor index to a nonzero weight: "this node
/// can propagate into that node with probability/impact `weight`".
/// Absence of a key means no direct propagation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Position in the DSM's column order.
    pub index: usize,
    /// Column label.
    pub name: String,
    edges: HashMap<usize, f64>,
}

impl GraphNode {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            edges: HashMap::new(),
        }
    }

    /// Insert or overwrite the edge to `target`.
    ///
    /// The DSM builder filters self-edges and zero weights before
    /// calling this, so neither ever lands in the map.
    pub(crate) fn add_edge(&mut self, target: usize, weight: f64) {
        debug_assert_ne!(target, self.index, "self-edges are never stored");
        debug_assert_ne!(weight, 0.0, "zero weights mean no edge");
        self.edges.insert(target, weight);
    }

    /// Weight of the edge to `index`, if one exists.
    pub fn edge_weight(&self, index: usize) -> Option<f64> {
        self.edges.get(&index).copied()
    }

    /// Iterate over `(neighbor index, weight)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.edges.iter().map(|(&index, &weight)| (index, weight))
    }

    /// Number of outgoing edges.
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut neighbors: Vec<usize> = self.edges.keys().copied().collect();
        neighbors.sort_unstable();
        write!(f, "{}[{:?}]", self.name, neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_edge() {
        let mut node = GraphNode::new(0, "a");
        node.add_edge(1, 0.5);
        node.add_edge(2, 0.3);

        assert_eq!(node.edge_weight(1), Some(0.5));
        assert_eq!(node.edge_weight(2), Some(0.3));
        assert_eq!(node.edge_weight(3), None);
        assert_eq!(node.degree(), 2);
    }

    #[test]
    fn add_edge_overwrites() {
        let mut node = GraphNode::new(0, "a");
        node.add_edge(1, 0.5);
        node.add_edge(1, 0.9);

        assert_eq!(node.edge_weight(1), Some(0.9));
        assert_eq!(node.degree(), 1);
    }
}
