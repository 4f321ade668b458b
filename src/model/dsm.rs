//! Dependency matrix validation, cleaning, and graph construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};
use super::{Cell, GraphNode};

// ============================================================================
// Instigator
// ============================================================================

/// Which matrix axis is the "cause" of propagation.
///
/// With `Column` (the default), cell `(i, j)` reads "column `j`
/// propagates into row `i`". With `Row`, cell `(i, j)` reads "row `i`
/// propagates into column `j`"; the DSM transposes its matrix at
/// construction so downstream logic is always column-major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instigator {
    #[default]
    Column,
    Row,
}

impl FromStr for Instigator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "column" => Ok(Instigator::Column),
            "row" => Ok(Instigator::Row),
            other => Err(Error::InvalidInstigator(other.to_string())),
        }
    }
}

impl fmt::Display for Instigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instigator::Column => write!(f, "column"),
            Instigator::Row => write!(f, "row"),
        }
    }
}

// ============================================================================
// Dsm
// ============================================================================

/// A validated dependency matrix and the directed weighted graph
/// derived from it.
///
/// Built once — clean, validate, transpose if rows instigate, build the
/// node graph — and immutable thereafter. Multiple propagation trees
/// may share one `Dsm` read-only (wrap it in `Arc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dsm {
    columns: Vec<String>,
    /// Cleaned weights, post-transpose when `instigator` is `Row`.
    matrix: Vec<Vec<f64>>,
    instigator: Instigator,
    graph: Vec<GraphNode>,
}

impl Dsm {
    /// Build a DSM from raw cells and ordered column labels.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless `matrix` is n×n
    /// with n = `columns.len()`. Dirty cells are cleaned to weight zero
    /// and never fail (see [`Cell::weight`]).
    pub fn new(
        matrix: Vec<Vec<Cell>>,
        columns: Vec<String>,
        instigator: Instigator,
    ) -> Result<Self> {
        let n = columns.len();
        if matrix.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: matrix.len(),
            });
        }
        if let Some(row) = matrix.iter().find(|row| row.len() != n) {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: row.len(),
            });
        }

        let mut cleaned: Vec<Vec<f64>> = matrix
            .iter()
            .map(|row| row.iter().map(Cell::weight).collect())
            .collect();

        if instigator == Instigator::Row {
            transpose(&mut cleaned);
        }

        let mut graph: Vec<GraphNode> = columns
            .iter()
            .enumerate()
            .map(|(index, name)| GraphNode::new(index, name))
            .collect();

        // Column-major post-transpose: cell (i, j) adds edge j -> i.
        let mut edge_count = 0usize;
        for (i, row) in cleaned.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                if i == j || weight == 0.0 {
                    continue;
                }
                graph[j].add_edge(i, weight);
                edge_count += 1;
            }
        }

        debug!(nodes = n, edges = edge_count, %instigator, "built DSM graph");

        Ok(Self {
            columns,
            matrix: cleaned,
            instigator,
            graph,
        })
    }

    /// Number of sub-systems (nodes).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Ordered column labels.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Cleaned weight matrix (transposed when rows instigate).
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn instigator(&self) -> Instigator {
        self.instigator
    }

    /// The derived graph, one node per column, in column order.
    pub fn graph(&self) -> &[GraphNode] {
        &self.graph
    }

    /// Node at `index`, if within range.
    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.graph.get(index)
    }
}

impl fmt::Display for Dsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join(", "))?;
        for row in &self.matrix {
            writeln!(f, "{row:?}")?;
        }
        Ok(())
    }
}

/// In-place square transpose.
fn transpose(matrix: &mut [Vec<f64>]) {
    for i in 0..matrix.len() {
        for j in 0..i {
            let tmp = matrix[i][j];
            matrix[i][j] = matrix[j][i];
            matrix[j][i] = tmp;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
