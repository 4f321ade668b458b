//! # cpm-rs — Change Propagation Risk Analysis
//!
//! Estimates, for a pair of sub-systems in an engineered system, the
//! probability and risk that a change introduced in one sub-system
//! propagates to the other. Input is a pair of weighted dependency
//! matrices (DSMs): one encoding propagation *likelihood*, one encoding
//! propagation *impact*.
//!
//! ## Design Principles
//!
//! 1. **Pure computation**: no I/O, no async, no global state. Matrix
//!    ingestion and batch orchestration live with the caller.
//! 2. **Immutable graphs**: a [`Dsm`] is cleaned, validated, and turned
//!    into a directed weighted graph once, at construction. Trees share
//!    DSMs read-only through `Arc`.
//! 3. **Fail fast**: malformed DSM pairs are rejected when a tree is
//!    built, never mid-traversal. Dirty matrix *cells* are not errors —
//!    anything that does not parse as a finite number is weight zero.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use cpm_rs::{Cell, ChangePropagationTree, Dsm, Instigator};
//!
//! # fn example() -> cpm_rs::Result<()> {
//! // Column instigator: cell (i, j) means "j propagates into i".
//! // Here: a -> b with 0.5, b -> c with 0.5.
//! let cells = vec![
//!     vec![Cell::Empty, Cell::Empty, Cell::Empty],
//!     vec![Cell::from(0.5), Cell::Empty, Cell::Empty],
//!     vec![Cell::Empty, Cell::from(0.5), Cell::Empty],
//! ];
//! let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
//! let dsm = Arc::new(Dsm::new(cells, columns, Instigator::Column)?);
//!
//! // Same DSM for likelihood and impact.
//! let tree = ChangePropagationTree::new(0, 2, Arc::clone(&dsm), dsm)?;
//! let outcome = tree.propagate(4);
//!
//! assert!((outcome.probability() - 0.25).abs() < 1e-9);
//! assert!((outcome.risk()? - 0.125).abs() < 1e-9);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod propagation;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Cell, Dsm, GraphNode, Instigator};

// ============================================================================
// Re-exports: Propagation
// ============================================================================

pub use propagation::{ChangePropagationTree, Propagation, DEFAULT_SEARCH_DEPTH};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The matrix is not square, or its dimension does not match the
    /// number of column labels.
    #[error("matrix dimension {found} does not match column count {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// An instigator string other than `"column"` or `"row"`.
    #[error("invalid instigator {0:?}: must be \"column\" or \"row\"")]
    InvalidInstigator(String),

    /// The impact and likelihood DSMs disagree on instigator or dimension.
    #[error("inconsistent DSM pair: {0}")]
    InconsistentDsmPair(String),

    /// The likelihood graph has a final-hop edge with no counterpart in
    /// the impact graph. The two DSMs encode different topologies.
    #[error("impact graph has no edge {from} -> {to} though the likelihood graph does")]
    MissingImpactValue { from: String, to: String },

    /// Start or target index outside the DSM's node range.
    #[error("node index {index} out of bounds for DSM with {nodes} nodes")]
    IndexOutOfBounds { index: usize, nodes: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
