//! # DSM Model
//!
//! The data side of the crate: raw matrix cells, dependency matrices,
//! and the directed weighted graphs derived from them.
//!
//! Design rule: this module is pure data — no search state, no
//! aggregation logic. Everything here is immutable once a [`Dsm`] has
//! been constructed.

pub mod cell;
pub mod dsm;
pub mod node;

pub use cell::Cell;
pub use dsm::{Dsm, Instigator};
pub use node::GraphNode;
