//! Raw matrix cell values as supplied by external ingestion.

use serde::{Deserialize, Serialize};

/// A single raw cell of a dependency matrix.
///
/// Real-world DSMs are sparsely populated and dirty: cells may hold
/// numbers, numbers-as-text, blanks, or placeholder symbols like `-`.
/// The cleaning rule is uniform — anything that does not parse as a
/// finite number is weight zero, meaning "no edge". A dirty cell is
/// never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// The cleaned edge weight of this cell.
    pub fn weight(&self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::Number(n) if n.is_finite() => *n,
            Cell::Number(_) => 0.0,
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                _ => 0.0,
            },
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<Option<f64>> for Cell {
    fn from(n: Option<f64>) -> Self {
        match n {
            Some(n) => Cell::Number(n),
            None => Cell::Empty,
        }
    }
}
