//! Flat arena of search leaves.
//!
//! Each leaf is one node visit during one `propagate` call. Leaves
//! reference each other by arena index, so the whole search tree is a
//! single `Vec` rather than a web of owning pointers.

use std::ops::Index;

use hashbrown::HashMap;

/// Index of a leaf within its [`LeafArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafId(usize);

/// One node visit on one search branch.
pub struct Leaf {
    /// Index of the visited node, valid in both the likelihood and the
    /// impact graph (the two graphs share column order).
    pub node_index: usize,
    /// The leaf that led here; `None` for the root.
    pub parent: Option<LeafId>,
    /// Distance from the root in edges.
    pub depth: usize,
    /// Next hops on registered start-to-target paths, keyed by node
    /// index. Populated only by backward registration after a target
    /// hit: a childless leaf reached through `children` links is a
    /// path terminal.
    pub children: HashMap<usize, LeafId>,
}

/// Owns every leaf created by one `propagate` call.
#[derive(Default)]
pub struct LeafArena {
    leaves: Vec<Leaf>,
}

impl LeafArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn push_root(&mut self, node_index: usize) -> LeafId {
        self.push(node_index, None, 0)
    }

    pub fn push_child(&mut self, node_index: usize, parent: LeafId, depth: usize) -> LeafId {
        self.push(node_index, Some(parent), depth)
    }

    fn push(&mut self, node_index: usize, parent: Option<LeafId>, depth: usize) -> LeafId {
        let id = LeafId(self.leaves.len());
        self.leaves.push(Leaf {
            node_index,
            parent,
            depth,
            children: HashMap::new(),
        });
        id
    }

    /// Record a completed path by walking parent links from the
    /// target-reaching leaf back to the root, inserting each child into
    /// its parent's `children` map.
    ///
    /// Idempotent: paths sharing a prefix re-insert the same entries.
    pub fn register_path(&mut self, terminal: LeafId) {
        let mut child = terminal;
        while let Some(parent) = self.leaves[child.0].parent {
            let node_index = self.leaves[child.0].node_index;
            self.leaves[parent.0].children.insert(node_index, child);
            child = parent;
        }
    }
}

impl Index<LeafId> for LeafArena {
    type Output = Leaf;

    fn index(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }
}
