#![cfg_attr(docsrs, feature(doc_cfg))]
//! # sieve-digraph
//!
//! sieve-digraph is a small, immutable directed-graph engine. Given a finite
//! universe of identifiers and a parent/child relation it answers structural
//! queries (parents, children, ancestors, descendants, roots, leaves, cycle
//! detection, topological order) and can bind payload values ("nodes") to the
//! identifiers while keeping the same query surface.
//!
//! ## Features
//! - CSR-backed [`IdGraph`](topology::IdGraph) over any `Clone + Eq + Hash + Debug` id
//! - One query trait, [`Digraph`](topology::Digraph), shared by id and node graphs
//! - Lazy DFS/BFS [`walk`](algs::walk) driven by an arbitrary expansion function
//! - Kahn topological sort with an explicit [`Topsort`](algs::Topsort) outcome
//! - [`NodeGraph`](node::NodeGraph) for complete and partial payload binding
//!
//! ## Determinism
//!
//! Neighbor lists, walks and topological orders follow the universe's
//! declaration order; no output depends on hashing.
//!
//! ## Usage
//!
//! ```
//! use sieve_digraph::prelude::*;
//!
//! let g = IdGraph::from_parent_map(["a", "b", "c"], [("b", vec!["a"]), ("c", vec!["b"])])?;
//! assert_eq!(g.root_ids(), ["a"]);
//! assert!(g.is_ancestor_of(&"a", &"c", false)?);
//! assert_eq!(g.optional_topsort(), Topsort::Order(vec!["a", "b", "c"]));
//! # Ok::<(), DigraphError>(())
//! ```
//!
//! ## Invariant checking
//! Constructors re-validate the adjacency store in debug builds. Enable the
//! `strict-invariants` or `check-invariants` feature to keep the checks in
//! release builds.

pub mod algs;
pub mod debug_invariants;
pub mod format;
pub mod graph_error;
pub mod node;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use graph_error::DigraphError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::topsort::Topsort;
    pub use crate::algs::traversal::{Dir, Strategy, WalkBuilder, walk, walk_list};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph_error::DigraphError;
    pub use crate::node::{BasicDownNode, BasicUpNode, DownNode, NodeGraph, UpNode};
    pub use crate::topology::{Digraph, EdgeMutation, IdGraph, IdLike};
}
