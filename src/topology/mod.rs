//! Id-level topology: the adjacency store and the query surface over it.
//!
//! This module provides:
//! - [`bounds::IdLike`], the bound every identifier type satisfies
//! - [`id_graph::IdGraph`], an immutable CSR-backed digraph over a fixed universe
//! - [`digraph::Digraph`], the read-only query trait shared with
//!   [`NodeGraph`](crate::node::NodeGraph)
//!
//! Most users build an `IdGraph` with one of its constructors and query it
//! through `Digraph`.

pub mod bounds;
pub mod digraph;
pub mod id_graph;

pub use bounds::IdLike;
pub use digraph::Digraph;
pub use id_graph::{EdgeMutation, IdGraph, Neighbors};

#[cfg(test)]
mod tests;
