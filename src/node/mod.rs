//! Node-binding layer: payloads on top of an [`IdGraph`](crate::topology::IdGraph).
//!
//! - [`capability`]: how a payload declares its edges.
//! - [`node_graph`]: the immutable [`NodeGraph`] and its node-level queries.

pub mod capability;
pub mod node_graph;

pub use capability::{BasicDownNode, BasicUpNode, DownNode, UpNode, down_node, up_node};
pub use node_graph::NodeGraph;
