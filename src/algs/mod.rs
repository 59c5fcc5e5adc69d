//! Re-export public algorithms.

pub mod closure;
pub mod topsort;
pub mod traversal;

pub use topsort::Topsort;
pub use traversal::{Dir, Strategy, Walk, WalkBuilder, walk, walk_list};
