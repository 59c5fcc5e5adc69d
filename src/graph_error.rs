//! DigraphError: unified error type for sieve-digraph public APIs
//!
//! Every fallible query or constructor in the crate reports through this
//! type. Ids are generic, so offending ids are rendered with their `Debug`
//! form when the error is built.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for digraph operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigraphError {
    /// A query or edge argument references an id outside the declared universe.
    #[error("Unknown id `{0}`: not part of the graph's id universe")]
    UnknownId(String),
    /// A node-level query targets an id that has no bound payload.
    #[error("Unbound id `{0}`: id is part of the graph but has no node")]
    UnboundId(String),
    /// Parent/child relations (or node declarations) are mutually inconsistent.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// An expected id set differs from the graph's id universe.
    #[error("Id set mismatch: missing from graph {missing}, not expected {unexpected}")]
    IdSetMismatch {
        /// Expected ids the graph does not contain.
        missing: String,
        /// Graph ids that were not expected.
        unexpected: String,
    },
    /// Structural mutation on an immutable graph.
    #[error("Unsupported mutation: {0} (graphs are immutable)")]
    UnsupportedMutation(&'static str),
}

impl DigraphError {
    /// Build an [`DigraphError::UnknownId`] from any debuggable id.
    pub fn unknown<I: Debug + ?Sized>(id: &I) -> Self {
        DigraphError::UnknownId(format!("{id:?}"))
    }

    /// Build an [`DigraphError::UnboundId`] from any debuggable id.
    pub fn unbound<I: Debug + ?Sized>(id: &I) -> Self {
        DigraphError::UnboundId(format!("{id:?}"))
    }
}
