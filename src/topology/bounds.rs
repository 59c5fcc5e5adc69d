//! Common bound aliases used across graph code.
//!
//! These traits have blanket impls, so any type satisfying the underlying
//! bounds implements them automatically. They only shorten `where` clauses.

/// Canonical bound set for graph identifiers.
///
/// - `Clone` so owned ids (`String`, paths, …) can be handed back to callers
/// - `Eq + Hash` for the id → dense index map
/// - `Debug` for error messages and invariant diagnostics
///
/// Ordering is deliberately not required: deterministic output comes from the
/// universe's declaration order, not from sorting ids.
pub trait IdLike: Clone + Eq + std::hash::Hash + std::fmt::Debug {}
impl<T> IdLike for T where T: Clone + Eq + std::hash::Hash + std::fmt::Debug {}
