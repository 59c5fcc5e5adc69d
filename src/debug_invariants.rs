//! Post-construction invariant checks.
//!
//! Graphs are validated by their constructors; this trait re-runs the full
//! structural check so debug builds (and `strict-invariants` /
//! `check-invariants` builds) catch a constructor that let an inconsistent
//! instance through.

use crate::graph_error::DigraphError;

/// Run a fallible invariant check and panic on error when invariant checking
/// is enabled. Compiles to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        if cfg!(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants")) {
            if let Err(e) = $expr {
                panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
            }
        }
    };
}

/// Structures that can re-validate their own invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), DigraphError>;

    /// Panic on a violated invariant when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate_invariants(), "graph invariants violated");
    }
}
