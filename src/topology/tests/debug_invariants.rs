#![cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]

use crate::debug_invariants::DebugInvariants;
use crate::graph_error::DigraphError;
use crate::topology::id_graph::IdGraph;

struct Broken;

impl DebugInvariants for Broken {
    fn validate_invariants(&self) -> Result<(), DigraphError> {
        Err(DigraphError::InvariantViolation("always broken".to_string()))
    }
}

#[test]
#[should_panic(expected = "[invariants] graph invariants violated")]
fn violated_invariant_panics_in_debug() {
    Broken.debug_assert_invariants();
}

#[test]
fn constructed_graphs_validate() {
    let g = IdGraph::from_child_map([1u32, 2, 3], [(1, vec![2, 3]), (2, vec![3])]).unwrap();
    g.validate_invariants().unwrap();
    g.debug_assert_invariants();

    let empty = IdGraph::<u32>::isolated([]).unwrap();
    empty.validate_invariants().unwrap();
}
