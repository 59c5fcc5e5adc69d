mod debug_invariants;
mod digraph_tests;
