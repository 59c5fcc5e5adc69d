mod util;

use sieve_digraph::prelude::*;
use util::*;

#[test]
fn sample_from_parent_map() {
    verify_sample_graph(&sample_from_parents());
}

#[test]
fn sample_from_child_map() {
    verify_sample_graph(&sample_from_children());
}

#[test]
fn sample_from_both_maps() {
    let g = IdGraph::from_maps(
        list(SAMPLE_IDS),
        sieve_digraph::format::parse_multimap(SAMPLE_PARENTS).unwrap(),
        sieve_digraph::format::parse_multimap(SAMPLE_CHILDREN).unwrap(),
    )
    .unwrap();
    verify_sample_graph(&g);
}

#[test]
fn sample_from_edge_list() {
    // f has no edges, so an edge list alone cannot declare it
    let g = IdGraph::from_parent_edges(
        [("a", "d"), ("a", "e"), ("b", "a"), ("c", "b"), ("d", "c"), ("e", "a")]
            .map(|(id, parent)| (s(id), s(parent))),
    );
    assert_eq!(g.id_universe(), list("a, d, e, b, c").as_slice());
    assert_eq!(g, sample_from_parents().filter(list("a, b, c, d, e")).unwrap());
}

#[test]
fn both_constructors_agree() {
    assert_eq!(sample_from_parents(), sample_from_children());
    assert_eq!(sample_from_parents().edge_count(), 6);
}

#[test]
fn inconsistent_maps_are_rejected() {
    let err = IdGraph::from_maps(
        list(SAMPLE_IDS),
        sieve_digraph::format::parse_multimap(SAMPLE_PARENTS).unwrap(),
        sieve_digraph::format::parse_multimap("a = b").unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, DigraphError::InvariantViolation(_)));
}

#[test]
fn queries_outside_universe_fail() {
    let g = sample_from_parents();
    let unknown = DigraphError::unknown(&s("zz"));
    assert_eq!(g.parent_ids(&s("zz")), Err(unknown.clone()));
    assert_eq!(g.is_root(&s("zz")), Err(unknown.clone()));
    assert_eq!(g.filter(list("a, zz")), Err(unknown.clone()));
    assert_eq!(g.descendant_graph(list("zz"), true), Err(unknown));
    assert!(!g.contains_id(&s("zz")));
}
