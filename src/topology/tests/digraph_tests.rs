use std::collections::{HashMap, HashSet};

use crate::algs::traversal::{Dir, Strategy};
use crate::graph_error::DigraphError;
use crate::topology::digraph::Digraph;
use crate::topology::id_graph::IdGraph;

// r1 -> m ; r2 -> m ; m -> l ; iso
fn sample() -> IdGraph<&'static str> {
    IdGraph::from_child_map(
        ["r1", "r2", "m", "l", "iso"],
        [("r1", vec!["m"]), ("r2", vec!["m"]), ("m", vec!["l"])],
    )
    .unwrap()
}

#[test]
fn roots_and_leaves_in_declaration_order() {
    let g = sample();
    assert_eq!(g.root_ids(), ["r1", "r2", "iso"]);
    assert_eq!(g.leaf_ids(), ["l", "iso"]);
    assert!(g.is_root(&"iso").unwrap() && g.is_leaf(&"iso").unwrap());
    assert!(!g.is_root(&"m").unwrap());
}

#[test]
fn parent_child_predicates() {
    let g = sample();
    assert!(g.is_parent_of(&"r1", &"m").unwrap());
    assert!(g.is_child_of(&"m", &"r2").unwrap());
    assert!(!g.is_parent_of(&"m", &"r1").unwrap());
    assert_eq!(g.is_parent_of(&"m", &"nope"), Err(DigraphError::unknown("nope")));
}

#[test]
fn maps_cover_every_id() {
    let g = sample();
    let pm = g.parent_map();
    assert_eq!(pm.len(), 5);
    assert_eq!(pm[&"m"], HashSet::from(["r1", "r2"]));
    assert!(pm[&"iso"].is_empty());
    let cm: HashMap<_, _> = g.child_map();
    assert_eq!(cm[&"r1"], HashSet::from(["m"]));
    assert_eq!(
        IdGraph::from_child_map(g.id_universe().to_vec(), cm).unwrap(),
        IdGraph::from_parent_map(g.id_universe().to_vec(), pm).unwrap()
    );
}

#[test]
fn unknown_ids_error_instead_of_empty() {
    let g = sample();
    assert!(g.parent_ids(&"x").is_err());
    assert!(g.child_ids(&"x").is_err());
    assert!(g.ancestor_ids(&"x", true).is_err());
    assert!(g.walk_ids(Strategy::BFS, true, ["x"], Dir::Down).is_err());
    assert!(g.child_ids(&"iso").unwrap().is_empty());
}

#[test]
fn assert_ids_equal_reports_both_sides() {
    let g = sample();
    g.assert_ids_equal(["iso", "l", "m", "r2", "r1"]).unwrap();
    match g.assert_ids_equal(["r1", "r2", "m", "l", "extra"]) {
        Err(DigraphError::IdSetMismatch { missing, unexpected }) => {
            assert!(missing.contains("extra"));
            assert!(unexpected.contains("iso"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn walk_ids_follows_own_edges() {
    let g = sample();
    assert_eq!(
        g.walk_ids(Strategy::DFS, true, ["l"], Dir::Up).unwrap(),
        ["l", "m", "r1", "r2"]
    );
    assert_eq!(
        g.walk_ids(Strategy::BFS, false, ["r2", "r1"], Dir::Down).unwrap(),
        ["m", "l"]
    );
}

#[test]
fn closure_graphs_are_induced() {
    let g = sample();
    let up = g.ancestor_graph(["l"], true).unwrap();
    up.assert_ids_equal(["l", "m", "r1", "r2"]).unwrap();
    assert_eq!(up.edge_count(), 3);
    let down = g.descendant_graph(["r1", "iso"], false).unwrap();
    assert_eq!(down.ids(), &["m", "l"]);
    assert!(!g.contains_cycle());
}
