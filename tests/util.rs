#![allow(dead_code)]
use std::collections::{HashMap, HashSet};

use sieve_digraph::format::{parse_list, parse_multimap, parse_set};
use sieve_digraph::prelude::*;

// Sample graph with two cycles (a-b-c-d-a and a-e-a) and an isolated f.
//
// id -> parents     children <- id
// a -> d, e         b, e <- a
// b -> a            c <- b
// c -> b            d <- c
// d -> c            a <- d
// e -> a            a <- e
// f ->              <- f
pub const SAMPLE_IDS: &str = "a, b, c, d, e, f";
pub const SAMPLE_PARENTS: &str = "a = d, a = e, b = a, c = b, d = c, e = a";
pub const SAMPLE_CHILDREN: &str = "a = b, a = e, b = c, c = d, d = a, e = a";

pub fn s(id: &str) -> String {
    id.to_string()
}

pub fn set(text: &str) -> HashSet<String> {
    parse_set(text)
}

pub fn list(text: &str) -> Vec<String> {
    parse_list(text)
}

/// Graph over `ids` with the parent multimap `parents`.
pub fn graph(ids: &str, parents: &str) -> IdGraph<String> {
    IdGraph::from_parent_map(list(ids), parse_multimap(parents).unwrap()).unwrap()
}

pub fn sample_from_parents() -> IdGraph<String> {
    graph(SAMPLE_IDS, SAMPLE_PARENTS)
}

pub fn sample_from_children() -> IdGraph<String> {
    IdGraph::from_child_map(list(SAMPLE_IDS), parse_multimap(SAMPLE_CHILDREN).unwrap()).unwrap()
}

/// `id -> set` for every sample id, from a multimap.
pub fn full_map(entries: &str) -> HashMap<String, HashSet<String>> {
    let mut out: HashMap<String, HashSet<String>> =
        list(SAMPLE_IDS).into_iter().map(|id| (id, HashSet::new())).collect();
    for (k, vs) in parse_multimap(entries).unwrap() {
        out.entry(k).or_default().extend(vs);
    }
    out
}

/// Expansion used by the traversal fixtures: a -> b, e ; b -> c ; e -> a.
pub fn sample_expand(id: &String) -> Vec<String> {
    match id.as_str() {
        "a" => list("b, e"),
        "b" => list("c"),
        "e" => list("a"),
        _ => list(""),
    }
}

/// Every id-level expectation on the sample graph.
pub fn verify_sample_graph<G: Digraph<Id = String>>(g: &G) {
    // ids
    let universe: HashSet<String> = g.id_universe().iter().cloned().collect();
    assert_eq!(universe, set(SAMPLE_IDS));
    assert_eq!(g.size(), 6);
    g.assert_ids_equal(list(SAMPLE_IDS)).unwrap();
    assert!(g.assert_ids_equal(list("xxx")).is_err());
    assert_eq!(g.filter(set("a, e")).unwrap(), graph("a, e", "a = e, e = a"));

    // parents
    assert_eq!(g.parent_map(), full_map(SAMPLE_PARENTS));
    assert!(g.is_parent_of(&s("e"), &s("a")).unwrap());
    assert!(!g.is_parent_of(&s("f"), &s("a")).unwrap());
    assert_eq!(g.parent_ids(&s("a")).unwrap(), set("d, e"));
    assert_eq!(g.parent_ids(&s("b")).unwrap(), set("a"));
    assert_eq!(g.parent_ids(&s("f")).unwrap(), set(""));

    // children
    assert_eq!(g.child_map(), full_map(SAMPLE_CHILDREN));
    assert!(g.is_child_of(&s("e"), &s("a")).unwrap());
    assert!(!g.is_child_of(&s("f"), &s("a")).unwrap());
    assert_eq!(g.child_ids(&s("a")).unwrap(), set("b, e"));
    assert_eq!(g.child_ids(&s("b")).unwrap(), set("c"));
    assert_eq!(g.child_ids(&s("f")).unwrap(), set(""));

    // ancestors
    assert!(g.is_ancestor_of(&s("a"), &s("b"), false).unwrap());
    assert!(g.is_ancestor_of(&s("a"), &s("b"), true).unwrap());
    assert!(!g.is_ancestor_of(&s("a"), &s("f"), false).unwrap());
    assert!(!g.is_ancestor_of(&s("a"), &s("f"), true).unwrap());
    assert!(!g.is_ancestor_of(&s("a"), &s("a"), false).unwrap());
    assert!(g.is_ancestor_of(&s("a"), &s("a"), true).unwrap());

    for (id, expected) in [
        ("a", "b, c, d, e"),
        ("b", "a, c, d, e"),
        ("c", "a, b, d, e"),
        ("d", "a, b, c, e"),
        ("e", "a, b, c, d"),
        ("f", ""),
    ] {
        assert_eq!(g.ancestor_ids(&s(id), false).unwrap(), set(expected), "ancestors of {id}");
        assert_eq!(g.descendant_ids(&s(id), false).unwrap(), set(expected), "descendants of {id}");
    }
    for id in ["a", "b", "c", "d", "e"] {
        assert_eq!(g.ancestor_ids(&s(id), true).unwrap(), set("a, b, c, d, e"));
        assert_eq!(g.descendant_ids(&s(id), true).unwrap(), set("a, b, c, d, e"));
    }
    assert_eq!(g.ancestor_ids(&s("f"), true).unwrap(), set("f"));
    assert_eq!(g.descendant_ids(&s("f"), true).unwrap(), set("f"));

    // union of per-id closures: a and b are each other's ancestors
    let cyclic_part = graph("a, b, c, d, e", "a = d, a = e, b = a, c = b, d = c, e = a");
    assert_eq!(g.ancestor_graph(list("a, b"), false).unwrap(), cyclic_part);
    assert_eq!(g.ancestor_graph(list("f"), true).unwrap(), graph("f", ""));
    assert_eq!(g.ancestor_graph(list("a, f"), true).unwrap(), sample_from_parents());

    // descendants
    assert!(g.is_descendant_of(&s("a"), &s("b"), false).unwrap());
    assert!(g.is_descendant_of(&s("a"), &s("b"), true).unwrap());
    assert!(!g.is_descendant_of(&s("a"), &s("f"), false).unwrap());
    assert!(!g.is_descendant_of(&s("a"), &s("f"), true).unwrap());
    assert!(!g.is_descendant_of(&s("a"), &s("a"), false).unwrap());
    assert!(g.is_descendant_of(&s("a"), &s("a"), true).unwrap());

    assert_eq!(
        g.descendant_graph(list("a"), false).unwrap(),
        graph("b, c, d, e", "c = b, d = c")
    );
    assert_eq!(g.descendant_graph(list("f"), true).unwrap(), graph("f", ""));
    assert_eq!(g.descendant_graph(list("a, f"), true).unwrap(), sample_from_parents());

    // roots & leaves
    assert!(!g.is_root(&s("a")).unwrap());
    assert!(g.is_root(&s("f")).unwrap());
    assert_eq!(g.root_ids(), list("f"));
    assert!(!g.is_leaf(&s("a")).unwrap());
    assert!(g.is_leaf(&s("f")).unwrap());
    assert_eq!(g.leaf_ids(), list("f"));

    // topological sort
    assert!(g.contains_cycle());
    assert_eq!(g.optional_topsort(), Topsort::CycleDetected);

    verify_sample_traversal(g);
}

/// Caller-driven walks with [`sample_expand`].
pub fn verify_sample_traversal<G: Digraph<Id = String>>(g: &G) {
    let run = |dfs: bool, include: bool, starts: &str| {
        g.id_list(Strategy::from_depth_first(dfs), include, list(starts), sample_expand)
    };
    assert_eq!(run(true, true, "a"), list("a, b, c, e"));
    assert_eq!(run(true, false, "a"), list("b, c, e"));
    assert_eq!(run(false, true, "a"), list("a, b, e, c"));
    assert_eq!(run(false, false, "a"), list("b, e, c"));

    assert_eq!(run(true, true, "d, a"), list("d, a, b, c, e"));
    assert_eq!(run(true, false, "d, a"), list("b, c, e"));
    assert_eq!(run(false, true, "d, a"), list("d, a, b, e, c"));
    assert_eq!(run(false, false, "d, a"), list("b, e, c"));
}
