//! Ancestor/descendant closure and induced subgraphs.
//!
//! Every closure is a [`walk`] over dense indices whose expansion follows the
//! graph's parent ([`Dir::Up`]) or child ([`Dir::Down`]) lists; the
//! `inclusive` flag maps directly onto the walk's `include_starts`. Induced
//! subgraphs keep the source graph's declaration order.

use std::collections::HashSet;

use crate::algs::traversal::{Dir, Strategy, walk};
use crate::graph_error::DigraphError;
use crate::topology::bounds::IdLike;
use crate::topology::id_graph::IdGraph;

/// Dense indices reachable from `seeds` along `dir`, in breadth-first order.
pub(crate) fn closure_indices<Id: IdLike>(
    graph: &IdGraph<Id>,
    seeds: impl IntoIterator<Item = u32>,
    dir: Dir,
    inclusive: bool,
) -> Vec<u32> {
    walk(Strategy::BFS, inclusive, seeds, |&i: &u32| {
        step(graph, dir, i).iter().copied()
    })
    .collect()
}

#[inline]
fn step<Id: IdLike>(graph: &IdGraph<Id>, dir: Dir, i: u32) -> &[u32] {
    match dir {
        Dir::Up => graph.parent_indices(i as usize),
        Dir::Down => graph.child_indices(i as usize),
    }
}

/// Set of ids reachable from `id` along `dir`.
///
/// # Errors
/// [`DigraphError::UnknownId`] if `id` is outside the universe.
pub fn closure_ids<Id: IdLike>(
    graph: &IdGraph<Id>,
    id: &Id,
    dir: Dir,
    inclusive: bool,
) -> Result<HashSet<Id>, DigraphError> {
    let i = graph.require(id)? as u32;
    Ok(closure_indices(graph, [i], dir, inclusive)
        .into_iter()
        .map(|j| graph.id_at(j).clone())
        .collect())
}

/// Whether `target` is reachable from `from` along `dir`.
///
/// Stops the walk at the first hit instead of building the whole closure.
pub fn reaches<Id: IdLike>(
    graph: &IdGraph<Id>,
    from: &Id,
    target: &Id,
    dir: Dir,
    inclusive: bool,
) -> Result<bool, DigraphError> {
    let f = graph.require(from)? as u32;
    let t = graph.require(target)? as u32;
    Ok(
        walk(Strategy::BFS, inclusive, [f], |&i: &u32| {
            step(graph, dir, i).iter().copied()
        })
        .any(|j| j == t),
    )
}

/// Induced subgraph on `subset`: only edges with both endpoints inside.
///
/// # Errors
/// [`DigraphError::UnknownId`] if `subset` is not contained in the universe.
pub fn filter<Id, S>(graph: &IdGraph<Id>, subset: S) -> Result<IdGraph<Id>, DigraphError>
where
    Id: IdLike,
    S: IntoIterator<Item = Id>,
{
    let mut keep = vec![false; graph.ids().len()];
    for id in subset {
        keep[graph.require(&id)?] = true;
    }
    Ok(induce(graph, &keep))
}

/// Induced subgraph on the dense indices flagged in `keep`.
pub(crate) fn induce<Id: IdLike>(graph: &IdGraph<Id>, keep: &[bool]) -> IdGraph<Id> {
    let mut remap = vec![u32::MAX; keep.len()];
    let mut ids = Vec::new();
    for (i, _) in keep.iter().enumerate().filter(|&(_, &k)| k) {
        remap[i] = ids.len() as u32;
        ids.push(graph.id_at(i as u32).clone());
    }
    let index_of = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i as u32))
        .collect();
    let mut edges = Vec::new();
    for (c, _) in keep.iter().enumerate().filter(|&(_, &k)| k) {
        for &p in graph.parent_indices(c) {
            if keep[p as usize] {
                edges.push((remap[p as usize], remap[c]));
            }
        }
    }
    IdGraph::from_dense(ids, index_of, edges)
}

/// Induced subgraph on the union of the closures of `ids` along `dir`.
///
/// # Errors
/// [`DigraphError::UnknownId`] if any of `ids` is outside the universe.
pub fn closure_graph<Id, S>(
    graph: &IdGraph<Id>,
    ids: S,
    dir: Dir,
    inclusive: bool,
) -> Result<IdGraph<Id>, DigraphError>
where
    Id: IdLike,
    S: IntoIterator<Item = Id>,
{
    let mut keep = vec![false; graph.ids().len()];
    for id in ids {
        let i = graph.require(&id)? as u32;
        // one walk per id: a seed reached from another seed still counts when non-inclusive
        for j in closure_indices(graph, [i], dir, inclusive) {
            keep[j as usize] = true;
        }
    }
    Ok(induce(graph, &keep))
}
