//! Topological sorting with cycle detection.
//!
//! Kahn's algorithm over an [`IdGraph`]: ids whose parents have all been
//! emitted become ready, and ready ids are emitted one at a time. When
//! several ids are ready at once the one declared earliest in the universe
//! goes first, so the order is fully determined by the graph.
//!
//! ## Complexity
//! - Time: **O((|V| + |E|) log |V|)** (binary heap frontier)
//! - Space: **O(|V|)** for in-degrees and the frontier.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::topology::bounds::IdLike;
use crate::topology::id_graph::IdGraph;

/// Outcome of a topological sort: an order, or the fact that none exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Topsort<T> {
    /// Every id, roots first; each parent precedes each of its children.
    Order(Vec<T>),
    /// The graph contains a cycle (self-loops included).
    CycleDetected,
}

impl<T> Topsort<T> {
    /// `true` for [`Topsort::CycleDetected`].
    #[inline]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Topsort::CycleDetected)
    }

    /// The order, if the graph is acyclic.
    #[inline]
    pub fn order(&self) -> Option<&[T]> {
        match self {
            Topsort::Order(v) => Some(v),
            Topsort::CycleDetected => None,
        }
    }

    /// Consume into the order, if the graph is acyclic.
    #[inline]
    pub fn into_order(self) -> Option<Vec<T>> {
        match self {
            Topsort::Order(v) => Some(v),
            Topsort::CycleDetected => None,
        }
    }

    /// Map every element of a found order.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Topsort<U> {
        match self {
            Topsort::Order(v) => Topsort::Order(v.into_iter().map(f).collect()),
            Topsort::CycleDetected => Topsort::CycleDetected,
        }
    }

    /// Map and filter every element of a found order, keeping relative order.
    pub fn filter_map<U, F: FnMut(T) -> Option<U>>(self, f: F) -> Topsort<U> {
        match self {
            Topsort::Order(v) => Topsort::Order(v.into_iter().filter_map(f).collect()),
            Topsort::CycleDetected => Topsort::CycleDetected,
        }
    }
}

/// Kahn's sort over dense indices of `graph`.
pub(crate) fn topsort_indices<Id: IdLike>(graph: &IdGraph<Id>) -> Topsort<u32> {
    let n = graph.ids().len();
    let mut in_deg: Vec<usize> = (0..n).map(|i| graph.parent_indices(i).len()).collect();
    let mut ready: BinaryHeap<Reverse<u32>> = in_deg
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(i, _)| Reverse(i as u32))
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(i)) = ready.pop() {
        order.push(i);
        for &c in graph.child_indices(i as usize) {
            let d = &mut in_deg[c as usize];
            *d -= 1;
            if *d == 0 {
                ready.push(Reverse(c));
            }
        }
    }

    if order.len() == n {
        Topsort::Order(order)
    } else {
        log::trace!(
            "cycle detected: {} of {} ids could not be ordered",
            n - order.len(),
            n
        );
        Topsort::CycleDetected
    }
}
