//! # Digraph: the shared id-level query surface
//!
//! [`Digraph`] is implemented by [`IdGraph`] itself and by every structure
//! that wraps one (such as [`NodeGraph`](crate::node::NodeGraph)). Implementors
//! provide a single accessor, [`Digraph::id_graph`]; parent/child queries,
//! roots and leaves, closure, induction, topological sort and walks all come
//! as default methods, so a wrapper exposes the identical surface for free.
//!
//! Set-valued queries return `HashSet`s; list-valued queries (`root_ids`,
//! `parents`, walks, sorts) follow the universe's declaration order.

use std::collections::{HashMap, HashSet};

use crate::algs::closure;
use crate::algs::topsort::Topsort;
use crate::algs::traversal::{Dir, Strategy, Walk, walk};
use crate::graph_error::DigraphError;
use crate::topology::bounds::IdLike;
use crate::topology::id_graph::{IdGraph, Neighbors};

/// Read-only digraph queries over a fixed id universe.
pub trait Digraph {
    /// Identifier type.
    type Id: IdLike;

    //=== Required method ===

    /// The underlying adjacency store.
    fn id_graph(&self) -> &IdGraph<Self::Id>;

    //=== Ids ===

    /// The id universe, in declaration order.
    fn id_universe(&self) -> &[Self::Id] {
        self.id_graph().ids()
    }

    /// Number of ids.
    fn size(&self) -> usize {
        self.id_graph().ids().len()
    }

    /// Whether `id` belongs to the universe.
    fn contains_id(&self, id: &Self::Id) -> bool {
        self.id_graph().index_of(id).is_some()
    }

    /// Check that the universe is exactly `expected`.
    ///
    /// # Errors
    /// [`DigraphError::IdSetMismatch`] listing the ids on either side only.
    fn assert_ids_equal<I>(&self, expected: I) -> Result<(), DigraphError>
    where
        I: IntoIterator<Item = Self::Id>,
    {
        let g = self.id_graph();
        let expected: HashSet<Self::Id> = expected.into_iter().collect();
        let missing: Vec<&Self::Id> = expected.iter().filter(|id| !self.contains_id(id)).collect();
        let unexpected: Vec<&Self::Id> = g.ids().iter().filter(|id| !expected.contains(*id)).collect();
        if missing.is_empty() && unexpected.is_empty() {
            Ok(())
        } else {
            Err(DigraphError::IdSetMismatch {
                missing: format!("{missing:?}"),
                unexpected: format!("{unexpected:?}"),
            })
        }
    }

    //=== Parents & children ===

    /// Direct parents of `id`, in declaration order.
    fn parents(&self, id: &Self::Id) -> Result<Neighbors<'_, Self::Id>, DigraphError> {
        let g = self.id_graph();
        let i = g.require(id)?;
        Ok(g.neighbors(g.parent_indices(i)))
    }

    /// Direct children of `id`, in declaration order.
    fn children(&self, id: &Self::Id) -> Result<Neighbors<'_, Self::Id>, DigraphError> {
        let g = self.id_graph();
        let i = g.require(id)?;
        Ok(g.neighbors(g.child_indices(i)))
    }

    /// Direct parents of `id` as a set (empty when `id` has none).
    fn parent_ids(&self, id: &Self::Id) -> Result<HashSet<Self::Id>, DigraphError> {
        Ok(self.parents(id)?.cloned().collect())
    }

    /// Direct children of `id` as a set (empty when `id` has none).
    fn child_ids(&self, id: &Self::Id) -> Result<HashSet<Self::Id>, DigraphError> {
        Ok(self.children(id)?.cloned().collect())
    }

    /// `id → parents` for every id (edge-less ids map to empty sets).
    fn parent_map(&self) -> HashMap<Self::Id, HashSet<Self::Id>> {
        let g = self.id_graph();
        (0..g.ids().len())
            .map(|i| {
                let ps: HashSet<Self::Id> = g.parent_indices(i).iter().map(|&p| g.id_at(p).clone()).collect();
                (g.ids()[i].clone(), ps)
            })
            .collect()
    }

    /// `id → children` for every id (edge-less ids map to empty sets).
    fn child_map(&self) -> HashMap<Self::Id, HashSet<Self::Id>> {
        let g = self.id_graph();
        (0..g.ids().len())
            .map(|i| {
                let cs: HashSet<Self::Id> = g.child_indices(i).iter().map(|&c| g.id_at(c).clone()).collect();
                (g.ids()[i].clone(), cs)
            })
            .collect()
    }

    /// Whether `parent -> child` is an edge.
    fn is_parent_of(&self, parent: &Self::Id, child: &Self::Id) -> Result<bool, DigraphError> {
        let g = self.id_graph();
        let p = g.require(parent)? as u32;
        let c = g.require(child)?;
        Ok(g.parent_indices(c).binary_search(&p).is_ok())
    }

    /// Whether `parent -> child` is an edge.
    fn is_child_of(&self, child: &Self::Id, parent: &Self::Id) -> Result<bool, DigraphError> {
        self.is_parent_of(parent, child)
    }

    //=== Roots & leaves ===

    /// Whether `id` has no parents.
    fn is_root(&self, id: &Self::Id) -> Result<bool, DigraphError> {
        Ok(self.parents(id)?.next().is_none())
    }

    /// Whether `id` has no children.
    fn is_leaf(&self, id: &Self::Id) -> Result<bool, DigraphError> {
        Ok(self.children(id)?.next().is_none())
    }

    /// Ids without parents (sources), in declaration order.
    fn root_ids(&self) -> Vec<Self::Id> {
        let g = self.id_graph();
        g.ids()
            .iter()
            .enumerate()
            .filter(|&(i, _)| g.parent_indices(i).is_empty())
            .map(|(_, id)| id.clone())
            .collect()
    }

    /// Ids without children (sinks), in declaration order.
    fn leaf_ids(&self) -> Vec<Self::Id> {
        let g = self.id_graph();
        g.ids()
            .iter()
            .enumerate()
            .filter(|&(i, _)| g.child_indices(i).is_empty())
            .map(|(_, id)| id.clone())
            .collect()
    }

    //=== Closure & induction ===

    /// Parents, their parents, and so on; `inclusive` adds `id` itself.
    fn ancestor_ids(&self, id: &Self::Id, inclusive: bool) -> Result<HashSet<Self::Id>, DigraphError> {
        closure::closure_ids(self.id_graph(), id, Dir::Up, inclusive)
    }

    /// Children, their children, and so on; `inclusive` adds `id` itself.
    fn descendant_ids(
        &self,
        id: &Self::Id,
        inclusive: bool,
    ) -> Result<HashSet<Self::Id>, DigraphError> {
        closure::closure_ids(self.id_graph(), id, Dir::Down, inclusive)
    }

    /// Whether `ancestor` is reachable from `id` by following parent edges.
    fn is_ancestor_of(
        &self,
        ancestor: &Self::Id,
        id: &Self::Id,
        inclusive: bool,
    ) -> Result<bool, DigraphError> {
        closure::reaches(self.id_graph(), id, ancestor, Dir::Up, inclusive)
    }

    /// Whether `descendant` is reachable from `id` by following child edges.
    fn is_descendant_of(
        &self,
        descendant: &Self::Id,
        id: &Self::Id,
        inclusive: bool,
    ) -> Result<bool, DigraphError> {
        closure::reaches(self.id_graph(), id, descendant, Dir::Down, inclusive)
    }

    /// Induced subgraph on `subset`.
    fn filter<I>(&self, subset: I) -> Result<IdGraph<Self::Id>, DigraphError>
    where
        I: IntoIterator<Item = Self::Id>,
    {
        closure::filter(self.id_graph(), subset)
    }

    /// Induced subgraph on the union of `ancestor_ids(id, inclusive)` over `ids`.
    ///
    /// Each id is closed separately, so with `inclusive == false` an id of
    /// `ids` that is an ancestor of another id of `ids` is kept. This differs
    /// from a single walk seeded with all of `ids`, which would drop it.
    fn ancestor_graph<I>(&self, ids: I, inclusive: bool) -> Result<IdGraph<Self::Id>, DigraphError>
    where
        I: IntoIterator<Item = Self::Id>,
    {
        closure::closure_graph(self.id_graph(), ids, Dir::Up, inclusive)
    }

    /// Induced subgraph on the union of `descendant_ids(id, inclusive)` over `ids`.
    fn descendant_graph<I>(
        &self,
        ids: I,
        inclusive: bool,
    ) -> Result<IdGraph<Self::Id>, DigraphError>
    where
        I: IntoIterator<Item = Self::Id>,
    {
        closure::closure_graph(self.id_graph(), ids, Dir::Down, inclusive)
    }

    //=== Topological sort ===

    /// Roots-first order of every id, or [`Topsort::CycleDetected`].
    fn optional_topsort(&self) -> Topsort<Self::Id> {
        let g = self.id_graph();
        g.topsort_dense().clone().map(|i| g.id_at(i).clone())
    }

    /// Whether the graph contains a cycle.
    fn contains_cycle(&self) -> bool {
        self.id_graph().topsort_dense().is_cycle()
    }

    //=== Walks ===

    /// Lazy walk over ids with a caller-supplied expansion.
    fn id_walk<S, F, I>(
        &self,
        strategy: Strategy,
        include_starts: bool,
        starts: S,
        expand: F,
    ) -> Walk<Self::Id, F, I>
    where
        S: IntoIterator<Item = Self::Id>,
        F: FnMut(&Self::Id) -> I,
        I: IntoIterator<Item = Self::Id>,
    {
        walk(strategy, include_starts, starts, expand)
    }

    /// Eager walk over ids with a caller-supplied expansion.
    fn id_list<S, F, I>(
        &self,
        strategy: Strategy,
        include_starts: bool,
        starts: S,
        expand: F,
    ) -> Vec<Self::Id>
    where
        S: IntoIterator<Item = Self::Id>,
        F: FnMut(&Self::Id) -> I,
        I: IntoIterator<Item = Self::Id>,
    {
        self.id_walk(strategy, include_starts, starts, expand).collect()
    }

    /// Walk along the graph's own edges (`Dir::Up` parents, `Dir::Down` children).
    ///
    /// # Errors
    /// [`DigraphError::UnknownId`] if a start id is outside the universe.
    fn walk_ids<S>(
        &self,
        strategy: Strategy,
        include_starts: bool,
        starts: S,
        dir: Dir,
    ) -> Result<Vec<Self::Id>, DigraphError>
    where
        S: IntoIterator<Item = Self::Id>,
    {
        let g = self.id_graph();
        let seeds = starts
            .into_iter()
            .map(|id| g.require(&id).map(|i| i as u32))
            .collect::<Result<Vec<_>, _>>()?;
        let order = walk(strategy, include_starts, seeds, |&i: &u32| {
            let next = match dir {
                Dir::Up => g.parent_indices(i as usize),
                Dir::Down => g.child_indices(i as usize),
            };
            next.iter().copied()
        });
        Ok(order.map(|i| g.id_at(i).clone()).collect())
    }
}

impl<Id: IdLike> Digraph for IdGraph<Id> {
    type Id = Id;

    #[inline]
    fn id_graph(&self) -> &IdGraph<Id> {
        self
    }
}
