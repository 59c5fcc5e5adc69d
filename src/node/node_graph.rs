//! [`NodeGraph`]: payload values bound onto an [`IdGraph`].
//!
//! The graph is built once from a collection of payloads, each declaring one
//! side of its adjacency (see [`UpNode`] / [`DownNode`]). The id universe is
//! every payload id (in supplied order) followed by the ids that only appear
//! in declared edges (in order of first mention). Ids of the second kind have
//! no payload: they are *unbound*, and a graph with unbound ids is *partial*.
//!
//! Every id-level query is available through [`Digraph`]; the node-level
//! methods below lift them onto payloads. Node-level results skip unbound
//! ids, except [`NodeGraph::node`] and the walks, which report them as
//! [`DigraphError::UnboundId`].
//!
//! The payload collection is exposed read-only (`len`, `iter`,
//! `contains_node`); there are no mutating operations.

use std::collections::{HashMap, HashSet};

use crate::algs::closure::closure_indices;
use crate::algs::topsort::Topsort;
use crate::algs::traversal::{Dir, Strategy, walk};
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::DigraphError;
use crate::node::capability::{DownNode, UpNode};
use crate::topology::bounds::IdLike;
use crate::topology::digraph::Digraph;
use crate::topology::id_graph::IdGraph;

/// Immutable digraph whose ids are (fully or partially) bound to payloads.
#[derive(Clone, Debug)]
pub struct NodeGraph<Id, N>
where
    Id: IdLike,
{
    graph: IdGraph<Id>,
    /// Payloads, in supplied order.
    nodes: Vec<N>,
    /// Dense id index → position in `nodes`.
    slot: Vec<Option<u32>>,
    /// Position in `nodes` → dense id index.
    node_idx: Vec<u32>,
}

impl<Id, N> NodeGraph<Id, N>
where
    Id: IdLike,
    N: UpNode<Id = Id>,
{
    /// Bind payloads that declare their parents.
    ///
    /// # Errors
    /// [`DigraphError::InvariantViolation`] if two payloads share an id.
    pub fn up<I: IntoIterator<Item = N>>(nodes: I) -> Result<Self, DigraphError> {
        Self::bind(nodes, Dir::Up, |n| {
            (n.id().clone(), n.parent_ids().cloned().collect())
        })
    }
}

impl<Id, N> NodeGraph<Id, N>
where
    Id: IdLike,
    N: DownNode<Id = Id>,
{
    /// Bind payloads that declare their children.
    ///
    /// # Errors
    /// [`DigraphError::InvariantViolation`] if two payloads share an id.
    pub fn down<I: IntoIterator<Item = N>>(nodes: I) -> Result<Self, DigraphError> {
        Self::bind(nodes, Dir::Down, |n| {
            (n.id().clone(), n.child_ids().cloned().collect())
        })
    }
}

impl<Id, N> NodeGraph<Id, N>
where
    Id: IdLike,
{
    /// Bind arbitrary payloads; `declare` returns a payload's id and its
    /// parents (`Dir::Up`) or children (`Dir::Down`).
    ///
    /// # Errors
    /// [`DigraphError::InvariantViolation`] if two payloads share an id or the
    /// aggregated adjacency is inconsistent.
    pub fn bind<I, F>(nodes: I, side: Dir, mut declare: F) -> Result<Self, DigraphError>
    where
        I: IntoIterator<Item = N>,
        F: FnMut(&N) -> (Id, Vec<Id>),
    {
        let nodes: Vec<N> = nodes.into_iter().collect();
        let decls: Vec<(Id, Vec<Id>)> = nodes.iter().map(&mut declare).collect();
        let node_ids: Vec<Id> = decls.iter().map(|(id, _)| id.clone()).collect();

        let mut seen: HashSet<Id> = HashSet::with_capacity(decls.len());
        let mut universe = Vec::with_capacity(decls.len());
        for id in &node_ids {
            if !seen.insert(id.clone()) {
                return Err(DigraphError::InvariantViolation(format!(
                    "id {id:?} is declared by more than one node"
                )));
            }
            universe.push(id.clone());
        }
        for other in decls.iter().flat_map(|(_, edges)| edges) {
            if seen.insert(other.clone()) {
                universe.push(other.clone());
            }
        }

        let graph = match side {
            Dir::Up => IdGraph::from_parent_map(universe, decls)?,
            Dir::Down => IdGraph::from_child_map(universe, decls)?,
        };
        graph.validate_invariants()?;

        let mut slot = vec![None; graph.size()];
        let mut node_idx = Vec::with_capacity(nodes.len());
        for (pos, id) in node_ids.iter().enumerate() {
            let i = graph.require(id)?;
            slot[i] = Some(pos as u32);
            node_idx.push(i as u32);
        }

        let bound = Self {
            graph,
            nodes,
            slot,
            node_idx,
        };
        log::debug!(
            "bound {} nodes over {} ids ({} unbound)",
            bound.nodes.len(),
            bound.graph.size(),
            bound.graph.size() - bound.nodes.len()
        );
        bound.debug_assert_invariants();
        Ok(bound)
    }

    // --- bound payloads ---------------------------------------------------------------

    #[inline]
    fn bound_at(&self, i: u32) -> Option<&N> {
        self.slot[i as usize].map(|pos| &self.nodes[pos as usize])
    }

    fn bound_all<'a>(&'a self, indices: impl IntoIterator<Item = u32>) -> Vec<&'a N> {
        indices.into_iter().filter_map(|i| self.bound_at(i)).collect()
    }

    /// The payload bound to `id`.
    ///
    /// # Errors
    /// [`DigraphError::UnknownId`] outside the universe,
    /// [`DigraphError::UnboundId`] for an id without a payload.
    pub fn node(&self, id: &Id) -> Result<&N, DigraphError> {
        let i = self.graph.require(id)?;
        self.bound_at(i as u32)
            .ok_or_else(|| DigraphError::unbound(id))
    }

    /// The payload bound to `id`, if any.
    pub fn get(&self, id: &Id) -> Option<&N> {
        self.graph.index_of(id).and_then(|i| self.bound_at(i as u32))
    }

    /// Bound `id → payload` pairs.
    pub fn id_to_node(&self) -> HashMap<&Id, &N> {
        self.node_idx
            .iter()
            .zip(&self.nodes)
            .map(|(&i, n)| (self.graph.id_at(i), n))
            .collect()
    }

    /// The id a payload is bound to (reverse of [`NodeGraph::id_to_node`]).
    ///
    /// Linear in the number of payloads: `N` only needs `PartialEq`. For
    /// repeated lookups build a map once from [`NodeGraph::id_to_node`].
    pub fn id_of(&self, node: &N) -> Option<&Id>
    where
        N: PartialEq,
    {
        self.nodes
            .iter()
            .position(|n| n == node)
            .map(|pos| self.graph.id_at(self.node_idx[pos]))
    }

    /// Ids without a payload, in declaration order.
    pub fn unbound_ids(&self) -> Vec<Id> {
        self.slot
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| self.graph.id_at(i as u32).clone())
            .collect()
    }

    /// Every id has a payload.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.nodes.len() == self.graph.size()
    }

    /// Some id lacks a payload.
    #[inline]
    pub fn is_partial(&self) -> bool {
        !self.is_complete()
    }

    // --- read-only collection ---------------------------------------------------------

    /// Payloads, in supplied order.
    #[inline]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn contains_node(&self, node: &N) -> bool
    where
        N: PartialEq,
    {
        self.nodes.contains(node)
    }

    // --- node-level queries -----------------------------------------------------------

    /// Bound parents of `id`, in declaration order.
    pub fn parent_nodes(&self, id: &Id) -> Result<Vec<&N>, DigraphError> {
        let i = self.graph.require(id)?;
        Ok(self.bound_all(self.graph.parent_indices(i).iter().copied()))
    }

    /// Bound children of `id`, in declaration order.
    pub fn child_nodes(&self, id: &Id) -> Result<Vec<&N>, DigraphError> {
        let i = self.graph.require(id)?;
        Ok(self.bound_all(self.graph.child_indices(i).iter().copied()))
    }

    /// Bound ancestors of `id`, nearest first.
    pub fn ancestor_nodes(&self, id: &Id, inclusive: bool) -> Result<Vec<&N>, DigraphError> {
        let i = self.graph.require(id)? as u32;
        Ok(self.bound_all(closure_indices(&self.graph, [i], Dir::Up, inclusive)))
    }

    /// Bound descendants of `id`, nearest first.
    pub fn descendant_nodes(&self, id: &Id, inclusive: bool) -> Result<Vec<&N>, DigraphError> {
        let i = self.graph.require(id)? as u32;
        Ok(self.bound_all(closure_indices(&self.graph, [i], Dir::Down, inclusive)))
    }

    /// Bound roots, in declaration order.
    pub fn root_nodes(&self) -> Vec<&N> {
        let g = &self.graph;
        self.bound_all((0..g.size() as u32).filter(|&i| g.parent_indices(i as usize).is_empty()))
    }

    /// Bound leaves, in declaration order.
    pub fn leaf_nodes(&self) -> Vec<&N> {
        let g = &self.graph;
        self.bound_all((0..g.size() as u32).filter(|&i| g.child_indices(i as usize).is_empty()))
    }

    /// Bound payloads in topological order (unbound ids are skipped), or
    /// [`Topsort::CycleDetected`].
    pub fn optional_topsort_nodes(&self) -> Topsort<&N> {
        self.graph
            .topsort_dense()
            .clone()
            .filter_map(|i| self.bound_at(i))
    }

    /// Lazy walk over payloads. `expand` maps a payload to the ids to visit
    /// next; an unbound or unknown id reached by the walk is yielded as an
    /// error and not expanded.
    pub fn node_walk<'a, S, F, I>(
        &'a self,
        strategy: Strategy,
        include_starts: bool,
        starts: S,
        mut expand: F,
    ) -> impl Iterator<Item = Result<&'a N, DigraphError>>
    where
        S: IntoIterator<Item = Id>,
        F: FnMut(&N) -> I,
        I: IntoIterator<Item = Id>,
    {
        walk(strategy, include_starts, starts, move |id: &Id| {
            self.get(id).map(&mut expand).into_iter().flatten()
        })
        .map(move |id| self.node(&id))
    }

    /// Eager walk over payloads.
    ///
    /// # Errors
    /// The first [`DigraphError`] the walk yields.
    pub fn node_list<S, F, I>(
        &self,
        strategy: Strategy,
        include_starts: bool,
        starts: S,
        expand: F,
    ) -> Result<Vec<&N>, DigraphError>
    where
        S: IntoIterator<Item = Id>,
        F: FnMut(&N) -> I,
        I: IntoIterator<Item = Id>,
    {
        self.node_walk(strategy, include_starts, starts, expand)
            .collect()
    }
}

impl<Id: IdLike, N> Digraph for NodeGraph<Id, N> {
    type Id = Id;

    #[inline]
    fn id_graph(&self) -> &IdGraph<Id> {
        &self.graph
    }
}

impl<'a, Id: IdLike, N> IntoIterator for &'a NodeGraph<Id, N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<Id: IdLike, N> DebugInvariants for NodeGraph<Id, N> {
    fn validate_invariants(&self) -> Result<(), DigraphError> {
        self.graph.validate_invariants()?;
        let broken = |msg: String| Err(DigraphError::InvariantViolation(msg));
        if self.slot.len() != self.graph.size() {
            return broken(format!(
                "{} slots for {} ids",
                self.slot.len(),
                self.graph.size()
            ));
        }
        if self.node_idx.len() != self.nodes.len() {
            return broken(format!(
                "{} node indices for {} nodes",
                self.node_idx.len(),
                self.nodes.len()
            ));
        }
        for (pos, &i) in self.node_idx.iter().enumerate() {
            if self.slot.get(i as usize).copied().flatten() != Some(pos as u32) {
                return broken(format!(
                    "node #{pos} bound to {:?} but its slot disagrees",
                    self.graph.id_at(i)
                ));
            }
        }
        let bound = self.slot.iter().filter(|s| s.is_some()).count();
        if bound != self.nodes.len() {
            return broken(format!("{bound} bound slots for {} nodes", self.nodes.len()));
        }
        Ok(())
    }
}

static_assertions::assert_impl_all!(
    NodeGraph<String, crate::node::capability::BasicUpNode<String>>: Send, Sync
);
