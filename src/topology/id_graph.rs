//! Immutable id-level digraph backed by a pair of CSR adjacency arrays.
//!
//! An [`IdGraph`] owns a closed universe of ids (kept in declaration order)
//! and the parent and child relations over it. Both relations are derived
//! from one edge list at construction, so `p ∈ parents(x) ⟺ x ∈ children(p)`
//! holds by construction; [`DebugInvariants`] re-checks it in debug builds.
//!
//! Neighbor lists are sorted by declaration index and free of duplicates,
//! which is what makes every traversal and the topological order
//! reproducible regardless of the hashing of the caller's input maps.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algs::topsort::{Topsort, topsort_indices};
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::DigraphError;
use crate::topology::bounds::IdLike;

/// Immutable digraph over a fixed id universe.
#[derive(Clone, Debug)]
pub struct IdGraph<Id>
where
    Id: IdLike,
{
    /// Dense index → id, in declaration order.
    ids: Arc<[Id]>,
    /// Id → dense index.
    index_of: HashMap<Id, u32>,

    /// CSR arrays for parent edges.
    parent_offsets: Arc<[u32]>,
    parent_idx: Arc<[u32]>,

    /// CSR arrays for child edges (mirror of the parent arrays).
    child_offsets: Arc<[u32]>,
    child_idx: Arc<[u32]>,

    /// Topological order over dense indices, computed on first use.
    topsort: OnceCell<Topsort<u32>>,
}

impl<Id: IdLike> IdGraph<Id> {
    /// Build from a universe and a map `id → parent ids`.
    ///
    /// Keys and members must belong to `universe`; children are derived by
    /// inverting the map.
    ///
    /// # Errors
    /// [`DigraphError::UnknownId`] if a key or member is outside the universe.
    pub fn from_parent_map<U, M, P>(universe: U, parents_of: M) -> Result<Self, DigraphError>
    where
        U: IntoIterator<Item = Id>,
        M: IntoIterator<Item = (Id, P)>,
        P: IntoIterator<Item = Id>,
    {
        let (ids, index_of) = index_universe(universe)?;
        let edges = dense_edges(&index_of, parents_of, EdgeSide::Parents)?;
        Ok(Self::from_dense(ids, index_of, edges))
    }

    /// Build from a universe and a map `id → child ids`.
    ///
    /// # Errors
    /// [`DigraphError::UnknownId`] if a key or member is outside the universe.
    pub fn from_child_map<U, M, C>(universe: U, children_of: M) -> Result<Self, DigraphError>
    where
        U: IntoIterator<Item = Id>,
        M: IntoIterator<Item = (Id, C)>,
        C: IntoIterator<Item = Id>,
    {
        let (ids, index_of) = index_universe(universe)?;
        let edges = dense_edges(&index_of, children_of, EdgeSide::Children)?;
        Ok(Self::from_dense(ids, index_of, edges))
    }

    /// Build from both relations at once, checking that they are inverses.
    ///
    /// # Errors
    /// [`DigraphError::UnknownId`] for ids outside the universe,
    /// [`DigraphError::InvariantViolation`] if an edge appears in only one map.
    pub fn from_maps<U, MP, P, MC, C>(
        universe: U,
        parents_of: MP,
        children_of: MC,
    ) -> Result<Self, DigraphError>
    where
        U: IntoIterator<Item = Id>,
        MP: IntoIterator<Item = (Id, P)>,
        P: IntoIterator<Item = Id>,
        MC: IntoIterator<Item = (Id, C)>,
        C: IntoIterator<Item = Id>,
    {
        let (ids, index_of) = index_universe(universe)?;
        let up = dense_edges(&index_of, parents_of, EdgeSide::Parents)?;
        let down = dense_edges(&index_of, children_of, EdgeSide::Children)?;
        let up_set: HashSet<(u32, u32)> = up.iter().copied().collect();
        let down_set: HashSet<(u32, u32)> = down.iter().copied().collect();
        if let Some(&(p, c)) = up_set.symmetric_difference(&down_set).next() {
            let side = if up_set.contains(&(p, c)) { "parent" } else { "child" };
            return Err(DigraphError::InvariantViolation(format!(
                "edge {:?} -> {:?} appears only in the {side} map",
                ids[p as usize], ids[c as usize]
            )));
        }
        Ok(Self::from_dense(ids, index_of, up))
    }

    /// Build from `(id, parent)` pairs; the universe is every endpoint, in
    /// order of first mention.
    pub fn from_parent_edges<E>(edges: E) -> Self
    where
        E: IntoIterator<Item = (Id, Id)>,
    {
        Self::from_pairs(edges, EdgeSide::Parents)
    }

    /// Build from `(id, child)` pairs; the universe is every endpoint, in
    /// order of first mention.
    pub fn from_child_edges<E>(edges: E) -> Self
    where
        E: IntoIterator<Item = (Id, Id)>,
    {
        Self::from_pairs(edges, EdgeSide::Children)
    }

    /// Universe without edges: every id is both a root and a leaf.
    pub fn isolated<U>(universe: U) -> Result<Self, DigraphError>
    where
        U: IntoIterator<Item = Id>,
    {
        let (ids, index_of) = index_universe(universe)?;
        Ok(Self::from_dense(ids, index_of, Vec::new()))
    }

    fn from_pairs<E>(pairs: E, side: EdgeSide) -> Self
    where
        E: IntoIterator<Item = (Id, Id)>,
    {
        let mut ids = Vec::new();
        let mut index_of: HashMap<Id, u32> = HashMap::new();
        let mut intern = |id: Id| -> u32 {
            *index_of.entry(id.clone()).or_insert_with(|| {
                ids.push(id);
                (ids.len() - 1) as u32
            })
        };
        let edges: Vec<(u32, u32)> = pairs
            .into_iter()
            .map(|(key, other)| {
                let k = intern(key);
                let o = intern(other);
                match side {
                    EdgeSide::Parents => (o, k),
                    EdgeSide::Children => (k, o),
                }
            })
            .collect();
        Self::from_dense(ids, index_of, edges)
    }

    /// Assemble the CSR arrays from validated `(parent, child)` dense edges.
    pub(crate) fn from_dense(
        ids: Vec<Id>,
        index_of: HashMap<Id, u32>,
        mut edges: Vec<(u32, u32)>,
    ) -> Self {
        let n = ids.len();
        edges.sort_unstable();
        edges.dedup();

        // edges sorted by (parent, child): child lists come out sorted
        let mut child_offsets = vec![0u32; n + 1];
        let mut parent_offsets = vec![0u32; n + 1];
        for &(p, c) in &edges {
            child_offsets[p as usize + 1] += 1;
            parent_offsets[c as usize + 1] += 1;
        }
        for i in 0..n {
            child_offsets[i + 1] += child_offsets[i];
            parent_offsets[i + 1] += parent_offsets[i];
        }
        let child_idx: Vec<u32> = edges.iter().map(|&(_, c)| c).collect();

        // parents: bucket by child; iterating edges in parent order keeps buckets sorted
        let mut parent_idx = vec![0u32; edges.len()];
        let mut write = parent_offsets.clone();
        for &(p, c) in &edges {
            let pos = &mut write[c as usize];
            parent_idx[*pos as usize] = p;
            *pos += 1;
        }

        let graph = Self {
            ids: ids.into(),
            index_of,
            parent_offsets: parent_offsets.into(),
            parent_idx: parent_idx.into(),
            child_offsets: child_offsets.into(),
            child_idx: child_idx.into(),
            topsort: OnceCell::new(),
        };
        log::debug!(
            "built id graph: {} ids, {} edges",
            graph.ids.len(),
            graph.child_idx.len()
        );
        graph.debug_assert_invariants();
        graph
    }

    // --- dense-level access used by the algorithms ------------------------------------

    /// All ids, in declaration order.
    #[inline]
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.child_idx.len()
    }

    /// Dense index of `id`, if it belongs to the universe.
    #[inline]
    pub fn index_of(&self, id: &Id) -> Option<usize> {
        self.index_of.get(id).map(|&i| i as usize)
    }

    /// Dense index of `id`, or [`DigraphError::UnknownId`].
    #[inline]
    pub(crate) fn require(&self, id: &Id) -> Result<usize, DigraphError> {
        self.index_of(id).ok_or_else(|| DigraphError::unknown(id))
    }

    #[inline]
    pub(crate) fn id_at(&self, i: u32) -> &Id {
        &self.ids[i as usize]
    }

    #[inline]
    pub(crate) fn parent_indices(&self, i: usize) -> &[u32] {
        let lo = self.parent_offsets[i] as usize;
        let hi = self.parent_offsets[i + 1] as usize;
        &self.parent_idx[lo..hi]
    }

    #[inline]
    pub(crate) fn child_indices(&self, i: usize) -> &[u32] {
        let lo = self.child_offsets[i] as usize;
        let hi = self.child_offsets[i + 1] as usize;
        &self.child_idx[lo..hi]
    }

    #[inline]
    pub(crate) fn neighbors<'a>(&'a self, indices: &'a [u32]) -> Neighbors<'a, Id> {
        Neighbors {
            ids: &self.ids,
            idx: indices.iter(),
        }
    }

    /// Topological order over dense indices (cached).
    pub(crate) fn topsort_dense(&self) -> &Topsort<u32> {
        self.topsort.get_or_init(|| topsort_indices(self))
    }
}

/// Iterator over neighbor ids, in declaration order.
#[derive(Clone, Debug)]
pub struct Neighbors<'a, Id> {
    ids: &'a [Id],
    idx: std::slice::Iter<'a, u32>,
}

impl<'a, Id> Iterator for Neighbors<'a, Id> {
    type Item = &'a Id;
    #[inline]
    fn next(&mut self) -> Option<&'a Id> {
        self.idx.next().map(|&i| &self.ids[i as usize])
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.idx.size_hint()
    }
}

impl<Id> ExactSizeIterator for Neighbors<'_, Id> {}

impl<Id> DoubleEndedIterator for Neighbors<'_, Id> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.idx.next_back().map(|&i| &self.ids[i as usize])
    }
}

// --- construction helpers ---------------------------------------------------------

#[derive(Clone, Copy)]
enum EdgeSide {
    Parents,
    Children,
}

fn index_universe<Id, U>(universe: U) -> Result<(Vec<Id>, HashMap<Id, u32>), DigraphError>
where
    Id: IdLike,
    U: IntoIterator<Item = Id>,
{
    let mut ids = Vec::new();
    let mut index_of = HashMap::new();
    for id in universe {
        if index_of.contains_key(&id) {
            log::warn!("id {id:?} declared twice in universe; keeping first occurrence");
            continue;
        }
        let i = u32::try_from(ids.len()).map_err(|_| {
            DigraphError::InvariantViolation("id universe exceeds u32::MAX ids".to_string())
        })?;
        index_of.insert(id.clone(), i);
        ids.push(id);
    }
    Ok((ids, index_of))
}

/// Translate `key → members` into `(parent, child)` dense edges.
fn dense_edges<Id, M, N>(
    index_of: &HashMap<Id, u32>,
    map: M,
    side: EdgeSide,
) -> Result<Vec<(u32, u32)>, DigraphError>
where
    Id: IdLike,
    M: IntoIterator<Item = (Id, N)>,
    N: IntoIterator<Item = Id>,
{
    let lookup = |id: &Id| index_of.get(id).copied().ok_or_else(|| DigraphError::unknown(id));
    let mut edges = Vec::new();
    for (key, members) in map {
        let k = lookup(&key)?;
        for member in members {
            let m = lookup(&member)?;
            edges.push(match side {
                EdgeSide::Parents => (m, k),
                EdgeSide::Children => (k, m),
            });
        }
    }
    Ok(edges)
}

// --- equality ---------------------------------------------------------------------

impl<Id: IdLike> PartialEq for IdGraph<Id> {
    /// Same universe and same edges, independent of declaration order.
    fn eq(&self, other: &Self) -> bool {
        if self.ids.len() != other.ids.len() || self.edge_count() != other.edge_count() {
            return false;
        }
        let mut to_other = Vec::with_capacity(self.ids.len());
        for id in self.ids.iter() {
            match other.index_of.get(id) {
                Some(&j) => to_other.push(j),
                None => return false,
            }
        }
        (0..self.ids.len()).all(|i| {
            let mut mine: Vec<u32> = self
                .parent_indices(i)
                .iter()
                .map(|&p| to_other[p as usize])
                .collect();
            mine.sort_unstable();
            mine == other.parent_indices(to_other[i] as usize)
        })
    }
}

impl<Id: IdLike> Eq for IdGraph<Id> {}

// --- invariants -------------------------------------------------------------------

impl<Id: IdLike> DebugInvariants for IdGraph<Id> {
    fn validate_invariants(&self) -> Result<(), DigraphError> {
        let n = self.ids.len();
        let broken = |msg: String| Err(DigraphError::InvariantViolation(msg));

        if self.index_of.len() != n {
            return broken(format!("{} indexed ids for {} declared", self.index_of.len(), n));
        }
        for (i, id) in self.ids.iter().enumerate() {
            if self.index_of.get(id).map(|&j| j as usize) != Some(i) {
                return broken(format!("id {id:?} not indexed at position {i}"));
            }
        }
        if self.parent_offsets.len() != n + 1 || self.child_offsets.len() != n + 1 {
            return broken("offset arrays do not match universe size".to_string());
        }
        if self.parent_idx.len() != self.child_idx.len() {
            return broken(format!(
                "{} parent entries vs {} child entries",
                self.parent_idx.len(),
                self.child_idx.len()
            ));
        }
        for i in 0..n {
            let id = &self.ids[i];
            for (name, list) in [
                ("parent", self.parent_indices(i)),
                ("child", self.child_indices(i)),
            ] {
                if list.iter().any(|&j| j as usize >= n) {
                    return broken(format!("{name} of {id:?} outside the universe"));
                }
                if list.windows(2).any(|w| w[0] >= w[1]) {
                    return broken(format!("{name} list of {id:?} unsorted or duplicated"));
                }
            }
            for &p in self.parent_indices(i) {
                if self.child_indices(p as usize).binary_search(&(i as u32)).is_err() {
                    return broken(format!(
                        "{:?} is a parent of {id:?} but {id:?} is not its child",
                        self.ids[p as usize]
                    ));
                }
            }
        }
        Ok(())
    }
}

// --- mutation (rejected) ----------------------------------------------------------

/// Structural mutation entry points. Graphs in this crate are immutable, so
/// every implementation here rejects the call.
pub trait EdgeMutation {
    type Id;
    /// Add the edge `parent -> child`.
    fn add_edge(&mut self, parent: Self::Id, child: Self::Id) -> Result<(), DigraphError>;
    /// Remove the edge `parent -> child`.
    fn remove_edge(&mut self, parent: &Self::Id, child: &Self::Id) -> Result<bool, DigraphError>;
    /// Remove every id and edge.
    fn clear(&mut self) -> Result<(), DigraphError>;
}

impl<Id: IdLike> EdgeMutation for IdGraph<Id> {
    type Id = Id;

    fn add_edge(&mut self, _parent: Id, _child: Id) -> Result<(), DigraphError> {
        Err(DigraphError::UnsupportedMutation("add_edge"))
    }

    fn remove_edge(&mut self, _parent: &Id, _child: &Id) -> Result<bool, DigraphError> {
        Err(DigraphError::UnsupportedMutation("remove_edge"))
    }

    fn clear(&mut self) -> Result<(), DigraphError> {
        Err(DigraphError::UnsupportedMutation("clear"))
    }
}

// --- serde ------------------------------------------------------------------------

/// Wire shape: the universe plus the non-empty parent lists.
#[derive(Serialize)]
struct ParentMapRef<'a, Id> {
    ids: &'a [Id],
    parents: Vec<(&'a Id, Vec<&'a Id>)>,
}

#[derive(Deserialize)]
struct ParentMapOwned<Id> {
    ids: Vec<Id>,
    #[serde(default = "Vec::new")]
    parents: Vec<(Id, Vec<Id>)>,
}

impl<Id: IdLike + Serialize> Serialize for IdGraph<Id> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let parents = (0..self.ids.len())
            .filter(|&i| !self.parent_indices(i).is_empty())
            .map(|i| {
                let ps: Vec<&Id> = self.parent_indices(i).iter().map(|&p| self.id_at(p)).collect();
                (&self.ids[i], ps)
            })
            .collect();
        ParentMapRef {
            ids: &self.ids,
            parents,
        }
        .serialize(serializer)
    }
}

impl<'de, Id: IdLike + Deserialize<'de>> Deserialize<'de> for IdGraph<Id> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = ParentMapOwned::<Id>::deserialize(deserializer)?;
        IdGraph::from_parent_map(raw.ids, raw.parents).map_err(serde::de::Error::custom)
    }
}

static_assertions::assert_impl_all!(IdGraph<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(DigraphError: Send, Sync, std::error::Error);
