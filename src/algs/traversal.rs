//! DFS/BFS walk primitive shared by every closure computation.
//!
//! A walk is driven by a caller-supplied expansion function `id -> ids`, so it
//! works over any adjacency (a graph's parents, its children, or something the
//! caller computes). Each id is emitted at most once, which makes walks
//! terminate on cyclic input, and the emitted order is a pure function of the
//! start order, the expansion order, the strategy and `include_starts`.
//!
//! Two forms are exposed: the lazy single-pass [`Walk`] iterator and the eager
//! [`walk_list`], which drains a fresh walk once.

use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;

use crate::topology::bounds::IdLike;

/// Which adjacency a graph walk follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    /// Follow parent edges (towards roots).
    Up,
    /// Follow child edges (towards leaves).
    Down,
}

/// Visiting order of a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Pre-order depth-first: each start's subtree completes before the next start.
    DFS,
    /// Breadth-first with a FIFO frontier seeded by the starts in order.
    BFS,
}

impl Strategy {
    /// `true` selects [`Strategy::DFS`], `false` [`Strategy::BFS`].
    #[inline]
    pub fn from_depth_first(depth_first: bool) -> Self {
        if depth_first {
            Strategy::DFS
        } else {
            Strategy::BFS
        }
    }
}

enum Frontier<Id, It> {
    Breadth(VecDeque<Id>),
    Depth {
        starts: std::vec::IntoIter<Id>,
        stack: Vec<It>,
    },
}

/// Lazy, single-pass walk. Build one with [`walk`] or [`WalkBuilder::iter`].
pub struct Walk<Id, F, I>
where
    I: IntoIterator<Item = Id>,
{
    expand: F,
    include_starts: bool,
    starts: HashSet<Id>,
    seen: HashSet<Id>,
    frontier: Frontier<Id, I::IntoIter>,
}

impl<Id, F, I> Walk<Id, F, I>
where
    Id: IdLike,
    F: FnMut(&Id) -> I,
    I: IntoIterator<Item = Id>,
{
    fn new(strategy: Strategy, include_starts: bool, starts: Vec<Id>, expand: F) -> Self {
        let start_set: HashSet<Id> = starts.iter().cloned().collect();
        let mut seen = HashSet::with_capacity(starts.len());
        let frontier = match strategy {
            Strategy::BFS => {
                let mut queue = VecDeque::with_capacity(starts.len());
                for id in starts {
                    if seen.insert(id.clone()) {
                        queue.push_back(id);
                    }
                }
                Frontier::Breadth(queue)
            }
            // starts are marked when entered, so an earlier start's subtree may claim a later one
            Strategy::DFS => Frontier::Depth {
                starts: starts.into_iter(),
                stack: Vec::new(),
            },
        };
        Self {
            expand,
            include_starts,
            starts: start_set,
            seen,
            frontier,
        }
    }

    #[inline]
    fn emits(&self, id: &Id) -> bool {
        self.include_starts || !self.starts.contains(id)
    }
}

impl<Id, F, I> Iterator for Walk<Id, F, I>
where
    Id: IdLike,
    F: FnMut(&Id) -> I,
    I: IntoIterator<Item = Id>,
{
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        loop {
            let id = match &mut self.frontier {
                Frontier::Breadth(queue) => {
                    let id = queue.pop_front()?;
                    for next in (self.expand)(&id) {
                        if self.seen.insert(next.clone()) {
                            queue.push_back(next);
                        }
                    }
                    id
                }
                Frontier::Depth { starts, stack } => {
                    let candidate = match stack.last_mut() {
                        Some(top) => match top.next() {
                            Some(id) => id,
                            None => {
                                stack.pop();
                                continue;
                            }
                        },
                        None => starts.next()?,
                    };
                    if !self.seen.insert(candidate.clone()) {
                        continue;
                    }
                    stack.push((self.expand)(&candidate).into_iter());
                    candidate
                }
            };
            if self.emits(&id) {
                return Some(id);
            }
        }
    }
}

impl<Id, F, I> FusedIterator for Walk<Id, F, I>
where
    Id: IdLike,
    F: FnMut(&Id) -> I,
    I: IntoIterator<Item = Id>,
{
}

/// Start a lazy walk.
///
/// * `strategy`: [`Strategy::DFS`] (pre-order) or [`Strategy::BFS`].
/// * `include_starts`: when `false`, start ids are expanded but not emitted.
/// * `starts`: start ids, in order; duplicates are visited once.
/// * `expand`: maps an id to the ids to visit next, in order.
pub fn walk<Id, S, F, I>(
    strategy: Strategy,
    include_starts: bool,
    starts: S,
    expand: F,
) -> Walk<Id, F, I>
where
    Id: IdLike,
    S: IntoIterator<Item = Id>,
    F: FnMut(&Id) -> I,
    I: IntoIterator<Item = Id>,
{
    Walk::new(strategy, include_starts, starts.into_iter().collect(), expand)
}

/// Eager form of [`walk`]: the full visiting order as a `Vec`.
pub fn walk_list<Id, S, F, I>(
    strategy: Strategy,
    include_starts: bool,
    starts: S,
    expand: F,
) -> Vec<Id>
where
    Id: IdLike,
    S: IntoIterator<Item = Id>,
    F: FnMut(&Id) -> I,
    I: IntoIterator<Item = Id>,
{
    walk(strategy, include_starts, starts, expand).collect()
}

/// Builder for walks; defaults to depth-first, starts included.
#[derive(Clone, Debug)]
pub struct WalkBuilder<Id> {
    starts: Vec<Id>,
    strat: Strategy,
    include_starts: bool,
}

impl<Id: IdLike> Default for WalkBuilder<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: IdLike> WalkBuilder<Id> {
    pub fn new() -> Self {
        Self {
            starts: Vec::new(),
            strat: Strategy::DFS,
            include_starts: true,
        }
    }
    pub fn starts<S: IntoIterator<Item = Id>>(mut self, it: S) -> Self {
        self.starts = it.into_iter().collect();
        self
    }
    pub fn strategy(mut self, s: Strategy) -> Self {
        self.strat = s;
        self
    }
    pub fn dfs(self) -> Self {
        self.strategy(Strategy::DFS)
    }
    pub fn bfs(self) -> Self {
        self.strategy(Strategy::BFS)
    }
    pub fn include_starts(mut self, include: bool) -> Self {
        self.include_starts = include;
        self
    }

    /// Lazy walk using `expand`.
    pub fn iter<F, I>(self, expand: F) -> Walk<Id, F, I>
    where
        F: FnMut(&Id) -> I,
        I: IntoIterator<Item = Id>,
    {
        Walk::new(self.strat, self.include_starts, self.starts, expand)
    }

    /// Eager walk using `expand`.
    pub fn run<F, I>(self, expand: F) -> Vec<Id>
    where
        F: FnMut(&Id) -> I,
        I: IntoIterator<Item = Id>,
    {
        self.iter(expand).collect()
    }
}
