//! Node capabilities: how a payload declares its edges.
//!
//! A payload bound into a [`NodeGraph`](super::NodeGraph) declares exactly one
//! side of its adjacency, either its parents ([`UpNode`]) or its children
//! ([`DownNode`]). The graph infers the other side, and any id that is only
//! mentioned in an edge, by aggregating the declarations of every payload.

use crate::topology::bounds::IdLike;

/// A payload that knows its own id and its parent ids.
pub trait UpNode {
    type Id: IdLike;
    fn id(&self) -> &Self::Id;
    fn parent_ids(&self) -> impl Iterator<Item = &Self::Id> + '_;
}

/// A payload that knows its own id and its child ids.
pub trait DownNode {
    type Id: IdLike;
    fn id(&self) -> &Self::Id;
    fn child_ids(&self) -> impl Iterator<Item = &Self::Id> + '_;
}

/// Minimal [`UpNode`]: an id with a list of parent ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BasicUpNode<Id> {
    pub id: Id,
    pub parents: Vec<Id>,
}

/// Minimal [`DownNode`]: an id with a list of child ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BasicDownNode<Id> {
    pub id: Id,
    pub children: Vec<Id>,
}

/// Shorthand for [`BasicUpNode`]: `up_node("b", ["a"])`.
pub fn up_node<Id, P>(id: impl Into<Id>, parents: P) -> BasicUpNode<Id>
where
    P: IntoIterator,
    P::Item: Into<Id>,
{
    BasicUpNode {
        id: id.into(),
        parents: parents.into_iter().map(Into::into).collect(),
    }
}

/// Shorthand for [`BasicDownNode`]: `down_node("a", ["b", "e"])`.
pub fn down_node<Id, C>(id: impl Into<Id>, children: C) -> BasicDownNode<Id>
where
    C: IntoIterator,
    C::Item: Into<Id>,
{
    BasicDownNode {
        id: id.into(),
        children: children.into_iter().map(Into::into).collect(),
    }
}

impl<Id: IdLike> UpNode for BasicUpNode<Id> {
    type Id = Id;
    #[inline]
    fn id(&self) -> &Id {
        &self.id
    }
    #[inline]
    fn parent_ids(&self) -> impl Iterator<Item = &Id> + '_ {
        self.parents.iter()
    }
}

impl<Id: IdLike> DownNode for BasicDownNode<Id> {
    type Id = Id;
    #[inline]
    fn id(&self) -> &Id {
        &self.id
    }
    #[inline]
    fn child_ids(&self) -> impl Iterator<Item = &Id> + '_ {
        self.children.iter()
    }
}

impl<T: UpNode + ?Sized> UpNode for &T {
    type Id = T::Id;
    fn id(&self) -> &T::Id {
        (**self).id()
    }
    fn parent_ids(&self) -> impl Iterator<Item = &T::Id> + '_ {
        (**self).parent_ids()
    }
}

impl<T: DownNode + ?Sized> DownNode for &T {
    type Id = T::Id;
    fn id(&self) -> &T::Id {
        (**self).id()
    }
    fn child_ids(&self) -> impl Iterator<Item = &T::Id> + '_ {
        (**self).child_ids()
    }
}
