//! The forest: an arena of treaps, manipulated through root handles.
//!
//! A [`Forest`] owns the nodes of any number of trees. Every tree is referred to by
//! the [`Root`] handle of its root node. Operations consume the handles they are given
//! and return the handles of the resulting trees; splitting a tree and merging trees
//! both take `O(log n)` expected time.
//!
//! The forest comes in two modes, chosen by its second type parameter:
//! * [`ByRank`]: trees are sequences ordered by position. Segments can be acted upon
//!   (added to, assigned, reversed, or any other [`Action`]).
//! * [`ByKey`]: trees are sorted by [`Keyed::get_key`]. Reversal would destroy the
//!   order, so this mode offers no actions at all.
//!
//!```
//! use copse::*;
//! use copse::example_data::*;
//!
//! let mut forest: Forest<StdNum> = Forest::new();
//! let root = forest.build(vec![5, 3, 8, 1, 9]);
//! let root = forest.range_apply(root, 1, 3, Tag::Add(10).into())?;
//! assert_eq!(forest.to_vec(root)?, vec![5, 13, 18, 11, 9]);
//!
//! let (left, right) = forest.split_by_rank(root, 2)?;
//! assert_eq!(forest.to_vec(left)?, vec![5, 13]);
//! let root = forest.merge(left, right)?;
//! assert_eq!(forest.summary(root)?.sum, 56);
//! # Ok::<(), TreeError>(())
//!```

mod check;
mod engine;
mod iter;
mod keyed;
mod lazy;
mod positional;
mod query;

pub use iter::Iter;

use std::marker::PhantomData;

use crate::arena::*;
use crate::config::ForestConfig;
use crate::data::*;
use crate::error::{Result, TreeError};
use crate::node::Node;
use crate::priority::Priorities;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ByRank {}
    impl Sealed for super::ByKey {}
}

/// Marker for the way the trees of a forest are ordered.
pub trait Mode: sealed::Sealed {}

/// Trees ordered by position, supporting segment actions and reversal.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct ByRank;

/// Trees sorted by key.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct ByKey;

impl Mode for ByRank {}
impl Mode for ByKey {}

/// An arena of treaps. See the [module documentation](self).
pub struct Forest<D: Data, M = ByRank> {
    arena: Arena<D>,
    priorities: Priorities,
    config: ForestConfig,
    mode: PhantomData<M>,
}

impl<D: Data, M: Mode> Default for Forest<D, M> {
    fn default() -> Self {
        Forest::new()
    }
}

impl<D: Data, M: Mode> Forest<D, M> {
    pub fn new() -> Self {
        Forest::with_config(ForestConfig::default())
    }

    pub fn with_config(config: ForestConfig) -> Self {
        tracing::debug!(
            seed = ?config.seed,
            capacity = config.capacity,
            recycle = config.recycle_handles,
            "creating forest"
        );
        Forest {
            arena: Arena::with_capacity(config.capacity, config.recycle_handles),
            priorities: Priorities::new(config.seed),
            config,
            mode: PhantomData,
        }
    }

    /// The number of nodes in all of the forest's trees together.
    pub fn len(&self) -> usize {
        self.arena.live()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frees every tree. All handles become invalid.
    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// A config for a new forest, seeded from this forest's generator, so that
    /// seeded forests stay reproducible.
    pub(crate) fn spawn_config(&mut self) -> ForestConfig {
        ForestConfig {
            seed: Some(self.priorities.next()),
            ..self.config
        }
    }

    pub(crate) fn value(&self, index: u32) -> &D::Value {
        &self.arena.node(index).value
    }

    /// Checks a handle without consuming it.
    pub(crate) fn peek(&self, root: Root) -> Result<Link> {
        root.map(|handle| self.arena.resolve(handle)).transpose()
    }

    /// Checks a handle and consumes it: the handle can't be used again.
    pub(crate) fn take(&mut self, root: Root) -> Result<Link> {
        let link = self.peek(root)?;
        if let Some(index) = link {
            self.arena.retire(index);
        }
        Ok(link)
    }

    /// Issues a handle for a tree.
    pub(crate) fn issue(&self, link: Link) -> Root {
        link.map(|index| self.arena.handle(index))
    }

    /// The number of values in the tree.
    pub fn size(&self, root: Root) -> Result<usize> {
        let link = self.peek(root)?;
        Ok(self.size_of(link))
    }

    /// The summary of the whole tree, in `O(1)`.
    pub fn summary(&self, root: Root) -> Result<D::Summary> {
        let link = self.peek(root)?;
        Ok(self.summary_of(link))
    }

    /// Splits the tree so that the left tree holds exactly the first `k` values.
    /// Fails with [`TreeError::OutOfRange`] if `k` is larger than the tree.
    pub fn split_by_rank(&mut self, root: Root, k: usize) -> Result<(Root, Root)> {
        let link = self.peek(root)?;
        let len = self.size_of(link);
        if k > len {
            return Err(TreeError::OutOfRange { index: k, len });
        }
        self.take(root)?;
        let (left, right) = self.split_rank(link, k);
        Ok((self.issue(left), self.issue(right)))
    }

    /// Frees the whole tree, returning its values in order.
    pub fn take_values(&mut self, root: Root) -> Result<Vec<D::Value>> {
        let link = self.take(root)?;
        Ok(self.drain_links(link))
    }

    /// Frees the whole tree, returning the number of freed nodes.
    pub fn free_tree(&mut self, root: Root) -> Result<usize> {
        Ok(self.take_values(root)?.len())
    }

    /// Iterates over the values of the tree in order. This pushes down
    /// every pending action first, so it takes `O(n)` time even if the iterator
    /// isn't used up.
    pub fn iter(&mut self, root: Root) -> Result<Iter<'_, D>> {
        let link = self.peek(root)?;
        Ok(self.iter_link(link))
    }

    pub(crate) fn iter_link(&mut self, link: Link) -> Iter<'_, D> {
        self.flush(link);
        Iter::new(&self.arena, link)
    }

    /// Returns the values of the tree in order.
    pub fn to_vec(&mut self, root: Root) -> Result<Vec<D::Value>>
    where
        D::Value: Clone,
    {
        Ok(self.iter(root)?.cloned().collect())
    }
}
