//! An owned sequence backed by a single treap.
//!
//! [`Sequence`] keeps its own [`Forest`] holding exactly one tree, so it never deals
//! in handles: it's the convenient choice when trees don't need to move between
//! each other in `O(log n)`.
//!
//!```
//! use copse::*;
//! use copse::example_data::*;
//!
//! let mut seq: Sequence<StdNum> = (0..10).collect();
//! seq.act(2..5, RangeAction::add(100))?;
//! seq.reverse(..)?;
//! assert_eq!(seq.get(5), Some(&104));
//! assert_eq!(seq.range_summary(..=1)?.sum, 17);
//!
//! let slice = seq.slice(3..7)?;
//! assert_eq!(slice.summary().max, 104);
//! let removed = slice.remove();
//! assert_eq!(removed, vec![6, 5, 104, 103]);
//! assert_eq!(seq.len(), 6);
//! # seq.assert_correctness();
//! # Ok::<(), TreeError>(())
//!```

use std::ops::{Bound, RangeBounds};

use crate::arena::Link;
use crate::*;

/// A sequence of values with segment summaries, segment actions and reversal,
/// all in `O(log n)` expected time.
pub struct Sequence<D: Data> {
    forest: Forest<D>,
    root: Link,
}

impl<D: Data> Default for Sequence<D> {
    fn default() -> Self {
        Sequence::new()
    }
}

impl<D: Data> Sequence<D> {
    pub fn new() -> Self {
        Sequence::with_config(ForestConfig::default())
    }

    pub fn with_config(config: ForestConfig) -> Self {
        Sequence {
            forest: Forest::with_config(config),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.forest.size_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Turns any range into `start..end`, checking it against the length.
    fn normalize<R: RangeBounds<usize>>(&self, range: R) -> Result<(usize, usize)> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => Some(start),
            Bound::Excluded(&start) => start.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1),
            Bound::Excluded(&end) => Some(end),
            Bound::Unbounded => Some(len),
        };
        match (start, end) {
            (Some(start), Some(end)) if start <= end && end <= len => Ok((start, end)),
            (Some(start), Some(end)) if start <= end => {
                Err(TreeError::OutOfRange { index: end, len })
            }
            (start, end) => Err(TreeError::InvalidRange {
                start: start.unwrap_or(usize::MAX),
                end: end.unwrap_or(usize::MAX),
                len,
            }),
        }
    }

    pub fn get(&mut self, index: usize) -> Option<&D::Value> {
        let found = self.forest.kth_link(self.root, index)?;
        Some(self.forest.value(found))
    }

    pub fn first(&mut self) -> Option<&D::Value> {
        let found = self.forest.edge_link(self.root, false)?;
        Some(self.forest.value(found))
    }

    pub fn last(&mut self) -> Option<&D::Value> {
        let found = self.forest.edge_link(self.root, true)?;
        Some(self.forest.value(found))
    }

    /// Inserts the value at position `index`, shifting everything after it.
    /// `index` may be equal to the length.
    pub fn insert(&mut self, index: usize, value: D::Value) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(TreeError::OutOfRange { index, len });
        }
        let (before, after) = self.forest.split_rank(self.root, index);
        let middle = Some(self.forest.alloc(value));
        self.root = self.forest.rejoin(before, middle, after);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<D::Value> {
        let len = self.len();
        if index >= len {
            return Err(TreeError::OutOfRange { index, len });
        }
        let (before, middle, after) = self.forest.isolate(self.root, index, index + 1);
        self.root = self.forest.merge_links(before, after);
        self.forest
            .drain_links(middle)
            .pop()
            .ok_or(TreeError::OutOfRange { index, len })
    }

    pub fn push_back(&mut self, value: D::Value) {
        let node = Some(self.forest.alloc(value));
        self.root = self.forest.merge_links(self.root, node);
    }

    pub fn push_front(&mut self, value: D::Value) {
        let node = Some(self.forest.alloc(value));
        self.root = self.forest.merge_links(node, self.root);
    }

    pub fn pop_back(&mut self) -> Option<D::Value> {
        let len = self.len();
        self.remove(len.checked_sub(1)?).ok()
    }

    pub fn pop_front(&mut self) -> Option<D::Value> {
        if self.is_empty() {
            return None;
        }
        self.remove(0).ok()
    }

    /// The summary of the whole sequence, in `O(1)`.
    pub fn summary(&self) -> D::Summary {
        self.forest.summary_of(self.root)
    }

    pub fn range_summary<R: RangeBounds<usize>>(&mut self, range: R) -> Result<D::Summary> {
        Ok(self.slice(range)?.summary())
    }

    /// Applies the action to every value in the range.
    pub fn act<R: RangeBounds<usize>>(&mut self, range: R, action: D::Action) -> Result<()> {
        self.slice(range)?.act(action);
        Ok(())
    }

    pub fn reverse<R: RangeBounds<usize>>(&mut self, range: R) -> Result<()>
    where
        D::Action: Reverse,
    {
        self.slice(range)?.reverse();
        Ok(())
    }

    /// Splits the range out of the sequence. The pieces are glued back together
    /// when the returned [`Slice`] is dropped.
    pub fn slice<R: RangeBounds<usize>>(&mut self, range: R) -> Result<Slice<'_, D>> {
        let (start, end) = self.normalize(range)?;
        let (before, middle, after) = self.forest.isolate(self.root, start, end);
        self.root = None;
        Ok(Slice {
            sequence: self,
            before,
            middle,
            after,
        })
    }

    /// Splits the sequence in two: `self` keeps the first `at` values, and the rest
    /// are returned. The returned values move to a new forest, in `O(m)` for the `m`
    /// values moved.
    pub fn split_off(&mut self, at: usize) -> Result<Sequence<D>> {
        let len = self.len();
        if at > len {
            return Err(TreeError::OutOfRange { index: at, len });
        }
        let (left, right) = self.forest.split_rank(self.root, at);
        self.root = left;
        let values = self.forest.drain_links(right);
        let mut other = Sequence::with_config(self.forest.spawn_config());
        other.root = other.forest.build_links(values);
        Ok(other)
    }

    /// Moves every value of `other` to the end of this sequence, in `O(m)` for the
    /// `m` values moved.
    pub fn append(&mut self, other: Sequence<D>) {
        let values = other.into_vec();
        let tail = self.forest.build_links(values);
        self.root = self.forest.merge_links(self.root, tail);
    }

    pub fn iter(&mut self) -> Iter<'_, D> {
        self.forest.iter_link(self.root)
    }

    pub fn to_vec(&mut self) -> Vec<D::Value>
    where
        D::Value: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn into_vec(mut self) -> Vec<D::Value> {
        let root = self.root.take();
        self.forest.drain_links(root)
    }

    /// Checks the tree's invariants, panicking if they don't hold.
    pub fn assert_correctness(&self)
    where
        D::Summary: Eq,
    {
        self.forest.assert_links(self.root);
    }
}

impl<D: Data> FromIterator<D::Value> for Sequence<D> {
    /// Builds the sequence in `O(n)`.
    fn from_iter<I: IntoIterator<Item = D::Value>>(iter: I) -> Self {
        let mut seq = Sequence::new();
        seq.root = seq.forest.build_links(iter);
        seq
    }
}

impl<D: Data> Extend<D::Value> for Sequence<D> {
    fn extend<I: IntoIterator<Item = D::Value>>(&mut self, iter: I) {
        let tail = self.forest.build_links(iter);
        self.root = self.forest.merge_links(self.root, tail);
    }
}

/// A segment of a [`Sequence`], split out as its own tree.
///
/// Dropping the slice merges the pieces back in their original order.
#[derive(destructure)]
pub struct Slice<'a, D: Data> {
    sequence: &'a mut Sequence<D>,
    before: Link,
    middle: Link,
    after: Link,
}

impl<'a, D: Data> Slice<'a, D> {
    pub fn len(&self) -> usize {
        self.sequence.forest.size_of(self.middle)
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_none()
    }

    pub fn summary(&self) -> D::Summary {
        self.sequence.forest.summary_of(self.middle)
    }

    pub fn act(&mut self, action: D::Action) {
        self.sequence.forest.act_link(self.middle, action);
    }

    pub fn reverse(&mut self)
    where
        D::Action: Reverse,
    {
        self.act(D::Action::reversal());
    }

    pub fn iter(&mut self) -> Iter<'_, D> {
        self.sequence.forest.iter_link(self.middle)
    }

    /// Takes the segment out of the sequence, returning its values in order.
    pub fn remove(self) -> Vec<D::Value> {
        let (sequence, before, middle, after) = self.destructure();
        sequence.root = sequence.forest.merge_links(before, after);
        sequence.forest.drain_links(middle)
    }
}

impl<'a, D: Data> Drop for Slice<'a, D> {
    fn drop(&mut self) {
        let forest = &mut self.sequence.forest;
        self.sequence.root = forest.rejoin(self.before, self.middle, self.after);
    }
}
