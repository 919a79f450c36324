//! Operations on trees sorted by key.
//!
//! Equal keys are allowed; values with equal keys keep their insertion order
//! (a new value is placed after the values with the same key), except in
//! [`union`](Forest::union), where they are placed in an arbitrary order.

use std::cmp::Ordering;
use std::ops::{Bound, RangeBounds};

use super::engine::Hole;
use super::*;

type Key<D> = <<D as Data>::Value as Keyed>::Key;

enum Task {
    Union(Link, Link, Hole),
    Rebuild(u32),
}

/// Link-level operations, shared with [`OrderedMultiset`](crate::OrderedMultiset).
impl<D: Data, M> Forest<D, M>
where
    D::Value: Keyed,
{
    fn key_at(&self, index: u32) -> &Key<D> {
        self.arena.node(index).value.get_key()
    }

    /// Splits into keys `<= key` and `> key`, or `< key` and `>= key` if `strict`.
    pub(crate) fn split_key_link(
        &mut self,
        root: Link,
        key: &Key<D>,
        strict: bool,
    ) -> (Link, Link) {
        if strict {
            self.split_with(root, |other, _| other.get_key() < key)
        } else {
            self.split_with(root, |other, _| other.get_key() <= key)
        }
    }

    pub(crate) fn insert_key_link(&mut self, root: Link, value: D::Value) -> Link {
        let (before, after) = self.split_key_link(root, value.get_key(), false);
        let middle = Some(self.alloc(value));
        self.rejoin(before, middle, after)
    }

    /// Removes the first value with this key. Leaves the tree untouched if there is none.
    pub(crate) fn delete_key_link(&mut self, root: Link, key: &Key<D>) -> (Link, Option<D::Value>) {
        if self.find_link(root, key).is_none() {
            return (root, None);
        }
        let (before, rest) = self.split_key_link(root, key, true);
        let (middle, after) = self.split_rank(rest, 1);
        let link = self.merge_links(before, after);
        (link, self.drain_links(middle).pop())
    }

    pub(crate) fn find_link(&mut self, root: Link, key: &Key<D>) -> Option<u32> {
        let mut current = root;
        while let Some(index) = current {
            self.push_down(index);
            let node = self.arena.node(index);
            current = match node.value.get_key().cmp(key) {
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
                Ordering::Equal => return Some(index),
            };
        }
        None
    }

    /// The number of values with keys strictly smaller than `key`.
    pub(crate) fn rank_link(&mut self, root: Link, key: &Key<D>) -> usize {
        let mut current = root;
        let mut count = 0;
        while let Some(index) = current {
            self.push_down(index);
            let node = self.arena.node(index);
            if node.value.get_key() < key {
                count += self.size_of(node.left) + 1;
                current = node.right;
            } else {
                current = node.left;
            }
        }
        count
    }

    /// The last node with a key `< key`, or with `ordering` set to `Greater`,
    /// the first node with a key `> key`.
    pub(crate) fn neighbor_link(
        &mut self,
        root: Link,
        key: &Key<D>,
        ordering: Ordering,
    ) -> Option<u32> {
        let mut current = root;
        let mut found = None;
        while let Some(index) = current {
            self.push_down(index);
            let node = self.arena.node(index);
            if node.value.get_key().cmp(key) == ordering {
                found = Some(index);
                current = if ordering == Ordering::Less { node.right } else { node.left };
            } else {
                current = if ordering == Ordering::Less { node.left } else { node.right };
            }
        }
        found
    }

    /// Isolates the values with keys in the range, and returns their summary
    /// along with the reassembled tree.
    pub(crate) fn range_key_link<R>(&mut self, root: Link, range: R) -> (Link, D::Summary)
    where
        R: RangeBounds<Key<D>>,
    {
        let (before, rest) = match range.start_bound() {
            Bound::Included(low) => self.split_key_link(root, low, true),
            Bound::Excluded(low) => self.split_key_link(root, low, false),
            Bound::Unbounded => (None, root),
        };
        let (middle, after) = match range.end_bound() {
            Bound::Included(high) => self.split_key_link(rest, high, false),
            Bound::Excluded(high) => self.split_key_link(rest, high, true),
            Bound::Unbounded => (rest, None),
        };
        let summary = self.summary_of(middle);
        (self.rejoin(before, middle, after), summary)
    }

    /// Whether every key of `left` is at most every key of `right`.
    pub(crate) fn ordered_links(&mut self, left: Link, right: Link) -> bool {
        match (self.edge_link(left, true), self.edge_link(right, false)) {
            (Some(last), Some(first)) => self.key_at(last) <= self.key_at(first),
            _ => true,
        }
    }

    /// The root with the higher priority stays on top, the other tree is split by its
    /// key, and the halves are united with its children. Runs on an explicit task stack.
    pub(crate) fn union_links(&mut self, left: Link, right: Link) -> Link {
        tracing::trace!(
            left = self.size_of(left),
            right = self.size_of(right),
            "uniting trees"
        );
        let mut top = None;
        let mut tasks = vec![Task::Union(left, right, Hole::Top)];
        while let Some(task) = tasks.pop() {
            let (a, b, hole) = match task {
                Task::Rebuild(index) => {
                    self.pull_up(index);
                    continue;
                }
                Task::Union(a, b, hole) => (a, b, hole),
            };
            let (pivot, other) = match (a, b) {
                (Some(x), Some(y)) => {
                    if self.arena.node(x).priority >= self.arena.node(y).priority {
                        (x, y)
                    } else {
                        (y, x)
                    }
                }
                (None, rest) | (rest, None) => {
                    self.fill(hole, &mut top, rest);
                    continue;
                }
            };

            self.push_down(pivot);
            let (low, high) = self.split_by_node(Some(other), |arena, index, _| {
                arena.node(index).value.get_key() <= arena.node(pivot).value.get_key()
            });
            self.fill(hole, &mut top, Some(pivot));
            let node = self.arena.node(pivot);
            let (pivot_left, pivot_right) = (node.left, node.right);
            tasks.push(Task::Rebuild(pivot));
            tasks.push(Task::Union(pivot_left, low, Hole::Left(pivot)));
            tasks.push(Task::Union(pivot_right, high, Hole::Right(pivot)));
        }
        top
    }
}

impl<D: Data> Forest<D, ByKey>
where
    D::Value: Keyed,
{
    /// Builds a tree from values sorted by key, in `O(n)`.
    /// Fails with [`TreeError::OutOfOrder`] if the values aren't sorted.
    pub fn build<I>(&mut self, values: I) -> Result<Root>
    where
        I: IntoIterator<Item = D::Value>,
    {
        let values: Vec<D::Value> = values.into_iter().collect();
        if values.windows(2).any(|w| w[0].get_key() > w[1].get_key()) {
            return Err(TreeError::OutOfOrder);
        }
        let link = self.build_links(values);
        Ok(self.issue(link))
    }

    /// Concatenates two trees. Fails with [`TreeError::OutOfOrder`] unless every key
    /// of `left` is at most every key of `right`. Use [`union`](Self::union) for
    /// interleaving trees.
    pub fn merge(&mut self, left: Root, right: Root) -> Result<Root> {
        let (left_link, right_link) = (self.peek(left)?, self.peek(right)?);
        if left.is_some() && left == right {
            return Err(TreeError::InvalidHandle);
        }
        if !self.ordered_links(left_link, right_link) {
            return Err(TreeError::OutOfOrder);
        }
        self.take(left)?;
        self.take(right)?;
        let link = self.merge_links(left_link, right_link);
        Ok(self.issue(link))
    }

    /// Inserts the value after every value with a smaller or equal key.
    pub fn insert(&mut self, root: Root, value: D::Value) -> Result<Root> {
        let link = self.take(root)?;
        let link = self.insert_key_link(link, value);
        Ok(self.issue(link))
    }

    /// Removes one value with this key. Fails with [`TreeError::NotFound`]
    /// (leaving the handle valid) if there is none.
    pub fn delete(&mut self, root: Root, key: &Key<D>) -> Result<(Root, D::Value)> {
        let link = self.peek(root)?;
        if self.find_link(link, key).is_none() {
            return Err(TreeError::NotFound);
        }
        self.take(root)?;
        let (link, value) = self.delete_key_link(link, key);
        let root = self.issue(link);
        value.map(|value| (root, value)).ok_or(TreeError::NotFound)
    }

    /// Splits the tree into the values with keys `<= key` and the values with keys `> key`.
    pub fn split_by_key(&mut self, root: Root, key: &Key<D>) -> Result<(Root, Root)> {
        let link = self.take(root)?;
        let (left, right) = self.split_key_link(link, key, false);
        Ok((self.issue(left), self.issue(right)))
    }

    /// Splits the tree into the values with keys `< key` and the values with keys `>= key`.
    pub fn split_by_key_strict(&mut self, root: Root, key: &Key<D>) -> Result<(Root, Root)> {
        let link = self.take(root)?;
        let (left, right) = self.split_key_link(link, key, true);
        Ok((self.issue(left), self.issue(right)))
    }

    /// Returns a value with this key, if there is one.
    pub fn get(&mut self, root: Root, key: &Key<D>) -> Result<Option<&D::Value>> {
        let link = self.peek(root)?;
        let index = self.find_link(link, key);
        Ok(index.map(|index| self.value(index)))
    }

    pub fn contains(&mut self, root: Root, key: &Key<D>) -> Result<bool> {
        Ok(self.get(root, key)?.is_some())
    }

    /// The number of values with keys strictly smaller than `key`.
    pub fn rank(&mut self, root: Root, key: &Key<D>) -> Result<usize> {
        let link = self.peek(root)?;
        Ok(self.rank_link(link, key))
    }

    /// The last value with a key strictly smaller than `key`.
    pub fn predecessor(&mut self, root: Root, key: &Key<D>) -> Result<Option<&D::Value>> {
        let link = self.peek(root)?;
        let index = self.neighbor_link(link, key, Ordering::Less);
        Ok(index.map(|index| self.value(index)))
    }

    /// The first value with a key strictly greater than `key`.
    pub fn successor(&mut self, root: Root, key: &Key<D>) -> Result<Option<&D::Value>> {
        let link = self.peek(root)?;
        let index = self.neighbor_link(link, key, Ordering::Greater);
        Ok(index.map(|index| self.value(index)))
    }

    /// Returns the summary of the values whose keys lie in the range.
    ///
    /// Like [`range_query`](Forest::range_query), this splits and re-merges the tree,
    /// so `root` is updated in place.
    pub fn range_query_by_key<R>(&mut self, root: &mut Root, range: R) -> Result<D::Summary>
    where
        R: RangeBounds<Key<D>>,
    {
        let link = self.take(*root)?;
        let (link, summary) = self.range_key_link(link, range);
        *root = self.issue(link);
        Ok(summary)
    }

    /// Computes the union of two trees, keeping every value of both.
    ///
    /// Unlike [`merge`](Self::merge), the trees may interleave.
    ///
    /// # Complexity
    /// If the sizes of the two trees are `n,k`, with `n < k`, then the complexity is
    /// `O(n*log(1+k/n))` in the average case. In particular, uniting `n` singleton trees
    /// in any order takes `O(n*log(n))` overall.
    pub fn union(&mut self, left: Root, right: Root) -> Result<Root> {
        self.peek(left)?;
        self.peek(right)?;
        if left.is_some() && left == right {
            return Err(TreeError::InvalidHandle);
        }
        let (left, right) = (self.take(left)?, self.take(right)?);
        let link = self.union_links(left, right);
        Ok(self.issue(link))
    }
}
