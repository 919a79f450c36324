//! An owned multiset sorted by key, backed by a single treap.
//!
//!```
//! use copse::*;
//! use copse::example_data::*;
//!
//! let mut set: OrderedMultiset<SetNum> = vec![9, 1, 5, 5, 13].into_iter().collect();
//! assert_eq!(set.kth(3), Some(&9));
//! assert_eq!(set.rank(&9), 3);
//! assert_eq!(set.predecessor(&5), Some(&1));
//! assert_eq!(set.range_summary(2..10).sum, 19);
//!
//! let other: OrderedMultiset<SetNum> = vec![0, 6, 20].into_iter().collect();
//! set.union(other);
//! assert_eq!(set.to_vec(), vec![0, 1, 5, 5, 6, 9, 13, 20]);
//! # set.assert_correctness();
//!```

use std::ops::RangeBounds;

use crate::arena::Link;
use crate::*;

type Key<D> = <<D as Data>::Value as Keyed>::Key;

/// A sorted multiset: values are ordered by their [`Keyed`] key, and equal keys may
/// repeat. Values with equal keys are kept in insertion order, except that
/// [`union`](Self::union) and [`extend`](Extend::extend) interleave them arbitrarily.
pub struct OrderedMultiset<D: Data>
where
    D::Value: Keyed,
{
    forest: Forest<D, ByKey>,
    root: Link,
}

impl<D: Data> Default for OrderedMultiset<D>
where
    D::Value: Keyed,
{
    fn default() -> Self {
        OrderedMultiset::new()
    }
}

impl<D: Data> OrderedMultiset<D>
where
    D::Value: Keyed,
{
    pub fn new() -> Self {
        OrderedMultiset::with_config(ForestConfig::default())
    }

    pub fn with_config(config: ForestConfig) -> Self {
        OrderedMultiset {
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

    pub fn insert(&mut self, value: D::Value) {
        self.root = self.forest.insert_key_link(self.root, value);
    }

    /// Removes one value with this key, if there is one.
    pub fn remove(&mut self, key: &Key<D>) -> Option<D::Value> {
        let (root, value) = self.forest.delete_key_link(self.root, key);
        self.root = root;
        value
    }

    pub fn get(&mut self, key: &Key<D>) -> Option<&D::Value> {
        let found = self.forest.find_link(self.root, key)?;
        Some(self.forest.value(found))
    }

    pub fn contains(&mut self, key: &Key<D>) -> bool {
        self.forest.find_link(self.root, key).is_some()
    }

    /// The number of values with keys strictly smaller than `key`.
    pub fn rank(&mut self, key: &Key<D>) -> usize {
        self.forest.rank_link(self.root, key)
    }

    /// The value with exactly `k` smaller values before it (zero-based).
    pub fn kth(&mut self, k: usize) -> Option<&D::Value> {
        let found = self.forest.kth_link(self.root, k)?;
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

    /// The last value with a key strictly smaller than `key`.
    pub fn predecessor(&mut self, key: &Key<D>) -> Option<&D::Value> {
        let found = self.forest.neighbor_link(self.root, key, std::cmp::Ordering::Less)?;
        Some(self.forest.value(found))
    }

    /// The first value with a key strictly greater than `key`.
    pub fn successor(&mut self, key: &Key<D>) -> Option<&D::Value> {
        let found = self.forest.neighbor_link(self.root, key, std::cmp::Ordering::Greater)?;
        Some(self.forest.value(found))
    }

    pub fn summary(&self) -> D::Summary {
        self.forest.summary_of(self.root)
    }

    /// The summary of the values whose keys lie in the range. An empty or inverted
    /// range gives the empty summary.
    pub fn range_summary<R: RangeBounds<Key<D>>>(&mut self, range: R) -> D::Summary {
        let (root, summary) = self.forest.range_key_link(self.root, range);
        self.root = root;
        summary
    }

    /// Moves every value with a key `>= key` to a new multiset, in `O(m)` for the
    /// `m` values moved.
    pub fn split_off(&mut self, key: &Key<D>) -> OrderedMultiset<D> {
        let (left, right) = self.forest.split_key_link(self.root, key, true);
        self.root = left;
        let values = self.forest.drain_links(right);
        let mut other = OrderedMultiset::with_config(self.forest.spawn_config());
        other.root = other.forest.build_links(values);
        other
    }

    /// Adds every value of `other` to this multiset.
    ///
    /// The values are moved into this multiset's forest in `O(m)` for the `m` values
    /// of `other`, and the trees are then united in `O(m*log(1+n/m))` expected time.
    pub fn union(&mut self, other: OrderedMultiset<D>) {
        let values = other.into_vec();
        let link = self.forest.build_links(values);
        self.root = self.forest.union_links(self.root, link);
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

    /// Checks the tree's invariants and its order, panicking if they don't hold.
    pub fn assert_correctness(&self)
    where
        D::Summary: Eq,
    {
        self.forest.assert_links(self.root);
        self.forest.assert_sorted_links(self.root);
    }
}

impl<D: Data> FromIterator<D::Value> for OrderedMultiset<D>
where
    D::Value: Keyed,
{
    /// Sorts the values, then builds the tree in `O(n)`.
    fn from_iter<I: IntoIterator<Item = D::Value>>(iter: I) -> Self {
        let mut values: Vec<D::Value> = iter.into_iter().collect();
        values.sort_by(|a, b| a.get_key().cmp(b.get_key()));
        let mut set = OrderedMultiset::new();
        set.root = set.forest.build_links(values);
        set
    }
}

impl<D: Data> Extend<D::Value> for OrderedMultiset<D>
where
    D::Value: Keyed,
{
    fn extend<I: IntoIterator<Item = D::Value>>(&mut self, iter: I) {
        let mut values: Vec<D::Value> = iter.into_iter().collect();
        values.sort_by(|a, b| a.get_key().cmp(b.get_key()));
        let link = self.forest.build_links(values);
        self.root = self.forest.union_links(self.root, link);
    }
}
