//! Order-statistics and segment queries shared by both modes.

use super::*;

impl<D: Data, M> Forest<D, M> {
    /// Walks down to the node at in-order position `k`, pushing down along the way.
    pub(crate) fn kth_link(&mut self, root: Link, mut k: usize) -> Option<u32> {
        let mut current = root;
        while let Some(index) = current {
            self.push_down(index);
            let node = self.arena.node(index);
            let left_size = self.size_of(node.left);
            if k < left_size {
                current = node.left;
            } else if k == left_size {
                return Some(index);
            } else {
                k -= left_size + 1;
                current = node.right;
            }
        }
        None
    }

    /// The leftmost or rightmost node of the tree, pushing down along the way.
    pub(crate) fn edge_link(&mut self, root: Link, rightmost: bool) -> Option<u32> {
        let mut current = root;
        let mut found = None;
        while let Some(index) = current {
            self.push_down(index);
            found = Some(index);
            let node = self.arena.node(index);
            current = if rightmost { node.right } else { node.left };
        }
        found
    }

    /// Splits out the segment `start..end` as its own tree.
    /// Returns the trees before, inside and after the segment.
    pub(crate) fn isolate(&mut self, root: Link, start: usize, end: usize) -> (Link, Link, Link) {
        let (before, rest) = self.split_rank(root, start);
        let (middle, after) = self.split_rank(rest, end - start);
        (before, middle, after)
    }

    pub(crate) fn rejoin(&mut self, before: Link, middle: Link, after: Link) -> Link {
        let left = self.merge_links(before, middle);
        self.merge_links(left, after)
    }

    /// Checks that `start..=end` is a segment of a tree of size `len`.
    pub(crate) fn check_segment(start: usize, end: usize, len: usize) -> Result<()> {
        if end >= len {
            return Err(TreeError::OutOfRange { index: end, len });
        }
        if start > end {
            return Err(TreeError::InvalidRange {
                start,
                end: end + 1,
                len,
            });
        }
        Ok(())
    }
}

impl<D: Data, M: Mode> Forest<D, M> {
    /// Returns the value at in-order position `k` (zero-based).
    ///
    /// Fails with [`TreeError::OutOfRange`] if `k` is not smaller than the tree's size.
    pub fn kth(&mut self, root: Root, k: usize) -> Result<&D::Value> {
        let link = self.peek(root)?;
        let len = self.size_of(link);
        if k >= len {
            return Err(TreeError::OutOfRange { index: k, len });
        }
        let index = self
            .kth_link(link, k)
            .ok_or(TreeError::OutOfRange { index: k, len })?;
        Ok(&self.arena.node(index).value)
    }

    /// The first value of the tree, if any.
    pub fn first(&mut self, root: Root) -> Result<Option<&D::Value>> {
        self.edge(root, false)
    }

    /// The last value of the tree, if any.
    pub fn last(&mut self, root: Root) -> Result<Option<&D::Value>> {
        self.edge(root, true)
    }

    fn edge(&mut self, root: Root, rightmost: bool) -> Result<Option<&D::Value>> {
        let link = self.peek(root)?;
        let found = self.edge_link(link, rightmost);
        Ok(found.map(|index| &self.arena.node(index).value))
    }

    /// Returns the summary of the values at positions `start..=end`.
    ///
    /// The segment is split out and merged back, so the root of the tree may change:
    /// `root` is updated in place. The values themselves are unchanged.
    pub fn range_query(&mut self, root: &mut Root, start: usize, end: usize) -> Result<D::Summary> {
        let link = self.peek(*root)?;
        Self::check_segment(start, end, self.size_of(link))?;
        self.take(*root)?;

        let (before, middle, after) = self.isolate(link, start, end + 1);
        let summary = self.summary_of(middle);
        let link = self.rejoin(before, middle, after);
        *root = self.issue(link);
        Ok(summary)
    }
}
