//! Operations on trees ordered by position.

use super::*;

impl<D: Data> Forest<D, ByRank> {
    /// Builds a tree holding the values in order, in `O(n)`.
    pub fn build<I>(&mut self, values: I) -> Root
    where
        I: IntoIterator<Item = D::Value>,
    {
        let link = self.build_links(values);
        self.issue(link)
    }

    /// Concatenates the trees: every value of `left` comes before every value of `right`.
    pub fn merge(&mut self, left: Root, right: Root) -> Result<Root> {
        self.peek(left)?;
        self.peek(right)?;
        if left.is_some() && left == right {
            return Err(TreeError::InvalidHandle);
        }
        let (left, right) = (self.take(left)?, self.take(right)?);
        let link = self.merge_links(left, right);
        Ok(self.issue(link))
    }

    /// Inserts the value so that it ends up at position `index`.
    /// `index` may be equal to the size of the tree, to insert at the end.
    pub fn insert(&mut self, root: Root, index: usize, value: D::Value) -> Result<Root> {
        self.splice(root, index, std::iter::once(value))
    }

    /// Inserts all of the values, in order, starting at position `index`.
    /// Takes `O(m + log n)` expected time for `m` values.
    pub fn splice<I>(&mut self, root: Root, index: usize, values: I) -> Result<Root>
    where
        I: IntoIterator<Item = D::Value>,
    {
        let link = self.peek(root)?;
        let len = self.size_of(link);
        if index > len {
            return Err(TreeError::OutOfRange { index, len });
        }
        self.take(root)?;
        let (before, after) = self.split_rank(link, index);
        let middle = self.build_links(values);
        let link = self.rejoin(before, middle, after);
        Ok(self.issue(link))
    }

    /// Removes the value at position `index`. Returns the new root and the value.
    pub fn delete(&mut self, root: Root, index: usize) -> Result<(Root, D::Value)> {
        let (root, mut values) = self.remove_range(root, index, index)?;
        let value = values.pop().ok_or(TreeError::NotFound)?;
        Ok((root, value))
    }

    /// Removes the values at positions `start..=end`, returning them in order.
    pub fn remove_range(
        &mut self,
        root: Root,
        start: usize,
        end: usize,
    ) -> Result<(Root, Vec<D::Value>)> {
        let link = self.peek(root)?;
        Self::check_segment(start, end, self.size_of(link))?;
        self.take(root)?;
        let (before, middle, after) = self.isolate(link, start, end + 1);
        let values = self.drain_links(middle);
        let link = self.merge_links(before, after);
        Ok((self.issue(link), values))
    }

    /// Applies the action to the values at positions `start..=end`.
    ///
    /// The segment is split out, the action is stored at its root in `O(1)`, and
    /// the pieces are merged back. The segment's nodes only receive the action
    /// when they are next visited.
    pub fn range_apply(
        &mut self,
        root: Root,
        start: usize,
        end: usize,
        action: D::Action,
    ) -> Result<Root> {
        let link = self.peek(root)?;
        Self::check_segment(start, end, self.size_of(link))?;
        self.take(root)?;
        let (before, middle, after) = self.isolate(link, start, end + 1);
        self.act_link(middle, action);
        let link = self.rejoin(before, middle, after);
        Ok(self.issue(link))
    }

    /// Applies the action to the whole tree, in `O(1)`.
    pub fn apply_all(&mut self, root: Root, action: D::Action) -> Result<Root> {
        let link = self.take(root)?;
        self.act_link(link, action);
        Ok(self.issue(link))
    }

    /// Reverses the values at positions `start..=end`.
    pub fn reverse(&mut self, root: Root, start: usize, end: usize) -> Result<Root>
    where
        D::Action: Reverse,
    {
        self.range_apply(root, start, end, D::Action::reversal())
    }
}
