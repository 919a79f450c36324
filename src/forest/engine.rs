//! Split, merge and bulk construction.
//!
//! Every other operation is a sequence of these. They walk a single path down the
//! tree with an explicit stack: nodes are pushed down on the way down, attached to
//! their new parents as they are passed, and pulled up in reverse order at the end.

use super::*;

/// The place where the next piece of a tree being assembled will be attached.
#[derive(Clone, Copy)]
pub(super) enum Hole {
    Top,
    Left(u32),
    Right(u32),
}

impl<D: Data, M> Forest<D, M> {
    pub(super) fn fill(&mut self, hole: Hole, top: &mut Link, link: Link) {
        match hole {
            Hole::Top => *top = link,
            Hole::Left(parent) => self.arena.node_mut(parent).left = link,
            Hole::Right(parent) => self.arena.node_mut(parent).right = link,
        }
    }

    /// Splits the tree into two trees. `goes_left` is asked about the nodes on a single
    /// root-to-leaf path, with the size of each node's left subtree, and decides whether
    /// the node (and everything before it) belongs to the left tree.
    ///
    /// `goes_left` must be monotone along the in-order sequence: once it answers `false`
    /// for a node, it would answer `false` for every later node.
    pub(crate) fn split_with<F>(&mut self, root: Link, mut goes_left: F) -> (Link, Link)
    where
        F: FnMut(&D::Value, usize) -> bool,
    {
        self.split_by_node(root, |arena, index, left_size| {
            goes_left(&arena.node(index).value, left_size)
        })
    }

    /// Like [`split_with`](Self::split_with), but the predicate sees the whole arena, so
    /// it can compare against other nodes of the forest.
    pub(crate) fn split_by_node<F>(&mut self, root: Link, mut goes_left: F) -> (Link, Link)
    where
        F: FnMut(&Arena<D>, u32, usize) -> bool,
    {
        let (mut left, mut right) = (None, None);
        let (mut left_hole, mut right_hole) = (Hole::Top, Hole::Top);
        let mut path = vec![];

        let mut current = root;
        while let Some(index) = current {
            self.push_down(index);
            path.push(index);
            let node = self.arena.node(index);
            let (node_left, node_right) = (node.left, node.right);
            if goes_left(&self.arena, index, self.size_of(node_left)) {
                self.fill(left_hole, &mut left, Some(index));
                left_hole = Hole::Right(index);
                current = node_right;
            } else {
                self.fill(right_hole, &mut right, Some(index));
                right_hole = Hole::Left(index);
                current = node_left;
            }
        }
        self.fill(left_hole, &mut left, None);
        self.fill(right_hole, &mut right, None);

        for index in path.into_iter().rev() {
            self.pull_up(index);
        }
        (left, right)
    }

    /// Splits off the first `k` nodes. `k` must be at most the tree's size.
    pub(crate) fn split_rank(&mut self, root: Link, k: usize) -> (Link, Link) {
        debug_assert!(k <= self.size_of(root));
        let mut remaining = k;
        self.split_with(root, |_, left_size| {
            if remaining > left_size {
                remaining -= left_size + 1;
                true
            } else {
                false
            }
        })
    }

    /// Concatenates two trees. Every node of `left` is placed before every node of `right`.
    pub(crate) fn merge_links(&mut self, mut left: Link, mut right: Link) -> Link {
        let mut top = None;
        let mut hole = Hole::Top;
        let mut path = vec![];

        loop {
            let (a, b) = match (left, right) {
                (Some(a), Some(b)) => (a, b),
                (None, rest) | (rest, None) => {
                    self.fill(hole, &mut top, rest);
                    break;
                }
            };
            let (pa, pb) = (self.arena.node(a).priority, self.arena.node(b).priority);
            if pa == pb {
                tracing::trace!(priority = pa, "equal priorities while merging");
            }
            if pa >= pb {
                self.push_down(a);
                self.fill(hole, &mut top, Some(a));
                hole = Hole::Right(a);
                left = self.arena.node(a).right;
                path.push(a);
            } else {
                self.push_down(b);
                self.fill(hole, &mut top, Some(b));
                hole = Hole::Left(b);
                right = self.arena.node(b).left;
                path.push(b);
            }
        }

        for index in path.into_iter().rev() {
            self.pull_up(index);
        }
        top
    }

    /// Allocates a fresh node with a new priority.
    pub(crate) fn alloc(&mut self, value: D::Value) -> u32 {
        let priority = self.priorities.next();
        self.arena.alloc(Node::new(value, priority))
    }

    /// Builds a tree holding the values in order, in `O(n)`.
    ///
    /// The nodes are laid out as the Cartesian tree of their priorities. The stack
    /// holds the right spine of the tree built so far; nodes leave it once their
    /// subtree is complete, and are pulled up at that moment.
    pub(crate) fn build_links<I>(&mut self, values: I) -> Link
    where
        I: IntoIterator<Item = D::Value>,
    {
        let mut spine: Vec<u32> = vec![];
        let mut count = 0usize;
        for value in values {
            count += 1;
            let index = self.alloc(value);
            let priority = self.arena.node(index).priority;

            let mut last = None;
            while let Some(&top) = spine.last() {
                if self.arena.node(top).priority >= priority {
                    break;
                }
                spine.pop();
                self.pull_up(top);
                last = Some(top);
            }
            self.arena.node_mut(index).left = last;
            if let Some(&parent) = spine.last() {
                self.arena.node_mut(parent).right = Some(index);
            }
            spine.push(index);
        }

        let root = spine.first().copied();
        while let Some(index) = spine.pop() {
            self.pull_up(index);
        }
        tracing::trace!(count, "built tree");
        root
    }

    /// Frees every node of the tree, returning their values in order.
    pub(crate) fn drain_links(&mut self, root: Link) -> Vec<D::Value> {
        let mut values = Vec::with_capacity(self.size_of(root));
        let mut stack = vec![];
        let mut current = root;
        loop {
            while let Some(index) = current {
                self.push_down(index);
                stack.push(index);
                current = self.arena.node(index).left;
            }
            let Some(index) = stack.pop() else {
                break;
            };
            let node = self.arena.free(index);
            current = node.right;
            values.push(node.value);
        }
        values
    }
}
