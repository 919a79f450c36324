//! Push-down and pull-up.
//!
//! Actions stored in nodes are supposed to be eventually applied to their whole
//! subtree. Before a node's children are read or restructured, the node has to be
//! pushed down; after its children changed, it has to be pulled up, so that its
//! size and summary are accurate again.

use super::*;

impl<D: Data, M> Forest<D, M> {
    /// Applies the action to the whole subtree in `O(1)`. A no-op on the empty tree.
    pub(crate) fn act_link(&mut self, link: Link, action: D::Action) {
        if let Some(index) = link {
            self.arena.node_mut(index).act(action);
        }
    }

    /// Pushes the action stored in this node to its children.
    pub(crate) fn push_down(&mut self, index: u32) {
        let node = self.arena.node_mut(index);
        if node.action.is_identity() {
            return;
        }
        let action = std::mem::take(&mut node.action);
        let (left, right) = (node.left, node.right);
        self.act_link(left, action);
        self.act_link(right, action);
    }

    /// Remakes the size and summary of this node from its children.
    /// The node must have been pushed down.
    pub(crate) fn pull_up(&mut self, index: u32) {
        let node = self.arena.node(index);
        debug_assert!(node.action.is_identity(), "pulling up a dirty node");
        let (left, right) = (node.left, node.right);
        let size = 1 + self.size_of(left) + self.size_of(right);
        let summary = self.summary_of(left) + D::to_summary(&node.value) + self.summary_of(right);

        let node = self.arena.node_mut(index);
        // a subtree never holds more nodes than the arena has slots
        node.size = u32::try_from(size).expect("subtree exceeded u32::MAX nodes");
        node.summary = summary;
    }

    /// Pushes down every action in the subtree, so that every node is clean.
    pub(crate) fn flush(&mut self, link: Link) {
        let mut stack: Vec<u32> = link.into_iter().collect();
        while let Some(index) = stack.pop() {
            self.push_down(index);
            let node = self.arena.node(index);
            stack.extend(node.left);
            stack.extend(node.right);
        }
    }

    pub(crate) fn size_of(&self, link: Link) -> usize {
        match link {
            Some(index) => self.arena.node(index).size as usize,
            None => 0,
        }
    }

    pub(crate) fn summary_of(&self, link: Link) -> D::Summary {
        match link {
            Some(index) => self.arena.node(index).summary,
            None => Default::default(),
        }
    }
}
