use crate::arena::Link;
use crate::data::*;

/// A node of a treap, stored in the arena.
///
/// `value` and `summary` already include every action applied to this node.
/// `action` is pending for the children only: it still has to be pushed down
/// to them before they are read or restructured. A pending reversal has already
/// swapped `left` and `right`; what remains pending is the reversal of the
/// children's own subtrees.
pub(crate) struct Node<D: Data> {
    pub value: D::Value,
    pub summary: D::Summary,
    pub action: D::Action,
    pub priority: u64,
    pub size: u32,
    pub left: Link,
    pub right: Link,
}

impl<D: Data> Node<D> {
    pub fn new(value: D::Value, priority: u64) -> Node<D> {
        Node {
            summary: D::to_summary(&value),
            value,
            action: Default::default(),
            priority,
            size: 1,
            left: None,
            right: None,
        }
    }

    /// Applies the action to this node's whole subtree, in `O(1)`.
    ///
    /// This leaves the `action` field "dirty": the children only receive the action
    /// on the next push-down.
    pub fn act(&mut self, action: D::Action) {
        <D::Action as Acts<D::Value>>::act_inplace(&action, &mut self.value);
        <D::Action as Acts<D::Summary>>::act_inplace(&action, &mut self.summary);
        self.action = action + self.action;
        if action.to_reverse() {
            std::mem::swap(&mut self.left, &mut self.right);
        }
    }
}
