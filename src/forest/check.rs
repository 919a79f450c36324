//! Invariant checks, for tests.

use super::*;

impl<D: Data, M> Forest<D, M> {
    /// Checks every node of the tree: sizes, heap order of priorities, and that each
    /// node's summary is the sum of its children's summaries and its own value, with the
    /// node's pending action applied to the children.
    pub(crate) fn assert_links(&self, root: Link)
    where
        D::Summary: Eq,
    {
        let mut stack: Vec<u32> = root.into_iter().collect();
        while let Some(index) = stack.pop() {
            let node = self.arena.node(index);
            let (left, right) = (node.left, node.right);
            for child in [left, right].into_iter().flatten() {
                assert!(
                    node.priority >= self.arena.node(child).priority,
                    "heap order violated below slot {}",
                    index
                );
                stack.push(child);
            }
            assert_eq!(
                node.size as usize,
                1 + self.size_of(left) + self.size_of(right),
                "wrong size at slot {}",
                index
            );
            let act = |summary| <D::Action as Acts<D::Summary>>::act(&node.action, summary);
            let left_summary = act(self.summary_of(left));
            let right_summary = act(self.summary_of(right));
            assert!(
                node.summary == left_summary + D::to_summary(&node.value) + right_summary,
                "wrong summary at slot {}",
                index
            );
        }
    }
}

impl<D: Data, M: Mode> Forest<D, M> {
    /// Checks that the tree's invariants hold, panicking if they don't.
    /// Also panics if the handle is invalid.
    pub fn assert_correctness(&self, root: Root)
    where
        D::Summary: Eq,
    {
        let link = match self.peek(root) {
            Ok(link) => link,
            Err(err) => panic!("checking a tree through a bad handle: {}", err),
        };
        self.assert_links(link);
    }
}

impl<D: Data> Forest<D, ByKey>
where
    D::Value: Keyed,
{
    /// Checks that the tree's values are sorted by key, panicking if they aren't.
    pub fn assert_sorted(&self, root: Root) {
        let link = match self.peek(root) {
            Ok(link) => link,
            Err(err) => panic!("checking a tree through a bad handle: {}", err),
        };
        self.assert_sorted_links(link);
    }
}

impl<D: Data, M> Forest<D, M>
where
    D::Value: Keyed,
{
    // Keyed trees never hold pending actions, so their shape is their order.
    pub(crate) fn assert_sorted_links(&self, root: Link) {
        let mut previous: Option<u32> = None;
        let mut stack = vec![];
        let mut current = root;
        loop {
            while let Some(index) = current {
                stack.push(index);
                current = self.arena.node(index).left;
            }
            let Some(index) = stack.pop() else {
                break;
            };
            if let Some(previous) = previous {
                assert!(
                    self.arena.node(previous).value.get_key()
                        <= self.arena.node(index).value.get_key(),
                    "keys out of order at slot {}",
                    index
                );
            }
            previous = Some(index);
            current = self.arena.node(index).right;
        }
    }
}

#[test]
#[should_panic(expected = "wrong summary")]
fn detects_a_corrupted_summary() {
    use crate::example_data::StdNum;
    let mut forest: Forest<StdNum> = Forest::with_config(ForestConfig::default().with_seed(1));
    let root = forest.build(0..10);
    let index = forest.peek(root).unwrap().unwrap();
    forest.arena.node_mut(index).summary.sum += 1;
    forest.assert_correctness(root);
}
