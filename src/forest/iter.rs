use super::*;

/// In-order iterator over the values of a tree, returned by [`Forest::iter`].
///
/// The tree has to be flushed before it is iterated, since the iterator only reads.
pub struct Iter<'a, D: Data> {
    arena: &'a Arena<D>,
    // the nodes whose left subtree has been visited but which haven't been yielded yet
    stack: Vec<u32>,
    current: Link,
    remaining: usize,
}

impl<'a, D: Data> Iter<'a, D> {
    pub(super) fn new(arena: &'a Arena<D>, root: Link) -> Self {
        let remaining = root.map_or(0, |index| arena.node(index).size as usize);
        Iter {
            arena,
            stack: vec![],
            current: root,
            remaining,
        }
    }
}

impl<'a, D: Data> Iterator for Iter<'a, D> {
    type Item = &'a D::Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.arena.node(index).left;
        }
        let index = self.stack.pop()?;
        let node = self.arena.node(index);
        debug_assert!(node.action.is_identity());
        self.current = node.right;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, D: Data> ExactSizeIterator for Iter<'a, D> {}

#[test]
fn iterates_in_order() {
    use crate::example_data::StdNum;
    let mut forest: Forest<StdNum> = Forest::with_config(ForestConfig::default().with_seed(8));
    let root = forest.build(0..100);
    let root = forest.reverse(root, 10, 89).unwrap();
    let iter = forest.iter(root).unwrap();
    assert_eq!(iter.len(), 100);
    let expected: Vec<i64> = (0..10).chain((10..90).rev()).chain(90..100).collect();
    assert_eq!(iter.copied().collect::<Vec<_>>(), expected);
    assert_eq!(forest.iter(None).unwrap().next(), None);
}
