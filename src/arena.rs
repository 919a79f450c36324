//! Storage for the nodes of every tree in a forest.
//!
//! Nodes never point at each other directly: children are slot indices into the arena,
//! and callers hold generational [`NodeRef`] handles. A slot's generation is bumped
//! whenever the node in it is freed, and whenever a tree rooted at it is consumed by
//! an operation, so stale handles are rejected instead of silently aliasing another
//! tree. Growth of the underlying vector never invalidates a handle, since handles are
//! indices and not pointers.
//!
//! Every arena also carries an identity drawn from a global counter, and handles
//! remember the arena that issued them, so a handle from one forest is never resolved
//! against the slots of another.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::data::Data;
use crate::error::{Result, TreeError};
use crate::node::Node;

/// Internal child link: a slot index, or `None` for the empty tree.
pub(crate) type Link = Option<u32>;

const NO_NODE_ERROR: &str = "invariant violated: link points at a vacant slot";

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(0);

/// A handle to the root of a tree inside a [`Forest`](crate::Forest).
///
/// Handles are only valid until the tree they point at is consumed. Every operation
/// taking a root returns the handles of the resulting roots; using an older handle
/// fails with [`TreeError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeRef {
    pub(crate) arena: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// A possibly empty tree. `None` is the empty tree.
pub type Root = Option<NodeRef>;

struct Slot<D: Data> {
    generation: u32,
    node: Option<Node<D>>,
}

pub(crate) struct Arena<D: Data> {
    id: u32,
    slots: Vec<Slot<D>>,
    free: Vec<u32>,
    recycle: bool,
    live: usize,
}

impl<D: Data> Arena<D> {
    pub fn with_capacity(capacity: usize, recycle: bool) -> Self {
        Arena {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free: vec![],
            recycle,
            live: 0,
        }
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn alloc(&mut self, node: Node<D>) -> u32 {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index as usize].node = Some(node);
            return index;
        }
        let index = u32::try_from(self.slots.len()).expect("arena exceeded u32::MAX nodes");
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        index
    }

    /// Takes the node out of its slot. The slot's handles all become invalid.
    pub fn free(&mut self, index: u32) -> Node<D> {
        let slot = &mut self.slots[index as usize];
        let node = slot.node.take().expect(NO_NODE_ERROR);
        slot.generation = slot.generation.wrapping_add(1);
        self.live -= 1;
        if self.recycle {
            self.free.push(index);
        }
        node
    }

    pub fn node(&self, index: u32) -> &Node<D> {
        self.slots[index as usize].node.as_ref().expect(NO_NODE_ERROR)
    }

    pub fn node_mut(&mut self, index: u32) -> &mut Node<D> {
        self.slots[index as usize].node.as_mut().expect(NO_NODE_ERROR)
    }

    /// Issues a fresh handle for the node in this slot.
    pub fn handle(&self, index: u32) -> NodeRef {
        NodeRef {
            arena: self.id,
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Checks that the handle still refers to the node it was issued for.
    pub fn resolve(&self, handle: NodeRef) -> Result<u32> {
        if handle.arena != self.id {
            tracing::warn!(?handle, arena = self.id, "rejected handle from another forest");
            return Err(TreeError::InvalidHandle);
        }
        match self.slots.get(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation && slot.node.is_some() => {
                Ok(handle.index)
            }
            _ => {
                tracing::warn!(?handle, "rejected stale handle");
                Err(TreeError::InvalidHandle)
            }
        }
    }

    /// Invalidates every outstanding handle to this slot, keeping the node.
    pub fn retire(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Removes every node. All handles become invalid.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            if self.recycle {
                self.free.push(index as u32);
            }
        }
        self.live = 0;
    }
}
