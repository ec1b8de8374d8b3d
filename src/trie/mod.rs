//! Fixed-depth bit trie with chained-collision leaves.
//!
//! The trie routes a fingerprint through `max_level` binary choices,
//! one per low hash bit (most significant of the selected range first).
//! Every path has the same length, so inner slots only ever hold trie
//! nodes and the deepest slots only ever hold entries. Entries whose
//! hashes share all `max_level` low bits land in the same leaf and are
//! disambiguated by walking a singly-linked chain comparing the full
//! `(hash, sum)` pair.
//!
//! All structure lives in two slab arenas (one per node kind) and is
//! addressed by 32-bit handles. Links are written exactly once, from
//! empty to occupied, so the structure is acyclic by construction.

use crate::arena::Arena;
use crate::hash::HashBox;

/// Handle to a trie node in the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct NodeRef(u32);

/// Handle to an entry in the entry arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct EntryRef(u32);

impl EntryRef {
    /// Sentinel for "no entry", used to terminate collision chains.
    pub const NULL: EntryRef = EntryRef(u32::MAX);

    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for EntryRef {
    fn default() -> Self {
        EntryRef::NULL
    }
}

/// One child slot of a trie node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    /// Nothing below this slot yet.
    #[default]
    Empty,
    /// An inner trie node (levels `max_level - 1` down to `1`).
    Node(NodeRef),
    /// A collision-chain head (deepest level only).
    Entry(EntryRef),
}

/// A trie node: two child slots, one per hash bit value.
#[derive(Clone, Debug, Default)]
pub struct TrieNode {
    slots: [Slot; 2],
}

/// A stored entry: fingerprint, payload, chain link.
#[derive(Clone, Debug)]
pub struct Entry<V> {
    /// Full fingerprint of the key that created this entry.
    pub fingerprint: HashBox,
    /// Payload; `None` until the first `set` lands.
    pub value: Option<V>,
    /// Next entry sharing this leaf, or [`EntryRef::NULL`].
    pub next: EntryRef,
}

// Manual impl: arena blocks need Default without requiring V: Default.
impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            fingerprint: HashBox::default(),
            value: None,
            next: EntryRef::NULL,
        }
    }
}

/// The two-level index: bit trie plus collision chains, backed by the
/// node and entry arenas.
pub struct TrieIndex<V> {
    nodes: Arena<TrieNode>,
    entries: Arena<Entry<V>>,
    root: NodeRef,
    max_level: u8,
}

impl<V> TrieIndex<V> {
    /// Build an empty index of depth `max_level` (validated by the
    /// caller) with the given arena capacities. The root node is
    /// allocated up front.
    pub fn new(
        max_level: u8,
        node_index_capacity: usize,
        node_block_capacity: u32,
        entry_index_capacity: usize,
        entry_block_capacity: u32,
    ) -> Self {
        let mut nodes = Arena::with_capacity(node_index_capacity, node_block_capacity);
        let entries = Arena::with_capacity(entry_index_capacity, entry_block_capacity);
        let root = NodeRef(nodes.alloc());
        Self {
            nodes,
            entries,
            root,
            max_level,
        }
    }

    /// Descend to the leaf for `fingerprint`, building missing trie
    /// nodes along the way, and return the entry heading that leaf.
    ///
    /// A fresh entry carries the full fingerprint but no value yet.
    /// The returned entry is only guaranteed to match `fingerprint` on
    /// the trie bits; the caller must compare the full fingerprint and
    /// fall back to [`resolve`](Self::resolve) on a mismatch.
    pub fn locate(&mut self, fingerprint: HashBox) -> EntryRef {
        let mut node = self.root;
        for level in (1..u32::from(self.max_level)).rev() {
            let bit = ((fingerprint.hash >> level) & 1) as usize;
            node = match self.nodes.get(node.0).slots[bit] {
                Slot::Node(child) => child,
                Slot::Empty => {
                    let child = NodeRef(self.nodes.alloc());
                    self.nodes.get_mut(node.0).slots[bit] = Slot::Node(child);
                    child
                }
                Slot::Entry(_) => unreachable!("entry stored above the deepest level"),
            };
        }
        let bit = (fingerprint.hash & 1) as usize;
        match self.nodes.get(node.0).slots[bit] {
            Slot::Entry(entry) => entry,
            Slot::Empty => {
                let entry = EntryRef(self.entries.alloc());
                self.entries.get_mut(entry.0).fingerprint = fingerprint;
                self.nodes.get_mut(node.0).slots[bit] = Slot::Entry(entry);
                entry
            }
            Slot::Node(_) => unreachable!("trie node stored in a leaf slot"),
        }
    }

    /// Read-only descent: the leaf entry for `fingerprint`, or `None`
    /// if any slot on the path is still empty. Allocates nothing.
    pub fn probe(&self, fingerprint: HashBox) -> Option<EntryRef> {
        let mut node = self.root;
        for level in (1..u32::from(self.max_level)).rev() {
            let bit = ((fingerprint.hash >> level) & 1) as usize;
            node = match self.nodes.get(node.0).slots[bit] {
                Slot::Node(child) => child,
                Slot::Empty => return None,
                Slot::Entry(_) => unreachable!("entry stored above the deepest level"),
            };
        }
        let bit = (fingerprint.hash & 1) as usize;
        match self.nodes.get(node.0).slots[bit] {
            Slot::Entry(entry) => Some(entry),
            Slot::Empty => None,
            Slot::Node(_) => unreachable!("trie node stored in a leaf slot"),
        }
    }

    /// Walk the collision chain hanging off `head` for an exact
    /// fingerprint match, appending a fresh entry at the tail if none
    /// matches. The caller has already ruled out `head` itself.
    ///
    /// Chain links go from NULL to a concrete entry exactly once and
    /// are never rewritten afterwards.
    pub fn resolve(&mut self, head: EntryRef, fingerprint: HashBox) -> EntryRef {
        let mut back = head;
        let mut current = self.entries.get(head.0).next;
        while !current.is_null() {
            if self.entries.get(current.0).fingerprint == fingerprint {
                return current;
            }
            back = current;
            current = self.entries.get(current.0).next;
        }
        let fresh = EntryRef(self.entries.alloc());
        self.entries.get_mut(fresh.0).fingerprint = fingerprint;
        self.entries.get_mut(back.0).next = fresh;
        fresh
    }

    /// Read-only chain walk from `head` (inclusive) for an exact
    /// fingerprint match.
    pub fn find_in_chain(&self, head: EntryRef, fingerprint: HashBox) -> Option<EntryRef> {
        let mut current = head;
        while !current.is_null() {
            if self.entries.get(current.0).fingerprint == fingerprint {
                return Some(current);
            }
            current = self.entries.get(current.0).next;
        }
        None
    }

    #[inline]
    pub fn entry(&self, entry: EntryRef) -> &Entry<V> {
        self.entries.get(entry.0)
    }

    #[inline]
    pub fn entry_mut(&mut self, entry: EntryRef) -> &mut Entry<V> {
        self.entries.get_mut(entry.0)
    }

    /// Trie depth in bits.
    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Trie nodes allocated (root included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Entries allocated (chained collision entries included).
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn node_block_count(&self) -> usize {
        self.nodes.block_count()
    }

    pub fn entry_block_count(&self) -> usize {
        self.entries.block_count()
    }
}
