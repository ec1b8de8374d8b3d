//! # hashkv
//!
//! An in-memory key-value map for byte-string keys, indexed by a
//! fixed-depth binary trie over a custom prime-table hash with a
//! chained-collision fallback.
//!
//! ## Architecture
//!
//! Every key is reduced to a `(hash, sum)` fingerprint. The low
//! `max_level` bits of the hash route through a binary trie to a leaf;
//! entries sharing a leaf but differing in the full fingerprint hang
//! off a singly-linked collision chain. Trie nodes and entries live in
//! two independent slab arenas, so inserting never allocates per node
//! and every entry stays put for the lifetime of the map.
//!
//! Entries are identified by fingerprint only, never by the key bytes:
//! two distinct keys that collide on both `hash` and `sum` alias to a
//! single entry and overwrite each other. This is an accepted
//! limitation of the scheme, not a detected condition.
//!
//! ## Example
//!
//! ```rust
//! use hashkv::{HashKv, HashKvError};
//!
//! # fn main() -> Result<(), HashKvError> {
//! let mut map: HashKv<u64> = HashKv::new(8)?;
//! map.set(b"alpha", 1)?;
//! map.set(b"beta", 2)?;
//!
//! assert_eq!(map.get(b"alpha")?, Some(&1));
//! assert_eq!(map.get(b"gamma")?, None);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod arena;
mod err;
pub mod hash;
mod trie;

#[cfg(test)]
mod proptests;

pub use err::HashKvError;
pub use hash::{HashBox, PrimeTable};

use trie::TrieIndex;

/// Smallest supported trie depth.
pub const MIN_MAX_LEVEL: u8 = 4;
/// Largest supported trie depth (full hash width).
pub const MAX_MAX_LEVEL: u8 = 32;

/// Construction-time tuning for a [`HashKv`].
///
/// Only `max_level` is semantic: it fixes how many low hash bits the
/// trie consumes, trading memory for initial bucket width. The arena
/// capacities are performance knobs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trie depth in bits, `4..=32`.
    pub max_level: u8,
    /// Block references the node arena holds before its index doubles.
    pub node_index_capacity: usize,
    /// Trie nodes per node-arena block.
    pub node_block_capacity: u32,
    /// Block references the entry arena holds before its index doubles.
    pub entry_index_capacity: usize,
    /// Entries per entry-arena block.
    pub entry_block_capacity: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: 16,
            node_index_capacity: 32,
            node_block_capacity: 1024,
            entry_index_capacity: 16,
            entry_block_capacity: 1024,
        }
    }
}

/// Structure counters for a [`HashKv`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapStats {
    /// Keys currently holding a value.
    pub len: usize,
    /// Trie nodes allocated, root included.
    pub trie_nodes: usize,
    /// Entries allocated, collision-chain tails included.
    pub entries: usize,
    /// Blocks backing the node arena.
    pub node_blocks: usize,
    /// Blocks backing the entry arena.
    pub entry_blocks: usize,
}

/// A map from byte-string keys to values, backed by the bit trie.
///
/// Mutation takes `&mut self` and lookup takes `&self`; the map has no
/// internal synchronization. Keys must be non-empty. Deletion and
/// iteration are not supported.
pub struct HashKv<V> {
    index: TrieIndex<V>,
    table: PrimeTable,
    len: usize,
}

impl<V> HashKv<V> {
    /// Create a map of trie depth `max_level` with default arena sizing
    /// and the default prime table.
    ///
    /// Fails with [`HashKvError::MaxLevelOutOfRange`] unless
    /// `max_level` is in `4..=32`.
    pub fn new(max_level: u8) -> Result<Self, HashKvError> {
        Self::with_config(Config {
            max_level,
            ..Config::default()
        })
    }

    /// Create a map from an explicit [`Config`].
    pub fn with_config(config: Config) -> Result<Self, HashKvError> {
        Self::with_table(config, PrimeTable::new())
    }

    /// Create a map from an explicit [`Config`] and hash table.
    ///
    /// Maps built with different tables produce unrelated fingerprints;
    /// the table is fixed for the lifetime of the map.
    pub fn with_table(config: Config, table: PrimeTable) -> Result<Self, HashKvError> {
        if !(MIN_MAX_LEVEL..=MAX_MAX_LEVEL).contains(&config.max_level) {
            return Err(HashKvError::MaxLevelOutOfRange {
                max_level: config.max_level,
            });
        }
        Ok(Self {
            index: TrieIndex::new(
                config.max_level,
                config.node_index_capacity,
                config.node_block_capacity,
                config.entry_index_capacity,
                config.entry_block_capacity,
            ),
            table,
            len: 0,
        })
    }

    /// Store `value` under `key`, returning the displaced value if the
    /// key (or a fingerprint-aliasing key) was already present.
    pub fn set(&mut self, key: &[u8], value: V) -> Result<Option<V>, HashKvError> {
        let fingerprint = self.table.fingerprint(key).ok_or(HashKvError::EmptyKey)?;
        let mut entry = self.index.locate(fingerprint);
        if self.index.entry(entry).fingerprint != fingerprint {
            entry = self.index.resolve(entry, fingerprint);
        }
        let displaced = self.index.entry_mut(entry).value.replace(value);
        if displaced.is_none() {
            self.len += 1;
        }
        Ok(displaced)
    }

    /// Look up `key`. Absent keys yield `Ok(None)`.
    ///
    /// Pure: a miss allocates nothing and leaves the trie untouched.
    pub fn get(&self, key: &[u8]) -> Result<Option<&V>, HashKvError> {
        let fingerprint = self.table.fingerprint(key).ok_or(HashKvError::EmptyKey)?;
        let Some(head) = self.index.probe(fingerprint) else {
            return Ok(None);
        };
        let Some(entry) = self.index.find_in_chain(head, fingerprint) else {
            return Ok(None);
        };
        Ok(self.index.entry(entry).value.as_ref())
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &[u8]) -> Result<bool, HashKvError> {
        Ok(self.get(key)?.is_some())
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no key holds a value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The trie depth this map was built with.
    pub fn max_level(&self) -> u8 {
        self.index.max_level()
    }

    /// Structure counters: key count, nodes, entries, arena blocks.
    pub fn stats(&self) -> MapStats {
        MapStats {
            len: self.len,
            trie_nodes: self.index.node_count(),
            entries: self.index.entry_count(),
            node_blocks: self.index.node_block_count(),
            entry_blocks: self.index.entry_block_count(),
        }
    }
}
