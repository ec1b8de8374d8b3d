//! Error types for the `hashkv` crate

/// Errors reported by map construction and the key-based operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HashKvError {
    /// The requested trie depth is outside the supported range.
    ///
    /// The trie indexes the low `max_level` bits of a 32-bit hash, so
    /// the depth must lie in `4..=32`. Construction fails; no map is
    /// created.
    #[error("max_level {max_level} is outside the supported range 4..=32")]
    MaxLevelOutOfRange {
        /// The rejected depth value.
        max_level: u8,
    },

    /// A zero-length key was passed to `set`, `get` or `contains`.
    ///
    /// The hash recurrence is seeded from the first key byte, so there
    /// is no fingerprint for an empty key.
    #[error("keys must be non-empty byte sequences")]
    EmptyKey,
}
