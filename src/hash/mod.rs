//! Prime-table key hashing.
//!
//! Keys are reduced to a two-field fingerprint: a `hash` produced by a
//! prime-multiplier recurrence and an independent `sum` checksum. The
//! trie routes on the low bits of `hash`; the full `(hash, sum)` pair
//! discriminates entries that share a leaf. The multiplier table is an
//! explicit value owned by each map rather than a process-wide constant,
//! so independent maps (and tests) can run custom tables.

/// Number of multipliers in a [`PrimeTable`].
pub const PRIME_TABLE_LEN: usize = 257;

/// Checksum multiplier.
const SUM_FACTOR: u32 = 37;

/// The `(hash, sum)` fingerprint of a key.
///
/// Two keys land in the same trie leaf iff the low `max_level` bits of
/// `hash` agree; they are treated as the *same* key iff both fields
/// match exactly. The pair is not collision-proof: distinct keys can
/// produce identical fingerprints and will alias to one entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashBox {
    /// Routing hash; the trie consumes its low bits.
    pub hash: u32,
    /// Independent checksum used only for exact-match discrimination.
    pub sum: u32,
}

/// The 257-entry multiplier table driving the hash recurrence.
///
/// The default table holds the first 257 primes (2 through 1621).
/// Fingerprints are reproducible across runs and processes for a given
/// table and key bytes.
#[derive(Clone)]
pub struct PrimeTable {
    table: [u32; PRIME_TABLE_LEN],
}

impl PrimeTable {
    /// Build the default table: the first 257 primes starting at 2.
    pub fn new() -> Self {
        let mut table = [0u32; PRIME_TABLE_LEN];
        let mut candidate = 2u32;
        let mut found = 0;
        while found < PRIME_TABLE_LEN {
            if is_prime(candidate) {
                table[found] = candidate;
                found += 1;
            }
            candidate += 1;
        }
        Self { table }
    }

    /// Build a table from caller-supplied multipliers.
    ///
    /// All 257 entries must be non-zero, otherwise the recurrence can
    /// get stuck at `hash = 0` for every suffix.
    pub fn from_multipliers(table: [u32; PRIME_TABLE_LEN]) -> Self {
        debug_assert!(table.iter().all(|&m| m != 0));
        Self { table }
    }

    /// Fingerprint a key, or `None` for a zero-length key.
    ///
    /// The recurrence seeds `hash` with the first key byte and then
    /// folds every byte (the first one included, a second time):
    ///
    /// ```text
    /// hash = hash * table[hash % 257] + byte
    /// sum  = sum * 37 + byte              // sum starts at 0
    /// ```
    ///
    /// All arithmetic is u32 with silent wraparound.
    pub fn fingerprint(&self, key: &[u8]) -> Option<HashBox> {
        let first = *key.first()?;
        let mut hash = u32::from(first);
        let mut sum = 0u32;
        for &byte in key {
            let byte = u32::from(byte);
            let mul = self.table[(hash % PRIME_TABLE_LEN as u32) as usize];
            hash = hash.wrapping_mul(mul).wrapping_add(byte);
            sum = sum.wrapping_mul(SUM_FACTOR).wrapping_add(byte);
        }
        Some(HashBox { hash, sum })
    }
}

impl Default for PrimeTable {
    fn default() -> Self {
        Self::new()
    }
}

fn is_prime(n: u32) -> bool {
    if n < 4 {
        return n > 1;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3u32;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
