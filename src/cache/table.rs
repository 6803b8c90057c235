use std::hash::Hash;

use ahash::AHashMap;
use serde::Serialize;

/// Unbounded key → result map that counts hits and misses.
///
/// Entries are only ever added; nothing is evicted or removed.
#[derive(Debug, Clone)]
pub struct MemoTable<K, V> {
    entries: AHashMap<K, V>,
    hits: u64,
    misses: u64,
}

impl<K, V> MemoTable<K, V> {
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<K, V> MemoTable<K, V>
where
    K: Hash + Eq,
{
    /// Looks up `key`, counting the outcome as a hit or a miss.
    pub fn lookup(&mut self, key: &K) -> Option<&V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Looks up `key` without touching the counters.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores the result for a key that missed. An existing entry is kept.
    pub fn insert(&mut self, key: K, value: V) -> &V {
        self.entries.entry(key).or_insert(value)
    }
}

impl<K, V> Default for MemoTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the table, `0.0` before the first call.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}
