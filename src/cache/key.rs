use std::collections::BTreeMap;
use std::collections::btree_map;
use std::hash::{Hash, Hasher};

use ahash::AHasher;

/// Named arguments of a call.
///
/// Stored sorted by name, so the order in which keywords are supplied never
/// changes the resulting cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keywords<V>(BTreeMap<String, V>);

impl<V> Keywords<V> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets `name`, returning the value it replaces.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V> Default for Keywords<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, V> FromIterator<(N, V)> for Keywords<V>
where
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}

impl<V> IntoIterator for Keywords<V> {
    type Item = (String, V);
    type IntoIter = btree_map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Positional arguments (a tuple, usually) together with keyword arguments.
///
/// The whole value is both the cache key and what the wrapped callable
/// receives on a miss, so keywords are never lost on the way through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallArgs<P, V> {
    pub positional: P,
    pub keywords: Keywords<V>,
}

impl<P, V> CallArgs<P, V> {
    pub fn new(positional: P) -> Self {
        Self {
            positional,
            keywords: Keywords::new(),
        }
    }

    pub fn kw(mut self, name: impl Into<String>, value: V) -> Self {
        self.keywords.insert(name, value);
        self
    }

    pub fn keyword(&self, name: &str) -> Option<&V> {
        self.keywords.get(name)
    }
}

/// 64-bit digest of a key, for log fields.
///
/// `AHasher::default()` seeds its keys once per process, so digests can be
/// compared within one run but not across runs.
pub fn key_digest<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = AHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}
