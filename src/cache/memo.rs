use std::hash::Hash;

use tracing::debug;

use super::key::key_digest;
use super::table::{CacheStats, MemoTable};
use crate::wrap::{FnMeta, Wrapped};

/// Memoizing wrapper: runs the inner callable at most once per distinct
/// argument value and hands out clones of the stored result afterwards.
///
/// The argument value is the key. On a miss the inner callable receives the
/// full argument value and the result is stored only once it has returned,
/// so a panicking computation leaves its key absent.
pub struct Memoized<A, W>
where
    W: Wrapped<A>,
{
    inner: W,
    table: MemoTable<A, W::Output>,
}

impl<A, W> Memoized<A, W>
where
    W: Wrapped<A>,
{
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            table: MemoTable::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.table.stats()
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<A, W> Memoized<A, W>
where
    A: Hash + Eq + Clone,
    W: Wrapped<A>,
    W::Output: Clone,
{
    pub fn call(&mut self, args: A) -> W::Output {
        if let Some(result) = self.table.lookup(&args) {
            debug!(key = key_digest(&args), "cache hit");
            return result.clone();
        }

        debug!(key = key_digest(&args), "cache miss");
        let result = self.inner.invoke(args.clone());
        self.table.insert(args, result.clone());
        result
    }

    pub fn contains(&self, args: &A) -> bool {
        self.table.contains(args)
    }

    /// Stored result for `args`, without counting a lookup.
    pub fn cached(&self, args: &A) -> Option<&W::Output> {
        self.table.peek(args)
    }
}

impl<A, W> Wrapped<A> for Memoized<A, W>
where
    A: Hash + Eq + Clone,
    W: Wrapped<A>,
    W::Output: Clone,
{
    type Output = W::Output;

    fn invoke(&mut self, args: A) -> Self::Output {
        self.call(args)
    }

    fn meta(&self) -> Option<&FnMeta> {
        self.inner.meta()
    }
}

/// Memoizing wrapper for fallible callables.
///
/// Only `Ok` values are stored. An `Err` is returned to the caller untouched
/// and the key stays absent, so the next call with the same arguments runs
/// the computation again.
pub struct TryMemoized<A, T, W> {
    inner: W,
    table: MemoTable<A, T>,
}

impl<A, T, W> TryMemoized<A, T, W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            table: MemoTable::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.table.stats()
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<A, T, E, W> TryMemoized<A, T, W>
where
    A: Hash + Eq + Clone,
    T: Clone,
    W: Wrapped<A, Output = Result<T, E>>,
{
    pub fn call(&mut self, args: A) -> Result<T, E> {
        if let Some(value) = self.table.lookup(&args) {
            debug!(key = key_digest(&args), "cache hit");
            return Ok(value.clone());
        }

        let digest = key_digest(&args);
        debug!(key = digest, "cache miss");
        match self.inner.invoke(args.clone()) {
            Ok(value) => {
                self.table.insert(args, value.clone());
                Ok(value)
            }
            Err(err) => {
                debug!(key = digest, "computation failed, not cached");
                Err(err)
            }
        }
    }

    pub fn contains(&self, args: &A) -> bool {
        self.table.contains(args)
    }
}

impl<A, T, E, W> Wrapped<A> for TryMemoized<A, T, W>
where
    A: Hash + Eq + Clone,
    T: Clone,
    W: Wrapped<A, Output = Result<T, E>>,
{
    type Output = Result<T, E>;

    fn invoke(&mut self, args: A) -> Self::Output {
        self.call(args)
    }

    fn meta(&self) -> Option<&FnMeta> {
        self.inner.meta()
    }
}

pub fn memoize<A, W>(inner: W) -> Memoized<A, W>
where
    W: Wrapped<A>,
{
    Memoized::new(inner)
}

pub fn try_memoize<A, T, E, W>(inner: W) -> TryMemoized<A, T, W>
where
    W: Wrapped<A, Output = Result<T, E>>,
{
    TryMemoized::new(inner)
}
