//! Composable function wrappers.
//!
//! A memoizing call cache ([`Memoized`], [`TryMemoized`]) plus thin logging,
//! repeating and timing wrappers. All of them implement [`Wrapped`], as do
//! plain closures, so they can be stacked in any order.

pub mod cache;
pub mod cli;
pub mod config;
pub mod demo;
pub mod utils;
pub mod version;
pub mod wrap;

pub use cache::{CacheStats, CallArgs, Keywords, Memoized, TryMemoized, memoize, try_memoize};
pub use wrap::{
    FnMeta, LineBuffer, LogSink, Logged, Named, Repeated, Timed, Wrapped, logged, named, repeat,
    timed,
};
