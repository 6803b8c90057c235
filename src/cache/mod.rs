//! Memoizing call cache.
//!
//! [`Memoized`] wraps a callable and keeps one entry per distinct argument
//! value for its whole lifetime. The table is scoped to the wrapper instance;
//! there is no global registry, no eviction and no invalidation.
//!
//! ```
//! use std::cell::Cell;
//! use wrapcall::memoize;
//!
//! let calls = Cell::new(0);
//! let mut add = memoize(|(a, b): (i32, i32)| {
//!     calls.set(calls.get() + 1);
//!     a + b
//! });
//!
//! assert_eq!(add.call((2, 3)), 5);
//! assert_eq!(add.call((2, 3)), 5);
//! assert_eq!(calls.get(), 1);
//! ```

pub mod key;
pub mod memo;
pub mod table;

pub use key::{CallArgs, Keywords, key_digest};
pub use memo::{Memoized, TryMemoized, memoize, try_memoize};
pub use table::{CacheStats, MemoTable};
