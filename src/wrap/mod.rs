//! Function wrappers.
//!
//! Every wrapper implements [`Wrapped`], the same trait plain closures get
//! through a blanket impl, so wrappers stack in any order:
//!
//! ```
//! use wrapcall::{logged, memoize, repeat, LogSink, Wrapped};
//!
//! let mut double = repeat(3, logged("double", memoize(|n: u64| n * 2)).with_sink(LogSink::Tracing));
//! assert_eq!(double.invoke(21), Some(42));
//! assert_eq!(double.inner().inner().stats().misses, 1);
//! ```

mod logged;
mod repeat;
mod timed;

pub use logged::{LineBuffer, LogSink, Logged, logged};
pub use repeat::{Repeated, repeat};
pub use timed::{Timed, timed};

/// A callable taking its arguments as a single value `A`.
///
/// Several positional arguments are passed as a tuple.
pub trait Wrapped<A> {
    type Output;

    fn invoke(&mut self, args: A) -> Self::Output;

    /// Name and doc of the innermost named callable, if any.
    fn meta(&self) -> Option<&FnMeta> {
        None
    }

    /// Turns the wrapper back into a plain closure.
    fn into_fn(mut self) -> impl FnMut(A) -> Self::Output
    where
        Self: Sized,
    {
        move |args| self.invoke(args)
    }
}

impl<A, R, F> Wrapped<A> for F
where
    F: FnMut(A) -> R,
{
    type Output = R;

    fn invoke(&mut self, args: A) -> R {
        self(args)
    }
}

/// Name and documentation of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnMeta {
    name: String,
    doc: Option<String>,
}

impl FnMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

/// A callable carrying [`FnMeta`]. Wrappers around it report the same metadata.
pub struct Named<F> {
    inner: F,
    meta: FnMeta,
}

impl<F> Named<F> {
    pub fn new(name: impl Into<String>, inner: F) -> Self {
        Self {
            inner,
            meta: FnMeta::new(name),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.meta.doc = Some(doc.into());
        self
    }

    pub fn meta(&self) -> &FnMeta {
        &self.meta
    }
}

impl<A, F> Wrapped<A> for Named<F>
where
    F: Wrapped<A>,
{
    type Output = F::Output;

    fn invoke(&mut self, args: A) -> Self::Output {
        self.inner.invoke(args)
    }

    fn meta(&self) -> Option<&FnMeta> {
        Some(&self.meta)
    }
}

pub fn named<F>(name: impl Into<String>, inner: F) -> Named<F> {
    Named::new(name, inner)
}

pub(crate) fn display_name<'a>(meta: Option<&'a FnMeta>, label: &'a str) -> &'a str {
    meta.map_or(label, FnMeta::name)
}
