use tracing::trace;

use super::{FnMeta, Wrapped};

/// Invokes the inner callable a fixed number of times per call and keeps
/// only the last result.
///
/// Yields `None` when `times` is zero; the inner callable is then never run.
pub struct Repeated<W> {
    inner: W,
    times: usize,
}

impl<W> Repeated<W> {
    pub fn new(times: usize, inner: W) -> Self {
        Self { inner, times }
    }

    pub fn times(&self) -> usize {
        self.times
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<A, W> Wrapped<A> for Repeated<W>
where
    A: Clone,
    W: Wrapped<A>,
{
    type Output = Option<W::Output>;

    fn invoke(&mut self, args: A) -> Self::Output {
        let mut last = None;
        for round in 0..self.times {
            trace!(round, times = self.times, "repeat");
            last = Some(self.inner.invoke(args.clone()));
        }
        last
    }

    fn meta(&self) -> Option<&FnMeta> {
        self.inner.meta()
    }
}

pub fn repeat<W>(times: usize, inner: W) -> Repeated<W> {
    Repeated::new(times, inner)
}
