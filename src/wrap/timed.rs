use std::time::Duration;

use tracing::debug;

use super::{FnMeta, Wrapped, display_name};
use crate::utils::profiler::{PhaseTiming, Profiler};

/// Measures every call and keeps one [`PhaseTiming`] per invocation.
pub struct Timed<W> {
    inner: W,
    label: String,
    profiler: Profiler,
}

impl<W> Timed<W> {
    pub fn new(label: impl Into<String>, inner: W) -> Self {
        Self {
            inner,
            label: label.into(),
            profiler: Profiler::new(),
        }
    }

    pub fn timings(&self) -> &[PhaseTiming] {
        self.profiler.phases()
    }

    /// Duration of the most recent call.
    pub fn last(&self) -> Option<Duration> {
        self.profiler.phases().last().map(|phase| phase.duration)
    }

    pub fn total(&self) -> Duration {
        self.profiler.total()
    }

    pub fn calls(&self) -> usize {
        self.profiler.phases().len()
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<A, W> Wrapped<A> for Timed<W>
where
    W: Wrapped<A>,
{
    type Output = W::Output;

    fn invoke(&mut self, args: A) -> Self::Output {
        let name = display_name(self.inner.meta(), &self.label).to_owned();
        let inner = &mut self.inner;
        let output = self.profiler.record_phase(name.as_str(), || inner.invoke(args));

        if let Some(elapsed) = self.last() {
            debug!(
                function = %name,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "call finished"
            );
        }

        output
    }

    fn meta(&self) -> Option<&FnMeta> {
        self.inner.meta()
    }
}

pub fn timed<W>(label: impl Into<String>, inner: W) -> Timed<W> {
    Timed::new(label, inner)
}
