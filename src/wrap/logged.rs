use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use super::{FnMeta, Wrapped, display_name};

/// Shared, growable list of emitted lines.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Rc<RefCell<Vec<String>>>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}

/// Where logging wrappers write their markers.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    #[default]
    Stdout,
    Tracing,
    Buffer(LineBuffer),
}

impl LogSink {
    pub fn emit(&self, line: &str) {
        match self {
            LogSink::Stdout => println!("{line}"),
            LogSink::Tracing => info!("{line}"),
            LogSink::Buffer(buffer) => buffer.push(line),
        }
    }
}

/// Writes `<name>: start` before and `<name>: end` after every call.
///
/// The name comes from the inner callable's [`FnMeta`] when it has one,
/// otherwise from the label given at construction. A panicking target leaves
/// the end marker unwritten.
pub struct Logged<W> {
    inner: W,
    label: String,
    sink: LogSink,
}

impl<W> Logged<W> {
    pub fn new(label: impl Into<String>, inner: W) -> Self {
        Self {
            inner,
            label: label.into(),
            sink: LogSink::default(),
        }
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<A, W> Wrapped<A> for Logged<W>
where
    W: Wrapped<A>,
{
    type Output = W::Output;

    fn invoke(&mut self, args: A) -> Self::Output {
        let name = display_name(self.inner.meta(), &self.label).to_owned();

        debug!(function = %name, "start");
        self.sink.emit(&format!("{name}: start"));
        let output = self.inner.invoke(args);
        self.sink.emit(&format!("{name}: end"));
        debug!(function = %name, "end");

        output
    }

    fn meta(&self) -> Option<&FnMeta> {
        self.inner.meta()
    }
}

pub fn logged<W>(label: impl Into<String>, inner: W) -> Logged<W> {
    Logged::new(label, inner)
}
