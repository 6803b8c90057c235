//! Sample functions and the sections the driver runs through.

use std::cell::Cell;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use thiserror::Error;
use tracing::info;

use crate::cache::{CacheStats, memoize, try_memoize};
use crate::config::DriverConfig;
use crate::utils::profiler::{PhaseTiming, Profiler};
use crate::wrap::{LineBuffer, LogSink, Wrapped, logged, named, repeat, timed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Logger,
    Wraps,
    Cache,
    Repeat,
    Timer,
    Failure,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Logger,
        Section::Wraps,
        Section::Cache,
        Section::Repeat,
        Section::Timer,
        Section::Failure,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Logger => "LOGGER",
            Section::Wraps => "WRAPS",
            Section::Cache => "CACHE",
            Section::Repeat => "REPEAT",
            Section::Timer => "TIMER",
            Section::Failure => "FAILURE",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DemoError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("{0} is not positive")]
    NotPositive(i64),
}

/// Parses a strictly positive integer.
pub fn parse_positive(text: &str) -> Result<u64, DemoError> {
    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| DemoError::NotANumber(text.to_owned()))?;
    if value <= 0 {
        return Err(DemoError::NotPositive(value));
    }
    Ok(value.unsigned_abs())
}

/// Squares `n` after sleeping for `delay`.
pub fn slow_square(n: u64, delay: Duration) -> u64 {
    thread::sleep(delay);
    n.saturating_mul(n)
}

/// What a section left behind besides its printed lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReport {
    pub section: Section,
    pub cache: Option<CacheStats>,
}

/// Runs the demonstration sections, writing every line to one [`LogSink`].
pub struct Driver {
    config: DriverConfig,
    sink: LogSink,
    profiler: Profiler,
}

impl Driver {
    /// Prints to stdout, or collects into a buffer when `config.quiet` is set.
    pub fn new(config: DriverConfig) -> Self {
        let sink = if config.quiet {
            LogSink::Buffer(LineBuffer::new())
        } else {
            LogSink::Stdout
        };
        Self::with_sink(config, sink)
    }

    pub fn with_sink(config: DriverConfig, sink: LogSink) -> Self {
        Self {
            config,
            sink,
            profiler: Profiler::new(),
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Section durations recorded so far.
    pub fn timings(&self) -> &[PhaseTiming] {
        self.profiler.phases()
    }

    pub fn run_all(&mut self) -> Result<Vec<SectionReport>> {
        Section::ALL
            .into_iter()
            .map(|section| self.run(section))
            .collect()
    }

    pub fn run(&mut self, section: Section) -> Result<SectionReport> {
        info!(section = section.title(), "running section");
        let mut profiler = std::mem::take(&mut self.profiler);
        let report = profiler.record_phase(section.title(), || self.run_section(section));
        self.profiler = profiler;
        report.with_context(|| format!("section {} failed", section.title()))
    }

    fn run_section(&self, section: Section) -> Result<SectionReport> {
        self.line(&format!("=== {} ===", section.title()).bold().to_string());
        let cache = match section {
            Section::Logger => {
                self.logger_section();
                None
            }
            Section::Wraps => {
                self.wraps_section();
                None
            }
            Section::Cache => Some(self.cache_section()?),
            Section::Repeat => Some(self.repeat_section()),
            Section::Timer => {
                self.timer_section();
                None
            }
            Section::Failure => Some(self.failure_section()),
        };
        Ok(SectionReport { section, cache })
    }

    fn line(&self, text: &str) {
        self.sink.emit(text);
    }

    fn logger_section(&self) {
        let echo = self.sink.clone();
        let mut some_function = logged("some_function", move |text: &'static str| {
            echo.emit(text);
            0
        })
        .with_sink(self.sink.clone());

        let output = some_function.invoke("hello decorators!");
        self.line(&output.to_string());
    }

    fn wraps_section(&self) {
        let mut add_two_numbers = logged(
            "wrapper",
            named("add_two_numbers", |(first, second): (i64, i64)| {
                first + second
            })
            .with_doc("This function adds two numbers"),
        )
        .with_sink(self.sink.clone());

        if let Some(meta) = Wrapped::<(i64, i64)>::meta(&add_two_numbers) {
            self.line(&format!("{} {}", meta.name(), meta.doc().unwrap_or("")));
        }

        let sum = add_two_numbers.invoke((2, 3));
        self.line(&format!("add_two_numbers(2, 3) = {sum}"));
    }

    fn cache_section(&self) -> Result<CacheStats> {
        let delay = self.config.sleep();
        let mut square = timed("slow_square", memoize(move |n: u64| slow_square(n, delay)));

        for attempt in 1..=2 {
            let value = square.invoke(12);
            let elapsed = square.last().unwrap_or_default();
            self.line(&format!(
                "call {attempt}: slow_square(12) = {value} in {:.2} ms",
                millis(elapsed)
            ));
        }

        let stats = square.inner().stats();
        self.report_stats("slow_square", &stats)?;
        Ok(stats)
    }

    fn repeat_section(&self) -> CacheStats {
        let times = self.config.repeat;

        let echo = self.sink.clone();
        let mut greet = repeat(
            times,
            logged("greet", move |name: &'static str| {
                echo.emit(&format!("hello, {name}!"));
            })
            .with_sink(self.sink.clone()),
        );
        greet.invoke("world");

        let calls = Cell::new(0u32);
        let mut double = repeat(
            times,
            memoize(|n: u64| {
                calls.set(calls.get() + 1);
                n * 2
            }),
        );
        let result = double.invoke(21);
        let stats = double.inner().stats();
        self.line(&format!(
            "repeat({times}) over memoized double -> {}: {} real call(s), {} hit(s)",
            result.map_or_else(|| "nothing".to_owned(), |value| value.to_string()),
            calls.get(),
            stats.hits
        ));
        stats
    }

    fn timer_section(&self) {
        let delay = self.config.sleep();
        let mut slow_identity = timed("slow_identity", move |value: u64| {
            thread::sleep(delay);
            value
        });

        let value = slow_identity.invoke(7);
        self.line(&format!(
            "slow_identity(7) = {value} after {:.2} ms",
            millis(slow_identity.total())
        ));
    }

    fn failure_section(&self) -> CacheStats {
        let attempts = Cell::new(0u32);
        let mut parse = try_memoize(|text: &'static str| {
            attempts.set(attempts.get() + 1);
            parse_positive(text)
        });

        for input in ["-4", "-4", "42", "42"] {
            match parse.call(input) {
                Ok(value) => self.line(&format!("parse_positive({input:?}) = {value}")),
                Err(err) => self.line(&format!("parse_positive({input:?}) failed: {err}")),
            }
        }

        self.line(&format!(
            "{} computation(s) for 4 calls; {} cached",
            attempts.get(),
            parse.len()
        ));
        parse.stats()
    }

    fn report_stats(&self, name: &str, stats: &CacheStats) -> Result<()> {
        if self.config.json {
            let json = serde_json::to_string_pretty(stats)
                .context("failed to serialise cache statistics")?;
            self.line(&json);
        } else {
            self.line(&format!(
                "{name} cache: {} entr{}, {} hit(s), {} miss(es), hit rate {:.0}%",
                stats.entries,
                if stats.entries == 1 { "y" } else { "ies" },
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0
            ));
        }
        Ok(())
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
