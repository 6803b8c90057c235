use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::config::DriverConfig;
use crate::demo::{Driver, Section};
use crate::utils::logger;
use crate::utils::profiler::PhaseTiming;
use crate::version::VERSION;
use crate::wrap::LogSink;

#[derive(Parser, Debug)]
#[command(name = "wrapcall", version = VERSION, about = "Function wrapper demonstrations")]
pub struct WrapCli {
    #[arg(long, global = true)]
    /// Read driver settings from a TOML file.
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Delay of the slow sample functions, in milliseconds.
    sleep_ms: Option<u64>,

    #[arg(long, global = true)]
    /// How many times the repeat section invokes its target.
    repeat: Option<usize>,

    #[arg(long, global = true)]
    /// Print cache statistics as JSON.
    json: bool,

    #[arg(long, global = true)]
    /// Suppress section output; only a summary line is printed.
    quiet: bool,

    #[arg(long, global = true)]
    /// Display per-section timing information.
    time: bool,

    #[command(subcommand)]
    command: Command,
}

impl WrapCli {
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Settings from the config file (if any) with command-line flags on top.
    pub fn driver_config(&self) -> Result<DriverConfig> {
        let mut config = match &self.config {
            Some(path) => DriverConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => DriverConfig::default(),
        };

        if let Some(sleep_ms) = self.sleep_ms {
            config.sleep_ms = sleep_ms;
        }
        if let Some(repeat) = self.repeat {
            config.repeat = repeat;
        }
        config.json |= self.json;
        config.quiet |= self.quiet;

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Runs every demonstration section in order.
    Demo,
    /// Runs a single demonstration section.
    Section {
        #[arg(value_enum)]
        name: Section,
    },
}

pub fn run() -> Result<()> {
    logger::init_logging();
    let cli = WrapCli::parse();
    execute(&cli)
}

pub fn execute(cli: &WrapCli) -> Result<()> {
    let config = cli.driver_config()?;
    debug!(?config, "driver configuration");

    let mut driver = Driver::new(config);
    match cli.command() {
        Command::Demo => {
            driver.run_all()?;
        }
        Command::Section { name } => {
            driver.run(*name)?;
        }
    }

    if let Some(summary) = quiet_summary(&driver) {
        println!("{summary}");
    }

    if cli.time {
        for line in timing_report(driver.timings()) {
            println!("{line}");
        }
    }

    Ok(())
}

/// The one line a quiet run prints in place of its section output.
pub fn quiet_summary(driver: &Driver) -> Option<String> {
    if !driver.config().quiet {
        return None;
    }
    match driver.sink() {
        LogSink::Buffer(buffer) => Some(format!(
            "{} {} line(s) suppressed",
            "quiet".dimmed(),
            buffer.len()
        )),
        _ => None,
    }
}

pub fn timing_report(timings: &[PhaseTiming]) -> Vec<String> {
    let mut lines = vec!["[Timing]".bold().to_string()];
    let mut total = Duration::ZERO;
    for PhaseTiming { name, duration } in timings {
        lines.push(format!("{:>16}: {:>8.2} ms", name, duration.as_secs_f64() * 1000.0));
        total += *duration;
    }
    lines.push(format!("{:>16}: {:>8.2} ms", "Total", total.as_secs_f64() * 1000.0));
    lines
}
