//! Command-line arguments
//!
//! Positional values mirror the classic `prodcon <p> <c> <buffer> [runs]`
//! invocation; everything else is an optional flag.

use std::ffi::OsString;
use std::time::Duration;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};

use crate::engine::Pacing;
use crate::pipeline::{DEFAULT_RUNS, PipelineConfig, PipelineError};

/// Which shared accumulator backs the global totals
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobalStore {
    /// One mutex around the whole accumulator
    #[default]
    Locked,
    /// Sharded maps with an atomic grand total
    Sharded,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "prodcon")]
#[command(about = "Bounded-buffer producer/consumer sales aggregation")]
#[command(version)]
#[command(after_help = "Example:\n  prodcon 4 3 10\n  prodcon 4 3 10 50000 --max-delay-ms 0")]
pub struct Args {
    /// Number of producer threads
    #[arg(value_name = "PRODUCERS", value_parser = clap::value_parser!(u32).range(1..))]
    pub producers: u32,

    /// Number of consumer threads
    #[arg(value_name = "CONSUMERS", value_parser = clap::value_parser!(u32).range(1..))]
    pub consumers: u32,

    /// Queue capacity
    #[arg(value_name = "BUFFER_SIZE", value_parser = clap::value_parser!(u32).range(1..))]
    pub buffer_size: u32,

    /// Total number of records to produce
    #[arg(
        value_name = "RUNS",
        default_value_t = DEFAULT_RUNS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub runs: u64,

    /// Shortest pause between two productions
    #[arg(long = "min-delay-ms", value_name = "MS", default_value_t = 5)]
    pub min_delay_ms: u64,

    /// Longest pause between two productions (0 disables pausing)
    #[arg(long = "max-delay-ms", value_name = "MS", default_value_t = 40)]
    pub max_delay_ms: u64,

    /// Global accumulator backend
    #[arg(long = "global-store", value_enum, default_value_t = GlobalStore::Locked)]
    pub global_store: GlobalStore,

    /// Seed for reproducible record generation (producer N uses seed + N)
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse the process arguments, printing usage and exiting on failure
    pub fn parse_with_usage() -> Self {
        Self::try_parse_with_usage(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse arguments, attaching the usage line to every error
    ///
    /// Clap only prints usage for structural errors; value errors such as
    /// `prodcon 0 1 1` would otherwise show just the message.
    pub fn try_parse_with_usage<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(with_usage)
    }

    /// Production pacing derived from the delay flags
    pub fn pacing(&self) -> Pacing {
        if self.max_delay_ms == 0 {
            return Pacing::none();
        }
        Pacing::between(
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }

    /// Validated pipeline configuration
    pub fn pipeline_config(&self) -> Result<PipelineConfig, PipelineError> {
        Ok(PipelineConfig::new(
            self.producers as usize,
            self.consumers as usize,
            self.buffer_size as usize,
            self.runs,
        )?
        .with_pacing(self.pacing()))
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn with_usage(mut err: clap::Error) -> clap::Error {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        return err;
    }

    let usage = Args::command().render_usage();
    err.insert(ContextKind::Usage, ContextValue::StyledStr(usage));
    err
}
