//! The fetch → write → sleep cycle.
//!
//! Runs on the calling thread. Each cycle asks the [`DataSource`] for a
//! payload, throws the payload away and writes [`PLACEHOLDER`] to the output
//! file, then sleeps for the configured interval. Cycles never overlap.
//!
//! Only the one-time directory bootstrap can stop the loop. A failed fetch or
//! write is logged and the next cycle runs after the normal interval, with no
//! retry or backoff.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::output;
use crate::source::DataSource;

/// Record written on every successful fetch in place of the response body.
pub const PLACEHOLDER: &[u8] = b"API response ignored";

/// Counters for a finished (bounded) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub cycles: u64,
    pub files_written: u64,
    pub fetch_errors: u64,
    pub write_errors: u64,
}

/// Drives one [`DataSource`] against one output configuration.
pub struct PollLoop<'a> {
    source: &'a dyn DataSource,
    config: &'a Config,
}

impl<'a> PollLoop<'a> {
    pub fn new(source: &'a dyn DataSource, config: &'a Config) -> Self {
        Self { source, config }
    }

    /// Run until `config.max_iterations` cycles have completed, or forever if
    /// it is unset.
    pub fn run(&self) -> Result<PollSummary> {
        self.run_with_sleep(thread::sleep)
    }

    /// Like [`run`](Self::run), with the end-of-cycle sleep supplied by the
    /// caller.
    pub fn run_with_sleep(&self, mut sleep: impl FnMut(Duration)) -> Result<PollSummary> {
        output::ensure_directories(&self.config.output_path)
            .context("error creating output directories")?;

        let mut summary = PollSummary::default();
        loop {
            summary.cycles += 1;
            self.cycle(summary.cycles, &mut summary);

            if self
                .config
                .max_iterations
                .is_some_and(|max| summary.cycles >= max)
            {
                info!(cycles = summary.cycles, "iteration limit reached");
                return Ok(summary);
            }

            sleep(self.config.frequency());
        }
    }

    fn cycle(&self, n: u64, summary: &mut PollSummary) {
        let body = match self.source.fetch() {
            Ok(body) => body,
            Err(e) => {
                summary.fetch_errors += 1;
                warn!(cycle = n, source = self.source.name(), "error fetching data: {e:#}");
                return;
            }
        };
        debug!(cycle = n, bytes = body.len(), "response discarded");
        drop(body);

        match output::write(PLACEHOLDER, &self.config.output_path, self.config.output_mode) {
            Ok(path) => {
                summary.files_written += 1;
                info!(cycle = n, path = %path.display(), "data saved to file");
            }
            Err(e) => {
                summary.write_errors += 1;
                warn!(cycle = n, "error writing output: {e:#}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
