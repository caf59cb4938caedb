//! pulse-writer — polls an HTTP endpoint and records each fetch to a file.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  Config  ┌──────────┐  fetch()  ┌───────────┐
//! │ main.rs  │ ───────► │ poll.rs  │ ────────► │ source/   │
//! │  (CLI)   │          │ (cycle)  │           │ (HTTP)    │
//! └──────────┘          └──────────┘           └───────────┘
//!                            │ write()
//!                            ▼
//!                       ┌───────────┐
//!                       │ output.rs │
//!                       └───────────┘
//! ```
//!
//! * **`source/`** — the `DataSource` trait and the HTTP implementation.
//! * **`poll`** — directory bootstrap, then fetch → write → sleep forever
//!   (or for `--max-iterations` cycles).
//! * **`output`** — output modes, timestamped path resolution, file writes.
//! * **`config`** — the validated run configuration.
//! * **`logging`** — tracing subscriber setup.
//! * **`main`** — parses flags and wires everything together.
//!
//! ## For contributors
//!
//! New flags go on [`Cli`] and are copied into [`Config`] by
//! `Cli::into_config`; validation belongs in `Config::validate`, not here.
//! Errors bubble up to [`main`], which prints the whole context chain and
//! exits with status 1.

mod config;
mod logging;
mod output;
mod poll;
mod source;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use config::Config;
use output::OutputMode;
use poll::PollLoop;
use source::HttpSource;

/// Periodically fetch an endpoint and write a record of each fetch to disk.
#[derive(Parser, Debug)]
#[command(name = "pulse-writer", version, about, long_about = None)]
struct Cli {
    /// Frequency of data fetching in seconds
    #[arg(long, default_value_t = config::DEFAULT_FREQUENCY_SECS)]
    frequency: u64,

    /// Output file path
    #[arg(long, default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Output file mode: overwrite, create (new file with timestamp), append
    #[arg(long, default_value_t = OutputMode::Overwrite)]
    output_mode: OutputMode,

    /// API URL
    #[arg(long, default_value = config::DEFAULT_SOURCE_URL)]
    api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout: u64,

    /// Stop after this many cycles instead of running forever
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            frequency_secs: self.frequency,
            output_path: self.output,
            output_mode: self.output_mode,
            source_url: self.api_url,
            request_timeout_secs: self.timeout,
            max_iterations: self.max_iterations,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.into_config();
    config.validate()?;

    info!(
        url = %config.source_url,
        output = %config.output_path.display(),
        mode = %config.output_mode,
        frequency_secs = config.frequency_secs,
        "starting"
    );

    let source = HttpSource::new(&config.source_url, config.request_timeout())?;
    let summary = PollLoop::new(&source, &config).run()?;

    info!(
        cycles = summary.cycles,
        files_written = summary.files_written,
        fetch_errors = summary.fetch_errors,
        write_errors = summary.write_errors,
        "finished"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
