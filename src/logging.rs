//! Tracing setup.
//!
//! Log lines go to stderr in compact format. `RUST_LOG` wins when set;
//! otherwise the level is `info`, or `debug` with `--verbose`.
//!
//! ```bash
//! RUST_LOG=pulse_writer=trace pulse-writer --frequency 5
//! ```
//!
//! ## For contributors
//!
//! Log through the `tracing` macros with structured fields (`cycle`, `path`,
//! `source`) rather than formatting values into the message. Per-cycle
//! failures are `warn!`, successful writes are `info!`, and anything only
//! useful while debugging is `debug!`. The output files are the product; log
//! lines never go to stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
