//! Run configuration.
//!
//! A [`Config`] is built once at startup (from command-line flags in
//! `main.rs`) and then passed by reference to the poll loop. Nothing here is
//! global, so tests can run several independent configurations side by side.
//!
//! ## For contributors
//!
//! To add a setting:
//!
//! 1. Add a documented field to [`Config`] and give it a value in the
//!    [`Default`] impl (with a `DEFAULT_*` constant if the CLI shows it).
//! 2. Reject values the loop cannot run with in [`Config::validate`]. Bad
//!    values are errors, never silently clamped.
//! 3. Add the matching flag to `Cli` in `main.rs` and map it in
//!    `Cli::into_config`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::output::OutputMode;

pub const DEFAULT_FREQUENCY_SECS: u64 = 60;
pub const DEFAULT_OUTPUT_PATH: &str = "output/output.json";
pub const DEFAULT_SOURCE_URL: &str = "https://api.chucknorris.io/jokes/random";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Everything a single run needs. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seconds to sleep between the end of one cycle and the start of the next.
    pub frequency_secs: u64,
    /// Configured output path, before any timestamp suffix is applied.
    pub output_path: PathBuf,
    pub output_mode: OutputMode,
    /// Endpoint fetched on every cycle.
    pub source_url: String,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
    /// Stop after this many cycles. `None` runs until the process is killed.
    pub max_iterations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frequency_secs: DEFAULT_FREQUENCY_SECS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_mode: OutputMode::default(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_iterations: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.frequency_secs == 0 {
            return Err(anyhow!("frequency must be > 0 seconds"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request timeout must be > 0 seconds"));
        }
        if self.source_url.trim().is_empty() {
            return Err(anyhow!("source URL must not be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(anyhow!("output path must not be empty"));
        }
        if self
            .output_path
            .to_string_lossy()
            .ends_with(std::path::is_separator)
        {
            return Err(anyhow!(
                "output path {} names a directory, expected a file",
                self.output_path.display()
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(anyhow!("max iterations must be > 0 when set"));
        }
        Ok(())
    }

    pub fn frequency(&self) -> Duration {
        Duration::from_secs(self.frequency_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().expect("default config");
        assert_eq!(cfg.frequency(), Duration::from_secs(60));
        assert_eq!(cfg.output_path, PathBuf::from("output/output.json"));
        assert_eq!(cfg.output_mode, OutputMode::Overwrite);
        assert_eq!(cfg.max_iterations, None);
    }

    #[test]
    fn rejects_zero_frequency() {
        let cfg = Config {
            frequency_secs: 0,
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("frequency"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_blank_url_and_empty_path() {
        let blank_url = Config {
            source_url: "   ".to_string(),
            ..Config::default()
        };
        assert!(blank_url.validate().is_err());

        let empty_path = Config {
            output_path: PathBuf::new(),
            ..Config::default()
        };
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn rejects_output_path_ending_in_separator() {
        let cfg = Config {
            output_path: PathBuf::from("output/"),
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("names a directory"), "{err}");
    }

    #[test]
    fn rejects_zero_max_iterations() {
        let cfg = Config {
            max_iterations: Some(0),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());

        let bounded = Config {
            max_iterations: Some(3),
            ..Config::default()
        };
        bounded.validate().expect("bounded run");
    }
}
