//! Fetch capability.
//!
//! The poll loop only needs "fetch some bytes or fail". That is the
//! [`DataSource`] trait. The production implementation is [`HttpSource`];
//! tests plug in their own fakes.
//!
//! The payload is never interpreted. A source returns whatever it fetched,
//! and the loop throws it away before writing the placeholder record.
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `file.rs`).
//! 2. Define a struct holding its settings and implement [`DataSource`].
//!    `fetch()` should return `Err` for anything that is not a usable
//!    response; the loop counts it as a failed cycle.
//! 3. Add `mod file;` below and re-export the struct.
//! 4. Construct it in `main.rs` in place of [`HttpSource`].

mod http;

pub use http::HttpSource;

use anyhow::Result;

/// Trait that every data source must implement.
///
/// The poll loop calls [`fetch()`](DataSource::fetch) once per cycle, on the
/// thread that called `PollLoop::run`, and treats any error (transport
/// failure, timeout, non-success status) the same way: log it, skip the
/// write, wait for the next tick.
pub trait DataSource {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch the latest payload.
    fn fetch(&self) -> Result<Vec<u8>>;
}
