//! Output file writing.
//!
//! Every successful poll cycle ends here: the payload is written to the
//! configured path under one of three [`OutputMode`] disciplines.
//!
//! * **Overwrite** truncates the file on every write.
//! * **CreateTimestamped** writes a fresh file per call, named after the
//!   configured path with a `_YYYYMMDDHHMMSS` suffix on the stem.
//! * **Append** extends the existing file.
//!
//! The target path for timestamped files is computed at write time, not when
//! the configuration is loaded, so consecutive cycles land in different files
//! as long as they are at least one second apart.

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

/// `strftime` pattern for the suffix added in [`OutputMode::CreateTimestamped`].
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// How each write treats the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Truncate and rewrite the configured file.
    #[default]
    Overwrite,
    /// Create a new, timestamp-suffixed file per write.
    CreateTimestamped,
    /// Append to the configured file.
    Append,
}

impl OutputMode {
    /// The canonical command-line spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Overwrite => "overwrite",
            OutputMode::CreateTimestamped => "create",
            OutputMode::Append => "append",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(OutputMode::Overwrite),
            "create" | "create-timestamped" => Ok(OutputMode::CreateTimestamped),
            "append" => Ok(OutputMode::Append),
            other => anyhow::bail!(
                "unknown output mode '{other}' (expected one of: overwrite, create, append)"
            ),
        }
    }
}

/// Create the parent directory of `path` and any missing ancestors.
///
/// Does nothing when `path` has no directory component or sits directly under
/// the filesystem root. Succeeds silently if the directories already exist.
pub fn ensure_directories(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.parent().is_none() {
        return Ok(());
    }

    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create output directory {}", parent.display()))
}

/// Work out which file a write in `mode` should go to, using the current
/// local time for timestamped names.
pub fn resolve_target(path: &Path, mode: OutputMode) -> PathBuf {
    resolve_target_at(path, mode, Local::now().naive_local())
}

/// Like [`resolve_target`], but with an explicit clock reading.
pub fn resolve_target_at(path: &Path, mode: OutputMode, now: NaiveDateTime) -> PathBuf {
    match mode {
        OutputMode::Overwrite | OutputMode::Append => path.to_path_buf(),
        OutputMode::CreateTimestamped => {
            // Assembled as an OsString so non-UTF-8 names keep their bytes.
            let mut file_name = OsString::new();
            file_name.push(path.file_stem().unwrap_or_default());
            file_name.push("_");
            file_name.push(now.format(TIMESTAMP_FORMAT).to_string());
            if let Some(ext) = path.extension() {
                file_name.push(".");
                file_name.push(ext);
            }

            match path.parent() {
                Some(dir) => dir.join(file_name),
                None => PathBuf::from(file_name),
            }
        }
    }
}

/// Write `bytes` to `path` under `mode`.
///
/// Returns the path that was actually written, which differs from `path` in
/// [`OutputMode::CreateTimestamped`]. Partial writes are not rolled back.
pub fn write(bytes: &[u8], path: &Path, mode: OutputMode) -> Result<PathBuf> {
    let target = resolve_target(path, mode);
    write_to(bytes, &target, mode)?;
    Ok(target)
}

/// Write to an already resolved target.
fn write_to(bytes: &[u8], target: &Path, mode: OutputMode) -> Result<()> {
    ensure_directories(target)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true);
    match mode {
        OutputMode::Append => options.append(true),
        OutputMode::Overwrite | OutputMode::CreateTimestamped => options.truncate(true),
    };

    // The handle is dropped (and the file closed) on every return path.
    let mut file = options
        .open(target)
        .with_context(|| format!("failed to open output file {}", target.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("failed to write output file {}", target.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
