//! Append-only audit log of deleted files.
//!
//! Every successful deletion produces one line:
//!
//! ```text
//! [2024-05-01 13:37:00] user: alice @ host: workstation | deleted file: /data/a(1).txt
//! ```
//!
//! The log is opened in append mode, written and closed for every entry. It
//! is never truncated or read back by this crate.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

/// Default audit log file name, relative to the working directory.
pub const DEFAULT_AUDIT_LOG: &str = "deletion_log.txt";

/// Fallback when the user or host cannot be determined.
const UNKNOWN: &str = "unknown";

/// Error writing an audit entry.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Opening or appending to the log file failed.
    #[error("cannot write audit log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One deletion record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// When the file was deleted.
    pub timestamp: DateTime<Local>,
    /// Operating user.
    pub user: String,
    /// Host the tool ran on.
    pub host: String,
    /// Deleted file.
    pub path: PathBuf,
}

impl AuditEntry {
    /// Build an entry for `path` stamped with the current time, user and host.
    #[must_use]
    pub fn now(path: &Path) -> Self {
        Self {
            timestamp: Local::now(),
            user: current_user(),
            host: current_host(),
            path: path.to_path_buf(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] user: {} @ host: {} | deleted file: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.user,
            self.host,
            self.path.display()
        )
    }
}

/// Destination for audit entries.
pub trait AuditSink {
    /// Persist one entry.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the entry could not be written. Callers
    /// treat this as a warning; the deletion itself stands.
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        (**self).record(entry)
    }
}

/// Plain-text audit log file.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Log to `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let to_err = |source: io::Error| AuditError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_err)?;
        writeln!(file, "{entry}").map_err(to_err)?;
        log::trace!("Audit entry written to {}", self.path.display());
        Ok(())
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn current_host() -> String {
    sysinfo::System::host_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
