//! Permanent file deletion with a read-only retry.
//!
//! # Overview
//!
//! [`Deleter::delete`] removes a single file. When removal is refused for
//! lack of permission it clears the file's read-only attribute (on Unix,
//! only the owner write bit is added) and tries once more. If that attempt
//! fails too, the file's original permissions are restored. Failures are returned as a [`DeletionOutcome`], never raised,
//! so one stubborn file cannot stop a run. Each successful deletion is
//! recorded through an [`AuditSink`]; an audit failure is attached to the
//! outcome as a warning and does not undo the deletion.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::{Deleter, FileAuditLog};
//! use std::path::Path;
//!
//! let deleter = Deleter::new(FileAuditLog::new("deletion_log.txt"));
//! let outcome = deleter.delete(Path::new("/path/to/duplicate(1).txt"));
//! if let Err(e) = &outcome.result {
//!     eprintln!("Failed: {}", e);
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::audit::{AuditEntry, AuditError, AuditSink};

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied, even after clearing the read-only attribute.
    #[error("permission denied: {0} (still refused after clearing read-only flag)")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of one deletion attempt.
#[derive(Debug)]
pub struct DeletionOutcome {
    /// Path that was targeted.
    pub path: PathBuf,
    /// Whether the file is gone.
    pub result: Result<(), DeleteError>,
    /// Whether the read-only attribute had to be cleared first.
    pub forced: bool,
    /// Audit log failure, reported separately from the deletion result.
    pub audit_warning: Option<AuditError>,
}

impl DeletionOutcome {
    /// Check if the file was deleted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated outcomes of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    /// Number of files deleted.
    pub deleted: usize,
    /// Failed deletions with their reasons, in attempt order.
    pub failures: Vec<(PathBuf, String)>,
    /// Number of successful deletions whose audit entry could not be written.
    pub audit_warnings: usize,
}

impl DeletionSummary {
    /// Fold one outcome into the totals.
    pub fn record(&mut self, outcome: &DeletionOutcome) {
        match &outcome.result {
            Ok(()) => self.deleted += 1,
            Err(e) => self.failures.push((outcome.path.clone(), e.to_string())),
        }
        if outcome.audit_warning.is_some() {
            self.audit_warnings += 1;
        }
    }

    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.deleted
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Deleted {} file(s)", self.deleted)
        } else {
            format!(
                "Deleted {} file(s), {} failed",
                self.deleted,
                self.failure_count()
            )
        }
    }
}

/// Deletion executor bound to an audit sink.
#[derive(Debug, Clone)]
pub struct Deleter<S> {
    audit: S,
}

impl<S: AuditSink> Deleter<S> {
    /// Create a deleter that records successes in `audit`.
    #[must_use]
    pub fn new(audit: S) -> Self {
        Self { audit }
    }

    /// Audit sink in use.
    #[must_use]
    pub fn audit(&self) -> &S {
        &self.audit
    }

    /// Permanently delete one file.
    ///
    /// A missing file is a failure, not a no-op: callers must not ask for
    /// the same path twice.
    pub fn delete(&self, path: &Path) -> DeletionOutcome {
        let mut forced = false;
        let result = match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                log::info!(
                    "Permission denied, clearing read-only flag and retrying: {}",
                    path.display()
                );
                forced = true;
                remove_writable(path)
            }
            Err(e) => Err(e),
        }
        .map_err(|e| DeleteError::from_io(path, e));

        let audit_warning = match &result {
            Ok(()) => {
                log::info!("Permanently deleted: {}", path.display());
                self.audit.record(&AuditEntry::now(path)).err()
            }
            Err(e) => {
                log::debug!("Failed to delete {}: {}", path.display(), e);
                None
            }
        };

        if let Some(ref warning) = audit_warning {
            log::debug!("Audit entry not written: {}", warning);
        }

        DeletionOutcome {
            path: path.to_path_buf(),
            result,
            forced,
            audit_warning,
        }
    }
}

/// Make `path` writable and remove it. If removal still fails, the
/// original permissions are put back.
fn remove_writable(path: &Path) -> io::Result<()> {
    let original = fs::metadata(path)?.permissions();
    fs::set_permissions(path, owner_writable(&original))?;

    fs::remove_file(path).inspect_err(|_| {
        if let Err(e) = fs::set_permissions(path, original) {
            log::warn!("Could not restore permissions on {}: {}", path.display(), e);
        }
    })
}

#[cfg(unix)]
fn owner_writable(permissions: &fs::Permissions) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    fs::Permissions::from_mode((permissions.mode() & 0o7777) | 0o200)
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn owner_writable(permissions: &fs::Permissions) -> fs::Permissions {
    let mut permissions = permissions.clone();
    permissions.set_readonly(false);
    permissions
}
