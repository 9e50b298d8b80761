//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent deletion with a single read-only retry
//! - An append-only audit log of every deleted file
//!
//! ```no_run
//! use dupsweep::actions::{Deleter, FileAuditLog};
//! use std::path::Path;
//!
//! let deleter = Deleter::new(FileAuditLog::new("deletion_log.txt"));
//! let outcome = deleter.delete(Path::new("/path/to/duplicate(1).txt"));
//! println!("deleted: {}", outcome.is_success());
//! ```

pub mod audit;
pub mod delete;

// Re-export commonly used types
pub use audit::{AuditEntry, AuditError, AuditSink, FileAuditLog, DEFAULT_AUDIT_LOG};
pub use delete::{DeleteError, Deleter, DeletionOutcome, DeletionSummary};
