//! Duplicate finder: walk, hash and group in one pass.
//!
//! # Overview
//!
//! This module orchestrates the detection pipeline:
//! 1. **Collect**: walk the root and gather every regular file
//! 2. **Hash & group**: hash each file and group by digest
//!    (see [`crate::duplicates::groups`])
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! println!("Found {} duplicate groups", groups.len());
//! println!("{} files could not be read", summary.unreadable.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::progress::{ProgressCallback, PHASE_WALKING};
use crate::scanner::{HashError, Hasher, ScanError, Walker};

use super::groups::{group_by_digest, DuplicateGroup};

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Optional progress callback for the walking and hashing phases
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl FinderConfig {
    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of regular files collected by the walk
    pub total_files: usize,
    /// Number of files hashed successfully
    pub files_hashed: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Number of redundant copies (excluding one kept file per group)
    pub duplicate_files: usize,
    /// Files that could not be hashed and were left out of grouping
    pub unreadable: Vec<HashError>,
    /// Errors encountered while walking the tree
    pub scan_errors: Vec<ScanError>,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Duplicate finder that runs the collect and hash/group phases.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Check that `path` names an existing directory.
    ///
    /// # Errors
    ///
    /// `PathNotFound` if nothing exists at `path`, `NotADirectory` otherwise.
    pub fn validate_root(path: &Path) -> Result<(), FinderError> {
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }
        Ok(())
    }

    /// Collect every regular file beneath `path`.
    ///
    /// Walk errors are recorded in `summary` and otherwise skipped.
    pub fn collect_files(&self, path: &Path, summary: &mut ScanSummary) -> Vec<PathBuf> {
        let callback = self.config.progress_callback.as_deref();
        if let Some(cb) = callback {
            cb.on_phase_start(PHASE_WALKING, 0);
        }

        let walker = Walker::new(path);
        let mut files = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(file) => {
                    files.push(file);
                    if let Some(cb) = callback {
                        cb.on_progress(files.len(), &files[files.len() - 1].to_string_lossy());
                    }
                }
                Err(e) => summary.scan_errors.push(e),
            }
        }

        if let Some(cb) = callback {
            cb.on_phase_end(PHASE_WALKING);
        }

        summary.total_files = files.len();
        log::info!("Collected {} files under {}", files.len(), path.display());
        files
    }

    /// Find all duplicate files beneath `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if `path` is not an existing directory. No
    /// file is hashed in that case.
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        Self::validate_root(path)?;

        log::info!("Starting duplicate scan of {}", path.display());

        let mut summary = ScanSummary::default();
        let files = self.collect_files(path, &mut summary);

        let grouping = group_by_digest(&files, &self.hasher, self.config.progress_callback.as_deref());

        summary.files_hashed = grouping.files_hashed;
        summary.duplicate_groups = grouping.groups.len();
        summary.duplicate_files = grouping.duplicate_files();
        summary.unreadable = grouping.unreadable;
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} groups, {} redundant copies, {} unreadable files in {:.2?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.unreadable.len(),
            summary.scan_duration
        );

        Ok((grouping.groups, summary))
    }
}
