//! Duplicate grouping by content digest.
//!
//! # Overview
//!
//! Every collected path is hashed and filed under its digest. Digests keep
//! the order in which they were first seen, and paths keep their input order
//! within a digest. Only digests shared by two or more paths survive as
//! [`DuplicateGroup`]s; files that could not be hashed are returned
//! separately so they can be reported instead of silently dropped.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::group_by_digest;
//! use dupsweep::scanner::Hasher;
//! use std::path::PathBuf;
//!
//! let paths = vec![PathBuf::from("a.txt"), PathBuf::from("a(1).txt")];
//! let result = group_by_digest(&paths, &Hasher::new(), None);
//!
//! for group in &result.groups {
//!     println!("{}: {} copies", group.hash_hex(), group.len());
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::progress::{ProgressCallback, PHASE_HASHING};
use crate::scanner::{Digest, HashError, Hasher};

/// Confirmed group of files sharing one content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// SHA-256 of the shared content
    pub hash: Digest,
    /// Member paths, in discovery order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(hash: Digest, paths: Vec<PathBuf>) -> Self {
        Self { hash, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (total minus the one kept).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        crate::scanner::hash_to_hex(&self.hash)
    }
}

/// Output of the grouping pass.
#[derive(Debug, Default)]
pub struct GroupingResult {
    /// Groups with two or more members
    pub groups: Vec<DuplicateGroup>,
    /// Files that could not be hashed
    pub unreadable: Vec<HashError>,
    /// Number of files hashed successfully
    pub files_hashed: usize,
}

impl GroupingResult {
    /// Total redundant copies across all groups.
    #[must_use]
    pub fn duplicate_files(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }
}

/// Hash each path and group the paths by digest.
///
/// Unreadable files are logged, collected into
/// [`GroupingResult::unreadable`], and excluded from every group.
pub fn group_by_digest<P: AsRef<Path>>(
    paths: &[P],
    hasher: &Hasher,
    progress: Option<&dyn ProgressCallback>,
) -> GroupingResult {
    let mut order: Vec<Digest> = Vec::new();
    let mut buckets: HashMap<Digest, Vec<PathBuf>> = HashMap::new();
    let mut result = GroupingResult::default();

    if let Some(cb) = progress {
        cb.on_phase_start(PHASE_HASHING, paths.len());
    }

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        if let Some(cb) = progress {
            cb.on_progress(index + 1, &path.to_string_lossy());
        }

        match hasher.full_hash(path) {
            Ok(hash) => {
                result.files_hashed += 1;
                buckets
                    .entry(hash)
                    .or_insert_with(|| {
                        order.push(hash);
                        Vec::new()
                    })
                    .push(path.to_path_buf());
            }
            Err(e) => {
                log::debug!("Cannot read {}: {}", path.display(), e);
                result.unreadable.push(e);
            }
        }
    }

    if let Some(cb) = progress {
        cb.on_phase_end(PHASE_HASHING);
    }

    result.groups = order
        .into_iter()
        .filter_map(|hash| {
            let paths = buckets.remove(&hash)?;
            (paths.len() > 1).then(|| DuplicateGroup::new(hash, paths))
        })
        .collect();

    log::debug!(
        "Grouped {} hashed files into {} duplicate groups ({} unreadable)",
        result.files_hashed,
        result.groups.len(),
        result.unreadable.len()
    );

    result
}
