//! Retention policy: which copy of a duplicate group survives.
//!
//! Messaging and sync clients name a second copy of a file with a marker
//! such as `(1)`, `copy` or `副本`. Files carrying one of these markers in
//! their file name sort after unmarked files, and ties are broken by the
//! full path so the decision is reproducible. The first file after sorting
//! is kept; the rest are deletion candidates in sorted order.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::DuplicateGroup;

/// File name markers that suggest a file is a redundant copy.
pub const DUPLICATE_INDICATORS: [&str; 6] = ["(1)", "副本", "copy", "(2)", "(副本)", "_副本"];

/// Keep/delete split for one duplicate group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionDecision {
    /// The file that survives.
    pub keep: PathBuf,
    /// Files to delete, in deletion order.
    pub candidates: Vec<PathBuf>,
}

/// Filename heuristic used to pick the surviving file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    case_sensitive: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetentionPolicy {
    /// Policy matching indicators case-insensitively (`Copy` counts as `copy`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            case_sensitive: false,
        }
    }

    /// Policy matching indicators exactly as written.
    #[must_use]
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    /// Whether the file name of `path` contains a duplicate indicator.
    ///
    /// Only the final path component is inspected, so a directory named
    /// `copy` does not mark every file inside it.
    #[must_use]
    pub fn is_marked(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        let name = if self.case_sensitive {
            name.into_owned()
        } else {
            name.to_lowercase()
        };
        DUPLICATE_INDICATORS
            .iter()
            .any(|indicator| name.contains(indicator))
    }

    /// Split a group into the file to keep and the files to delete.
    ///
    /// A group always has at least two members, so `keep` always exists.
    #[must_use]
    pub fn decide(&self, group: &DuplicateGroup) -> RetentionDecision {
        let mut ranked: Vec<(bool, &PathBuf)> = group
            .paths
            .iter()
            .map(|path| (self.is_marked(path), path))
            .collect();
        ranked.sort_by(|a, b| compare_ranked(*a, *b));

        let mut sorted = ranked.into_iter().map(|(_, path)| path.clone());
        let keep = sorted.next().unwrap_or_default();
        let candidates: Vec<PathBuf> = sorted.collect();

        log::debug!(
            "Keeping {} and deleting {} other copies",
            keep.display(),
            candidates.len()
        );

        RetentionDecision { keep, candidates }
    }
}

/// Unmarked before marked, then by raw path bytes.
fn compare_ranked(a: (bool, &PathBuf), b: (bool, &PathBuf)) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| a.1.as_os_str().cmp(b.1.as_os_str()))
}
