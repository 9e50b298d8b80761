//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Content-digest grouping of collected files
//! - Choosing which copy of each group to keep
//! - Orchestrating the walk and hash phases

pub mod finder;
pub mod groups;
pub mod retention;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{group_by_digest, DuplicateGroup, GroupingResult};
pub use retention::{RetentionDecision, RetentionPolicy, DUPLICATE_INDICATORS};
