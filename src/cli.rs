//! Command-line interface definitions for dupsweep.
//!
//! This module defines all CLI arguments using the clap derive API. Every
//! option that makes sense in scripted use can also be set from the
//! environment.
//!
//! # Example
//!
//! ```bash
//! # Interactive: prompts for the directory and the delete mode
//! dupsweep
//!
//! # Scan a folder, confirm group by group
//! dupsweep ~/Documents/WeChat\ Files --mode group
//!
//! # Keep the audit log somewhere else, no final key press
//! dupsweep ~/Downloads --audit-log ~/dupsweep.log --no-pause
//!
//! # Verbose mode for debugging
//! dupsweep -v ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::actions::DEFAULT_AUDIT_LOG;
use crate::workflow::DeleteMode;

/// Content-based duplicate file sweeper.
///
/// Finds files with identical content (SHA-256), keeps one copy per group
/// (preferring names without copy markers such as "(1)" or "copy"), and
/// deletes the rest after confirmation. Every deletion is appended to an
/// audit log.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (prompted for when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Delete mode; skips the mode prompt but never the confirmation
    #[arg(short, long, value_enum, env = "DUPSWEEP_MODE")]
    pub mode: Option<ModeArg>,

    /// Append-only log of deleted files
    #[arg(long, value_name = "FILE", env = "DUPSWEEP_AUDIT_LOG", default_value = DEFAULT_AUDIT_LOG)]
    pub audit_log: PathBuf,

    /// Match copy markers such as "copy" case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Exit without waiting for a final key press
    #[arg(long)]
    pub no_pause: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress bars and all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Delete mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Delete every duplicate after one confirmation
    All,
    /// Confirm each group separately
    Group,
}

impl From<ModeArg> for DeleteMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::All => DeleteMode::All,
            ModeArg::Group => DeleteMode::ByGroup,
        }
    }
}
