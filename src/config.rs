//! Run configuration.
//!
//! dupsweep reads no configuration file. Everything a run needs is gathered
//! once from the command line (and its environment fallbacks) into a
//! [`SweepConfig`], which is then handed to the components explicitly.

use std::path::PathBuf;

use crate::actions::DEFAULT_AUDIT_LOG;
use crate::cli::Cli;
use crate::duplicates::RetentionPolicy;
use crate::workflow::DeleteMode;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Directory to scan; `None` means ask the operator.
    pub root: Option<PathBuf>,
    /// Audit log file.
    pub audit_log: PathBuf,
    /// Preselected delete mode.
    pub mode: Option<DeleteMode>,
    /// Match copy markers case-sensitively.
    pub case_sensitive: bool,
    /// Hide progress bars.
    pub quiet: bool,
    /// Colored console output.
    pub color: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root: None,
            audit_log: PathBuf::from(DEFAULT_AUDIT_LOG),
            mode: None,
            case_sensitive: false,
            quiet: false,
            color: true,
        }
    }
}

impl SweepConfig {
    /// Build the configuration from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            root: cli.path.clone(),
            audit_log: cli.audit_log.clone(),
            mode: cli.mode.map(DeleteMode::from),
            case_sensitive: cli.case_sensitive,
            quiet: cli.quiet,
            color: !cli.no_color,
        }
    }

    /// Retention policy matching the case-sensitivity setting.
    #[must_use]
    pub fn retention_policy(&self) -> RetentionPolicy {
        if self.case_sensitive {
            RetentionPolicy::case_sensitive()
        } else {
            RetentionPolicy::new()
        }
    }
}
