//! dupsweep - content-based duplicate file sweeper
//!
//! Finds files with identical content (SHA-256) beneath a directory, keeps
//! one copy per group using a filename heuristic, and deletes the rest
//! after operator confirmation, recording each deletion in an append-only
//! audit log.

pub mod actions;
pub mod cli;
pub mod config;
pub mod console;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;
pub mod workflow;

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actions::{Deleter, FileAuditLog};
use crate::cli::Cli;
use crate::config::SweepConfig;
use crate::console::Console;
use crate::duplicates::FinderConfig;
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::workflow::Workflow;

/// Run the application against the process's terminal.
///
/// # Errors
///
/// Fails when no directory is given or the directory is invalid.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = SweepConfig::from_cli(&cli);
    if !config.color {
        yansi::disable();
    }

    let mut console = Console::stdio();
    run_with_console(&config, &mut console)
}

/// Run one sweep, talking to the operator through `console`.
///
/// # Errors
///
/// Fails when no directory is given or the directory is invalid. Per-file
/// problems never fail the run; they are reported and reflected in the
/// returned [`ExitCode`].
pub fn run_with_console<R: BufRead, W: Write>(
    config: &SweepConfig,
    console: &mut Console<R, W>,
) -> Result<ExitCode> {
    console.intro();

    let root = match &config.root {
        Some(root) => root.clone(),
        None => console
            .prompt_directory()
            .context("No directory given")?,
    };

    duplicates::DuplicateFinder::validate_root(&root).context("Cannot scan")?;
    console.show_tips(&root);

    let finder_config = FinderConfig::default()
        .with_progress_callback(Arc::new(Progress::new(config.quiet)));
    let deleter = Deleter::new(FileAuditLog::new(&config.audit_log));

    let mut workflow = Workflow::new(root, deleter, &mut *console)
        .with_policy(config.retention_policy())
        .with_mode(config.mode)
        .with_finder_config(finder_config);

    let outcome = workflow.run().context("Cannot scan")?;
    Ok(ExitCode::from(&outcome))
}
