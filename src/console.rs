//! Interactive terminal operator.
//!
//! [`Console`] implements [`Operator`] over any `BufRead`/`Write` pair, so a
//! run can be driven from a real terminal or from an in-memory script.
//!
//! Answers are read one line at a time. End of input is treated as a
//! decline at every gate.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use yansi::Paint;

use crate::actions::{DeletionOutcome, DeletionSummary};
use crate::duplicates::{DuplicateGroup, RetentionDecision, ScanSummary};
use crate::workflow::{DeleteMode, Operator, RunOutcome};

const RULE: &str = "------------------------------------------------------------";

/// Terminal front end for a run.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Take the output sink back (used to inspect scripted sessions).
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: impl std::fmt::Display) {
        // A closed stdout must not abort deletion bookkeeping.
        let _ = writeln!(self.output, "{line}");
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{prompt}");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(e) => {
                log::debug!("Failed to read operator input: {}", e);
                None
            }
        }
    }

    /// Title banner.
    pub fn intro(&mut self) {
        self.say("=== dupsweep: duplicate file cleanup ===".bold());
        self.say("");
    }

    /// Ask for the directory to scan. `None` when nothing usable was entered.
    pub fn prompt_directory(&mut self) -> Option<PathBuf> {
        self.ask("Directory to scan: ")
            .filter(|answer| !answer.is_empty())
            .map(PathBuf::from)
    }

    /// Safety notes shown before hashing starts.
    pub fn show_tips(&mut self, root: &Path) {
        self.say(format!("{} {}", "[selected]".cyan(), root.display()));
        self.say("");
        self.say("Before you continue:");
        self.say("  1. Make sure no other program is using the folder.");
        self.say("  2. Back up anything important first; deletion is permanent.");
        self.say("  3. Duplicates are detected by content (SHA-256), not by name.");
        self.say("  4. Copies whose names contain markers such as '(1)', 'copy' or '副本' are deleted first.");
        self.say("");
    }

    /// Termination banner, then wait for Enter.
    pub fn pause(&mut self) {
        self.say("");
        self.say("[exit] dupsweep has finished.".dim());
        let _ = self.ask("Press Enter to exit...");
    }

    fn present_decision(&mut self, decision: &RetentionDecision) {
        self.say(format!("  keep:   {}", decision.keep.display()));
        for (i, path) in decision.candidates.iter().enumerate() {
            self.say(format!("  {:>3}. {}", i + 1, path.display()));
        }
    }

    fn present_summary(&mut self, summary: &DeletionSummary) {
        self.say("");
        self.say("=== Cleanup complete ===".bold());
        self.say(format!("Files deleted: {}", summary.success_count()));
        if !summary.all_succeeded() {
            self.say(format!("Files not deleted: {}", summary.failure_count()).red());
            for (path, reason) in &summary.failures {
                self.say(format!("  - {}: {}", path.display(), reason));
            }
        }
        if summary.audit_warnings > 0 {
            self.say(format!(
                "{} {} deletion(s) could not be written to the audit log",
                "[warning]".yellow(),
                summary.audit_warnings
            ));
        }
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn choose_mode(&mut self) -> DeleteMode {
        self.say("");
        self.say("Choose a delete mode:");
        self.say("  1. Type 'delete-all' or '1' to delete every duplicate");
        self.say("  2. Type 'delete-by-group' or '2' to confirm group by group");
        self.say("  3. Type anything else to cancel");
        self.ask("Your choice: ")
            .map_or(DeleteMode::Cancel, |answer| DeleteMode::parse(&answer))
    }

    fn confirm_all(&mut self, candidates: usize) -> bool {
        self.say("");
        self.say(format!(
            "{} {candidates} file(s) will be permanently deleted. Make sure you have a backup.",
            "[warning]".yellow().bold()
        ));
        self.ask("Type yes to continue, anything else to cancel: ")
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes"))
    }

    fn confirm_group(&mut self, index: usize, total: usize, decision: &RetentionDecision) -> bool {
        self.say("");
        self.say(format!("Group {}/{}:", index + 1, total));
        self.present_decision(decision);
        let prompt = format!(
            "Delete these {} duplicate file(s)? (y/n): ",
            decision.candidates.len()
        );
        self.ask(&prompt)
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
    }

    fn present_scan(&mut self, summary: &ScanSummary, groups: &[DuplicateGroup]) {
        self.say(format!(
            "{} {} files collected, {} hashed.",
            "[scanned]".cyan(),
            summary.total_files,
            summary.files_hashed
        ));
        if !summary.scan_errors.is_empty() {
            self.say(format!(
                "{} {} entries could not be listed (run with -v for details).",
                "[warning]".yellow(),
                summary.scan_errors.len()
            ));
        }
        for err in &summary.unreadable {
            self.say(format!("{} {}", "[unreadable]".yellow(), err));
        }

        if groups.is_empty() {
            return;
        }

        self.say("");
        self.say(format!(
            "{} {} duplicate file(s) in {} group(s) (same content, any name).",
            "[found]".green().bold(),
            summary.duplicate_files,
            groups.len()
        ));
        self.say("");
        for (idx, group) in groups.iter().enumerate() {
            self.say(format!(
                "Group {} [{}]: identical content",
                idx + 1,
                &group.hash_hex()[..12]
            ));
            for path in &group.paths {
                self.say(format!("  -> {}", path.display()));
            }
            self.say(RULE);
        }
    }

    fn on_group_skipped(&mut self, _index: usize, _decision: &RetentionDecision) {
        self.say("Skipped this group.");
    }

    fn on_before_delete(&mut self, path: &Path, index: usize, total: usize) {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.say(format!("Deleting {}/{}: {}", index + 1, total, name));
    }

    fn on_deleted(&mut self, outcome: &DeletionOutcome) {
        if outcome.forced && outcome.is_success() {
            self.say(format!(
                "{} cleared read-only flag on {}",
                "[note]".cyan(),
                outcome.path.display()
            ));
        }
        if let Err(e) = &outcome.result {
            self.say(format!("{} {}", "[failed]".red(), e));
        }
        if let Some(warning) = &outcome.audit_warning {
            self.say(format!("{} {}", "[warning]".yellow(), warning));
        }
    }

    fn on_finished(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::NothingToDo => {
                self.say("");
                self.say(format!(
                    "{} No duplicate files found. Nothing to do.",
                    "[done]".green()
                ));
            }
            RunOutcome::Cancelled => {
                self.say("");
                self.say(format!(
                    "{} Operation cancelled. No files were deleted.",
                    "[cancelled]".yellow()
                ));
            }
            RunOutcome::Completed(summary) => self.present_summary(summary),
        }
    }
}
