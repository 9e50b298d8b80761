//! Scan, confirm and delete: the run state machine.
//!
//! # Overview
//!
//! A [`Workflow`] drives one run over a root directory:
//!
//! 1. **Collect / hash / group** through [`DuplicateFinder`]
//! 2. **Report** every group to the [`Operator`]; stop with
//!    [`RunOutcome::NothingToDo`] when there are none
//! 3. **Mode selection**: [`DeleteMode::All`] asks one upfront question,
//!    [`DeleteMode::ByGroup`] asks once per group, [`DeleteMode::Cancel`]
//!    stops with [`RunOutcome::Cancelled`]
//! 4. **Delete** each approved group's candidates in policy order
//! 5. **Summarize** into a [`DeletionSummary`]
//!
//! All interaction goes through the [`Operator`] trait, so the state machine
//! runs the same against a terminal or a scripted test double.
//!
//! The only error that escapes [`Workflow::run`] is an invalid root; every
//! per-file problem is folded into the outcome.

use std::path::{Path, PathBuf};

use crate::actions::{AuditSink, Deleter, DeletionOutcome, DeletionSummary};
use crate::duplicates::{
    DuplicateFinder, DuplicateGroup, FinderConfig, FinderError, RetentionDecision,
    RetentionPolicy, ScanSummary,
};

/// How the operator wants duplicates removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Delete every candidate after one confirmation.
    All,
    /// Confirm each group separately.
    ByGroup,
    /// Delete nothing.
    Cancel,
}

impl DeleteMode {
    /// Interpret a typed mode selection.
    ///
    /// `delete-all`/`1` and `delete-by-group`/`2` are accepted, ignoring
    /// surrounding whitespace and case. Anything else cancels.
    ///
    /// ```
    /// use dupsweep::workflow::DeleteMode;
    ///
    /// assert_eq!(DeleteMode::parse(" 1 "), DeleteMode::All);
    /// assert_eq!(DeleteMode::parse("Delete-By-Group"), DeleteMode::ByGroup);
    /// assert_eq!(DeleteMode::parse("no thanks"), DeleteMode::Cancel);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "delete-all" | "1" => Self::All,
            "delete-by-group" | "2" => Self::ByGroup,
            _ => Self::Cancel,
        }
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No duplicate groups were found.
    NothingToDo,
    /// The operator declined; no file was deleted.
    Cancelled,
    /// Deletion ran; failures may be present.
    Completed(DeletionSummary),
}

/// The person (or script) steering a run.
///
/// Only the decision methods are required. The presentation hooks default
/// to doing nothing.
pub trait Operator {
    /// Pick a deletion mode.
    fn choose_mode(&mut self) -> DeleteMode;

    /// Approve deleting `candidates` files across all groups.
    fn confirm_all(&mut self, candidates: usize) -> bool;

    /// Approve one group's deletions. `index` is 0-based.
    fn confirm_group(&mut self, index: usize, total: usize, decision: &RetentionDecision) -> bool;

    /// Scan results, shown before any question is asked.
    fn present_scan(&mut self, _summary: &ScanSummary, _groups: &[DuplicateGroup]) {}

    /// A group was declined in per-group mode.
    fn on_group_skipped(&mut self, _index: usize, _decision: &RetentionDecision) {}

    /// About to delete candidate `index` (0-based) of `total` in a group.
    fn on_before_delete(&mut self, _path: &Path, _index: usize, _total: usize) {}

    /// A deletion attempt finished.
    fn on_deleted(&mut self, _outcome: &DeletionOutcome) {}

    /// The run reached a terminal state.
    fn on_finished(&mut self, _outcome: &RunOutcome) {}
}

impl<O: Operator + ?Sized> Operator for &mut O {
    fn choose_mode(&mut self) -> DeleteMode {
        (**self).choose_mode()
    }

    fn confirm_all(&mut self, candidates: usize) -> bool {
        (**self).confirm_all(candidates)
    }

    fn confirm_group(&mut self, index: usize, total: usize, decision: &RetentionDecision) -> bool {
        (**self).confirm_group(index, total, decision)
    }

    fn present_scan(&mut self, summary: &ScanSummary, groups: &[DuplicateGroup]) {
        (**self).present_scan(summary, groups);
    }

    fn on_group_skipped(&mut self, index: usize, decision: &RetentionDecision) {
        (**self).on_group_skipped(index, decision);
    }

    fn on_before_delete(&mut self, path: &Path, index: usize, total: usize) {
        (**self).on_before_delete(path, index, total);
    }

    fn on_deleted(&mut self, outcome: &DeletionOutcome) {
        (**self).on_deleted(outcome);
    }

    fn on_finished(&mut self, outcome: &RunOutcome) {
        (**self).on_finished(outcome);
    }
}

/// One duplicate-removal run over a root directory.
pub struct Workflow<O, S> {
    root: PathBuf,
    mode: Option<DeleteMode>,
    finder: DuplicateFinder,
    policy: RetentionPolicy,
    deleter: Deleter<S>,
    operator: O,
}

impl<O: Operator, S: AuditSink> Workflow<O, S> {
    /// Create a workflow with the default finder and retention policy.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, deleter: Deleter<S>, operator: O) -> Self {
        Self {
            root: root.into(),
            mode: None,
            finder: DuplicateFinder::new(FinderConfig::default()),
            policy: RetentionPolicy::default(),
            deleter,
            operator,
        }
    }

    /// Use a specific retention policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skip the mode question and use `mode`. Confirmations are still asked.
    #[must_use]
    pub fn with_mode(mut self, mode: Option<DeleteMode>) -> Self {
        self.mode = mode;
        self
    }

    /// Use a specific finder configuration (for example a progress display).
    #[must_use]
    pub fn with_finder_config(mut self, config: FinderConfig) -> Self {
        self.finder = DuplicateFinder::new(config);
        self
    }

    /// Borrow the operator.
    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Take the operator back.
    pub fn into_operator(self) -> O {
        self.operator
    }

    /// Execute the run.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] when the root is not an existing directory.
    /// Nothing is hashed or deleted in that case.
    pub fn run(&mut self) -> Result<RunOutcome, FinderError> {
        let (groups, scan) = self.finder.find_duplicates(&self.root)?;
        self.operator.present_scan(&scan, &groups);

        let outcome = self.resolve(&groups, &scan);
        match &outcome {
            RunOutcome::NothingToDo => log::info!("No duplicate files found"),
            RunOutcome::Cancelled => log::info!("Operation cancelled by operator"),
            RunOutcome::Completed(summary) => log::info!("{}", summary.summary()),
        }
        self.operator.on_finished(&outcome);
        Ok(outcome)
    }

    fn resolve(&mut self, groups: &[DuplicateGroup], scan: &ScanSummary) -> RunOutcome {
        if groups.is_empty() {
            return RunOutcome::NothingToDo;
        }

        let mode = match self.mode {
            Some(mode) => mode,
            None => self.operator.choose_mode(),
        };
        log::debug!("Delete mode: {:?}", mode);

        match mode {
            DeleteMode::Cancel => return RunOutcome::Cancelled,
            DeleteMode::All => {
                if !self.operator.confirm_all(scan.duplicate_files) {
                    return RunOutcome::Cancelled;
                }
            }
            DeleteMode::ByGroup => {}
        }

        let mut summary = DeletionSummary::default();
        let total = groups.len();
        for (index, group) in groups.iter().enumerate() {
            let decision = self.policy.decide(group);
            if mode == DeleteMode::ByGroup
                && !self.operator.confirm_group(index, total, &decision)
            {
                log::debug!("Group {} skipped by operator", index + 1);
                self.operator.on_group_skipped(index, &decision);
                continue;
            }
            self.delete_candidates(&decision, &mut summary);
        }

        RunOutcome::Completed(summary)
    }

    fn delete_candidates(&mut self, decision: &RetentionDecision, summary: &mut DeletionSummary) {
        let total = decision.candidates.len();
        for (index, path) in decision.candidates.iter().enumerate() {
            self.operator.on_before_delete(path, index, total);
            let outcome = self.deleter.delete(path);
            summary.record(&outcome);
            self.operator.on_deleted(&outcome);
        }
    }
}
