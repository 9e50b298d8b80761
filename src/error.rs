//! Structured error handling and exit codes.

use serde::Serialize;

use crate::workflow::RunOutcome;

/// Exit codes for the dupsweep application.
///
/// - 0: Success (duplicates removed, nothing failed)
/// - 1: General error (invalid directory or unexpected failure)
/// - 2: Nothing to do (no duplicates found)
/// - 3: Partial success (some deletions failed)
/// - 4: Cancelled by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: every approved deletion succeeded.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Nothing to do: the scan found no duplicates.
    NothingToDo = 2,
    /// Partial success: at least one deletion failed.
    PartialSuccess = 3,
    /// Cancelled: the operator declined.
    Cancelled = 4,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NothingToDo => "DS002",
            Self::PartialSuccess => "DS003",
            Self::Cancelled => "DS004",
        }
    }
}

impl From<&RunOutcome> for ExitCode {
    fn from(outcome: &RunOutcome) -> Self {
        match outcome {
            RunOutcome::NothingToDo => Self::NothingToDo,
            RunOutcome::Cancelled => Self::Cancelled,
            RunOutcome::Completed(summary) if summary.all_succeeded() => Self::Success,
            RunOutcome::Completed(_) => Self::PartialSuccess,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::DeletionSummary;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NothingToDo.as_i32(), 2);
        assert_eq!(ExitCode::PartialSuccess.as_i32(), 3);
        assert_eq!(ExitCode::Cancelled.as_i32(), 4);
        assert_eq!(ExitCode::Cancelled.code_prefix(), "DS004");
    }

    #[test]
    fn test_exit_code_from_outcome() {
        assert_eq!(ExitCode::from(&RunOutcome::NothingToDo), ExitCode::NothingToDo);
        assert_eq!(ExitCode::from(&RunOutcome::Cancelled), ExitCode::Cancelled);

        let clean = DeletionSummary {
            deleted: 3,
            ..DeletionSummary::default()
        };
        assert_eq!(
            ExitCode::from(&RunOutcome::Completed(clean)),
            ExitCode::Success
        );

        let partial = DeletionSummary {
            deleted: 1,
            failures: vec![(PathBuf::from("/x"), "busy".to_string())],
            audit_warnings: 0,
        };
        assert_eq!(
            ExitCode::from(&RunOutcome::Completed(partial)),
            ExitCode::PartialSuccess
        );
    }

    #[test]
    fn test_structured_error_json() {
        let err = anyhow::anyhow!("Not a directory: /tmp/file.txt");
        let structured = StructuredError::new(&err, ExitCode::GeneralError);
        let json = serde_json::to_string(&structured).unwrap();

        assert!(json.contains("\"code\":\"DS001\""));
        assert!(json.contains("\"exit_code\":1"));
        assert!(json.contains("Not a directory"));
    }
}
