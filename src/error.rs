//! Error types for the branchtidy CLI.
//!
//! Uses thiserror for derive macros. Per-branch deletion failures and a
//! missing branch listing are not errors: they are reported as data by the
//! cleanup report. Only conditions that stop a whole operation live here.

use crate::exit_codes;
use crate::sync::SyncStage;
use thiserror::Error;

/// Main error type for branchtidy operations.
#[derive(Error, Debug)]
pub enum TidyError {
    /// The working directory is not inside a git repository.
    #[error("not inside a git repository. Run this command from within a git repository.")]
    NotARepository,

    /// The environment prevented running git at all (e.g. git is not installed).
    #[error("{0}")]
    Environment(String),

    /// The configuration file is unreadable or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A git command failed where the caller cannot continue.
    #[error("git {command} failed: {detail}")]
    Git { command: String, detail: String },

    /// The sync controller stopped in a non-success terminal stage.
    #[error("{stage}: {detail}")]
    Sync { stage: SyncStage, detail: String },

    /// Cleanup could not switch to trunk and was aborted before any deletion.
    #[error("cleanup aborted: could not switch to '{trunk}': {detail}")]
    SwitchFailed { trunk: String, detail: String },
}

impl TidyError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TidyError::Config(_) => exit_codes::CONFIG_ERROR,
            TidyError::NotARepository
            | TidyError::Environment(_)
            | TidyError::Git { .. }
            | TidyError::Sync { .. }
            | TidyError::SwitchFailed { .. } => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for branchtidy operations.
pub type Result<T> = std::result::Result<T, TidyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_has_config_exit_code() {
        let err = TidyError::Config("trunk_branch must not be empty".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn operational_errors_exit_with_failure() {
        let errors = [
            TidyError::NotARepository,
            TidyError::Environment("git missing".to_string()),
            TidyError::Git {
                command: "branch".to_string(),
                detail: "boom".to_string(),
            },
            TidyError::Sync {
                stage: SyncStage::DirtyWorkingTree,
                detail: " M README.md".to_string(),
            },
            TidyError::SwitchFailed {
                trunk: "main".to_string(),
                detail: "error: pathspec".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_codes::FAILURE, "{err}");
        }
    }

    #[test]
    fn error_messages_carry_stage_and_detail() {
        let err = TidyError::Sync {
            stage: SyncStage::MergeConflict,
            detail: "UU src/lib.rs".to_string(),
        };
        assert_eq!(err.to_string(), "merge conflict: UU src/lib.rs");

        let err = TidyError::SwitchFailed {
            trunk: "main".to_string(),
            detail: "local changes would be overwritten".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cleanup aborted: could not switch to 'main': local changes would be overwritten"
        );
    }
}
