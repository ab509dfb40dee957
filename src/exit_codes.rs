//! Exit code constants for the branchtidy CLI.
//!
//! - 0: Success
//! - 1: Failure (a sync stage failed, cleanup aborted, not a repository, git failure)
//! - 2: Configuration error

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any operation that did not reach its success terminal state.
pub const FAILURE: i32 = 1;

/// The configuration file could not be read, parsed, or validated.
pub const CONFIG_ERROR: i32 = 2;
