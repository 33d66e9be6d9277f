//! # Go Snippet Execution
//!
//! Compiles and runs a user-supplied Go snippet inside a disposable
//! module directory, optionally fetching declared import dependencies
//! first, and returns the captured exit code, stdout and stderr as a
//! structured result.
//!
//! The snippet has access to networking, the filesystem and standard
//! packages; no isolation is provided.

mod error;
mod executor;
mod runner;
mod types;
mod workspace;

pub use error::Error;
pub use executor::GoExecutor;
pub use runner::run_command;
pub use types::{CommandOutput, DEFAULT_TIMEOUT, TIMEOUT_EXIT_CODE, TIMEOUT_MESSAGE};
pub use workspace::Workspace;

/// Result type for snippet execution operations
pub type Result<T> = std::result::Result<T, Error>;
