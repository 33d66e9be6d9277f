use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exit code reported when a command exceeds its time ceiling.
pub const TIMEOUT_EXIT_CODE: i32 = -2;

/// Message placed in stderr when a command exceeds its time ceiling.
pub const TIMEOUT_MESSAGE: &str = "Error: Execution timed out";

/// Default per-command time ceiling.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Captured outcome of one external command.
///
/// Serializes to exactly three keys: `returncode`, `stdout`, `stderr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit status of the process, or [`TIMEOUT_EXIT_CODE`].
    pub returncode: i32,
    /// Captured standard output, whitespace-trimmed.
    pub stdout: String,
    /// Captured standard error, whitespace-trimmed.
    pub stderr: String,
}

impl CommandOutput {
    /// Canonical success with empty streams.
    pub fn success() -> Self {
        Self {
            returncode: 0,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Sentinel outcome for a command that exceeded its ceiling.
    pub fn timed_out() -> Self {
        Self {
            returncode: TIMEOUT_EXIT_CODE,
            stdout: String::new(),
            stderr: TIMEOUT_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.returncode == 0
    }
}
