use std::{path::Path, process::Stdio, time::Duration};
use tokio::{process::Command, time};
use tracing::debug;

use crate::{error::Error, types::CommandOutput};

/// Run one external command to completion, bounded by `timeout`.
///
/// Output streams are captured and whitespace-trimmed. A command that
/// outlives the ceiling is killed and reported with the sentinel exit
/// code rather than an error; only spawn and wait failures become
/// [`Error`]. Single attempt, no retries.
pub async fn run_command(
    argv: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<CommandOutput, Error> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::Process("empty argument vector".to_string()))?;

    debug!(command = %argv.join(" "), cwd = ?cwd, "running command");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let child = command
        .spawn()
        .map_err(|e| Error::Process(format!("Failed to spawn {}: {}", program, e)))?;

    match time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CommandOutput {
            returncode: exit_code(&output.status),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
        Ok(Err(e)) => Err(Error::Process(format!("Failed to wait for {}: {}", program, e))),
        Err(_) => {
            // kill_on_drop reaped the child when the wait future was dropped.
            debug!(command = %argv.join(" "), "command exceeded time ceiling");
            Ok(CommandOutput::timed_out())
        }
    }
}

/// Exit code of a finished process; a signal-terminated child reports
/// the negated signal number.
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    status.code().unwrap_or(-1)
}
