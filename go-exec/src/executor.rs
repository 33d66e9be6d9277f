use std::time::Duration;
use tracing::{debug, info};
use which::which;

use crate::{
    error::Error,
    runner::run_command,
    types::{CommandOutput, DEFAULT_TIMEOUT},
    workspace::Workspace,
};

/// Module name passed to `go mod init` in every workspace.
const MODULE_NAME: &str = "tempmodule";

/// Label prepended to stderr when the dependency fetch stage fails.
const INSTALL_FAILED_PREFIX: &str = "Dependency install failed:";

/// Runs Go snippets through the init → install → write → run pipeline.
pub struct GoExecutor {
    timeout: Duration,
}

impl GoExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Check that the go toolchain is on PATH.
    pub fn check_tools(&self) -> Result<(), Error> {
        which("go").map_err(|_| Error::MissingTool("go".to_string()))?;
        Ok(())
    }

    /// Execute a Go snippet with optional module dependencies.
    ///
    /// The snippet is compiled and run in a fresh module directory with
    /// any requested import paths fetched first. Each pipeline stage is
    /// bounded by the configured timeout; a stage that fails returns
    /// its own diagnostics and skips the rest. A non-zero `returncode`
    /// in the result means the toolchain or the program itself failed.
    ///
    /// The workspace is removed before this returns, whether the
    /// pipeline succeeded or not.
    pub async fn code_exec_go(
        &self,
        code: &str,
        packages: &[String],
    ) -> Result<CommandOutput, Error> {
        let workspace = Workspace::new().await?;
        let cwd = Some(workspace.path());

        let init = run_command(&["go", "mod", "init", MODULE_NAME], cwd, self.timeout).await?;
        if !init.is_success() {
            return Ok(init);
        }

        let install = self.install_dependencies(packages, &workspace).await?;
        if !install.is_success() {
            return Ok(install_failure(install));
        }

        workspace.write_source(code).await?;

        debug!(packages = packages.len(), "running go snippet");
        let result = run_command(&["go", "run", "."], cwd, self.timeout).await?;
        info!(returncode = result.returncode, "go snippet finished");
        Ok(result)
    }

    /// Fetch the requested import paths with `go get`.
    ///
    /// An empty list is a canonical no-op success; no process is
    /// spawned. Otherwise the fetch result is returned verbatim.
    pub async fn install_dependencies(
        &self,
        packages: &[String],
        workspace: &Workspace,
    ) -> Result<CommandOutput, Error> {
        if packages.is_empty() {
            return Ok(CommandOutput::success());
        }

        let mut argv = vec!["go", "get"];
        argv.extend(packages.iter().map(String::as_str));
        run_command(&argv, Some(workspace.path()), self.timeout).await
    }
}

impl Default for GoExecutor {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Rewrite an install-stage failure so the caller can tell it apart
/// from a later compile or run failure. Exit code and stdout pass
/// through untouched.
fn install_failure(install: CommandOutput) -> CommandOutput {
    CommandOutput {
        returncode: install.returncode,
        stdout: install.stdout,
        stderr: format!("{}\n{}", INSTALL_FAILED_PREFIX, install.stderr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TIMEOUT_EXIT_CODE, TIMEOUT_MESSAGE};

    const GO_ADDITION: &str = r#"
package main

import "fmt"

func main() {
    fmt.Println(2 + 2)
}
"#;

    const GO_STDERR_EXIT: &str = r#"
package main

import (
    "fmt"
    "os"
)

func main() {
    fmt.Fprintln(os.Stderr, "boom")
    os.Exit(7)
}
"#;

    const GO_SLEEP: &str = r#"
package main

import "time"

func main() {
    time.Sleep(120 * time.Second)
}
"#;

    fn skip_if_go_missing() -> bool {
        if which("go").is_err() {
            eprintln!("Skipping test: go not available");
            return true;
        }
        false
    }

    #[tokio::test]
    async fn empty_package_list_is_noop_success() -> Result<(), Error> {
        let executor = GoExecutor::new(None);
        let workspace = Workspace::new().await?;

        let result = executor.install_dependencies(&[], &workspace).await?;
        assert_eq!(result, CommandOutput::success());
        Ok(())
    }

    #[test]
    fn install_failure_labels_stderr_only() {
        let raw = CommandOutput {
            returncode: 1,
            stdout: "partial".to_string(),
            stderr: "no such package".to_string(),
        };

        let labeled = install_failure(raw);
        assert_eq!(labeled.returncode, 1);
        assert_eq!(labeled.stdout, "partial");
        assert_eq!(labeled.stderr, "Dependency install failed:\nno such package");
    }

    #[tokio::test]
    async fn install_failure_short_circuits_pipeline() -> Result<(), Error> {
        if skip_if_go_missing() {
            return Ok(());
        }

        // .invalid is reserved and never resolves, so the fetch stage
        // fails whether or not the network is reachable.
        let executor = GoExecutor::new(None);
        let result = executor
            .code_exec_go(
                "package main\nfunc main() {}\n",
                &["example.invalid/nonexistent".to_string()],
            )
            .await?;

        assert_ne!(result.returncode, 0);
        assert!(
            result.stderr.starts_with("Dependency install failed:"),
            "unexpected stderr: {}",
            result.stderr
        );
        Ok(())
    }

    #[tokio::test]
    async fn addition_snippet_prints_four() -> Result<(), Error> {
        if skip_if_go_missing() {
            return Ok(());
        }

        let executor = GoExecutor::new(None);
        let result = executor.code_exec_go(GO_ADDITION, &[]).await?;
        assert_eq!(result.returncode, 0);
        assert_eq!(result.stdout, "4");
        assert!(result.stderr.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn sequential_calls_are_independent() -> Result<(), Error> {
        if skip_if_go_missing() {
            return Ok(());
        }

        let executor = GoExecutor::new(None);
        for _ in 0..2 {
            let result = executor.code_exec_go(GO_ADDITION, &[]).await?;
            assert_eq!(result.returncode, 0);
            assert_eq!(result.stdout, "4");
        }
        Ok(())
    }

    #[tokio::test]
    async fn program_exit_code_and_stderr_pass_through() -> Result<(), Error> {
        if skip_if_go_missing() {
            return Ok(());
        }

        let executor = GoExecutor::new(None);
        let result = executor.code_exec_go(GO_STDERR_EXIT, &[]).await?;
        assert_eq!(result.returncode, 7);
        assert!(result.stderr.contains("boom"));
        Ok(())
    }

    #[tokio::test]
    async fn compile_error_surfaces_diagnostics() -> Result<(), Error> {
        if skip_if_go_missing() {
            return Ok(());
        }

        let executor = GoExecutor::new(None);
        let result = executor
            .code_exec_go("package main\n\nfunc main() { undefined() }\n", &[])
            .await?;
        assert_ne!(result.returncode, 0);
        assert!(!result.stderr.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn long_running_snippet_hits_the_ceiling() -> Result<(), Error> {
        if skip_if_go_missing() {
            return Ok(());
        }

        let executor = GoExecutor::new(Some(Duration::from_secs(20)));
        let result = executor.code_exec_go(GO_SLEEP, &[]).await?;
        assert_eq!(result.returncode, TIMEOUT_EXIT_CODE);
        assert!(result.stdout.is_empty());
        assert_eq!(result.stderr, TIMEOUT_MESSAGE);
        Ok(())
    }
}
